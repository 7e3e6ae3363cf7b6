// Configuration type definitions

use serde::Deserialize;

/// Default console width in columns
pub const DEFAULT_WIDTH: usize = 100;

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_filter_output() -> String {
    "output.jsonl".to_string()
}

fn default_min_n() -> usize {
    1
}

/// Display configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default)]
    pub line_numbers: bool,
    #[serde(default)]
    pub max_str_len: Option<usize>,
    /// Plain output: no colours and no transcript export
    #[serde(default)]
    pub plain: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: DEFAULT_WIDTH,
            line_numbers: false,
            max_str_len: None,
            plain: false,
        }
    }
}

/// Manual filter configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_filter_output")]
    pub output: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            output: default_filter_output(),
        }
    }
}

/// Analysis configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_min_n")]
    pub min_n: usize,
    #[serde(default)]
    pub y_value: Option<String>,
    /// Replaces the built-in parameter list used by `--analyze all`
    #[serde(default)]
    pub params: Option<Vec<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            min_n: default_min_n(),
            y_value: None,
            params: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}
