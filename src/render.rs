//! Output rendering
//!
//! Everything the tool prints goes through a [`Renderer`]: headings, code
//! blocks and paragraphs. [`ConsoleRenderer`] colours its output and keeps a
//! plain transcript that can be exported; [`PlainRenderer`] writes bare text
//! and cannot export. Charts have their own [`ChartRenderer`] seam.

mod ansi;
pub mod chart;
mod console;
mod layout;
mod plain;

pub use chart::{ChartRenderer, ChartRequest, TextChartRenderer, chart_path};
pub use console::ConsoleRenderer;
pub use plain::PlainRenderer;

use std::path::Path;

use crate::config::DEFAULT_WIDTH;
use crate::error::JlensError;

/// Hint for how a code block should be coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Source code of unknown flavour, coloured like Python
    Code,
    Python,
    Diff,
    Json,
    Markdown,
}

/// Display settings fixed for the lifetime of a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: usize,
    /// Longer paragraphs and code blocks are cut with a truncation note
    pub max_str_len: Option<usize>,
    /// Emit ANSI colours; the transcript is always plain
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: DEFAULT_WIDTH,
            max_str_len: None,
            color: true,
        }
    }
}

pub trait Renderer {
    /// Print a heading; level 1 is the most prominent, 3 the least
    fn heading(&mut self, level: u8, text: &str) -> Result<(), JlensError>;

    fn code_block(
        &mut self,
        text: &str,
        language: Language,
        line_numbers: bool,
    ) -> Result<(), JlensError>;

    fn paragraph(&mut self, text: &str) -> Result<(), JlensError>;

    /// Save everything printed so far; `.html` paths get HTML, others text
    fn export(&self, path: &Path) -> Result<(), JlensError>;
}
