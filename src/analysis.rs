//! The analysis command
//!
//! Groups records by one or more analysis fields and prints a statistics
//! report for each, optionally with a combinatoric tally across the fields
//! and a text chart per field.

use std::path::PathBuf;

use serde_json::Value;

use crate::error::JlensError;
use crate::input::{Line, parse_record};
use crate::json::display_value;
use crate::render::{ChartRenderer, ChartRequest, Renderer, chart_path};
use crate::stats::{Combinations, Diagnostic, distinct_values, group, report};

/// Fields analyzed by `--analyze all` unless the config overrides them
pub const ALL_PARAMS: [&str; 7] = [
    "bimodal_discount",
    "set_size",
    "num_people",
    "num_interests",
    "avg_points",
    "think_through",
    "percent_chain_of_thought",
];

/// Chart output settings
#[derive(Debug, Clone, Default)]
pub struct ChartOptions {
    /// Input file; charts go to a directory named after it
    pub input: Option<PathBuf>,
    pub multiple_colors: bool,
    pub show: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub fields: Vec<String>,
    pub y_field: Option<String>,
    pub min_n: usize,
    pub combine: bool,
    pub chart: Option<ChartOptions>,
}

/// Expand `all` into the configured or built-in parameter list
pub fn expand_fields(requested: &[String], configured: Option<&[String]>) -> Vec<String> {
    if requested.iter().any(|field| field == "all") {
        match configured {
            Some(params) => params.to_vec(),
            None => ALL_PARAMS.iter().map(|p| p.to_string()).collect(),
        }
    } else {
        requested.to_vec()
    }
}

/// Parsed records plus the input line each came from
struct Records {
    values: Vec<Value>,
    lines: Vec<usize>,
}

impl Records {
    fn parse(renderer: &mut dyn Renderer, lines: &[Line]) -> Result<Self, JlensError> {
        let mut records = Records {
            values: Vec::with_capacity(lines.len()),
            lines: Vec::with_capacity(lines.len()),
        };
        for line in lines {
            match parse_record(line) {
                Ok(value) => {
                    records.values.push(value);
                    records.lines.push(line.index);
                }
                Err(e) => {
                    log::debug!("Line {} failed to parse: {}", line.index, e);
                    renderer.paragraph(&format!(
                        "Problem on line {} is not valid JSON",
                        line.index
                    ))?;
                }
            }
        }
        Ok(records)
    }

    fn print_diagnostics(
        &self,
        renderer: &mut dyn Renderer,
        diagnostics: &[Diagnostic],
    ) -> Result<(), JlensError> {
        if diagnostics.is_empty() {
            return Ok(());
        }
        let text = diagnostics
            .iter()
            .map(|d| format!("  Line {}: {}", self.lines[d.record], d.error))
            .collect::<Vec<_>>()
            .join("\n");
        renderer.paragraph(&text)
    }
}

/// Run the analysis over the selected lines
pub fn run_analysis(
    renderer: &mut dyn Renderer,
    charts: &mut dyn ChartRenderer,
    lines: &[Line],
    options: &AnalysisOptions,
) -> Result<(), JlensError> {
    let records = Records::parse(renderer, lines)?;
    renderer.heading(1, "Analysis")?;
    renderer.paragraph(&format!("Loaded {} records", records.values.len()))?;
    if let Some(y) = &options.y_field {
        renderer.paragraph(&format!("Y-value: {}", y))?;
    }

    if options.combine && !options.fields.is_empty() {
        renderer.heading(2, "Combinations")?;
        let combinations = Combinations::tally(&records.values, &options.fields);
        records.print_diagnostics(renderer, combinations.diagnostics())?;
        renderer.paragraph(&combinations.to_string())?;
    }

    let mut chart_dir = None;
    for field in &options.fields {
        renderer.heading(2, field)?;

        let distinct = distinct_values(&records.values, field);
        if let [only] = distinct.as_slice() {
            renderer.paragraph(&format!(
                "Skipping {} because all values are the same: {}",
                field,
                display_value(only)
            ))?;
            continue;
        }

        let grouping = group(
            &records.values,
            field,
            options.y_field.as_deref(),
            options.min_n,
        );
        records.print_diagnostics(renderer, grouping.diagnostics())?;
        renderer.paragraph(&report(&grouping))?;

        if let Some(chart) = &options.chart {
            let y_label = options.y_field.as_deref().unwrap_or("count");
            let request = ChartRequest {
                grouping: &grouping,
                output: chart_path(chart.input.as_deref(), field, y_label),
                multiple_colors: chart.multiple_colors,
                show: chart.show,
            };
            if let Some(path) = charts.render(&request)? {
                renderer.paragraph(&format!("Chart saved as: {}", path.display()))?;
                chart_dir = path.parent().map(|dir| dir.to_path_buf());
            }
        }
    }

    if let Some(dir) = chart_dir {
        renderer.paragraph("")?;
        renderer.paragraph(&format!("Charts saved in: {}", dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod analysis_tests;
