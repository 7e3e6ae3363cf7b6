//! The record loop
//!
//! Prints the selected lines one record at a time, or the structure of the
//! first one. Ctrl-C sets a shared flag that is checked before each record
//! and after each filter prompt; quitting at the prompt stops the loop the
//! same way. Either way the loop ends normally and the filter summary is
//! printed.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::display::{render_raw, render_record};
use crate::error::JlensError;
use crate::filter::{Decision, FilterSink, ask};
use crate::input::{Line, Selected, parse_record};
use crate::render::{Language, Renderer};
use crate::schema::{RangeTable, summarize};

/// How records are printed and filtered
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Parts to print; `None` prints every leaf key
    pub parts: Option<Vec<String>>,
    pub line_numbers: bool,
    pub raw: bool,
    pub max_str_len: Option<usize>,
    /// Number headings 1..N in selection order instead of by input line
    pub renumber: bool,
    /// Ask about every record and append accepted ones here
    pub filter_output: Option<PathBuf>,
    /// Name of the input, for the filter summary
    pub source: String,
    /// Selection start, for the resume hint
    pub start: usize,
    /// Resuming makes no sense after a shuffle
    pub randomized: bool,
}

/// What happened during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Records visited, valid or not
    pub visited: usize,
    pub included: usize,
    pub interrupted: bool,
}

/// Print the record counts before anything else
pub fn report_counts(
    renderer: &mut dyn Renderer,
    total: usize,
    selected: &Selected,
    searched: bool,
) -> Result<(), JlensError> {
    renderer.paragraph(&format!("Found {} problems", total))?;
    if searched {
        renderer.paragraph(&format!("After searching, found {} problems", selected.matched))?;
    }
    Ok(())
}

/// Print the structure of the first selected record
///
/// With `with_ranges`, every selected record that parses contributes to the
/// value ranges shown next to each field.
pub fn print_structure(
    renderer: &mut dyn Renderer,
    lines: &[Line],
    with_ranges: bool,
    line_numbers: bool,
) -> Result<(), JlensError> {
    let Some(first) = lines.first() else {
        return renderer.paragraph("No problems to show");
    };
    renderer.heading(1, &format!("JSON Structure (problem {})", first.index))?;

    let record = match parse_record(first) {
        Ok(record) => record,
        Err(e) => {
            log::debug!("Line {} failed to parse: {}", first.index, e);
            return renderer.paragraph(&format!(
                "Problem on line {} is not valid JSON",
                first.index
            ));
        }
    };

    let ranges = with_ranges.then(|| {
        let records: Vec<_> = lines.iter().filter_map(|line| parse_record(line).ok()).collect();
        RangeTable::from_records(&records)
    });
    renderer.code_block(
        &summarize(&record, ranges.as_ref()),
        Language::Python,
        line_numbers,
    )
}

pub struct Session<'a> {
    options: &'a SessionOptions,
    interrupt: &'a AtomicBool,
}

impl<'a> Session<'a> {
    pub fn new(options: &'a SessionOptions, interrupt: &'a AtomicBool) -> Self {
        Self { options, interrupt }
    }

    /// Print every line, asking about each one when filtering
    ///
    /// `input` and `output` carry the filter prompt; they are untouched when
    /// no filter output is configured.
    pub fn run<R: BufRead, W: Write>(
        &self,
        renderer: &mut dyn Renderer,
        lines: &[Line],
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome, JlensError> {
        let options = self.options;
        let mut sink = options.filter_output.as_ref().map(FilterSink::new);
        let mut outcome = Outcome::default();

        for (position, line) in lines.iter().enumerate() {
            if self.interrupt.load(Ordering::SeqCst) {
                log::debug!("Interrupted before line {}", line.index);
                outcome.interrupted = true;
                break;
            }
            outcome.visited += 1;

            let number = if options.renumber {
                position + 1
            } else {
                line.index
            };
            renderer.heading(1, &format!("Problem {}", number))?;

            let record = match parse_record(line) {
                Ok(record) => record,
                Err(e) => {
                    log::debug!("Line {} failed to parse: {}", line.index, e);
                    renderer.paragraph(&format!(
                        "Problem on line {} is not valid JSON",
                        line.index
                    ))?;
                    continue;
                }
            };

            if options.raw {
                render_raw(renderer, &record, options.max_str_len, options.line_numbers)?;
            } else {
                render_record(
                    renderer,
                    &record,
                    options.parts.as_deref(),
                    options.line_numbers,
                )?;
            }

            if let Some(sink) = sink.as_mut() {
                let mut decision = ask(input, output, sink.path())?;
                // Ctrl-C while the prompt was open wins over the answer
                if self.interrupt.load(Ordering::SeqCst) {
                    decision = Decision::Quit;
                }
                match decision {
                    Decision::Include => sink.append(&record)?,
                    Decision::Skip => {}
                    Decision::Quit => {
                        outcome.interrupted = true;
                        break;
                    }
                }
            }
        }

        if let Some(sink) = sink {
            outcome.included = sink.included();
            self.filter_summary(renderer, &sink, &outcome)?;
        }
        Ok(outcome)
    }

    fn filter_summary(
        &self,
        renderer: &mut dyn Renderer,
        sink: &FilterSink,
        outcome: &Outcome,
    ) -> Result<(), JlensError> {
        let options = self.options;
        renderer.paragraph("")?;
        renderer.heading(1, "Manual Filtering Statistics")?;
        renderer.paragraph(&format!(
            "Manually selected {} problems from {}.",
            sink.included(),
            options.source
        ))?;
        if !options.randomized {
            // The last visited record was never confirmed, so resume on it
            let last = (options.start + outcome.visited).saturating_sub(1);
            renderer.code_block(
                &format!(
                    "From lines: {} to {}. Next time use `--start {}` to resume.",
                    options.start, last, last
                ),
                Language::Markdown,
                false,
            )?;
        }
        let path = sink.path().display();
        renderer.code_block(
            &format!("Output to file: {}, use `jlens {}` to view.", path, path),
            Language::Markdown,
            false,
        )
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
