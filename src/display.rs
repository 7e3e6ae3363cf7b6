//! Record printing
//!
//! Prints the requested parts of a record, one heading per part. Parts are
//! looked up through the alias table, so `prompt` finds a `question` key and
//! `tests` finds `problem/test_module`. A few parts get dedicated layouts:
//! diffs, executed attempts, annotated tests and bullet lists.

use serde_json::{Map, Value};
use similar::TextDiff;

use crate::error::JlensError;
use crate::fields::{all_keys, build_parts};
use crate::json::{display_value, to_pretty, truncate_strings};
use crate::render::{Language, Renderer};

/// Pseudo-part showing how `broken_code` was fixed into `code`
pub const BROKEN_DIFF: &str = "broken_diff";

const EXECUTED_ATTEMPTS: &str = "executed_attempts";

/// "broken_code" -> "Broken code"
fn part_title(part: &str) -> String {
    let mut chars = part.chars();
    let title: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };
    title.replace('_', " ")
}

/// Strings that start like a Python module are shown as code
fn is_code_like(value: &Value) -> bool {
    value.as_str().is_some_and(|s| {
        let s = s.trim();
        s.starts_with("import") || s.starts_with("from") || s.starts_with("def")
    })
}

/// Truthiness of a JSON value: false, 0, "", [], {} and null are false
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Text of a value for a code block: strings verbatim, anything else as JSON
fn code_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => to_pretty(other),
    }
}

/// Print a record part by part
///
/// With `parts` of `None`, every leaf key of the record is printed and parts
/// that cannot be found are silently skipped. Explicit parts that cannot be
/// found get a note instead. `all` expands to every leaf key.
pub fn render_record(
    renderer: &mut dyn Renderer,
    record: &Value,
    parts: Option<&[String]>,
    line_numbers: bool,
) -> Result<(), JlensError> {
    let using_default = parts.is_none();
    let parts: Vec<String> = match parts {
        Some(parts) if !parts.iter().any(|part| part == "all") => parts.to_vec(),
        _ => all_keys(record),
    };
    let resolved = build_parts(record, &parts);
    let printer = PartPrinter {
        record,
        resolved: &resolved,
        line_numbers,
    };

    for part in &parts {
        let has_attempts = part == "attempts" && record.get(EXECUTED_ATTEMPTS).is_some();
        if !using_default || resolved.contains_key(part) || has_attempts {
            renderer.heading(2, &part_title(part))?;
        }

        if part == BROKEN_DIFF {
            printer.broken_diff(renderer)?;
        } else if has_attempts {
            printer.attempts(renderer)?;
        } else if let Some(value) = resolved.get(part) {
            printer.part(renderer, part, value)?;
        } else if !using_default {
            renderer.paragraph(&format!(
                "Part \"{}\" not found in problem. Run with --structure to see available parts.",
                part
            ))?;
        }
    }
    Ok(())
}

/// Print a record as indented JSON, `__type` keys included
pub fn render_raw(
    renderer: &mut dyn Renderer,
    record: &Value,
    max_str_len: Option<usize>,
    line_numbers: bool,
) -> Result<(), JlensError> {
    let text = match max_str_len {
        Some(max) => to_pretty(&truncate_strings(record, max)),
        None => to_pretty(record),
    };
    renderer.code_block(&text, Language::Json, line_numbers)
}

struct PartPrinter<'a> {
    record: &'a Value,
    resolved: &'a Map<String, Value>,
    line_numbers: bool,
}

impl PartPrinter<'_> {
    fn code(&self, renderer: &mut dyn Renderer, value: &Value) -> Result<(), JlensError> {
        renderer.code_block(&code_text(value), Language::Python, self.line_numbers)
    }

    fn part(&self, renderer: &mut dyn Renderer, part: &str, value: &Value) -> Result<(), JlensError> {
        match part {
            "code" | "broken_code" | "background" => self.code(renderer, value),
            "tests" => self.tests(renderer, value),
            "constraints" | "suggestions" | "broken_suggestions" if value.is_array() => {
                let items: Vec<String> = value
                    .as_array()
                    .into_iter()
                    .flatten()
                    .map(|item| format!(" - {}", display_value(item)))
                    .collect();
                renderer.paragraph(&items.join("\n"))
            }
            _ => match value {
                Value::String(text) if is_code_like(value) => {
                    renderer.code_block(text, Language::Python, self.line_numbers)
                }
                Value::String(text) => renderer.paragraph(text),
                other => renderer.paragraph(&to_pretty(other)),
            },
        }
    }

    fn broken_diff(&self, renderer: &mut dyn Renderer) -> Result<(), JlensError> {
        let code = self.resolved.get("code").and_then(Value::as_str);
        let broken = self.resolved.get("broken_code").and_then(Value::as_str);
        let (Some(code), Some(broken)) = (code, broken) else {
            return renderer.paragraph(
                "Cannot show broken_diff: the problem needs both \"code\" and \"broken_code\" as text.",
            );
        };

        let diff = TextDiff::from_lines(broken, code)
            .unified_diff()
            .context_radius(3)
            .missing_newline_hint(false)
            .header("broken_code", "code")
            .to_string();
        let lines: Vec<&str> = diff.lines().map(str::trim_end).collect();
        renderer.code_block(&lines.join("\n"), Language::Diff, self.line_numbers)
    }

    fn attempts(&self, renderer: &mut dyn Renderer) -> Result<(), JlensError> {
        let attempts = self
            .record
            .get(EXECUTED_ATTEMPTS)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        renderer.paragraph(&format!("Found {} attempts", attempts.len()))?;

        for (i, attempt) in attempts.iter().enumerate() {
            let n = i + 1;
            let code = attempt.pointer("/attempt/attempt_module");
            let result = attempt.get("execution_result");
            let stdout = result.and_then(|r| r.get("stdout"));
            let return_code = result.and_then(|r| r.get("return_code"));

            let (Some(code), Some(stdout), Some(return_code)) = (code, stdout, return_code) else {
                renderer.paragraph(&format!(
                    "Error parsing attempt {}: expected attempt/attempt_module and execution_result/stdout, return_code",
                    n
                ))?;
                renderer.paragraph(&format!("Problem details: {}", self.record))?;
                return Ok(());
            };

            renderer.heading(3, &format!("Attempt {} Code", n))?;
            self.code(renderer, code)?;
            renderer.heading(3, &format!("Attempt {} Results", n))?;
            self.code(renderer, stdout)?;
            renderer.heading(3, &format!("Attempt {} Return Code", n))?;
            let status = match return_code.as_i64() {
                Some(0) => "success",
                Some(1) => "failure",
                _ => "unknown",
            };
            renderer.paragraph(&format!(
                "Return code: {} ({})",
                display_value(return_code),
                status
            ))?;
        }
        Ok(())
    }

    fn tests(&self, renderer: &mut dyn Renderer, value: &Value) -> Result<(), JlensError> {
        let tests: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };
        let passes = self.record.get("tests_pass").and_then(Value::as_array);
        let errors = self.record.get("tests_error").and_then(Value::as_array);
        let error_texts = self.record.get("tests_error_texts").and_then(Value::as_array);
        let annotated = self.record.get("tests_pass").is_some() || self.record.get("tests_error").is_some();

        let unknown = Value::from("Unk.");
        for (j, test) in tests.iter().enumerate() {
            if annotated {
                let pass = passes.and_then(|p| p.get(j)).unwrap_or(&unknown);
                let error = errors.and_then(|e| e.get(j)).unwrap_or(&unknown);
                let detail = if truthy(error) {
                    let text = error_texts
                        .and_then(|t| t.get(j))
                        .map(display_value)
                        .unwrap_or_default();
                    format!("\"{}\"", text)
                } else {
                    String::new()
                };
                renderer.paragraph(&format!(
                    "Test {}. Passes: {}. Errors: {}, {}",
                    j + 1,
                    display_value(pass),
                    display_value(error),
                    detail
                ))?;
            } else {
                renderer.paragraph(&format!("Test {}.", j + 1))?;
            }
            self.code(renderer, test)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod display_tests;
