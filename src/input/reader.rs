use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::JlensError;

/// One physical line of the input, with its position in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 0-based line index in the original input
    pub index: usize,
    pub text: String,
}

/// Read JSONL text from stdin or a file
pub struct InputReader;

impl InputReader {
    /// Read the whole input
    ///
    /// # Arguments
    /// * `path` - Optional file path. If None, reads from stdin.
    ///
    /// # Returns
    /// * `Ok(String)` - The raw text; lines are validated later, one by one
    /// * `Err(JlensError)` - If an IO error occurs
    pub fn read_text(path: Option<&Path>) -> Result<String, JlensError> {
        let mut contents = String::new();
        match path {
            Some(file_path) => {
                let mut file = File::open(file_path)?;
                file.read_to_string(&mut contents)?;
            }
            None => {
                io::stdin().read_to_string(&mut contents)?;
            }
        }
        #[cfg(debug_assertions)]
        log::debug!("Read {} bytes of input from {:?}", contents.len(), path);
        Ok(contents)
    }

    /// Read the input and split it into numbered lines
    pub fn read_lines(path: Option<&Path>) -> Result<Vec<Line>, JlensError> {
        Self::read_text(path).map(|text| split_lines(&text))
    }
}

/// Split JSONL text into numbered lines
///
/// Trailing whitespace at the end of the input is ignored, so a final
/// newline does not produce an empty record. Blank lines in the middle keep
/// their index and are reported as invalid when parsed.
pub fn split_lines(text: &str) -> Vec<Line> {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split('\n')
        .enumerate()
        .map(|(index, text)| Line {
            index,
            text: text.strip_suffix('\r').unwrap_or(text).to_string(),
        })
        .collect()
}

/// Parse one line as a JSON record
pub fn parse_record(line: &Line) -> Result<Value, JlensError> {
    serde_json::from_str(&line.text).map_err(|e| JlensError::InvalidJson(e.to_string()))
}
