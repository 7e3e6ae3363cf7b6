//! Manual filtering
//!
//! The user is asked about every printed record; accepted records are
//! appended to a JSONL file straight away, so an interrupted session keeps
//! everything accepted so far.

use std::fs::OpenOptions;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use serde_json::Value;

use crate::error::JlensError;

/// Answer to the include prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Include,
    Skip,
    /// Stop iterating; treated like Ctrl-C
    Quit,
}

impl Decision {
    /// `y` includes, `q` quits, anything else skips (case-insensitive)
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" => Decision::Include,
            "q" => Decision::Quit,
            _ => Decision::Skip,
        }
    }
}

/// Ask whether to include the current record
///
/// End of input counts as [`Decision::Quit`].
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    target: &Path,
) -> Result<Decision, JlensError> {
    write!(output, "Include this problem in {}? (y/N/q) ", target.display())?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(Decision::Quit);
    }
    Ok(Decision::parse(&answer))
}

/// How often a waiting prompt checks for Ctrl-C
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Prompt answers that stop at Ctrl-C
///
/// A blocking read on stdin does not return when Ctrl-C arrives, so answers
/// are read on a background thread and handed over line by line. Once the
/// interrupt flag is set the reader reports end of input, which [`ask`]
/// turns into [`Decision::Quit`].
pub struct PromptReader {
    lines: Receiver<String>,
    interrupt: Arc<AtomicBool>,
    line: Vec<u8>,
    pos: usize,
}

impl PromptReader {
    pub fn new(lines: Receiver<String>, interrupt: Arc<AtomicBool>) -> Self {
        Self {
            lines,
            interrupt,
            line: Vec::new(),
            pos: 0,
        }
    }

    /// Read answers from stdin on a background thread
    pub fn stdin(interrupt: Arc<AtomicBool>) -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let mut stdin = io::stdin().lock();
            loop {
                let mut line = String::new();
                match stdin.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::warn!("Failed to read prompt answer: {}", e);
                        break;
                    }
                }
            }
        });
        Self::new(rx, interrupt)
    }
}

impl Read for PromptReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for PromptReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        while self.pos >= self.line.len() {
            if self.interrupt.load(Ordering::SeqCst) {
                return Ok(&[]);
            }
            match self.lines.recv_timeout(POLL_INTERVAL) {
                Ok(line) => {
                    self.line = line.into_bytes();
                    self.pos = 0;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Ok(&[]),
            }
        }
        Ok(&self.line[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.line.len());
    }
}

/// Append-only JSONL output for accepted records
#[derive(Debug)]
pub struct FilterSink {
    path: PathBuf,
    included: usize,
}

impl FilterSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            included: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records appended by this sink
    pub fn included(&self) -> usize {
        self.included
    }

    /// Append one record as a single compact line
    pub fn append(&mut self, record: &Value) -> Result<(), JlensError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record)?;
        self.included += 1;
        log::debug!("Appended record {} to {:?}", self.included, self.path);
        Ok(())
    }
}
