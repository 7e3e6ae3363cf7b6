//! Tests for the record loop

use super::*;
use crate::input::split_lines;
use crate::render::{PlainRenderer, RenderOptions};
use std::io::Cursor;
use tempfile::TempDir;

const INPUT: &str = "{\"prompt\": \"first\"}\nnot json\n{\"prompt\": \"third\"}\n";

fn plain() -> PlainRenderer<Vec<u8>> {
    PlainRenderer::new(
        Vec::new(),
        RenderOptions {
            width: 0,
            max_str_len: None,
            color: false,
        },
    )
}

fn options() -> SessionOptions {
    SessionOptions {
        parts: Some(vec!["prompt".to_string()]),
        source: "input.jsonl".to_string(),
        ..Default::default()
    }
}

fn run(options: &SessionOptions, answers: &str, interrupt: bool) -> (Outcome, String, String) {
    let flag = AtomicBool::new(interrupt);
    let mut renderer = plain();
    let mut input = Cursor::new(answers.to_string());
    let mut prompts = Vec::new();
    let outcome = Session::new(options, &flag)
        .run(&mut renderer, &split_lines(INPUT), &mut input, &mut prompts)
        .unwrap();
    (
        outcome,
        String::from_utf8(renderer.into_inner()).unwrap(),
        String::from_utf8(prompts).unwrap(),
    )
}

#[test]
fn test_prints_every_record_and_reports_invalid_lines() {
    let (outcome, out, prompts) = run(&options(), "", false);
    assert_eq!(outcome.visited, 3);
    assert!(!outcome.interrupted);
    assert!(prompts.is_empty());
    assert_eq!(
        out,
        "\nProblem 0\n\n\nPrompt\nfirst\n\
         \nProblem 1\n\nProblem on line 1 is not valid JSON\n\
         \nProblem 2\n\n\nPrompt\nthird\n"
    );
}

#[test]
fn test_renumber_uses_selection_order() {
    let lines = split_lines("{}\n{}\n{}");
    let selected = vec![lines[2].clone(), lines[0].clone()];
    let options = SessionOptions {
        renumber: true,
        ..options()
    };
    let flag = AtomicBool::new(false);
    let mut renderer = plain();
    Session::new(&options, &flag)
        .run(&mut renderer, &selected, &mut Cursor::new(""), &mut Vec::new())
        .unwrap();
    let out = String::from_utf8(renderer.into_inner()).unwrap();
    assert!(out.contains("Problem 1\n"));
    assert!(out.contains("Problem 2\n"));
    assert!(!out.contains("Problem 0\n"));
}

#[test]
fn test_interrupt_flag_stops_before_first_record() {
    let (outcome, out, _) = run(&options(), "", true);
    assert_eq!(outcome.visited, 0);
    assert!(outcome.interrupted);
    assert!(out.is_empty());
}

#[test]
fn test_manual_filter_appends_accepted_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kept.jsonl");
    let options = SessionOptions {
        filter_output: Some(path.clone()),
        ..options()
    };

    let (outcome, out, prompts) = run(&options, "y\nn\n", false);
    assert_eq!(outcome.included, 1);
    assert_eq!(outcome.visited, 3);
    assert_eq!(prompts.matches("(y/N/q)").count(), 2);

    let kept = std::fs::read_to_string(&path).unwrap();
    assert_eq!(kept, "{\"prompt\":\"first\"}\n");

    assert!(out.contains("Manual Filtering Statistics"));
    assert!(out.contains("Manually selected 1 problems from input.jsonl."));
    assert!(out.contains("From lines: 0 to 2. Next time use `--start 2` to resume."));
    assert!(out.contains(&format!("Output to file: {}", path.display())));
}

#[test]
fn test_quit_answer_stops_and_summarizes() {
    let dir = TempDir::new().unwrap();
    let options = SessionOptions {
        filter_output: Some(dir.path().join("kept.jsonl")),
        start: 5,
        ..options()
    };

    let (outcome, out, _) = run(&options, "q\n", false);
    assert!(outcome.interrupted);
    assert_eq!(outcome.visited, 1);
    assert_eq!(outcome.included, 0);
    assert!(!out.contains("Problem 1"));
    assert!(out.contains("Next time use `--start 5` to resume."));
}

/// Answers `y` every time, but raises the interrupt flag while the second
/// prompt is open, like Ctrl-C pressed before Enter
struct InterruptOnSecondPrompt<'a> {
    answers: &'static [u8],
    pos: usize,
    flag: &'a AtomicBool,
}

impl std::io::Read for InterruptOnSecondPrompt<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for InterruptOnSecondPrompt<'_> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        if self.pos == 2 {
            self.flag.store(true, Ordering::SeqCst);
        }
        Ok(&self.answers[self.pos.min(self.answers.len())..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos += amt;
    }
}

#[test]
fn test_interrupt_during_prompt_ends_with_partial_summary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kept.jsonl");
    let options = SessionOptions {
        filter_output: Some(path.clone()),
        start: 4,
        ..options()
    };

    let flag = AtomicBool::new(false);
    let mut input = InterruptOnSecondPrompt {
        answers: b"y\ny\n",
        pos: 0,
        flag: &flag,
    };
    let mut renderer = plain();
    let outcome = Session::new(&options, &flag)
        .run(&mut renderer, &split_lines(INPUT), &mut input, &mut Vec::new())
        .unwrap();
    let out = String::from_utf8(renderer.into_inner()).unwrap();

    assert!(outcome.interrupted);
    assert_eq!(outcome.visited, 3);
    assert_eq!(outcome.included, 1);
    // the answer typed at the interrupted prompt is dropped
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{\"prompt\":\"first\"}\n"
    );
    assert!(out.contains("Manually selected 1 problems from input.jsonl."));
    assert!(out.contains("From lines: 4 to 6. Next time use `--start 6` to resume."));
}

#[test]
fn test_randomized_filter_has_no_resume_hint() {
    let dir = TempDir::new().unwrap();
    let options = SessionOptions {
        filter_output: Some(dir.path().join("kept.jsonl")),
        randomized: true,
        ..options()
    };
    let (_, out, _) = run(&options, "", false);
    assert!(!out.contains("--start"));
    assert!(out.contains("Output to file:"));
}

#[test]
fn test_raw_mode_prints_json() {
    let options = SessionOptions {
        raw: true,
        ..options()
    };
    let (_, out, _) = run(&options, "", false);
    assert!(out.contains("{\n    \"prompt\": \"first\"\n}\n"));
}

#[test]
fn test_structure_with_ranges() {
    let lines = split_lines("{\"n\": 1}\n{\"n\": 2}\n{\"n\": 2}\n{\"n\": 2}");
    let mut renderer = plain();
    print_structure(&mut renderer, &lines, true, false).unwrap();
    let out = String::from_utf8(renderer.into_inner()).unwrap();
    assert!(out.contains("JSON Structure (problem 0)"));
    assert!(out.contains("\"n\": int (25% 1, 75% 2)"));
}

#[test]
fn test_structure_of_nothing() {
    let mut renderer = plain();
    print_structure(&mut renderer, &[], false, false).unwrap();
    assert_eq!(
        String::from_utf8(renderer.into_inner()).unwrap(),
        "No problems to show\n"
    );
}

#[test]
fn test_report_counts() {
    let selected = Selected {
        lines: Vec::new(),
        matched: 2,
    };
    let mut renderer = plain();
    report_counts(&mut renderer, 10, &selected, true).unwrap();
    assert_eq!(
        String::from_utf8(renderer.into_inner()).unwrap(),
        "Found 10 problems\nAfter searching, found 2 problems\n"
    );
}
