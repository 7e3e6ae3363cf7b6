//! Tests for record printing

use super::*;
use crate::render::{PlainRenderer, RenderOptions};
use serde_json::json;

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

fn printed(record: &Value, parts: Option<&[&str]>) -> String {
    let parts: Option<Vec<String>> = parts.map(|p| p.iter().map(|s| s.to_string()).collect());
    let mut renderer = plain();
    render_record(&mut renderer, record, parts.as_deref(), false).unwrap();
    String::from_utf8(renderer.into_inner()).unwrap()
}

#[test]
fn test_part_title() {
    assert_eq!(part_title("broken_code"), "Broken code");
    assert_eq!(part_title("Problem/Test_Module"), "Problem/test module");
    assert_eq!(part_title(""), "");
}

#[test]
fn test_prompt_found_through_alias() {
    let record = json!({"question": "What is 2+2?"});
    assert_eq!(
        printed(&record, Some(&["prompt"])),
        "\nPrompt\nWhat is 2+2?\n"
    );
}

#[test]
fn test_missing_explicit_part_is_reported() {
    let record = json!({"a": 1});
    assert_eq!(
        printed(&record, Some(&["nope"])),
        "\nNope\nPart \"nope\" not found in problem. Run with --structure to see available parts.\n"
    );
}

#[test]
fn test_default_parts_print_every_leaf() {
    let record = json!({"a": 1, "b": {"c": "x"}});
    assert_eq!(printed(&record, None), "\nA\n1\n\nB/c\nx\n");
}

#[test]
fn test_all_expands_to_every_leaf() {
    let record = json!({"a": [1, 2]});
    assert_eq!(
        printed(&record, Some(&["all"])),
        "\nA\n[\n    1,\n    2\n]\n"
    );
}

#[test]
fn test_code_like_prompt_is_printed_as_code() {
    let record = json!({"prompt": "import os\nx = 1"});
    let mut renderer = plain();
    let parts = vec!["prompt".to_string()];
    render_record(&mut renderer, &record, Some(&parts), true).unwrap();
    let out = String::from_utf8(renderer.into_inner()).unwrap();
    assert_eq!(out, "\nPrompt\n  1:\timport os\n  2:\tx = 1\n");
}

#[test]
fn test_broken_diff() {
    let record = json!({
        "code": "a = 1\nb = 2\nc = 3\n",
        "broken_code": "a = 1\nb = 0\nc = 3\n"
    });
    let out = printed(&record, Some(&["broken_diff"]));
    assert!(out.starts_with("\nBroken diff\n--- broken_code\n+++ code\n@@"));
    assert!(out.contains("\n-b = 0\n+b = 2\n"));
    assert!(out.contains("\n a = 1\n"));
}

#[test]
fn test_broken_diff_needs_both_sides() {
    let record = json!({"code": "x"});
    let out = printed(&record, Some(&["broken_diff"]));
    assert!(out.contains("needs both \"code\" and \"broken_code\""));
}

#[test]
fn test_executed_attempts() {
    let record = json!({
        "executed_attempts": [
            {
                "attempt": {"attempt_module": "print(1)"},
                "execution_result": {"stdout": "1", "return_code": 0}
            },
            {
                "attempt": {"attempt_module": "exit(3)"},
                "execution_result": {"stdout": "", "return_code": 3}
            }
        ]
    });
    let out = printed(&record, Some(&["attempts"]));
    assert!(out.starts_with("\nAttempts\nFound 2 attempts\n"));
    assert!(out.contains("\n**** Attempt 1 Code ****\n\nprint(1)\n"));
    assert!(out.contains("Return code: 0 (success)"));
    assert!(out.contains("Return code: 3 (unknown)"));
}

#[test]
fn test_malformed_attempt_stops_with_a_note() {
    let record = json!({"executed_attempts": [{"attempt": {}}]});
    let out = printed(&record, Some(&["attempts"]));
    assert!(out.contains("Error parsing attempt 1"));
    assert!(out.contains("Problem details: {"));
}

#[test]
fn test_annotated_tests() {
    let record = json!({
        "tests": ["assert f(1)", "assert f(2)"],
        "tests_pass": [true, false],
        "tests_error": [false, true],
        "tests_error_texts": ["", "boom"]
    });
    let out = printed(&record, Some(&["tests"]));
    assert_eq!(
        out,
        "\nTests\n\
         Test 1. Passes: true. Errors: false, \n\
         assert f(1)\n\
         Test 2. Passes: false. Errors: true, \"boom\"\n\
         assert f(2)\n"
    );
}

#[test]
fn test_unannotated_single_test_string() {
    let record = json!({"test_module": "assert True"});
    assert_eq!(
        printed(&record, Some(&["tests"])),
        "\nTests\nTest 1.\nassert True\n"
    );
}

#[test]
fn test_partial_annotations_fall_back_to_unknown() {
    let record = json!({"tests": ["t1", "t2"], "tests_pass": [true]});
    let out = printed(&record, Some(&["tests"]));
    assert!(out.contains("Test 2. Passes: Unk.. Errors: Unk., \"\"\n"));
}

#[test]
fn test_constraints_as_bullets() {
    let record = json!({"constraints": ["n > 0", "n < 10"]});
    assert_eq!(
        printed(&record, Some(&["constraints"])),
        "\nConstraints\n - n > 0\n - n < 10\n"
    );
}

#[test]
fn test_raw_keeps_type_keys_and_truncates() {
    let record = json!({"__type": "Problem", "text": "abcdef"});
    let mut renderer = plain();
    render_raw(&mut renderer, &record, Some(3), false).unwrap();
    let out = String::from_utf8(renderer.into_inner()).unwrap();
    assert_eq!(
        out,
        "{\n    \"__type\": \"Pro... (4 characters truncated)\",\n    \"text\": \"abc... (3 characters truncated)\"\n}\n"
    );
}
