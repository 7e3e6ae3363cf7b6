//! Tests for the alias table

use super::*;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn test_question_resolves_as_prompt() {
    let record = json!({"question": "Q"});
    let fallbacks = fallbacks_for("prompt").unwrap();
    assert_eq!(resolve_logical(&record, "prompt", fallbacks), Some(&json!("Q")));
}

#[test]
fn test_explicit_key_wins_even_when_null() {
    let record = json!({"prompt": null, "question": "Q"});
    assert_eq!(resolve_alias(&record, "prompt"), Some(&Value::Null));
}

#[test]
fn test_fallbacks_follow_declared_order() {
    let record = json!({"code_module": "late", "problem": {"code_module": "early"}});
    assert_eq!(resolve_alias(&record, "prompt"), Some(&json!("early")));
}

#[test]
fn test_nested_fallback_skips_null() {
    let record = json!({"problem": {"test_module": null}, "test_module": "flat"});
    assert_eq!(resolve_alias(&record, "tests"), Some(&json!("flat")));
}

#[test]
fn test_bare_fallback_counts_null_as_present() {
    let record = json!({"resps": null});
    assert_eq!(resolve_alias(&record, "answer"), Some(&Value::Null));
}

#[test]
fn test_unregistered_name_is_plain_lookup() {
    let record = json!({"label": "x", "a": {"b": 2}});
    assert_eq!(resolve_alias(&record, "label"), Some(&json!("x")));
    assert_eq!(resolve_alias(&record, "a/b"), Some(&json!(2)));
    assert_eq!(resolve_alias(&record, "missing"), None);
}

#[test]
fn test_build_parts_includes_aliases_and_requested() {
    let record = json!({
        "attempt_module": "def f(): pass",
        "label": 3,
        "problem": {"difficulty": "hard"}
    });
    let parts = build_parts(
        &record,
        &["label".to_string(), "problem/difficulty".to_string(), "nope".to_string()],
    );
    assert_eq!(parts.get("code"), Some(&json!("def f(): pass")));
    assert_eq!(parts.get("label"), Some(&json!(3)));
    assert_eq!(parts.get("problem/difficulty"), Some(&json!("hard")));
    assert!(!parts.contains_key("nope"));
}

#[test]
fn test_all_keys_flattens_objects_in_order() {
    let record = json!({
        "b": 1,
        "a": {"y": 2, "x": {"deep": true}},
        "list": [{"k": 1}],
        "empty": {}
    });
    assert_eq!(all_keys(&record), vec!["b", "a/y", "a/x/deep", "list"]);
}

#[test]
fn test_alias_table_names_are_unique() {
    let mut names: Vec<&str> = COMMON_LOCATIONS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), COMMON_LOCATIONS.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // An explicit canonical key always shadows every fallback
    #[test]
    fn prop_explicit_key_has_priority(explicit in "[a-z]{1,8}", fallback in "[a-z]{1,8}") {
        let record = json!({"answer": explicit.clone(), "resps": fallback});
        prop_assert_eq!(resolve_alias(&record, "answer"), Some(&json!(explicit)));
    }

    // Without the explicit key, the first present fallback is returned
    #[test]
    fn prop_first_present_fallback(
        include_first in prop::bool::ANY,
        include_last in prop::bool::ANY,
    ) {
        let mut map = Map::new();
        if include_first {
            map.insert("question".to_string(), json!("first"));
        }
        if include_last {
            map.insert("code_module".to_string(), json!("last"));
        }
        let record = Value::Object(map);
        let expected = if include_first {
            Some(json!("first"))
        } else if include_last {
            Some(json!("last"))
        } else {
            None
        };
        prop_assert_eq!(resolve_alias(&record, "prompt").cloned(), expected);
    }
}
