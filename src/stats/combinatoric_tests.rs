//! Tests for combinatoric tallies

use super::*;
use proptest::prelude::*;
use serde_json::json;

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn test_counts_sorted_by_count_then_values() {
    let records = vec![
        json!({"a": 1, "b": "x"}),
        json!({"a": 2, "b": "x"}),
        json!({"a": 1, "b": "x"}),
        json!({"a": 1, "b": "y"}),
        json!({"a": 0, "b": "z"}),
    ];
    let tally = Combinations::tally(&records, &fields(&["a", "b"]));
    let rows: Vec<(Vec<Value>, usize)> = tally
        .counts()
        .iter()
        .map(|(combo, count)| (combo.iter().map(|(_, v)| v.clone()).collect(), *count))
        .collect();
    assert_eq!(
        rows,
        vec![
            (vec![json!(1), json!("x")], 2),
            (vec![json!(0), json!("z")], 1),
            (vec![json!(1), json!("y")], 1),
            (vec![json!(2), json!("x")], 1),
        ]
    );
    assert_eq!(tally.total(), 5);
}

#[test]
fn test_incomplete_records_are_not_tallied() {
    let records = vec![
        json!({"a": 1, "b": 2}),
        json!({"a": 1}),
        json!({}),
    ];
    let tally = Combinations::tally(&records, &fields(&["a", "b"]));
    assert_eq!(tally.total(), 1);
    // record 1 misses b; record 2 misses both
    assert_eq!(tally.diagnostics().len(), 3);
    assert_eq!(tally.diagnostics()[0].record, 1);
}

#[test]
fn test_int_and_float_values_are_one_combination() {
    let records = vec![json!({"a": 1, "b": "x"}), json!({"a": 1.0, "b": "x"})];
    let tally = Combinations::tally(&records, &fields(&["a", "b"]));
    assert_eq!(tally.counts().len(), 1);
    assert_eq!(tally.counts()[0].1, 2);
}

#[test]
fn test_report_text() {
    let records = vec![
        json!({"doc": {"scoring_guide": {"parameters": {"think_through": 1, "set_size": 3}}}}),
        json!({"doc": {"scoring_guide": {"parameters": {"think_through": 1, "set_size": 3}}}}),
        json!({"doc": {"scoring_guide": {"parameters": {"think_through": 0, "set_size": 3}}}}),
        json!({"doc": {"scoring_guide": {"parameters": {"think_through": 2, "set_size": 4}}}}),
    ];
    let text = report_combinatoric(&records, &fields(&["think_through", "set_size"]));
    let expected = [
        "Combinations of think_through, set_size",
        "Records: 4",
        "  50.0% (2) think_through=Brief thought, set_size=3",
        "  25.0% (1) think_through=Deep thought, set_size=4",
        "  25.0% (1) think_through=No thinking through, set_size=3",
    ]
    .join("\n");
    assert_eq!(text, expected);
}

#[test]
fn test_report_notes_missing_values() {
    let records = vec![json!({"a": 1}), json!({"b": 1})];
    let text = report_combinatoric(&records, &fields(&["a"]));
    assert!(text.starts_with("Combinations of a\nRecords: 1 (1 missing field values)"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Counts add up to the fully-resolved records; percentages to ~100
    #[test]
    fn prop_counts_sum_to_complete_records(
        rows in prop::collection::vec((prop::option::of(0i64..3), prop::option::of(0i64..3)), 1..40)
    ) {
        let records: Vec<Value> = rows
            .iter()
            .map(|(a, b)| {
                let mut map = serde_json::Map::new();
                if let Some(a) = a {
                    map.insert("a".to_string(), json!(a));
                }
                if let Some(b) = b {
                    map.insert("b".to_string(), json!(b));
                }
                Value::Object(map)
            })
            .collect();
        let complete = rows.iter().filter(|(a, b)| a.is_some() && b.is_some()).count();
        let tally = Combinations::tally(&records, &fields(&["a", "b"]));
        prop_assert_eq!(tally.total(), complete);

        if complete > 0 {
            let percent: f64 = tally
                .counts()
                .iter()
                .map(|(_, count)| *count as f64 / complete as f64 * 100.0)
                .sum();
            prop_assert!((percent - 100.0).abs() < 1e-6);
        }
    }
}
