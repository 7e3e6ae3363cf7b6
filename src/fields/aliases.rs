//! Field alias table
//!
//! Datasets name the same thing differently ("prompt", "question",
//! "problem/code_module", ...). Each canonical part lists where it is
//! commonly found, in priority order.

use serde_json::{Map, Value};

use super::path::{PATH_SEPARATOR, resolve, resolve_nested};

/// Canonical part name → candidate locations, tried in order
pub const COMMON_LOCATIONS: &[(&str, &[&str])] = &[
    ("code", &["code", "attempt_module"]),
    ("broken_code", &["broken_code"]),
    (
        "prompt",
        &[
            "prompt",
            "question",
            "problem description",
            "problem/code_module",
            "code_module",
        ],
    ),
    ("tests", &["tests", "problem/test_module", "test_module"]),
    ("constraints", &["constraints"]),
    ("background_code", &["background_code", "background"]),
    ("broken_suggestions", &["broken_suggestions"]),
    ("tests_pass", &["tests_pass"]),
    ("tests_error", &["tests_error"]),
    ("attempts", &["attempts"]),
    ("answer", &["answer", "resps"]),
    ("is_correct", &["is_correct", "correct"]),
];

/// Candidate locations registered for a canonical name
pub fn fallbacks_for(canonical: &str) -> Option<&'static [&'static str]> {
    COMMON_LOCATIONS
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, candidates)| *candidates)
}

/// Resolve a canonical field through its fallback list
///
/// An explicit `canonical` key always wins, even when it holds `null`.
/// Otherwise the first candidate that resolves is returned: nested
/// candidates must hold a non-null value, bare keys only need to exist.
pub fn resolve_logical<'a>(
    record: &'a Value,
    canonical: &str,
    fallbacks: &[&str],
) -> Option<&'a Value> {
    let object = record.as_object()?;
    if let Some(value) = object.get(canonical) {
        return Some(value);
    }
    fallbacks.iter().find_map(|candidate| {
        if candidate.contains(PATH_SEPARATOR) {
            resolve_nested(record, candidate)
        } else {
            object.get(*candidate)
        }
    })
}

/// Resolve a name through the alias table, or as a plain key if unregistered
pub fn resolve_alias<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    match fallbacks_for(name) {
        Some(fallbacks) => resolve_logical(record, name, fallbacks),
        None => resolve(record, name),
    }
}

/// Collect every registered part plus the requested ones
///
/// Requested slash paths are looked up nested; bare names are looked up
/// directly unless an alias already filled them. Parts that cannot be found
/// are left out, so callers can tell "missing" from "null".
pub fn build_parts(record: &Value, parts: &[String]) -> Map<String, Value> {
    let mut results = Map::new();
    for (canonical, fallbacks) in COMMON_LOCATIONS {
        if let Some(value) = resolve_logical(record, canonical, fallbacks) {
            results.insert((*canonical).to_string(), value.clone());
        }
    }

    for part in parts {
        if part.contains(PATH_SEPARATOR) {
            if let Some(value) = resolve_nested(record, part) {
                results.insert(part.clone(), value.clone());
                continue;
            }
        }
        if !results.contains_key(part) {
            if let Some(value) = record.get(part.as_str()) {
                results.insert(part.clone(), value.clone());
            }
        }
    }

    results
}

/// Every leaf of a record as a slash path, in document order
///
/// Objects are flattened; lists and scalars are leaves.
pub fn all_keys(record: &Value) -> Vec<String> {
    let Some(object) = record.as_object() else {
        return Vec::new();
    };
    let mut keys = Vec::new();
    for (key, value) in object {
        if value.is_object() {
            keys.extend(
                all_keys(value)
                    .into_iter()
                    .map(|nested| format!("{}{}{}", key, PATH_SEPARATOR, nested)),
            );
        } else {
            keys.push(key.clone());
        }
    }
    keys
}

#[cfg(test)]
#[path = "aliases_tests.rs"]
mod aliases_tests;
