//! JSON utility functions
//!
//! Helpers shared by the resolver, the schema summarizer and the stats
//! engine: type names, scalar display, ordering and string truncation.

use std::cmp::Ordering;

use serde_json::{Map, Value};

/// Key that carries a record's type tag in some datasets
pub const TYPE_KEY: &str = "__type";

/// Short type name used by the structure view
///
/// Lists are named after their first element (`list[str]`), empty lists are
/// just `list`.
pub fn type_name(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Number(n) if n.is_f64() => "float".to_string(),
        Value::Number(_) => "int".to_string(),
        Value::String(_) => "str".to_string(),
        Value::Array(items) => match items.first() {
            Some(first) => format!("list[{}]", type_name(first)),
            None => "list".to_string(),
        },
        Value::Object(_) => "dict".to_string(),
    }
}

/// Format a float the way the reports expect: integral values keep `.0`
pub fn format_float(x: f64) -> String {
    format!("{:?}", x)
}

/// Display a value inline: strings without quotes, everything else as JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric view of a value, counting booleans as 0/1
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Strict ordering between two scalars of the same kind
///
/// Returns `None` for values of different kinds, and for lists and objects,
/// which have no natural order.
pub fn try_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total ordering over any two values
///
/// Values of different kinds order by kind (null < bool < number < string <
/// list < object); lists and objects of the same kind order by their JSON
/// text.
pub fn total_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => try_cmp(a, b).unwrap_or_else(|| kind_rank(a).cmp(&kind_rank(b))),
    }
}

/// Recursively drop `__type` keys
pub fn remove_type_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| k.as_str() != TYPE_KEY)
                .map(|(k, v)| (k.clone(), remove_type_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(remove_type_keys).collect()),
        other => other.clone(),
    }
}

/// Truncate a string to `max_len` characters, noting how much was cut
pub fn truncate_str(text: &str, max_len: usize) -> String {
    let total = text.chars().count();
    if total <= max_len {
        return text.to_string();
    }
    let head: String = text.chars().take(max_len).collect();
    format!("{}... ({} characters truncated)", head, total - max_len)
}

/// Recursively truncate every string in a value
pub fn truncate_strings(value: &Value, max_len: usize) -> Value {
    match value {
        Value::String(s) => Value::String(truncate_str(s, max_len)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| truncate_strings(item, max_len))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), truncate_strings(v, max_len)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Pretty-print a value with four-space indentation
pub fn to_pretty(value: &Value) -> String {
    use serde::Serialize;

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod json_tests;
