use serde_json::{Map, Value};

use super::ranges::{RANGE_SEPARATOR, RangeTable};
use crate::json::{TYPE_KEY, display_value, type_name};

const INDENT: &str = "    ";

/// Render the structure of a record as an indented, brace-delimited block
///
/// Every field gets one line with its type and size. With a range table, the
/// line is followed by the field's value-range summary. Nested objects are
/// expanded in place; lists of objects show their first element as a
/// template followed by a count of the elided items.
pub fn summarize(record: &Value, ranges: Option<&RangeTable>) -> String {
    match record {
        Value::Object(object) => summarize_object(object, 1, &[], ranges),
        other => format!("{} ({})", type_name(other), display_value(other)),
    }
}

fn summarize_object(
    object: &Map<String, Value>,
    indent: usize,
    keys: &[&str],
    ranges: Option<&RangeTable>,
) -> String {
    let pad = INDENT.repeat(indent);
    let mut out = format!("{}{{\n", INDENT.repeat(indent - 1));

    if let Some(type_tag) = object.get(TYPE_KEY) {
        out.push_str(&format!("{}\"{}\": {}\n", pad, TYPE_KEY, display_value(type_tag)));
    }

    for (key, value) in object {
        if key == TYPE_KEY {
            continue;
        }
        let mut path = keys.to_vec();
        path.push(key);

        let size = match value {
            Value::String(s) => format!(" ({} characters)", s.chars().count()),
            Value::Array(items) => format!(" ({} items)", items.len()),
            Value::Object(inner) => format!(" ({} items)", inner.len()),
            _ => String::new(),
        };
        let range = match value {
            Value::Object(_) => String::new(),
            _ => ranges
                .and_then(|table| table.get(&path.join(RANGE_SEPARATOR)))
                .map(|range| range.summary())
                .filter(|summary| !summary.is_empty())
                .map(|summary| format!(" ({})", summary))
                .unwrap_or_default(),
        };
        out.push_str(&format!(
            "{}\"{}\": {}{}{}\n",
            pad,
            key,
            type_name(value),
            size,
            range
        ));

        match value {
            Value::Object(inner) => {
                out.push_str(&summarize_object(inner, indent + 1, &path, ranges));
                out.push('\n');
            }
            Value::Array(items) => {
                if let Some(Value::Object(first)) = items.first() {
                    out.push_str(&format!("{}[\n", pad));
                    out.push_str(&summarize_object(first, indent + 2, &path, ranges));
                    out.push('\n');
                    out.push_str(&format!(
                        "{}{}... ({} more items)\n",
                        pad,
                        INDENT,
                        items.len() - 1
                    ));
                    out.push_str(&format!("{}]\n", pad));
                }
            }
            _ => {}
        }
    }

    out.push_str(&INDENT.repeat(indent - 1));
    out.push('}');
    out
}

#[cfg(test)]
#[path = "summarizer_tests.rs"]
mod summarizer_tests;
