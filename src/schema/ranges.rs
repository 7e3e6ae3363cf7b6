//! Value ranges
//!
//! Collects every value observed at each field path across a sample of
//! records and renders a one-line summary of the distribution.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::json::{display_value, format_float, try_cmp};

/// Joins nested keys in range-table paths
///
/// Deliberately different from the `/` used by field selectors: the two
/// namespaces never mix.
pub const RANGE_SEPARATOR: &str = "::";

/// At most this many distinct values get a percentage breakdown
const MAX_CATEGORIES: usize = 2;

/// Strings longer than this are not treated as categories
const LONG_STRING_LEN: usize = 20;

/// Why a range could not be summarized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("values contain lists or objects")]
    Unhashable,

    #[error("values of different kinds cannot be ordered")]
    Unorderable,
}

/// Hashable identity of a value; `1` and `1.0` are the same value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ScalarKey {
    Null,
    Bool(bool),
    Number(u64),
    String(String),
    /// A list or object, identified by its JSON text
    Composite(String),
}

impl ScalarKey {
    /// Key for a scalar; lists and objects are unhashable
    pub(crate) fn of(value: &Value) -> Result<Self, RangeError> {
        match value {
            Value::Null => Ok(ScalarKey::Null),
            Value::Bool(b) => Ok(ScalarKey::Bool(*b)),
            Value::Number(n) => {
                let x = n.as_f64().ok_or(RangeError::Unhashable)?;
                // -0.0 and 0.0 must hash alike
                let x = if x == 0.0 { 0.0 } else { x };
                Ok(ScalarKey::Number(x.to_bits()))
            }
            Value::String(s) => Ok(ScalarKey::String(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(RangeError::Unhashable),
        }
    }

    /// Key for any value, falling back to JSON text for lists and objects
    pub(crate) fn of_any(value: &Value) -> Self {
        Self::of(value).unwrap_or_else(|_| ScalarKey::Composite(value.to_string()))
    }
}

/// Every value seen for one field path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRange {
    values: Vec<Value>,
}

impl ValueRange {
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Summary line, or an empty string when the values cannot be summarized
    pub fn summary(&self) -> String {
        self.try_summary().unwrap_or_else(|err| {
            log::debug!("No range summary: {}", err);
            String::new()
        })
    }

    /// Summarize the values, in priority order:
    ///
    /// 1. all lists: range of list lengths
    /// 2. one or two distinct (short) values: percentage per value
    /// 3. all numbers: min, max and average
    /// 4. all strings: distinct count and length range
    /// 5. anything else: distinct count
    pub fn try_summary(&self) -> Result<String, RangeError> {
        if self.values.is_empty() {
            return Ok(String::new());
        }

        if self.values.iter().all(Value::is_array) {
            let lengths = self.values.iter().filter_map(|v| v.as_array().map(Vec::len));
            let (min, max) = min_max(lengths);
            return Ok(format!("{} to {} items", min, max));
        }

        let distinct = self.distinct()?;

        if distinct.len() <= MAX_CATEGORIES && !self.has_long_strings() {
            return self.breakdown(distinct);
        }

        if self.values.iter().all(Value::is_number) {
            return Ok(self.numeric_summary());
        }

        if self.values.iter().all(Value::is_string) {
            let lengths = self
                .values
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.chars().count()));
            let (min, max) = min_max(lengths);
            return Ok(format!(
                "{} distinct, length {} to {}",
                distinct.len(),
                min,
                max
            ));
        }

        Ok(format!("{} distinct", distinct.len()))
    }

    /// Distinct values with their counts, in first-seen order
    fn distinct(&self) -> Result<Vec<(&Value, usize)>, RangeError> {
        let mut index: HashMap<ScalarKey, usize> = HashMap::new();
        let mut distinct: Vec<(&Value, usize)> = Vec::new();
        for value in &self.values {
            let key = ScalarKey::of(value)?;
            match index.get(&key) {
                Some(&i) => distinct[i].1 += 1,
                None => {
                    index.insert(key, distinct.len());
                    distinct.push((value, 1));
                }
            }
        }
        Ok(distinct)
    }

    fn has_long_strings(&self) -> bool {
        self.values.iter().all(Value::is_string)
            && self
                .values
                .iter()
                .filter_map(Value::as_str)
                .any(|s| s.chars().count() > LONG_STRING_LEN)
    }

    fn breakdown(&self, mut distinct: Vec<(&Value, usize)>) -> Result<String, RangeError> {
        let first = distinct[0].0;
        if distinct.iter().any(|(v, _)| try_cmp(first, v).is_none()) {
            return Err(RangeError::Unorderable);
        }
        distinct.sort_by(|(a, _), (b, _)| try_cmp(a, b).unwrap_or(Ordering::Equal));

        let total = self.values.len() as f64;
        Ok(distinct
            .iter()
            .map(|(value, count)| {
                format!(
                    "{:.0}% {}",
                    *count as f64 / total * 100.0,
                    display_value(value)
                )
            })
            .collect::<Vec<_>>()
            .join(", "))
    }

    fn numeric_summary(&self) -> String {
        let numbers: Vec<(&Value, f64)> = self
            .values
            .iter()
            .filter_map(|v| v.as_f64().map(|x| (v, x)))
            .collect();
        let min = numbers
            .iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(v, _)| display_value(v))
            .unwrap_or_default();
        let max = numbers
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(v, _)| display_value(v))
            .unwrap_or_default();
        let avg = numbers.iter().map(|(_, x)| x).sum::<f64>() / numbers.len() as f64;
        format!("{} to {}, avg: {}", min, max, format_float(avg))
    }
}

fn min_max(items: impl Iterator<Item = usize>) -> (usize, usize) {
    items.fold((usize::MAX, 0), |(lo, hi), n| (lo.min(n), hi.max(n)))
}

/// Value ranges for every field path in a sample of records
#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    ranges: BTreeMap<String, ValueRange>,
}

impl RangeTable {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut table = Self::default();
        for record in records {
            table.add_record(record);
        }
        table
    }

    /// Add every non-object value in a record under its `::` path
    pub fn add_record(&mut self, record: &Value) {
        if let Some(object) = record.as_object() {
            self.add_object(object, &[]);
        }
    }

    fn add_object(&mut self, object: &Map<String, Value>, prefix: &[&str]) {
        for (key, value) in object {
            let mut path = prefix.to_vec();
            path.push(key);
            match value {
                Value::Object(inner) => self.add_object(inner, &path),
                leaf => self
                    .ranges
                    .entry(path.join(RANGE_SEPARATOR))
                    .or_default()
                    .push(leaf.clone()),
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&ValueRange> {
        self.ranges.get(path)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "ranges_tests.rs"]
mod ranges_tests;
