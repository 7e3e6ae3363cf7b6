use std::collections::{HashMap, HashSet};
use std::fmt;

use serde_json::Value;

use crate::fields::analysis::{AnalysisField, FieldError};
use crate::schema::ranges::ScalarKey;

/// All y-values sharing one resolved x-value
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: Value,
    pub values: Vec<Value>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A record that could not contribute to a grouping
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Position of the record in the input slice
    pub record: usize,
    pub error: FieldError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record {}: {}", self.record, self.error)
    }
}

/// Records bucketed by an analysis field
#[derive(Debug, Clone)]
pub struct Grouping {
    field: String,
    y_field: Option<String>,
    min_n: usize,
    groups: Vec<Group>,
    /// Indices into `groups` that meet `min_n`, in reporting order
    valid: Vec<usize>,
    diagnostics: Vec<Diagnostic>,
}

impl Grouping {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn y_field(&self) -> Option<&str> {
        self.y_field.as_deref()
    }

    pub fn min_n(&self) -> usize {
        self.min_n
    }

    /// Every accumulated group, in first-seen order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Groups with at least `min_n` values, sorted when all keys are numeric
    pub fn valid_groups(&self) -> impl Iterator<Item = &Group> {
        self.valid.iter().map(|&i| &self.groups[i])
    }

    pub fn valid_keys(&self) -> Vec<&Value> {
        self.valid_groups().map(|group| &group.key).collect()
    }

    /// Number of groups left out of the report for being below `min_n`
    pub fn excluded_count(&self) -> usize {
        self.groups.len() - self.valid.len()
    }

    /// Records that contributed to any group, excluded ones included
    pub fn total_records(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    pub fn keys_numeric(&self) -> bool {
        self.groups.iter().all(|group| group.key.is_number())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Bucket y-values by the resolved value of `x_field`
///
/// `x_field` goes through the analysis cascade; `y_field` is a direct
/// top-level key and defaults to a constant `1` when missing or not
/// requested. Records whose x-value cannot be resolved are reported as
/// diagnostics and skipped.
pub fn group(records: &[Value], x_field: &str, y_field: Option<&str>, min_n: usize) -> Grouping {
    let field = AnalysisField::new(x_field);
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<ScalarKey, usize> = HashMap::new();
    let mut diagnostics = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let key = match field.resolve(record) {
            Ok(key) => key,
            Err(error) => {
                log::debug!("Skipping record {} for '{}': {}", i, x_field, error);
                diagnostics.push(Diagnostic { record: i, error });
                continue;
            }
        };
        let y = y_field
            .and_then(|name| record.get(name))
            .cloned()
            .unwrap_or_else(|| Value::from(1));

        let slot = *index.entry(ScalarKey::of_any(&key)).or_insert_with(|| {
            groups.push(Group {
                key,
                values: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].values.push(y);
    }

    let mut valid: Vec<usize> = (0..groups.len())
        .filter(|&i| groups[i].len() >= min_n)
        .collect();
    if groups.iter().all(|group| group.key.is_number()) {
        valid.sort_by(|&a, &b| {
            let x = groups[a].key.as_f64().unwrap_or(f64::NAN);
            let y = groups[b].key.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        });
    }

    Grouping {
        field: x_field.to_string(),
        y_field: y_field.map(str::to_string),
        min_n,
        groups,
        valid,
        diagnostics,
    }
}

/// Distinct resolved values of a field, in first-seen order
///
/// Built independently of [`group`] so callers can skip fields whose values
/// are all the same before doing any grouping work.
pub fn distinct_values(records: &[Value], x_field: &str) -> Vec<Value> {
    let field = AnalysisField::new(x_field);
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|record| field.resolve(record).ok())
        .filter(|value| seen.insert(ScalarKey::of_any(value)))
        .collect()
}

#[cfg(test)]
#[path = "grouping_tests.rs"]
mod grouping_tests;
