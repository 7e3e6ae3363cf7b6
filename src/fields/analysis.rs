//! Analysis field lookup
//!
//! Analysis parameters live in a handful of conventional containers. The
//! lookup order is fixed and must not be generalized: datasets produced by
//! the evaluation harness rely on it.

use serde_json::Value;
use thiserror::Error;

use super::path::{PATH_SEPARATOR, resolve};

/// Containers searched after an explicit slash path, most specific first
const CONTAINERS: &[&[&str]] = &[
    &["doc", "scoring_guide", "parameters"],
    &["doc", "scoring_guide"],
    &["doc"],
];

/// Field whose integer levels are always shown with human labels
pub const THINK_THROUGH_FIELD: &str = "think_through";

const THINK_THROUGH_LABELS: [&str; 3] = ["No thinking through", "Brief thought", "Deep thought"];

/// Why a record could not contribute a value for a field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("KeyError: '{field}'")]
    NotFound { field: String },

    #[error("Unknown value {value} for '{field}'")]
    UnknownLabel { field: String, value: Value },
}

/// Resolve an analysis field through the container cascade
///
/// Tried in order: the slash path itself (when the name has one),
/// `doc/scoring_guide/parameters`, `doc/scoring_guide`, `doc`, and finally
/// the top level. The first container holding the key wins.
pub fn resolve_analysis_field<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    if field.contains(PATH_SEPARATOR) {
        if let Some(value) = resolve(record, field) {
            return Some(value);
        }
    }
    CONTAINERS
        .iter()
        .find_map(|container| {
            container
                .iter()
                .try_fold(record, |current, key| current.as_object()?.get(*key))
                .and_then(|inner| inner.as_object()?.get(field))
        })
        .or_else(|| record.as_object()?.get(field))
}

/// A named analysis parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisField {
    name: String,
}

impl AnalysisField {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn leaf_name(&self) -> &str {
        self.name
            .rsplit(PATH_SEPARATOR)
            .next()
            .unwrap_or(&self.name)
    }

    /// Resolve this field in a record, applying display relabeling
    pub fn resolve(&self, record: &Value) -> Result<Value, FieldError> {
        let value = resolve_analysis_field(record, &self.name).ok_or_else(|| {
            FieldError::NotFound {
                field: self.name.clone(),
            }
        })?;
        self.relabel(value)
    }

    fn relabel(&self, value: &Value) -> Result<Value, FieldError> {
        if self.leaf_name() != THINK_THROUGH_FIELD {
            return Ok(value.clone());
        }
        // 1.0 and 1 name the same level
        value
            .as_f64()
            .filter(|level| level.fract() == 0.0 && *level >= 0.0)
            .and_then(|level| THINK_THROUGH_LABELS.get(level as usize))
            .map(|label| Value::String((*label).to_string()))
            .ok_or_else(|| FieldError::UnknownLabel {
                field: self.name.clone(),
                value: value.clone(),
            })
    }
}
