use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::grouping::Diagnostic;
use crate::fields::analysis::AnalysisField;
use crate::schema::ranges::ScalarKey;
use crate::json::{display_value, total_cmp};

/// One combination of field values, in the order the fields were listed
pub type Combination = Vec<(String, Value)>;

/// How often each joint value of several fields occurs
#[derive(Debug, Clone, Default)]
pub struct Combinations {
    fields: Vec<String>,
    /// Sorted by descending count, then by the combination itself
    counts: Vec<(Combination, usize)>,
    diagnostics: Vec<Diagnostic>,
}

impl Combinations {
    /// Tally the combinations of `fields` across records
    ///
    /// Every field is resolved for every record so that each missing field is
    /// reported, but only records where all fields resolved are counted.
    pub fn tally(records: &[Value], fields: &[String]) -> Self {
        let resolvers: Vec<AnalysisField> = fields.iter().map(AnalysisField::new).collect();
        let mut index: HashMap<Vec<ScalarKey>, usize> = HashMap::new();
        let mut counts: Vec<(Combination, usize)> = Vec::new();
        let mut diagnostics = Vec::new();

        for (i, record) in records.iter().enumerate() {
            let mut combination = Combination::with_capacity(resolvers.len());
            let mut complete = true;
            for field in &resolvers {
                match field.resolve(record) {
                    Ok(value) => combination.push((field.name().to_string(), value)),
                    Err(error) => {
                        complete = false;
                        diagnostics.push(Diagnostic { record: i, error });
                    }
                }
            }
            if !complete {
                continue;
            }
            let key: Vec<ScalarKey> = combination
                .iter()
                .map(|(_, value)| ScalarKey::of_any(value))
                .collect();
            match index.get(&key) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(key, counts.len());
                    counts.push((combination, 1));
                }
            }
        }

        counts.sort_by(|(a, count_a), (b, count_b)| {
            count_b.cmp(count_a).then_with(|| compare_combinations(a, b))
        });

        Self {
            fields: fields.to_vec(),
            counts,
            diagnostics,
        }
    }

    pub fn counts(&self) -> &[(Combination, usize)] {
        &self.counts
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Records where every field resolved
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

fn compare_combinations(a: &Combination, b: &Combination) -> Ordering {
    a.iter()
        .zip(b)
        .map(|((field_a, value_a), (field_b, value_b))| {
            field_a.cmp(field_b).then_with(|| total_cmp(value_a, value_b))
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

impl fmt::Display for Combinations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        writeln!(f, "Combinations of {}", self.fields.join(", "))?;
        write!(f, "Records: {}", total)?;
        if !self.diagnostics.is_empty() {
            write!(f, " ({} missing field values)", self.diagnostics.len())?;
        }
        for (combination, count) in &self.counts {
            let percent = *count as f64 / total as f64 * 100.0;
            let values = combination
                .iter()
                .map(|(field, value)| format!("{}={}", field, display_value(value)))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "\n{:>6.1}% ({}) {}", percent, count, values)?;
        }
        Ok(())
    }
}

/// Render the combinatoric report for several fields
pub fn report_combinatoric(records: &[Value], fields: &[String]) -> String {
    Combinations::tally(records, fields).to_string()
}

#[cfg(test)]
#[path = "combinatoric_tests.rs"]
mod combinatoric_tests;
