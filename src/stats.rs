//! Grouping and statistics for analysis fields
//!
//! Records are bucketed by the value of an analysis field (`grouping`), then
//! summarized per bucket (`descriptive`), across buckets (`regression`) and
//! rendered as a text report (`report`). `combinatoric` tallies joint values
//! of several fields.

pub mod combinatoric;
pub mod descriptive;
pub mod grouping;
pub mod regression;
pub mod report;

pub use combinatoric::{Combinations, report_combinatoric};
pub use descriptive::Summary;
pub use grouping::{Diagnostic, Group, Grouping, distinct_values, group};
pub use regression::{Anova, LinearFit, linear_regression, one_way_anova};
pub use report::report;
