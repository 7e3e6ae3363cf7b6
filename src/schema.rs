//! Structure view of records
//!
//! `summarizer` renders the shape of one record; `ranges` aggregates the
//! values seen at every field path across a sample so the shape can be
//! annotated with what the data actually contains.

pub mod ranges;
pub mod summarizer;

pub use ranges::{RANGE_SEPARATOR, RangeError, RangeTable, ValueRange};
pub use summarizer::summarize;
