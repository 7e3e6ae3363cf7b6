//! Field resolution
//!
//! Locates semantically-named fields inside heterogeneous records: plain and
//! slash-delimited paths, the alias table used for printing, and the fixed
//! container cascade used by the analysis commands.

pub mod aliases;
pub mod analysis;
pub mod path;

pub use aliases::{COMMON_LOCATIONS, all_keys, build_parts, resolve_alias, resolve_logical};
pub use analysis::{AnalysisField, resolve_analysis_field};
pub use path::{PATH_SEPARATOR, resolve, resolve_nested};
