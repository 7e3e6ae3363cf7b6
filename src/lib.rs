//! jlens library - JSONL inspection tool
//!
//! This library exposes the core functionality of jlens: field resolution,
//! structure summaries, grouping statistics and the printing pipeline.

pub mod analysis;
pub mod config;
pub mod display;
pub mod error;
pub mod fields;
pub mod filter;
pub mod input;
pub mod json;
pub mod render;
pub mod schema;
pub mod session;
pub mod stats;
pub mod syntax_highlight;
pub mod theme;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::JlensError;
