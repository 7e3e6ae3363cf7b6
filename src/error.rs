use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JlensError {
    #[error(
        "File output is only supported by the console renderer. Use `> output.txt` instead."
    )]
    ExportUnsupported,

    #[error("Invalid JSON input: {0}")]
    InvalidJson(String),

    #[error("Failed to write chart to {path}: {source}")]
    Chart {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
