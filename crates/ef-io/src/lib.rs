//! ef-io: whitespace table loader and report writers.

pub mod loader;
pub mod report;

pub use loader::{forward_fill, load_table, parse_table};
pub use report::{ReportDocument, ReportRow, format_json, format_report, ordered_names, write_report};

use std::path::PathBuf;

pub type DataResult<T> = Result<T, DataError>;

/// Malformed input table.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Format error at line {line}: {message} ({text:?})")]
pub struct FormatError {
    /// 1-based line number in the source text.
    pub line: usize,
    pub text: String,
    pub message: String,
}

impl FormatError {
    pub(crate) fn new(line: usize, text: &str, message: impl Into<String>) -> Self {
        Self {
            line,
            text: text.to_string(),
            message: message.into(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
