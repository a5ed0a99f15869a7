//! Error types for the ef-app session layer.

use std::path::PathBuf;

/// Unified error for the CLI and any other front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Data error: {0}")]
    Data(#[from] ef_io::DataError),

    #[error("Model execution failed: {0}")]
    ModelExecution(#[from] ef_model::RuntimeError),

    #[error("Script execution failed: {0}")]
    ScriptExecution(#[from] ef_script::ScriptError),

    #[error("No data loaded for model '{model}'")]
    NoData { model: String },

    #[error("Failed to read session file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid session file {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Unsupported session file extension: {path} (expected .yaml, .yml or .json)")]
    UnsupportedConfig { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ef-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ef_io::FormatError> for AppError {
    fn from(err: ef_io::FormatError) -> Self {
        AppError::Data(ef_io::DataError::Format(err))
    }
}
