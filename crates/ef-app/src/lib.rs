//! Session layer for econflow.
//!
//! Ties the loader, the model registry, the script runtime and the report
//! writers into one chained API shared by the CLI and tests.

pub mod catalog;
pub mod config;
pub mod error;
pub mod session;

pub use catalog::{DataSummary, ModelSummary, check_data, list_models};
pub use config::{ReportFormat, ScriptSource, SessionConfig, load_session_config};
pub use error::{AppError, AppResult};
pub use session::{Session, run_session_config};
