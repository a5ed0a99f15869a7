//! Error types for model definition and execution.

use ef_core::CoreError;
use thiserror::Error;

/// Errors raised by a model or by its descriptor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid model descriptor: {what}")]
    InvalidDescriptor { what: String },

    #[error("Model has no series slot named '{slot}'")]
    UnknownSlot { slot: String },

    #[error("Input series '{slot}' was never bound")]
    MissingInput { slot: String },

    #[error("Series '{slot}' has {len} values, projection needs {needed}")]
    ShortSeries {
        slot: String,
        len: usize,
        needed: usize,
    },

    #[error("Projection failed: {message}")]
    Failed { message: String },
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while binding, running or harvesting a model.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The model's projection step failed.
    #[error("Model '{model}' failed during projection")]
    Execution {
        model: String,
        #[source]
        source: ModelError,
    },

    #[error("Model '{model}' must be bound before it can run")]
    NotBound { model: String },

    #[error("Binding data into model '{model}' failed")]
    Binding {
        model: String,
        #[source]
        source: ModelError,
    },

    #[error("Harvesting results of model '{model}' failed")]
    Harvest {
        model: String,
        #[source]
        source: CoreError,
    },

    #[error("Unknown model: {name}")]
    UnknownModel { name: String },

    #[error("Model '{id}' is already registered")]
    DuplicateModel { id: String },

    #[error("Model '{id}' could not be registered")]
    InvalidModel {
        id: String,
        #[source]
        source: ModelError,
    },
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
