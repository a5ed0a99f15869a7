//! Error types for script parsing and evaluation.

use std::path::PathBuf;

use ef_core::CoreError;
use thiserror::Error;

pub type ScriptResult<T> = Result<T, ScriptError>;

/// A script that could not run to completion. Nothing is harvested.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Unrecognized input at line {line}, column {column}: '{text}'")]
    Lex {
        line: usize,
        column: usize,
        text: String,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Script failed at line {line}")]
    Eval {
        line: usize,
        #[source]
        source: EvalError,
    },

    #[error("Script results could not be stored")]
    Harvest(#[source] CoreError),

    #[error("Failed to read script file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Syntax error with its 1-based position.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Runtime failure inside a statement.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("Operator '{op}' cannot combine {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("Expected {expected}, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Array lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Index must be a whole number, got {value}")]
    InvalidIndex { value: f64 },

    #[error("Unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("Function '{name}' takes {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("Invalid argument to '{name}': {what}")]
    InvalidArgument { name: String, what: String },

    #[error("Loop over {iterations} iterations exceeds the limit of {limit}")]
    LoopTooLong { iterations: u64, limit: u64 },
}
