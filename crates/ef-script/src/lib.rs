//! Sandboxed array-expression scripts over the model's variables.
//!
//! A script sees `LL` and every declared series slot of the model as named
//! bindings, may overwrite them or create new arrays, and every array left
//! in its environment afterwards is merged back into the table.
//!
//! # Language
//!
//! ```text
//! # comments start with '#' or '//'
//! ratio = KI / PKB                    # element-wise, scalars broadcast
//! share = round(ratio * 100)
//! level = zeros(LL)
//! level[0] = KI[0]
//! for t in 1..LL { level[t] = level[t - 1] * twKI[t] }
//! ```
//!
//! There are no unbounded loops, no I/O and no access to anything beyond
//! the bindings passed in.

pub mod ast;
pub mod error;
pub mod eval;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod value;

pub use error::{EvalError, ParseError, ScriptError, ScriptResult};
pub use eval::{Environment, Interpreter};
pub use parser::parse_program;
pub use runtime::{ScriptOutcome, ScriptRuntime, copy_in, harvest};
pub use value::Value;
