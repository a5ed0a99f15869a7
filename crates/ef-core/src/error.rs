use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Series '{name}' has {len} values but the table holds {expected} periods")]
    LengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },

    #[error("Series name '{name}' is reserved for the year axis")]
    ReservedName { name: String },

    #[error("Series name must not be empty")]
    EmptyName,
}
