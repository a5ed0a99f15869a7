//! ef-core: shared foundation for econflow.
//!
//! Contains:
//! - numeric (Real, missing-value sentinel, tolerances)
//! - series (a named, fixed-length yearly series)
//! - table (the shared name -> series store keyed by the `LATA` year axis)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod series;
pub mod table;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use series::TimeSeries;
pub use table::{TimeSeriesTable, YEARS};
