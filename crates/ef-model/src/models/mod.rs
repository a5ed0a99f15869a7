//! Models bundled with econflow.

pub mod gdp;

pub use gdp::GdpModel;
