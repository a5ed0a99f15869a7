//! Pluggable yearly projection models.
//!
//! Provides:
//! - `ModelDescriptor`: the ordered, explicitly declared slot schema of a model
//! - `Model`: the trait a model implements (assignable slots + `run`)
//! - binding between a `TimeSeriesTable` and a live model, in both directions
//! - `ModelRuntime`: bind -> run -> harvest state machine
//! - `ModelRegistry`: model id -> descriptor + constructor
//! - bundled sample models

pub mod binding;
pub mod descriptor;
pub mod error;
pub mod model;
pub mod models;
pub mod registry;
pub mod runtime;

pub use binding::{BindReport, bind_into, collect_series, harvest_from};
pub use descriptor::{DescriptorBuilder, ModelDescriptor, Slot, SlotKind};
pub use error::{ModelError, ModelResult, RuntimeError, RuntimeResult};
pub use model::Model;
pub use registry::{ModelEntry, ModelFactory, ModelRegistry};
pub use runtime::{ModelRuntime, RunState};
