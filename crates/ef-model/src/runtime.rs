//! Bind -> run -> harvest lifecycle of one model instance.

use std::sync::Arc;

use ef_core::{TimeSeries, TimeSeriesTable};

use crate::binding::{BindReport, bind_into, collect_series};
use crate::descriptor::ModelDescriptor;
use crate::error::{RuntimeError, RuntimeResult};
use crate::model::Model;

/// Lifecycle state of a [`ModelRuntime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Unbound,
    Bound,
    Ran,
}

/// Owns a live model instance and drives it against a table.
///
/// The model works on its own copies of the table's series; results reach
/// the table only through an explicit harvest, so a failed projection never
/// leaves partial values in the table.
pub struct ModelRuntime {
    descriptor: Arc<ModelDescriptor>,
    model: Box<dyn Model>,
    state: RunState,
}

impl ModelRuntime {
    pub fn new(descriptor: Arc<ModelDescriptor>, model: Box<dyn Model>) -> Self {
        Self {
            descriptor,
            model,
            state: RunState::Unbound,
        }
    }

    pub fn descriptor(&self) -> &ModelDescriptor {
        &self.descriptor
    }

    pub fn shared_descriptor(&self) -> Arc<ModelDescriptor> {
        Arc::clone(&self.descriptor)
    }

    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Copy `table` into the model. Allowed from any state.
    pub fn bind(&mut self, table: &TimeSeriesTable) -> RuntimeResult<BindReport> {
        let report = bind_into(table, self.model.as_mut(), &self.descriptor).map_err(|source| {
            RuntimeError::Binding {
                model: self.descriptor.id().to_string(),
                source,
            }
        })?;
        self.state = RunState::Bound;
        Ok(report)
    }

    /// Invoke the projection once and return the harvested series.
    ///
    /// Requires a preceding [`bind`](Self::bind). A failed projection resets
    /// the runtime to `Unbound`, since the model's slots are then in an
    /// unknown state.
    pub fn run(&mut self) -> RuntimeResult<Vec<TimeSeries>> {
        if self.state != RunState::Bound {
            return Err(RuntimeError::NotBound {
                model: self.descriptor.id().to_string(),
            });
        }

        tracing::info!(model = self.descriptor.id(), "running model projection");
        if let Err(source) = self.model.run() {
            self.state = RunState::Unbound;
            return Err(RuntimeError::Execution {
                model: self.descriptor.id().to_string(),
                source,
            });
        }
        self.state = RunState::Ran;
        tracing::info!(model = self.descriptor.id(), "model run completed");

        Ok(collect_series(self.model.as_ref(), &self.descriptor))
    }

    /// Bind, run and merge the results back into `table`.
    pub fn execute(&mut self, table: &mut TimeSeriesTable) -> RuntimeResult<BindReport> {
        let report = self.bind(table)?;
        let harvested = self.run()?;
        let written = table
            .merge(harvested)
            .map_err(|source| RuntimeError::Harvest {
                model: self.descriptor.id().to_string(),
                source,
            })?;
        tracing::debug!(model = self.descriptor.id(), written, "harvested model series");
        Ok(report)
    }
}

impl std::fmt::Debug for ModelRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRuntime")
            .field("model", &self.descriptor.id())
            .field("state", &self.state)
            .finish()
    }
}
