//! Copy-in / evaluate / harvest cycle of a user script.

use std::path::Path;

use ef_core::{TimeSeries, TimeSeriesTable, YEARS};
use ef_model::{Model, ModelDescriptor};

use crate::error::{ScriptError, ScriptResult};
use crate::eval::{Environment, Interpreter};
use crate::parser::parse_program;
use crate::value::Value;

/// Name under which the period count is exposed. Never harvested.
pub const YEAR_COUNT_BINDING: &str = "LL";

/// What a successful script wrote into the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutcome {
    /// Every harvested series, in environment order.
    pub written: Vec<String>,
    /// The subset of `written` that did not exist in the table before.
    pub created: Vec<String>,
}

/// Runs user scripts against a model's current variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptRuntime {
    interpreter: Interpreter,
}

impl ScriptRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interpreter(interpreter: Interpreter) -> Self {
        Self { interpreter }
    }

    /// Evaluate `source` and merge every array it leaves behind into `table`.
    ///
    /// Bindings come from the model's current slot values, not from the
    /// table. Nothing is merged unless parsing, evaluation and the length
    /// check of every harvested array all succeed.
    pub fn run_script(
        &self,
        source: &str,
        table: &mut TimeSeriesTable,
        descriptor: &ModelDescriptor,
        model: &dyn Model,
    ) -> ScriptResult<ScriptOutcome> {
        let program = parse_program(source)?;
        let mut env = copy_in(table, descriptor, model);
        tracing::info!(
            model = descriptor.id(),
            statements = program.stmts.len(),
            bindings = env.len(),
            "running script"
        );
        self.interpreter.execute(&program, &mut env)?;

        let harvested = harvest(&env);
        let created: Vec<String> = harvested
            .iter()
            .filter(|s| !table.contains(&s.name))
            .map(|s| s.name.clone())
            .collect();
        let written: Vec<String> = harvested.iter().map(|s| s.name.clone()).collect();
        table.merge(harvested).map_err(ScriptError::Harvest)?;
        tracing::debug!(?written, ?created, "harvested script bindings");

        Ok(ScriptOutcome { written, created })
    }

    /// Read a script file and run it exactly like [`run_script`](Self::run_script).
    pub fn run_script_file(
        &self,
        path: &Path,
        table: &mut TimeSeriesTable,
        descriptor: &ModelDescriptor,
        model: &dyn Model,
    ) -> ScriptResult<ScriptOutcome> {
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.run_script(&source, table, descriptor, model)
    }
}

/// Fresh environment holding `LL` and every assigned series slot.
pub fn copy_in(table: &TimeSeriesTable, descriptor: &ModelDescriptor, model: &dyn Model) -> Environment {
    let mut env = Environment::new();
    env.set(YEAR_COUNT_BINDING, Value::Scalar(table.period_count() as f64));
    for slot in descriptor.series_slots() {
        if let Some(values) = model.series(&slot.name) {
            env.set(slot.name.as_str(), Value::Array(values.to_vec()));
        }
    }
    env
}

/// Every array binding except `LL` and the year axis, in environment order.
pub fn harvest(env: &Environment) -> Vec<TimeSeries> {
    env.arrays()
        .filter(|(name, _)| *name != YEAR_COUNT_BINDING && *name != YEARS)
        .map(|(name, values)| TimeSeries::new(name, values.to_vec()))
        .collect()
}
