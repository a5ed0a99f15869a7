//! Orchestration of one load / run / script / report sequence.

use std::path::Path;
use std::sync::Arc;

use ef_core::TimeSeriesTable;
use ef_io::{format_json, format_report, load_table, parse_table, write_report};
use ef_model::{BindReport, ModelEntry, ModelFactory, ModelRegistry, ModelRuntime};
use ef_script::{ScriptOutcome, ScriptRuntime};

use crate::config::{ReportFormat, ScriptSource, SessionConfig};
use crate::error::{AppError, AppResult};

/// Owns the table and the model instance for one end-to-end run.
///
/// Every step returns `&mut Self` so calls chain with `?`:
///
/// ```no_run
/// # use ef_app::{AppResult, Session};
/// # use ef_model::ModelRegistry;
/// # fn demo() -> AppResult<String> {
/// let registry = ModelRegistry::builtin()?;
/// let mut session = Session::new("gdp", &registry)?;
/// session
///     .read_data_from("data/data1.txt")?
///     .run_model()?
///     .run_script("ratio = KI / PKB")?;
/// session.results_tsv()
/// # }
/// ```
#[derive(Debug)]
pub struct Session {
    runtime: ModelRuntime,
    factory: ModelFactory,
    table: Option<TimeSeriesTable>,
    scripts: ScriptRuntime,
    last_bind: Option<BindReport>,
    last_script: Option<ScriptOutcome>,
}

impl Session {
    pub fn new(model: &str, registry: &ModelRegistry) -> AppResult<Self> {
        Ok(Self::from_entry(registry.get(model)?))
    }

    pub fn from_entry(entry: &ModelEntry) -> Self {
        Self {
            runtime: ModelRuntime::new(Arc::clone(&entry.descriptor), (entry.factory)()),
            factory: entry.factory,
            table: None,
            scripts: ScriptRuntime::new(),
            last_bind: None,
            last_script: None,
        }
    }

    pub fn with_script_runtime(mut self, scripts: ScriptRuntime) -> Self {
        self.scripts = scripts;
        self
    }

    /// Load a data file and bind it into the model.
    pub fn read_data_from(&mut self, path: impl AsRef<Path>) -> AppResult<&mut Self> {
        let table = load_table(path.as_ref())?;
        self.use_table(table)
    }

    /// Parse table text and bind it into the model.
    pub fn read_data_str(&mut self, text: &str) -> AppResult<&mut Self> {
        let table = parse_table(text)?;
        self.use_table(table)
    }

    /// Replace the session table and bind it into a fresh model instance,
    /// so no slot keeps values from an earlier table.
    pub fn use_table(&mut self, table: TimeSeriesTable) -> AppResult<&mut Self> {
        let mut runtime = ModelRuntime::new(self.runtime.shared_descriptor(), (self.factory)());
        let report = runtime.bind(&table)?;
        self.runtime = runtime;
        self.table = Some(table);
        self.last_bind = Some(report);
        self.last_script = None;
        Ok(self)
    }

    /// Bind, run the projection and merge its series into the table.
    pub fn run_model(&mut self) -> AppResult<&mut Self> {
        let table = self.table.as_mut().ok_or_else(|| AppError::NoData {
            model: self.runtime.descriptor().id().to_string(),
        })?;
        let report = self.runtime.execute(table)?;
        self.last_bind = Some(report);
        Ok(self)
    }

    /// Run inline script source against the model's current variables.
    pub fn run_script(&mut self, source: &str) -> AppResult<&mut Self> {
        let table = self.table.as_mut().ok_or_else(|| AppError::NoData {
            model: self.runtime.descriptor().id().to_string(),
        })?;
        let outcome = self
            .scripts
            .run_script(source, table, self.runtime.descriptor(), self.runtime.model())?;
        self.last_script = Some(outcome);
        Ok(self)
    }

    pub fn run_script_from_file(&mut self, path: impl AsRef<Path>) -> AppResult<&mut Self> {
        let table = self.table.as_mut().ok_or_else(|| AppError::NoData {
            model: self.runtime.descriptor().id().to_string(),
        })?;
        let outcome = self.scripts.run_script_file(
            path.as_ref(),
            table,
            self.runtime.descriptor(),
            self.runtime.model(),
        )?;
        self.last_script = Some(outcome);
        Ok(self)
    }

    pub fn results_tsv(&self) -> AppResult<String> {
        Ok(format_report(self.loaded()?, self.runtime.descriptor()))
    }

    pub fn results_json(&self) -> AppResult<String> {
        Ok(format_json(self.loaded()?, self.runtime.descriptor())?)
    }

    pub fn results(&self, format: ReportFormat) -> AppResult<String> {
        match format {
            ReportFormat::Tsv => self.results_tsv(),
            ReportFormat::Json => self.results_json(),
        }
    }

    pub fn table(&self) -> Option<&TimeSeriesTable> {
        self.table.as_ref()
    }

    pub fn runtime(&self) -> &ModelRuntime {
        &self.runtime
    }

    /// Slots matched by the most recent bind.
    pub fn bind_report(&self) -> Option<&BindReport> {
        self.last_bind.as_ref()
    }

    /// Series written by the most recent successful script.
    pub fn last_script(&self) -> Option<&ScriptOutcome> {
        self.last_script.as_ref()
    }

    fn loaded(&self) -> AppResult<&TimeSeriesTable> {
        self.table.as_ref().ok_or_else(|| AppError::NoData {
            model: self.runtime.descriptor().id().to_string(),
        })
    }
}

/// Drive a whole session file and return the report text. The report is
/// also written to `config.output` when set.
pub fn run_session_config(config: &SessionConfig, registry: &ModelRegistry) -> AppResult<String> {
    tracing::info!(model = %config.model, data = %config.data.display(), "starting session");
    let mut session = Session::new(&config.model, registry)?;
    session.read_data_from(&config.data)?;
    if config.run_model {
        session.run_model()?;
    }
    for script in &config.scripts {
        match script {
            ScriptSource::File { file } => session.run_script_from_file(file)?,
            ScriptSource::Inline { inline } => session.run_script(inline)?,
        };
    }

    let report = session.results(config.format)?;
    if let Some(output) = &config.output {
        write_report(output, &report)?;
        tracing::info!(path = %output.display(), "report written");
    }
    Ok(report)
}
