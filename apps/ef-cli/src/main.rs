use clap::{Parser, Subcommand, ValueEnum};
use ef_app::{
    AppResult, ReportFormat, ScriptSource, SessionConfig, check_data, list_models,
    load_session_config, run_session_config,
};
use ef_model::ModelRegistry;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ef-cli")]
#[command(about = "EconFlow CLI - yearly time-series projection models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered models and their declared slots
    Models,
    /// Load a data file and summarize it
    Check {
        /// Path to the whitespace-delimited data file
        data: PathBuf,
    },
    /// Run a model and optional scripts, then print the report
    Run {
        /// Model id or alias (e.g., gdp, Model1)
        #[arg(short, long)]
        model: String,
        /// Path to the data file
        #[arg(short, long)]
        data: PathBuf,
        /// Script file to run after the model (repeatable)
        #[arg(short, long = "script")]
        scripts: Vec<PathBuf>,
        /// Inline script source, run after script files (repeatable)
        #[arg(short, long = "eval")]
        evals: Vec<String>,
        /// Bind the data without running the model projection
        #[arg(long)]
        skip_model: bool,
        /// Report file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Report format
        #[arg(short, long, value_enum, default_value_t = Format::Tsv)]
        format: Format,
    },
    /// Run a YAML or JSON session file
    Session {
        /// Path to the session file
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Tsv,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Tsv => ReportFormat::Tsv,
            Format::Json => ReportFormat::Json,
        }
    }
}

fn main() -> AppResult<()> {
    // Logs go to stderr so stdout carries only the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = ModelRegistry::builtin()?;

    match cli.command {
        Commands::Models => cmd_models(&registry),
        Commands::Check { data } => cmd_check(&data),
        Commands::Run {
            model,
            data,
            scripts,
            evals,
            skip_model,
            output,
            format,
        } => {
            let mut config = SessionConfig::new(model, data);
            config.run_model = !skip_model;
            config.scripts = scripts
                .into_iter()
                .map(|file| ScriptSource::File { file })
                .chain(evals.into_iter().map(|inline| ScriptSource::Inline { inline }))
                .collect();
            config.output = output;
            config.format = format.into();
            cmd_run(&config, &registry)
        }
        Commands::Session { path } => cmd_session(&path, &registry),
    }
}

fn cmd_models(registry: &ModelRegistry) -> AppResult<()> {
    let models = list_models(registry);
    if models.is_empty() {
        println!("No models registered");
        return Ok(());
    }

    println!("Registered models:");
    for model in models {
        if model.aliases.is_empty() {
            println!("  {} - {}", model.id, model.description);
        } else {
            println!(
                "  {} (alias: {}) - {}",
                model.id,
                model.aliases.join(", "),
                model.description
            );
        }
        if let Some(year_count) = &model.year_count {
            println!("    year count: {}", year_count);
        }
        println!("    series: {}", model.series.join(" "));
    }
    Ok(())
}

fn cmd_check(data: &Path) -> AppResult<()> {
    println!("Checking data file: {}", data.display());
    let summary = check_data(data)?;
    println!("✓ Data file is valid");
    println!("  LL = {}", summary.periods);
    if let (Some(first), Some(last)) = (summary.years.first(), summary.years.last()) {
        println!("  Years: {} .. {}", first, last);
    }
    println!("  Series ({}): {}", summary.series.len(), summary.series.join(" "));
    Ok(())
}

fn cmd_run(config: &SessionConfig, registry: &ModelRegistry) -> AppResult<()> {
    let report = run_session_config(config, registry)?;
    match &config.output {
        Some(path) => println!("✓ Report written to {}", path.display()),
        None => print!("{}", report),
    }
    Ok(())
}

fn cmd_session(path: &Path, registry: &ModelRegistry) -> AppResult<()> {
    let config = load_session_config(path)?;
    cmd_run(&config, registry)
}
