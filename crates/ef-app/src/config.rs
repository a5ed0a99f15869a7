//! Session files: one end-to-end run described in YAML or JSON.
//!
//! ```yaml
//! model: gdp
//! data: data/data1.txt
//! scripts:
//!   - file: scripts/ratios.efs
//!   - inline: "share = KI / PKB"
//! output: out/report.tsv
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Registry id or alias of the model.
    pub model: String,
    pub data: PathBuf,
    #[serde(default = "default_run_model")]
    pub run_model: bool,
    /// Run in order after the model.
    #[serde(default)]
    pub scripts: Vec<ScriptSource>,
    /// Report destination; the report is only returned when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub format: ReportFormat,
}

fn default_run_model() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptSource {
    File { file: PathBuf },
    Inline { inline: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Tsv,
    Json,
}

impl SessionConfig {
    /// Minimal config: run `model` on `data`, no scripts, report returned.
    pub fn new(model: impl Into<String>, data: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            data: data.into(),
            run_model: true,
            scripts: Vec::new(),
            output: None,
            format: ReportFormat::Tsv,
        }
    }

    /// Rewrite every relative path as relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        resolve(&mut self.data, base);
        if let Some(output) = self.output.as_mut() {
            resolve(output, base);
        }
        for script in &mut self.scripts {
            if let ScriptSource::File { file } = script {
                resolve(file, base);
            }
        }
    }
}

fn resolve(path: &mut PathBuf, base: &Path) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}

/// Load a session file, choosing the parser by extension. Relative paths
/// inside it are resolved against the file's directory.
pub fn load_session_config(path: &Path) -> AppResult<SessionConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let parsed = match extension.as_deref() {
        Some("yaml" | "yml") => serde_yaml::from_str::<SessionConfig>(&content).map_err(|e| e.to_string()),
        Some("json") => serde_json::from_str::<SessionConfig>(&content).map_err(|e| e.to_string()),
        _ => {
            return Err(AppError::UnsupportedConfig {
                path: path.to_path_buf(),
            });
        }
    };
    let mut config = parsed.map_err(|message| AppError::Config {
        path: path.to_path_buf(),
        message,
    })?;

    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_defaults() {
        let config: SessionConfig = serde_yaml::from_str("model: gdp\ndata: data1.txt\n").unwrap();
        assert_eq!(config, SessionConfig::new("gdp", "data1.txt"));
        assert!(config.run_model);
        assert_eq!(config.format, ReportFormat::Tsv);
    }

    #[test]
    fn script_entries_keep_order() {
        let yaml = r#"
model: Model1
data: d.txt
run_model: false
scripts:
  - inline: "a = KI * 2"
  - file: s.efs
format: json
"#;
        let config: SessionConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.run_model);
        assert_eq!(config.format, ReportFormat::Json);
        assert_eq!(
            config.scripts,
            vec![
                ScriptSource::Inline {
                    inline: "a = KI * 2".to_string()
                },
                ScriptSource::File {
                    file: PathBuf::from("s.efs")
                },
            ]
        );
    }

    #[test]
    fn json_form_matches_yaml_form() {
        let json = r#"{"model":"gdp","data":"d.txt","scripts":[{"file":"s.efs"}],"output":"out.tsv"}"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.output, Some(PathBuf::from("out.tsv")));
        assert_eq!(config.scripts.len(), 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_yaml::from_str::<SessionConfig>("model: gdp\ndata: d\nmodle: x\n").is_err());
    }

    #[test]
    fn relative_paths_follow_the_session_file() {
        let mut config = SessionConfig::new("gdp", "data/d.txt");
        config.output = Some(PathBuf::from("/abs/out.tsv"));
        config.scripts.push(ScriptSource::File {
            file: PathBuf::from("s.efs"),
        });
        config.resolve_paths(Path::new("/work/run"));
        assert_eq!(config.data, PathBuf::from("/work/run/data/d.txt"));
        assert_eq!(config.output, Some(PathBuf::from("/abs/out.tsv")));
        assert_eq!(
            config.scripts[0],
            ScriptSource::File {
                file: PathBuf::from("/work/run/s.efs")
            }
        );
    }

    #[test]
    fn unsupported_extension() {
        let path = std::env::temp_dir().join("ef_app_session_config.toml");
        std::fs::write(&path, "model = 'gdp'").unwrap();
        let err = load_session_config(&path).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedConfig { .. }));
        let _ = std::fs::remove_file(&path);
    }
}
