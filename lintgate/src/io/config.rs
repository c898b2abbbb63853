//! Gate configuration stored in `lintgate.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};

/// Config file looked up in the invocation directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "lintgate.toml";

/// Gate configuration (TOML).
///
/// Every field is optional in the file. Missing fields fall back to the layout
/// the gate was written for: `backend_api/venv` and `flake8 .`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GateConfig {
    /// Project to lint, relative to the invocation directory unless absolute.
    pub project_dir: PathBuf,

    /// Virtual environment, relative to `project_dir` unless absolute.
    pub venv_dir: PathBuf,

    /// Optional wall-clock limit for the lint run. Unset means wait forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    pub lint: LintConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LintConfig {
    /// Program and arguments (e.g. `["flake8", "."]`).
    pub command: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            command: vec!["flake8".to_string(), ".".to_string()],
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("backend_api"),
            venv_dir: PathBuf::from("venv"),
            timeout_secs: None,
            lint: LintConfig::default(),
        }
    }
}

/// Command-line overrides applied on top of the loaded file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub project_dir: Option<PathBuf>,
    pub venv_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    /// Replaces the lint arguments; the program is kept.
    pub lint_args: Vec<String>,
}

impl GateConfig {
    pub fn validate(&self, path: &Path) -> GateResult<()> {
        let invalid = |reason: &str| GateError::Config {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };
        if is_blank(&self.project_dir) {
            return Err(invalid("project_dir must not be blank"));
        }
        if is_blank(&self.venv_dir) {
            return Err(invalid("venv_dir must not be blank"));
        }
        if self.timeout_secs == Some(0) {
            return Err(invalid("timeout_secs must be > 0"));
        }
        if self.lint_program().is_none() {
            return Err(invalid("lint.command must be a non-empty array"));
        }
        Ok(())
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(project_dir) = overrides.project_dir {
            self.project_dir = project_dir;
        }
        if let Some(venv_dir) = overrides.venv_dir {
            self.venv_dir = venv_dir;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs = Some(timeout_secs);
        }
        if !overrides.lint_args.is_empty() {
            self.lint.command.truncate(1);
            self.lint.command.extend(overrides.lint_args);
        }
    }

    /// Lint program name, `None` when the command is empty or blank.
    pub fn lint_program(&self) -> Option<&str> {
        self.lint
            .command
            .first()
            .map(String::as_str)
            .filter(|program| !program.trim().is_empty())
    }

    pub fn lint_args(&self) -> &[String] {
        self.lint.command.get(1..).unwrap_or_default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn to_toml(&self) -> GateResult<String> {
        toml::to_string_pretty(self).map_err(|err| GateError::Config {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            reason: format!("serialize: {err}"),
        })
    }
}

fn is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}

/// Load config from a TOML file.
///
/// A missing file yields `GateConfig::default()` unless `required` is set, in
/// which case it is an error.
pub fn load_config(path: &Path, required: bool) -> GateResult<GateConfig> {
    if !path.exists() {
        if required {
            return Err(GateError::Config {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }
        let cfg = GateConfig::default();
        cfg.validate(path)?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).map_err(|err| GateError::Config {
        path: path.to_path_buf(),
        reason: format!("read: {err}"),
    })?;
    let cfg: GateConfig = toml::from_str(&contents).map_err(|err| GateError::Config {
        path: path.to_path_buf(),
        reason: format!("parse: {err}"),
    })?;
    cfg.validate(path)?;
    Ok(cfg)
}
