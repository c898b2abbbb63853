//! Virtual environment activation for the lint child process.
//!
//! Mirrors what `source venv/bin/activate` does to a shell, but scoped to the
//! child's environment: `VIRTUAL_ENV` is set, the venv bin directory goes to the
//! front of `PATH`, and `PYTHONHOME` is removed.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{GateError, GateResult};
use crate::io::workdir::ProjectDir;

#[cfg(windows)]
pub const BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
pub const BIN_DIR: &str = "bin";

#[cfg(windows)]
pub const ACTIVATE_SCRIPT: &str = "activate.bat";
#[cfg(not(windows))]
pub const ACTIVATE_SCRIPT: &str = "activate";

/// Activation marker: everything the child needs to resolve venv-local tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatedEnv {
    pub venv_dir: PathBuf,
    pub bin_dir: PathBuf,
    /// `PATH` as the child sees it, venv bin first.
    pub path: OsString,
}

impl ActivatedEnv {
    pub fn apply(&self, cmd: &mut Command) {
        cmd.env("VIRTUAL_ENV", &self.venv_dir)
            .env("PATH", &self.path)
            .env_remove("PYTHONHOME");
    }

    /// Find `program` on the activated `PATH`, so a venv-local executable wins.
    pub fn resolve_program(&self, program: &str, cwd: &Path) -> GateResult<PathBuf> {
        which::which_in(program, Some(&self.path), cwd).map_err(|source| {
            GateError::LintToolNotFound {
                program: program.to_string(),
                source,
            }
        })
    }
}

/// Activate `venv_dir` (relative to the project unless absolute) on top of `base_path`.
pub fn activate(
    project: &ProjectDir,
    venv_dir: &Path,
    base_path: Option<&OsStr>,
) -> GateResult<ActivatedEnv> {
    let venv_dir = project.path().join(venv_dir);
    if !venv_dir.is_dir() {
        return Err(GateError::Environment {
            path: venv_dir,
            reason: "not a directory".to_string(),
        });
    }

    let bin_dir = venv_dir.join(BIN_DIR);
    let script = bin_dir.join(ACTIVATE_SCRIPT);
    if !script.is_file() {
        return Err(GateError::Environment {
            path: venv_dir,
            reason: format!("missing activation script {}", script.display()),
        });
    }

    let inherited = base_path.map(env::split_paths).into_iter().flatten();
    let path = env::join_paths(std::iter::once(bin_dir.clone()).chain(inherited)).map_err(
        |err| GateError::Environment {
            path: venv_dir.clone(),
            reason: format!("build PATH: {err}"),
        },
    )?;

    debug!(venv = %venv_dir.display(), "activated virtual environment");
    Ok(ActivatedEnv {
        venv_dir,
        bin_dir,
        path,
    })
}
