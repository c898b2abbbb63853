//! Gate orchestration: project directory, activation, lint, verdict.
//!
//! Each setup step aborts the run on failure, so the lint tool is only invoked
//! once the directory and environment are known good.

use std::ffi::OsStr;
use std::path::Path;
use std::time::Instant;

use tracing::{info, instrument};

use crate::core::verdict::{GateOutcome, Verdict};
use crate::error::{GateError, GateResult};
use crate::io::config::{DEFAULT_CONFIG_FILE, GateConfig};
use crate::io::lint::{LintRequest, LintRunner};
use crate::io::venv::activate;
use crate::io::workdir::resolve_project_dir;

/// Run the gate once.
///
/// `base_dir` anchors a relative `project_dir`; `inherited_path` is the `PATH`
/// the activated environment is layered over.
#[instrument(skip_all, fields(project_dir = %config.project_dir.display()))]
pub fn run_gate<R: LintRunner>(
    config: &GateConfig,
    base_dir: &Path,
    inherited_path: Option<&OsStr>,
    runner: &R,
) -> GateResult<GateOutcome> {
    let project = resolve_project_dir(base_dir, &config.project_dir)?;
    let env = activate(&project, &config.venv_dir, inherited_path)?;
    let program = config
        .lint_program()
        .ok_or_else(|| GateError::Config {
            path: base_dir.join(DEFAULT_CONFIG_FILE),
            reason: "lint.command must be a non-empty array".to_string(),
        })?;
    let program = env.resolve_program(program, project.path())?;

    let request = LintRequest {
        program,
        args: config.lint_args().to_vec(),
        workdir: project.path().to_path_buf(),
        env,
        timeout: config.timeout(),
    };

    let started = Instant::now();
    let lint_exit = runner.run(&request)?;
    let outcome = GateOutcome::new(lint_exit, started.elapsed());

    match outcome.verdict {
        Verdict::Pass => info!(elapsed = ?outcome.elapsed, "lint gate passed"),
        Verdict::Fail => info!(%lint_exit, elapsed = ?outcome.elapsed, "lint gate failed"),
    }
    Ok(outcome)
}
