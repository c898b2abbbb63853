//! Lint tool adapter.
//!
//! [`LintRunner`] separates the gate from process spawning so orchestration can
//! be tested with scripted exits. [`ProcessLintRunner`] is the real thing.

use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;

use tracing::{debug, instrument, warn};
use wait_timeout::ChildExt;

use crate::core::verdict::LintExit;
use crate::error::{GateError, GateResult};
use crate::io::venv::ActivatedEnv;

#[derive(Debug, Clone)]
pub struct LintRequest {
    /// Resolved executable path.
    pub program: PathBuf,
    pub args: Vec<String>,
    pub workdir: PathBuf,
    pub env: ActivatedEnv,
    /// `None` waits until the tool exits on its own.
    pub timeout: Option<Duration>,
}

pub trait LintRunner {
    /// Run the lint tool to completion and report how it terminated.
    fn run(&self, request: &LintRequest) -> GateResult<LintExit>;
}

/// Spawns the lint tool with inherited stdio so its report streams straight through.
pub struct ProcessLintRunner;

impl LintRunner for ProcessLintRunner {
    #[instrument(skip_all, fields(program = %request.program.display(), timeout_secs = request.timeout.map(|t| t.as_secs())))]
    fn run(&self, request: &LintRequest) -> GateResult<LintExit> {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args)
            .current_dir(&request.workdir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        request.env.apply(&mut cmd);

        debug!(workdir = %request.workdir.display(), "spawning lint tool");
        let mut child = match cmd.spawn() {
            Ok(c) => c,
            Err(e) => {
                debug!(err = %e, "failed to spawn lint tool");
                return Err(GateError::Spawn {
                    program: request.program.display().to_string(),
                    source: e,
                });
            }
        };

        let status = match request.timeout {
            None => child.wait().map_err(|source| GateError::Wait { source })?,
            Some(timeout) => match child
                .wait_timeout(timeout)
                .map_err(|source| GateError::Wait { source })?
            {
                Some(status) => status,
                None => {
                    warn!(
                        timeout_secs = timeout.as_secs(),
                        "lint tool timed out, killing"
                    );
                    child.kill().map_err(|source| GateError::Wait { source })?;
                    child.wait().map_err(|source| GateError::Wait { source })?;
                    return Ok(LintExit::TimedOut);
                }
            },
        };

        let exit = lint_exit(status);
        debug!(%exit, "lint tool finished");
        Ok(exit)
    }
}

pub fn lint_exit(status: ExitStatus) -> LintExit {
    match status.code() {
        Some(code) => LintExit::Code(code),
        None => LintExit::Signaled,
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;
    use std::os::unix::process::ExitStatusExt;
    use std::path::Path;

    use super::*;
    use crate::io::venv::activate;
    use crate::io::workdir::resolve_project_dir;
    use crate::test_support::TestProject;

    fn request_for(project: &TestProject, timeout: Option<Duration>) -> LintRequest {
        let dir = resolve_project_dir(project.root(), Path::new("backend_api")).expect("dir");
        let env = activate(&dir, Path::new("venv"), Some(std::ffi::OsStr::new("/usr/bin:/bin")))
            .expect("activate");
        LintRequest {
            program: env.bin_dir.join("flake8"),
            args: vec![".".to_string()],
            workdir: dir.path().to_path_buf(),
            env,
            timeout,
        }
    }

    #[test]
    fn raw_status_maps_to_lint_exit() {
        assert_eq!(lint_exit(ExitStatus::from_raw(0)), LintExit::Code(0));
        assert_eq!(lint_exit(ExitStatus::from_raw(2 << 8)), LintExit::Code(2));
        assert_eq!(lint_exit(ExitStatus::from_raw(9)), LintExit::Signaled);
    }

    #[test]
    fn captures_tool_exit_code() {
        let project = TestProject::new().expect("project");
        project.install_lint_tool(3).expect("install");
        let exit = ProcessLintRunner
            .run(&request_for(&project, None))
            .expect("run");
        assert_eq!(exit, LintExit::Code(3));
        assert!(project.lint_invoked());
    }

    #[test]
    fn child_runs_activated_in_project_dir() {
        let project = TestProject::new().expect("project");
        project
            .install_script(
                &project.venv_bin(),
                "flake8",
                "#!/bin/sh\nprintf '%s\\n%s\\n%s\\n%s\\n%s\\n' \"$VIRTUAL_ENV\" \"$(pwd -P)\" \"$1\" \
                 \"${PYTHONHOME+set}\" \"$PATH\" > env.txt\n",
            )
            .expect("install");
        let request = request_for(&project, None);
        let exit = ProcessLintRunner.run(&request).expect("run");
        assert_eq!(exit, LintExit::Code(0));

        let recorded = fs::read_to_string(request.workdir.join("env.txt")).expect("env.txt");
        let lines: Vec<&str> = recorded.lines().collect();
        assert_eq!(lines[0], request.env.venv_dir.to_string_lossy());
        assert_eq!(lines[1], request.workdir.to_string_lossy());
        assert_eq!(lines[2], ".");
        assert_eq!(lines[3], "", "PYTHONHOME must not reach the lint tool");
        let first_path = std::env::split_paths(lines[4]).next().expect("PATH entry");
        assert_eq!(first_path, request.env.bin_dir);
    }

    #[test]
    fn timeout_kills_and_reports_timed_out() {
        let project = TestProject::new().expect("project");
        project
            .install_script(&project.venv_bin(), "flake8", "#!/bin/sh\nexec sleep 30\n")
            .expect("install");
        let exit = ProcessLintRunner
            .run(&request_for(&project, Some(Duration::from_millis(200))))
            .expect("run");
        assert_eq!(exit, LintExit::TimedOut);
    }

    #[test]
    fn spawn_failure_is_reported() {
        let project = TestProject::new().expect("project");
        let err = ProcessLintRunner
            .run(&request_for(&project, None))
            .expect_err("no flake8 installed");
        assert!(matches!(err, GateError::Spawn { .. }));
    }
}
