//! Test-only helpers: a scratch project with a fake virtual environment, and a
//! scripted lint runner.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::verdict::LintExit;
use crate::error::GateResult;
use crate::io::lint::{LintRequest, LintRunner};
use crate::io::venv::{ACTIVATE_SCRIPT, BIN_DIR};

/// Marker file a fake lint tool touches in the scratch root when it runs.
pub const LINT_MARKER: &str = "lint-invoked";

/// Scratch layout: `<root>/backend_api/venv/<bin>/activate`, no lint tool yet.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    pub fn new() -> io::Result<Self> {
        let temp = tempfile::tempdir()?;
        let bin = temp.path().join("backend_api").join("venv").join(BIN_DIR);
        fs::create_dir_all(&bin)?;
        fs::write(bin.join(ACTIVATE_SCRIPT), "# activation stub\n")?;
        Ok(Self { temp })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn project_dir(&self) -> PathBuf {
        self.root().join("backend_api")
    }

    pub fn venv_bin(&self) -> PathBuf {
        self.project_dir().join("venv").join(BIN_DIR)
    }

    pub fn remove_activate_script(&self) -> io::Result<()> {
        fs::remove_file(self.venv_bin().join(ACTIVATE_SCRIPT))
    }

    pub fn write_config(&self, contents: &str) -> io::Result<PathBuf> {
        let path = self.root().join("lintgate.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// True once a tool installed by [`TestProject::install_lint_tool`] has run.
    pub fn lint_invoked(&self) -> bool {
        self.root().join(LINT_MARKER).exists()
    }

    /// Install a venv-local `flake8` that records its run and exits with `code`.
    #[cfg(unix)]
    pub fn install_lint_tool(&self, code: i32) -> io::Result<PathBuf> {
        let marker = self.root().join(LINT_MARKER);
        let body = format!(
            "#!/bin/sh\ntouch '{}'\necho \"flake8 stub exiting {code}\"\nexit {code}\n",
            marker.display()
        );
        self.install_script(&self.venv_bin(), "flake8", &body)
    }

    /// Write an executable script `name` into `dir`, creating `dir` if needed.
    #[cfg(unix)]
    pub fn install_script(&self, dir: &Path, name: &str, body: &str) -> io::Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        fs::create_dir_all(dir)?;
        let path = dir.join(name);
        fs::write(&path, body)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }
}

/// Lint runner that returns a fixed exit and records every request it sees.
pub struct ScriptedLintRunner {
    exit: LintExit,
    requests: RefCell<Vec<LintRequest>>,
}

impl ScriptedLintRunner {
    pub fn new(exit: LintExit) -> Self {
        Self {
            exit,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<LintRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl LintRunner for ScriptedLintRunner {
    fn run(&self, request: &LintRequest) -> GateResult<LintExit> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self.exit)
    }
}
