//! Project directory resolution.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GateError, GateResult};

/// Canonical, existing directory the lint tool runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDir(PathBuf);

impl ProjectDir {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Resolve `project_dir` against `base` and check it is an accessible directory.
///
/// The runner's own working directory is left alone; the lint child is started
/// in the returned directory instead.
pub fn resolve_project_dir(base: &Path, project_dir: &Path) -> GateResult<ProjectDir> {
    let joined = base.join(project_dir);
    let filesystem = |source: io::Error| GateError::Filesystem {
        path: joined.clone(),
        source,
    };

    let canonical = fs::canonicalize(&joined).map_err(filesystem)?;
    let meta = fs::metadata(&canonical).map_err(filesystem)?;
    if !meta.is_dir() {
        return Err(filesystem(io::Error::other("not a directory")));
    }
    // Listing proves the directory is searchable, not just present.
    fs::read_dir(&canonical).map_err(filesystem)?;

    debug!(project_dir = %canonical.display(), "resolved project directory");
    Ok(ProjectDir(canonical))
}
