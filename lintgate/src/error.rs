//! Error taxonomy for gate setup failures.
//!
//! A failing lint run is not an error: it is a [`Verdict::Fail`]. These variants
//! cover everything that stops the lint tool from running to completion.
//!
//! [`Verdict::Fail`]: crate::core::verdict::Verdict::Fail

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    /// Project directory is missing, unreadable, or not a directory.
    #[error("project directory {}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Virtual environment or its activation script is missing.
    #[error("virtual environment {}: {reason}", .path.display())]
    Environment { path: PathBuf, reason: String },

    #[error("lint tool '{program}' not found in activated environment")]
    LintToolNotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("spawn lint tool '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("wait for lint tool")]
    Wait {
        #[source]
        source: io::Error,
    },

    #[error("config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

pub type GateResult<T> = std::result::Result<T, GateError>;
