//! Stable exit codes for the `lintgate` binary.

/// Lint tool exited zero.
pub const PASS: i32 = 0;
/// Lint tool exited non-zero, was killed by a signal, or timed out.
pub const LINT_FAILED: i32 = 1;
/// The gate could not run: bad config, missing project dir, venv, or lint tool.
pub const SETUP_FAILED: i32 = 2;
