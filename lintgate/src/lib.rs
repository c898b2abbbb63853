//! Lint gate runner for the `backend_api` project.
//!
//! Runs `flake8` inside the project's virtual environment and collapses its exit
//! status into a pass/fail gate signal. The crate keeps the same split as the
//! rest of our tooling:
//!
//! - **[`core`]**: Pure verdict logic. No I/O.
//! - **[`io`]**: Filesystem checks, environment activation, config, and the lint
//!   process itself.
//!
//! [`gate`] sequences the two to implement the `lintgate` binary.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod gate;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
