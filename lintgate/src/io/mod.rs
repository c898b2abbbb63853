//! I/O for the gate: config, project directory, activation, lint process.

pub mod config;
pub mod lint;
pub mod venv;
pub mod workdir;
