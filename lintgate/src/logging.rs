//! Development-time tracing for debugging the gate.
//!
//! Stdout belongs to the lint tool, so everything here goes to stderr and is
//! off below `warn` unless `RUST_LOG` says otherwise.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset. Colors only when stderr is a
/// terminal, so CI logs stay plain.
///
/// # Example
/// ```bash
/// RUST_LOG=lintgate=debug lintgate
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .compact(),
        )
        .init();
}
