//! Lint exit status to gate verdict.
//!
//! The gate is binary: whatever the lint tool returns, the runner reports
//! exactly [`exit_codes::PASS`] or [`exit_codes::LINT_FAILED`]. The tool's own
//! non-zero code is never passed through.

use std::fmt;
use std::time::Duration;

use crate::exit_codes;

/// How the lint tool terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintExit {
    /// Exited normally with this code.
    Code(i32),
    /// Terminated by a signal, so no exit code exists.
    Signaled,
    /// Killed by the runner after the configured wait limit.
    TimedOut,
}

impl fmt::Display for LintExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "exit code {code}"),
            Self::Signaled => f.write_str("terminated by signal"),
            Self::TimedOut => f.write_str("timed out"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Pass => exit_codes::PASS,
            Self::Fail => exit_codes::LINT_FAILED,
        }
    }
}

/// Collapse a lint termination into a verdict. Only `Code(0)` passes.
pub fn classify(exit: LintExit) -> Verdict {
    match exit {
        LintExit::Code(0) => Verdict::Pass,
        LintExit::Code(_) | LintExit::Signaled | LintExit::TimedOut => Verdict::Fail,
    }
}

/// Result of one gate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOutcome {
    pub verdict: Verdict,
    pub lint_exit: LintExit,
    pub elapsed: Duration,
}

impl GateOutcome {
    pub fn new(lint_exit: LintExit, elapsed: Duration) -> Self {
        Self {
            verdict: classify(lint_exit),
            lint_exit,
            elapsed,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.verdict.exit_code()
    }
}
