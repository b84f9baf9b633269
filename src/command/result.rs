//! Captured outcome of one command run.

use serde::{Deserialize, Serialize};

/// Exit code recorded when the process ended without one (e.g. killed by a
/// signal).
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Sink populated by the execution strategy during
/// [`Command::run`](super::Command::run).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    std_in: Option<String>,
    std_out: String,
    std_err: String,
    exit_code: i32,
    last_line: String,
}

impl CommandResult {
    /// Create an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload that was written to the process's stdin.
    #[must_use]
    pub fn std_in(&self) -> Option<&str> {
        self.std_in.as_deref()
    }

    /// Captured standard output.
    #[must_use]
    pub fn std_out(&self) -> &str {
        &self.std_out
    }

    /// Captured standard error. Always empty for the direct strategy.
    #[must_use]
    pub fn std_err(&self) -> &str {
        &self.std_err
    }

    /// Process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Final line of standard output.
    #[must_use]
    pub fn last_line(&self) -> &str {
        &self.last_line
    }

    /// Whether the process exited with code zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Record the stdin payload.
    pub fn set_std_in(&mut self, std_in: impl Into<String>) -> &mut Self {
        self.std_in = Some(std_in.into());
        self
    }

    /// Record standard output.
    pub fn set_std_out(&mut self, std_out: impl Into<String>) -> &mut Self {
        self.std_out = std_out.into();
        self
    }

    /// Record standard error.
    pub fn set_std_err(&mut self, std_err: impl Into<String>) -> &mut Self {
        self.std_err = std_err.into();
        self
    }

    /// Record the exit code.
    pub const fn set_exit_code(&mut self, exit_code: i32) -> &mut Self {
        self.exit_code = exit_code;
        self
    }

    /// Record the last output line.
    pub fn set_last_line(&mut self, last_line: impl Into<String>) -> &mut Self {
        self.last_line = last_line.into();
        self
    }
}

/// Drop trailing line terminators.
pub(super) fn trim_line_endings(text: &str) -> &str {
    text.trim_end_matches(['\r', '\n'])
}

/// Last line of `text` without trailing whitespace.
pub(super) fn last_line(text: &str) -> &str {
    trim_line_endings(text)
        .lines()
        .next_back()
        .map_or("", str::trim_end)
}
