//! Error types raised while configuring or running a [`Command`](super::Command).

// miette's derive expands to assignments that trip `unused_assignments` on
// some toolchains; `expect` cannot be used because the lint is not stable.
#![allow(
    clippy::allow_attributes,
    unused_assignments,
    reason = "version-dependent false positive from the miette derive"
)]

use std::io;

use miette::Diagnostic;
use thiserror::Error;

use crate::quote::QuoteError;

/// Failures surfaced by [`Command`](super::Command) and its launchers.
#[derive(Debug, Error, Diagnostic)]
pub enum CommandError {
    /// A command name, argument key or value was rejected.
    #[error("invalid argument: {message}")]
    #[diagnostic(code(cmdkit::command::invalid_argument))]
    InvalidArgument {
        /// What was wrong with the input.
        message: String,
    },
    /// The operating system could not start the process.
    #[error("failed to launch `{command}`")]
    #[diagnostic(
        code(cmdkit::command::launch),
        help("check that the program exists and is executable")
    )]
    Launch {
        /// Command line that was being launched.
        command: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// Talking to the running process failed.
    #[error("I/O error while running `{command}`")]
    #[diagnostic(code(cmdkit::command::io))]
    Io {
        /// Command line that was running.
        command: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
}

impl CommandError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn launch(command: &str, source: io::Error) -> Self {
        Self::Launch {
            command: command.to_owned(),
            source,
        }
    }

    pub(crate) fn io(command: &str, source: io::Error) -> Self {
        Self::Io {
            command: command.to_owned(),
            source,
        }
    }

    /// Whether this error is an [`InvalidArgument`](Self::InvalidArgument).
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl From<QuoteError> for CommandError {
    fn from(err: QuoteError) -> Self {
        Self::invalid(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_errors_become_invalid_arguments() {
        let err = CommandError::from(QuoteError::ContainsLineBreak);
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "invalid argument: arguments containing carriage returns or line feeds cannot be safely quoted"
        );
    }

    #[test]
    fn launch_errors_keep_source_and_code() {
        let err = CommandError::launch(
            "missing_cmd",
            io::Error::new(io::ErrorKind::NotFound, "command not found"),
        );
        assert_eq!(err.to_string(), "failed to launch `missing_cmd`");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("command not found"));
        let code = err.code().map(|code| code.to_string());
        assert_eq!(code.as_deref(), Some("cmdkit::command::launch"));
    }
}
