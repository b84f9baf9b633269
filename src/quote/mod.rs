//! Shell escaping for command names and arguments.
//!
//! Two dialects are supported: POSIX `sh` and Windows `cmd.exe`. The host
//! dialect is fixed at compile time through [`Shell::host`], matching the
//! shell that [`SystemLauncher`](crate::SystemLauncher) hands the built line
//! to. Both dialects are always compiled so either can be exercised on any
//! platform.
//!
//! Argument quoting turns a value into exactly one shell word. Command
//! escaping neutralises metacharacters in the program token while leaving
//! spaces alone, so `foo; bar` becomes `foo\; bar` under `sh`.
//!
//! # Windows quoting strategy
//!
//! Arguments are wrapped in double quotes when they contain whitespace or
//! metacharacters, and `^`, `&`, `|`, `<`, `>`, `!` and `"` are escaped with
//! a caret so `cmd.exe` treats them as literals. `%` is doubled. Line-feed and
//! carriage-return characters are rejected because `cmd.exe` treats them as
//! command terminators even inside quotes.

mod posix;
mod windows;

use std::fmt;

/// Reasons a token cannot be escaped safely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// `cmd.exe` cannot carry line breaks inside an argument.
    ContainsLineBreak,
    /// NUL bytes cannot appear in a process command line.
    ContainsNul,
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainsLineBreak => f.write_str(
                "arguments containing carriage returns or line feeds cannot be safely quoted",
            ),
            Self::ContainsNul => f.write_str("arguments cannot contain NUL bytes"),
        }
    }
}

impl std::error::Error for QuoteError {}

/// Shell dialect used to escape tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shell {
    /// POSIX `sh`.
    Posix,
    /// Windows `cmd.exe`.
    Cmd,
}

impl Shell {
    /// Dialect of the shell the host launches commands through.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(windows) { Self::Cmd } else { Self::Posix }
    }

    /// Quote `arg` so the shell reads it back as one literal word.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::ContainsNul`] for NUL bytes, and
    /// [`QuoteError::ContainsLineBreak`] for line breaks under `cmd.exe`.
    pub fn quote_argument(self, arg: &str) -> Result<String, QuoteError> {
        reject_nul(arg)?;
        match self {
            Self::Posix => Ok(posix::quote(arg)),
            Self::Cmd => windows::quote(arg),
        }
    }

    /// Escape shell metacharacters in a program token.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::ContainsNul`] when `command` holds a NUL byte.
    pub fn escape_command(self, command: &str) -> Result<String, QuoteError> {
        reject_nul(command)?;
        Ok(match self {
            Self::Posix => posix::escape_command(command),
            Self::Cmd => windows::escape_command(command),
        })
    }
}

fn reject_nul(token: &str) -> Result<(), QuoteError> {
    if token.contains('\0') {
        Err(QuoteError::ContainsNul)
    } else {
        Ok(())
    }
}

/// Index of the partner of the quote character that opens at `open`.
///
/// Returns `None` when the quote at `open` has no later partner.
fn closing_quote(chars: &[char], open: usize, quote: char) -> Option<usize> {
    chars
        .iter()
        .enumerate()
        .skip(open + 1)
        .find_map(|(idx, ch)| (*ch == quote).then_some(idx))
}
