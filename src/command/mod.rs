//! The [`Command`] builder and its execution dispatch.
//!
//! A command is assembled from a program name and keyed arguments. Every
//! token is escaped on insertion for the host shell unless
//! [`Flags::DONT_ESCAPE`] is set, so [`Command::built_command`] only has to
//! join the stored tokens with single spaces.
//!
//! # Strategies
//!
//! [`Command::run`] picks one of two strategies from the detected
//! [`Family`](crate::Family):
//!
//! - **Direct** on Windows, unless [`Flags::FORCE_USE_PROC_OPEN`] is set. The
//!   process is launched synchronously and only stdout and the exit code are
//!   captured; stdin cannot be supplied.
//! - **Pipe** everywhere else. Stdin, stdout and stderr are piped, the stdin
//!   payload is written in full, both output streams are drained, and only
//!   then is the exit code collected.
//!
//! A non-zero exit code is recorded in the [`CommandResult`]; only failing to
//! start or talk to the process is an error.

mod argument;
mod error;
mod execution;
mod pipes;
mod result;

pub use argument::{ArgValue, Argument, ResolvedArgument, Values, resolve_argument};
pub use error::CommandError;
pub use execution::{ExecOutput, Launcher, PipeOutput, SystemLauncher};
pub use result::{CommandResult, SIGNAL_EXIT_CODE};

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::chain::Chain;
use crate::flags::{Flags, PrependStyle};
use crate::os::{HostDetector, OsDetector, OsInfo};
use crate::quote::Shell;

/// Execution strategy chosen by [`Command::strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Synchronous launch without stdin or stderr capture.
    Direct,
    /// Launch with stdin, stdout and stderr pipes.
    Pipe,
}

/// A shell command line under construction.
///
/// ```
/// use cmdkit::{Command, Flags, OsInfo, Flavor};
///
/// let mut cmd = Command::with_os(Flags::DONT_ESCAPE, OsInfo::from_flavor(Flavor::Linux));
/// cmd.set_command("tar")?
///     .add_argument("-c", ())?
///     .add_argument("--file", "out.tar")?;
/// assert_eq!(cmd.built_command(), "tar -c --file out.tar");
/// # Ok::<(), cmdkit::CommandError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    command: String,
    arguments: IndexMap<String, Argument>,
    stdin: Option<String>,
    flags: Flags,
    os: Arc<OsInfo>,
}

impl Default for Command {
    fn default() -> Self {
        Self::new(Flags::empty())
    }
}

impl Command {
    /// Create a command for the host platform.
    #[must_use]
    pub fn new(flags: Flags) -> Self {
        Self::with_detector(flags, &HostDetector)
    }

    /// Create a command, probing the platform once through `detector`.
    #[must_use]
    pub fn with_detector<D>(flags: Flags, detector: &D) -> Self
    where
        D: OsDetector + ?Sized,
    {
        Self::with_os(flags, detector.detect())
    }

    /// Create a command for an explicitly described platform.
    #[must_use]
    pub fn with_os(flags: Flags, os: OsInfo) -> Self {
        Self {
            command: String::new(),
            arguments: IndexMap::new(),
            stdin: None,
            flags,
            os: Arc::new(os),
        }
    }

    /// Behaviour flags given at construction.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Platform resolved at construction.
    #[must_use]
    pub fn os(&self) -> &OsInfo {
        &self.os
    }

    /// Set the program to run.
    ///
    /// Shell metacharacters are escaped unless [`Flags::DONT_ESCAPE`] is set.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidArgument`] when `name` is blank or
    /// contains a NUL byte.
    pub fn set_command(&mut self, name: impl AsRef<str>) -> Result<&mut Self, CommandError> {
        let raw = name.as_ref();
        if raw.trim().is_empty() {
            return Err(CommandError::invalid("command name cannot be empty"));
        }
        self.command = if self.flags.contains(Flags::DONT_ESCAPE) {
            if raw.contains('\0') {
                return Err(CommandError::invalid("command name cannot contain NUL bytes"));
            }
            raw.to_owned()
        } else {
            Shell::host().escape_command(raw)?
        };
        Ok(self)
    }

    /// Program token as stored (escaped unless [`Flags::DONT_ESCAPE`]).
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Add or replace an argument using the command's default escaping and
    /// prepend style.
    ///
    /// # Errors
    ///
    /// See [`Command::add_argument_with`].
    pub fn add_argument(
        &mut self,
        key: &str,
        values: impl Into<Values>,
    ) -> Result<&mut Self, CommandError> {
        self.add_argument_with(key, values, None, None)
    }

    /// Add or replace an argument.
    ///
    /// `escape` overrides [`Flags::DONT_ESCAPE`] for this argument and
    /// `style` overrides the prepend-style flags. The argument is indexed by
    /// its bare key, so `-f`, `--f`, `/f` and `f` all address the same entry.
    /// Re-adding a key replaces its values in place.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidArgument`] for an empty key or a key or
    /// value that cannot be placed on a command line.
    pub fn add_argument_with(
        &mut self,
        key: &str,
        values: impl Into<Values>,
        escape: Option<bool>,
        style: Option<PrependStyle>,
    ) -> Result<&mut Self, CommandError> {
        let escape = escape.unwrap_or_else(|| !self.flags.contains(Flags::DONT_ESCAPE));
        let style = style.or_else(|| self.flags.prepend_style());
        let resolved = resolve_argument(key, values.into(), escape, style, Shell::host())?;
        self.arguments
            .insert(resolved.lookup_key, resolved.argument);
        Ok(self)
    }

    /// Remove an argument by key; unknown keys are ignored.
    pub fn remove_argument(&mut self, key: &str) -> &mut Self {
        self.arguments.shift_remove(argument::lookup_key(key));
        self
    }

    /// Argument stored under `key` (bare or prefixed).
    #[must_use]
    pub fn argument(&self, key: &str) -> Option<&Argument> {
        self.arguments.get(argument::lookup_key(key))
    }

    /// All arguments in insertion order, keyed by bare key.
    #[must_use]
    pub const fn arguments(&self) -> &IndexMap<String, Argument> {
        &self.arguments
    }

    /// Set the payload written to the process's stdin. Not escaped.
    pub fn set_stdin(&mut self, data: impl Into<String>) -> &mut Self {
        self.stdin = Some(data.into());
        self
    }

    /// Stdin payload, if any.
    #[must_use]
    pub fn stdin(&self) -> Option<&str> {
        self.stdin.as_deref()
    }

    /// The full command line: the program, then each argument's key followed
    /// by each of its values, separated by single spaces.
    #[must_use]
    pub fn built_command(&self) -> String {
        std::iter::once(self.command.as_str())
            .filter(|program| !program.is_empty())
            .chain(self.arguments.values().flat_map(Argument::tokens))
            .join(" ")
    }

    /// Strategy [`Command::run`] will use on the resolved platform.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        if self.os.is_windows() && !self.flags.contains(Flags::FORCE_USE_PROC_OPEN) {
            Strategy::Direct
        } else {
            Strategy::Pipe
        }
    }

    /// Run the command through the host shell.
    ///
    /// # Errors
    ///
    /// See [`Command::run_with`].
    pub fn run<'r>(
        &self,
        result: &'r mut CommandResult,
    ) -> Result<&'r mut CommandResult, CommandError> {
        self.run_with(&SystemLauncher, result)
    }

    /// Run the command with `launcher` and record the outcome in `result`.
    ///
    /// # Errors
    ///
    /// Propagates [`CommandError::Launch`] and [`CommandError::Io`] from the
    /// launcher. A non-zero exit code is not an error.
    pub fn run_with<'r, L>(
        &self,
        launcher: &L,
        result: &'r mut CommandResult,
    ) -> Result<&'r mut CommandResult, CommandError>
    where
        L: Launcher + ?Sized,
    {
        let line = self.built_command();
        let strategy = self.strategy();
        tracing::debug!(command = %line, ?strategy, os = %self.os, "running command");
        match strategy {
            Strategy::Direct => self.exec(launcher, &line, result)?,
            Strategy::Pipe => self.proc_open(launcher, &line, result)?,
        }
        tracing::debug!(command = %line, exit_code = result.exit_code(), "command finished");
        Ok(result)
    }

    /// Append this command to `chain`.
    pub fn chain<C>(self, chain: &mut C)
    where
        C: Chain + ?Sized,
    {
        chain.add(self);
    }

    fn exec<L>(&self, launcher: &L, line: &str, result: &mut CommandResult) -> Result<(), CommandError>
    where
        L: Launcher + ?Sized,
    {
        if self.stdin.is_some() {
            tracing::warn!(command = %line, "direct execution cannot deliver stdin; payload dropped");
        }
        let output = launcher.exec(line)?;
        let std_out = output.lines.join("\n");
        let std_out = result::trim_line_endings(&std_out);
        result
            .set_std_out(std_out)
            .set_exit_code(output.exit_code)
            .set_last_line(result::last_line(std_out));
        Ok(())
    }

    fn proc_open<L>(
        &self,
        launcher: &L,
        line: &str,
        result: &mut CommandResult,
    ) -> Result<(), CommandError>
    where
        L: Launcher + ?Sized,
    {
        let stdin = self.stdin.as_deref().unwrap_or_default();
        let output = launcher.proc_open(line, stdin)?;
        if let Some(payload) = &self.stdin {
            result.set_std_in(payload.as_str());
        }
        let std_out = result::trim_line_endings(&output.stdout);
        result
            .set_std_out(std_out)
            .set_std_err(result::trim_line_endings(&output.stderr))
            .set_exit_code(output.exit_code)
            .set_last_line(result::last_line(std_out));
        Ok(())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.built_command())
    }
}
