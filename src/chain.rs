//! Ordered sequences of commands.
//!
//! [`Command::chain`](crate::Command::chain) only knows the [`Chain`] trait.
//! [`CommandChain`] is the bundled implementation: it runs its commands in
//! order and can make each link depend on how the previous one ended.

use crate::command::{Command, CommandError, CommandResult, Launcher, SystemLauncher};

/// Anything a [`Command`] can append itself to.
pub trait Chain {
    /// Append `command`.
    fn add(&mut self, command: Command);
}

/// When a chained command runs, relative to the previous executed link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChainMode {
    /// Always run.
    #[default]
    Always,
    /// Run only when the previous executed link exited with code zero.
    IfPreviousSucceeded,
    /// Run only when the previous executed link exited with a non-zero code.
    IfPreviousFailed,
}

impl ChainMode {
    const fn permits(self, previous_succeeded: Option<bool>) -> bool {
        match (self, previous_succeeded) {
            (Self::Always, _) | (_, None) => true,
            (Self::IfPreviousSucceeded, Some(succeeded)) => succeeded,
            (Self::IfPreviousFailed, Some(succeeded)) => !succeeded,
        }
    }
}

/// What happened to one link of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    /// The command ran.
    Ran(CommandResult),
    /// The link's mode did not match the previous outcome.
    Skipped,
}

impl ChainOutcome {
    /// Result of the run, if the link ran.
    #[must_use]
    pub const fn result(&self) -> Option<&CommandResult> {
        match self {
            Self::Ran(result) => Some(result),
            Self::Skipped => None,
        }
    }
}

/// Commands executed one after another.
#[derive(Debug, Clone, Default)]
pub struct CommandChain {
    links: Vec<(Command, ChainMode)>,
}

impl CommandChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `command` with an explicit run condition.
    pub fn add_with_mode(&mut self, command: Command, mode: ChainMode) -> &mut Self {
        self.links.push((command, mode));
        self
    }

    /// Number of links.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the chain has no links.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Commands in order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.links.iter().map(|(command, _)| command)
    }

    /// Run every link through the host shell.
    ///
    /// # Errors
    ///
    /// See [`CommandChain::run_with`].
    pub fn run(&self) -> Result<Vec<ChainOutcome>, CommandError> {
        self.run_with(&SystemLauncher)
    }

    /// Run every link with `launcher`, returning one outcome per link.
    ///
    /// The first link always runs. Skipped links do not count as the
    /// "previous" link for the ones after them.
    ///
    /// # Errors
    ///
    /// Stops at the first link that fails to launch and returns its error.
    pub fn run_with<L>(&self, launcher: &L) -> Result<Vec<ChainOutcome>, CommandError>
    where
        L: Launcher + ?Sized,
    {
        let mut outcomes = Vec::with_capacity(self.links.len());
        let mut previous_succeeded = None;
        for (command, mode) in &self.links {
            if !mode.permits(previous_succeeded) {
                tracing::debug!(command = %command, ?mode, "skipping chained command");
                outcomes.push(ChainOutcome::Skipped);
                continue;
            }
            let mut result = CommandResult::new();
            command.run_with(launcher, &mut result)?;
            previous_succeeded = Some(result.is_success());
            outcomes.push(ChainOutcome::Ran(result));
        }
        Ok(outcomes)
    }
}

impl Chain for CommandChain {
    fn add(&mut self, command: Command) {
        self.add_with_mode(command, ChainMode::Always);
    }
}

impl Chain for Vec<Command> {
    fn add(&mut self, command: Command) {
        self.push(command);
    }
}
