//! Glue between the parsed [`Cli`] and the [`Command`] builder.

use std::io::{self, Write};

use indexmap::IndexMap;

use crate::cli::{Cli, Style};
use crate::command::{Command, CommandError, CommandResult};
use crate::flags::Flags;

/// What the binary produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--dry-run`: the built command line.
    DryRun(String),
    /// The command ran.
    Ran(CommandResult),
}

impl Outcome {
    /// Exit code the binary should report.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::DryRun(_) => 0,
            Self::Ran(result) => result.exit_code(),
        }
    }
}

/// Map command line options onto [`Flags`].
#[must_use]
pub fn flags_for(cli: &Cli) -> Flags {
    let mut flags = Flags::empty();
    if cli.dont_escape {
        flags |= Flags::DONT_ESCAPE;
    }
    if cli.force_proc_open {
        flags |= Flags::FORCE_USE_PROC_OPEN;
    }
    match cli.style {
        Some(Style::Unix) => flags |= Flags::PREPEND_UNIX_STYLE,
        Some(Style::Windows) => flags |= Flags::PREPEND_WINDOWS_STYLE,
        None => {}
    }
    flags
}

/// Group `KEY` / `KEY=VALUE` words by key, keeping first-seen order.
#[must_use]
pub fn group_arguments(words: &[String]) -> IndexMap<&str, Vec<&str>> {
    let mut grouped: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for word in words {
        let (key, value) = word
            .split_once('=')
            .map_or((word.as_str(), None), |(key, value)| (key, Some(value)));
        let values = grouped.entry(key).or_default();
        values.extend(value);
    }
    grouped
}

/// Assemble the [`Command`] described by `cli`.
///
/// # Errors
///
/// Returns [`CommandError::InvalidArgument`] for a blank program or an
/// argument that cannot be escaped.
pub fn build_command(cli: &Cli) -> Result<Command, CommandError> {
    let mut command = Command::new(flags_for(cli));
    command.set_command(&cli.program)?;
    for (key, values) in group_arguments(&cli.args) {
        command.add_argument(key, values)?;
    }
    if let Some(stdin) = &cli.stdin {
        command.set_stdin(stdin.as_str());
    }
    Ok(command)
}

/// Build and, unless `--dry-run` was given, run the command.
///
/// # Errors
///
/// Returns configuration errors from [`build_command`] and launch errors
/// from [`Command::run`].
pub fn execute(cli: &Cli) -> Result<Outcome, CommandError> {
    let command = build_command(cli)?;
    if cli.dry_run {
        return Ok(Outcome::DryRun(command.built_command()));
    }
    let mut result = CommandResult::new();
    command.run(&mut result)?;
    Ok(Outcome::Ran(result))
}

/// Write `outcome` for the user.
///
/// # Errors
///
/// Returns any error raised while writing or serialising.
pub fn render<O, E>(outcome: &Outcome, json: bool, out: &mut O, err: &mut E) -> anyhow::Result<()>
where
    O: Write,
    E: Write,
{
    match outcome {
        Outcome::DryRun(line) => writeln!(out, "{line}")?,
        Outcome::Ran(result) if json => {
            serde_json::to_writer_pretty(&mut *out, result)?;
            writeln!(out)?;
        }
        Outcome::Ran(result) => {
            write_stream(out, result.std_out())?;
            write_stream(err, result.std_err())?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_stream<W: Write>(sink: &mut W, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    writeln!(sink, "{text}")
}
