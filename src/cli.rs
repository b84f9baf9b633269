//! Command line interface definition using clap.
//!
//! This module is also compiled by the build script to render the manual
//! page, so it only depends on clap.

use clap::{Parser, ValueEnum};

/// Build a shell command line from a program and keyed arguments, then run it.
#[derive(Debug, Clone, Parser, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pass the program, keys and values through without escaping.
    #[arg(long, env = "CMDKIT_DONT_ESCAPE")]
    pub dont_escape: bool,

    /// Use the pipe-based strategy even on Windows.
    #[arg(long, env = "CMDKIT_FORCE_PROC_OPEN")]
    pub force_proc_open: bool,

    /// Prefix bare keys with `-`/`--` (unix) or `/` (windows).
    #[arg(long, value_enum, value_name = "STYLE", env = "CMDKIT_STYLE")]
    pub style: Option<Style>,

    /// Text written to the command's standard input.
    #[arg(long, value_name = "TEXT", env = "CMDKIT_STDIN")]
    pub stdin: Option<String>,

    /// Print the built command line instead of running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the captured result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose diagnostic logging.
    #[arg(short, long, env = "CMDKIT_VERBOSE")]
    pub verbose: bool,

    /// Program to run.
    #[arg(value_name = "PROGRAM")]
    pub program: String,

    /// Arguments as `KEY` or `KEY=VALUE`; repeat a key to give it several
    /// values.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Switch-prefix convention selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// `-k` and `--key`.
    Unix,
    /// `/key`.
    Windows,
}
