//! Application entry point.
//!
//! Parses command-line arguments and delegates to [`runner::execute`].

use clap::Parser;
use cmdkit::{cli::Cli, runner};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    };
    fmt().with_max_level(max_level).with_writer(io::stderr).init();
    let outcome = match runner::execute(&cli) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            if let Err(write_err) = writeln!(io::stderr().lock(), "{:?}", miette::Report::new(err)) {
                tracing::error!(error = %write_err, "failed to write diagnostic");
            }
            return ExitCode::FAILURE;
        }
    };
    let rendered = runner::render(
        &outcome,
        cli.json,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    if let Err(err) = rendered {
        tracing::error!(error = %err, "failed to write output");
        return ExitCode::FAILURE;
    }
    u8::try_from(outcome.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}
