//! Integration tests for running command chains through the host shell.

use anyhow::{Result, ensure};
use cmdkit::{ChainMode, ChainOutcome, Command, CommandChain, Flags};
use test_support::linux_os;

fn shell(line: &str) -> Result<Command> {
    let mut cmd = Command::with_os(Flags::DONT_ESCAPE, linux_os());
    cmd.set_command(line)?;
    Ok(cmd)
}

fn exit_codes(outcomes: &[ChainOutcome]) -> Vec<Option<i32>> {
    outcomes
        .iter()
        .map(|outcome| outcome.result().map(cmdkit::CommandResult::exit_code))
        .collect()
}

#[test]
fn links_follow_the_previous_executed_outcome() -> Result<()> {
    let mut chain = CommandChain::new();
    chain
        .add_with_mode(shell("exit 1")?, ChainMode::Always)
        .add_with_mode(shell("exit 2")?, ChainMode::IfPreviousSucceeded)
        .add_with_mode(shell("exit 0")?, ChainMode::IfPreviousFailed)
        .add_with_mode(shell("exit 4")?, ChainMode::IfPreviousSucceeded);

    let outcomes = chain.run()?;
    let codes = exit_codes(&outcomes);
    ensure!(
        codes == [Some(1), None, Some(0), Some(4)],
        "unexpected chain outcome {codes:?}"
    );
    Ok(())
}

#[test]
fn commands_chain_themselves_in_order() -> Result<()> {
    let mut chain = CommandChain::new();
    shell("echo one")?.chain(&mut chain);
    shell("echo two")?.chain(&mut chain);

    let lines: Vec<_> = chain.commands().map(Command::built_command).collect();
    ensure!(lines == ["echo one", "echo two"], "unexpected commands {lines:?}");

    let outcomes = chain.run()?;
    let stdout: Vec<_> = outcomes
        .iter()
        .filter_map(ChainOutcome::result)
        .map(|result| result.std_out().to_owned())
        .collect();
    ensure!(stdout == ["one", "two"], "unexpected output {stdout:?}");
    Ok(())
}
