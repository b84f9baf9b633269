//! Integration tests for the `cmdkit` binary using `assert_cmd`.

use anyhow::{Context, Result, ensure};
use predicates::prelude::*;

fn cmdkit() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("cmdkit")
}

#[test]
fn dry_run_prints_the_built_command() {
    cmdkit()
        .args(["--dry-run", "--dont-escape", "tar", "-c", "--file=out.tar"])
        .assert()
        .success()
        .stdout("tar -c --file out.tar\n");
}

#[test]
fn dry_run_applies_the_prepend_style() {
    cmdkit()
        .args(["--dry-run", "--dont-escape", "--style", "unix", "tar", "c", "file=out.tar"])
        .assert()
        .success()
        .stdout("tar -c --file out.tar\n");
}

#[test]
fn style_can_come_from_the_environment() {
    cmdkit()
        .env("CMDKIT_STYLE", "windows")
        .args(["--dry-run", "--dont-escape", "robocopy", "mir"])
        .assert()
        .success()
        .stdout("robocopy /mir\n");
}

#[test]
fn exit_codes_are_mirrored() {
    cmdkit()
        .args(["--dont-escape", "exit", "3"])
        .assert()
        .code(3);
}

#[test]
fn json_output_reports_the_result() -> Result<()> {
    let output = cmdkit()
        .args(["--json", "echo", "hello"])
        .output()
        .context("run cmdkit --json")?;
    ensure!(output.status.success(), "cmdkit --json should succeed");
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).context("parse JSON output")?;
    ensure!(value["std_out"] == "hello", "unexpected result {value}");
    ensure!(value["exit_code"] == 0, "unexpected result {value}");
    Ok(())
}

#[cfg(unix)]
#[test]
fn stdin_is_forwarded_to_the_program() {
    cmdkit()
        .args(["--stdin", "piped text", "cat"])
        .assert()
        .success()
        .stdout("piped text\n");
}

#[cfg(unix)]
#[test]
fn arguments_with_spaces_stay_single_words() {
    cmdkit()
        .args(["printf", "%s|", "a b", "c"])
        .assert()
        .success()
        .stdout("a b|c|\n");
}

#[test]
fn blank_programs_fail_with_a_diagnostic() {
    cmdkit()
        .arg(" ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("command name cannot be empty"))
        .stdout(predicate::str::is_empty());
}
