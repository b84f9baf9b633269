//! Process launch primitives behind the two execution strategies.

use std::process::{Command as Process, ExitStatus, Stdio};

use super::{error::CommandError, pipes::exchange, result::SIGNAL_EXIT_CODE};

#[cfg(windows)]
pub(super) const SHELL: &str = "cmd";

#[cfg(not(windows))]
pub(super) const SHELL: &str = "sh";
#[cfg(not(windows))]
pub(super) const SHELL_ARGS: &[&str] = &["-c"];

/// Output of the direct strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Captured stdout, one entry per line.
    pub lines: Vec<String>,
    /// Process exit code.
    pub exit_code: i32,
}

/// Output of the pipe-based strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipeOutput {
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
    /// Process exit code, read after both streams were drained.
    pub exit_code: i32,
}

/// Host process primitives used by [`Command::run_with`](super::Command::run_with).
pub trait Launcher {
    /// Run `command_line` synchronously, capturing stdout lines. No stdin is
    /// delivered and stderr is not captured.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Launch`] when the process cannot start.
    fn exec(&self, command_line: &str) -> Result<ExecOutput, CommandError>;

    /// Run `command_line` with stdin, stdout and stderr pipes. `stdin` is
    /// written in full (nothing when empty) before the exit code is read.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Launch`] when the process cannot start and
    /// [`CommandError::Io`] when the pipes fail.
    fn proc_open(&self, command_line: &str, stdin: &str) -> Result<PipeOutput, CommandError>;
}

/// Launches commands through the host shell (`sh -c` or `cmd /C`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn exec(&self, command_line: &str) -> Result<ExecOutput, CommandError> {
        let output = shell_process(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|err| CommandError::launch(command_line, err))?;
        let lines = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.trim_end().to_owned())
            .collect();
        Ok(ExecOutput {
            lines,
            exit_code: exit_code(output.status),
        })
    }

    fn proc_open(&self, command_line: &str, stdin: &str) -> Result<PipeOutput, CommandError> {
        let mut child = shell_process(command_line)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| CommandError::launch(command_line, err))?;

        let drained = exchange(
            child.stdin.take(),
            child.stdout.take(),
            child.stderr.take(),
            stdin.as_bytes(),
            || {
                if let Err(err) = child.kill() {
                    tracing::warn!("failed to kill command after stdout error: {err}");
                }
            },
        );

        let (stdout, stderr) = match drained {
            Ok(streams) => streams,
            Err(err) => {
                if let Err(kill_err) = child.kill() {
                    tracing::warn!("failed to kill command after pipe error: {kill_err}");
                }
                if let Err(wait_err) = child.wait() {
                    tracing::warn!("failed to reap command after pipe error: {wait_err}");
                }
                return Err(CommandError::io(command_line, err));
            }
        };

        let status = child
            .wait()
            .map_err(|err| CommandError::io(command_line, err))?;
        Ok(PipeOutput {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            exit_code: exit_code(status),
        })
    }
}

#[cfg(not(windows))]
fn shell_process(command_line: &str) -> Process {
    let mut process = Process::new(SHELL);
    process.args(SHELL_ARGS).arg(command_line);
    process
}

/// `cmd.exe` receives the line verbatim; the standard library's argument
/// quoting would otherwise mangle the already-escaped text.
#[cfg(windows)]
fn shell_process(command_line: &str) -> Process {
    use std::os::windows::process::CommandExt;

    let mut process = Process::new(SHELL);
    process.raw_arg(format!("/S /C \"{command_line}\""));
    process
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or_else(|| {
        tracing::warn!(%status, "command terminated without an exit code");
        SIGNAL_EXIT_CODE
    })
}
