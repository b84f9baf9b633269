//! Pipe helpers for the pipe-based strategy.

use std::{
    io::{self, Read, Write},
    thread::{self, ScopedJoinHandle},
};

/// Write `payload` to `stdin` while draining `stdout` and `stderr`.
///
/// Stdin is written and stderr drained on scoped helper threads; stdout is
/// drained on the calling thread. When stdout fails, `abort` runs before the
/// helpers are joined so a child still holding its pipes open cannot keep
/// them blocked.
pub(super) fn exchange<W, O, E, A>(
    stdin: Option<W>,
    stdout: Option<O>,
    stderr: Option<E>,
    payload: &[u8],
    abort: A,
) -> io::Result<(Vec<u8>, Vec<u8>)>
where
    W: Write + Send,
    O: Read,
    E: Read + Send,
    A: FnOnce(),
{
    thread::scope(|scope| {
        let writer = scope.spawn(move || write_stdin(stdin, payload));
        let stderr_reader = scope.spawn(move || drain(stderr));
        let stdout = drain(stdout);
        if stdout.is_err() {
            abort();
        }
        let stderr = join_pipe("stderr", stderr_reader);
        let written = join_pipe("stdin", writer);
        let stdout = stdout?;
        written?;
        Ok((stdout, stderr?))
    })
}

/// Write `payload` in full and close the pipe.
///
/// A child that exits without reading its input closes the pipe early; that
/// is logged and tolerated because the exit code still tells the story.
pub(super) fn write_stdin<W>(pipe: Option<W>, payload: &[u8]) -> io::Result<()>
where
    W: Write,
{
    let Some(mut stdin) = pipe else {
        return Ok(());
    };
    if payload.is_empty() {
        return Ok(());
    }
    match stdin.write_all(payload).and_then(|()| stdin.flush()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            tracing::warn!("process closed stdin before the payload was written");
            Ok(())
        }
        other => other,
    }
}

/// Read a pipe to EOF.
pub(super) fn drain<R>(pipe: Option<R>) -> io::Result<Vec<u8>>
where
    R: Read,
{
    let mut buf = Vec::new();
    if let Some(mut reader) = pipe {
        reader.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

/// Join a helper thread, turning a panic into an I/O error.
fn join_pipe<T>(label: &str, handle: ScopedJoinHandle<'_, io::Result<T>>) -> io::Result<T> {
    handle.join().unwrap_or_else(|_| {
        tracing::warn!(stream = label, "pipe thread panicked");
        Err(io::Error::other(format!("{label} pipe thread panicked")))
    })
}
