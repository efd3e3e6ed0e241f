//! Execution of external commands.

use std::io::{self, Write};
use std::process::{ChildStdin, Command, Stdio};
use std::thread;
use std::time::Instant;

use tracing::{debug, info_span};

use crate::error::{Result, RunnerError};
use crate::invocation::Invocation;
use crate::output::CommandOutput;

/// Runs an invocation to completion and collects what it produced.
///
/// A non-zero exit code is not an error at this level; it is reported in
/// the returned [`CommandOutput`] and left to the caller's policy.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        (**self).run(invocation)
    }
}

/// Runs commands through the platform shell (`sh -c` or `cmd /C`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut shell = Command::new("sh");
    shell.arg("-c").arg(command);
    shell
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut shell = Command::new("cmd");
    shell.arg("/C").arg(command);
    shell
}

/// Write all of `input` and close the pipe. A child that exits without
/// reading its input closes the pipe first; that is not a failure.
fn feed_stdin(stdin: Option<ChildStdin>, input: &[u8]) -> io::Result<()> {
    let Some(mut pipe) = stdin else {
        return Ok(());
    };
    match pipe.write_all(input).and_then(|()| pipe.flush()) {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let command = invocation.command.as_str();
        let span = info_span!("external_command", command = %command);
        let _guard = span.enter();
        let start = Instant::now();

        let mut child = shell_command(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                command: command.to_string(),
                source,
            })?;
        let stdin = child.stdin.take();
        let input = invocation.stdin.as_deref().unwrap_or_default();

        // Stdin is fed from a second thread while this one drains stdout and
        // stderr, so neither side can block on a full pipe.
        let (waited, fed) = thread::scope(|scope| {
            let writer = scope.spawn(move || feed_stdin(stdin, input));
            let waited = child.wait_with_output();
            let fed = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (waited, fed)
        });

        let output = waited.map_err(|source| RunnerError::Wait {
            command: command.to_string(),
            source,
        })?;
        fed.map_err(|source| RunnerError::Stdin {
            command: command.to_string(),
            source,
        })?;

        debug!(
            exit_code = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            duration_ms = start.elapsed().as_millis(),
            "external command finished"
        );
        Ok(CommandOutput {
            command: command.to_string(),
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        })
    }
}
