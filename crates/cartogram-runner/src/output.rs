use std::fmt::Write as _;

/// Everything an external invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub command: String,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Exit code, or `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Warning naming the command and its exit code; `None` on success.
    pub fn failure_line(&self) -> Option<String> {
        match self.exit_code {
            Some(0) => None,
            Some(code) => Some(format!("{} returned exit code '{code}'", self.command)),
            None => Some(format!("{} was terminated by a signal", self.command)),
        }
    }

    /// Both streams labeled by the originating command, followed by the
    /// failure warning when the exit code is non-zero.
    pub fn render_report(&self) -> String {
        let mut report = String::new();
        let _ = write!(report, "Output of '{}':\n\n", self.command);
        let _ = writeln!(report, "STDOUT:  {}", self.stdout_text());
        let _ = writeln!(report, "STDERR:  {}", self.stderr_text());
        if let Some(line) = self.failure_line() {
            let _ = write!(report, "{line}\n\n");
        }
        report
    }
}
