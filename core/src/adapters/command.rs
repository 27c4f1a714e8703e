//! Bounded execution of short-lived system commands.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{Error, Result};

/// Default limit for any single command invocation.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Captured result of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs system utilities with a hard timeout.
///
/// The child is spawned with `kill_on_drop`, so when the timeout fires the
/// pending future is dropped and the process is killed rather than left
/// hanging.
#[derive(Debug, Clone, Copy)]
pub struct CommandRunner {
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute `program` with `args` and capture its output.
    ///
    /// Non-zero exit status is not an error here; callers decide what a
    /// failing status means for their tool.
    pub async fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput> {
        let command_line = format!("{} {}", program.display(), args.join(" "));
        debug!(command = %command_line, "Running command");

        let result = timeout(self.timeout, async {
            Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output()
                .await
        })
        .await;

        match result {
            Ok(Ok(output)) => Ok(CommandOutput {
                status: output.status,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Ok(Err(e)) => Err(Error::Io(e)),
            Err(_) => Err(Error::Timeout {
                command: command_line,
                after: self.timeout,
            }),
        }
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

/// Find an executable among well-known locations.
///
/// Falls back to the bare program name so the `PATH` lookup of the
/// spawning process still gets a chance.
pub fn locate(program: &str, paths: &[&str]) -> PathBuf {
    paths
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from(program))
}
