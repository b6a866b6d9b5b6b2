//! Test runners and the process boundary they share
//!
//! ## Modules
//!
//! - `memory` - memory-tester runs (OCM/DDR), judged on output only
//! - `storage` - eMMC/SD script runs, judged on exit status (and throughput for test 2)
//! - `dma` - the SDMA script run, judged on its summary markers
//! - `scripted` - canned-output test double
//!
//! ## I/O Boundary
//!
//! Every external process goes through the [`CommandExecutor`] trait. [`ShellExecutor`] is the production
//! implementation; runners only ever see a [`CapturedOutput`] or an [`ExecError`], which keeps the
//! classification logic testable without the platform tools installed.

pub mod dma;
pub mod memory;
pub mod scripted;
pub mod storage;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::config::RunnerConfig;

pub use scripted::ScriptedExecutor;

/// Errors raised while launching or draining an external process
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write stdin of `{command}`: {source}")]
    Stdin {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to collect output of `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// A single process launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecRequest<'a> {
    /// Shell command line
    pub command: &'a str,
    /// Text written to the process's stdin, which is then closed
    pub stdin: Option<&'a str>,
}

impl<'a> ExecRequest<'a> {
    pub fn new(command: &'a str) -> Self {
        Self { command, stdin: None }
    }

    pub fn with_stdin(mut self, input: &'a str) -> Self {
        self.stdin = Some(input);
        self
    }
}

/// Output of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl CapturedOutput {
    /// Successful run with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    /// Run that exited with `code` and printed `stdout`
    pub fn exited(code: i32, stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            ..Self::ok(stdout)
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// stdout followed by stderr
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len());
        text.push_str(&self.stdout);
        text.push_str(&self.stderr);
        text
    }
}

/// Launches external processes and captures their output.
///
/// Implementations must fully drain the process before returning; the driver relies on one test finishing
/// before the next starts.
pub trait CommandExecutor {
    fn execute(&self, request: &ExecRequest<'_>) -> Result<CapturedOutput, ExecError>;
}

/// Runs commands as `<shell> -c <command>`
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: PathBuf,
}

impl ShellExecutor {
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        Self { shell: shell.into() }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::new(config.shell.clone())
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, request: &ExecRequest<'_>) -> Result<CapturedOutput, ExecError> {
        tracing::debug!(command = request.command, "spawning");

        let stdin = if request.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };

        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(request.command)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                command: request.command.to_string(),
                source,
            })?;

        if let (Some(input), Some(mut pipe)) = (request.stdin, child.stdin.take()) {
            match pipe.write_all(input.as_bytes()) {
                // Scripts may exit before reading their answers
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ExecError::Stdin {
                        command: request.command.to_string(),
                        source,
                    });
                }
            }
            // pipe dropped here: the script sees EOF after the last answer
        }

        let output = child.wait_with_output().map_err(|source| ExecError::Wait {
            command: request.command.to_string(),
            source,
        })?;

        tracing::debug!(command = request.command, exit_code = ?output.status.code(), "finished");

        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        })
    }
}
