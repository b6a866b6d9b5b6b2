//! Canned-output executor
//!
//! Answers each command line with a pre-registered [`CapturedOutput`] (or launch error) instead of spawning
//! a process, and records every request it sees. A test double for the driver and runner tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use super::{CapturedOutput, CommandExecutor, ExecError, ExecRequest};

#[derive(Debug, Clone)]
enum Response {
    Output(CapturedOutput),
    LaunchFailure(String),
}

/// A recorded request: command line plus stdin, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: String,
    pub stdin: Option<String>,
}

/// Executor that replays registered responses
///
/// Responses are keyed by command line and, optionally, stdin; a stdin-specific response wins over a
/// command-only one. Unregistered commands behave like a shell that cannot find the program: exit 127 and
/// a `not found` message on stderr.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    responses: HashMap<(String, Option<String>), Response>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `command` (any stdin) with `output`
    pub fn on(mut self, command: impl Into<String>, output: CapturedOutput) -> Self {
        self.responses.insert((command.into(), None), Response::Output(output));
        self
    }

    /// Respond to `command` fed exactly `stdin` with `output`
    pub fn on_input(mut self, command: impl Into<String>, stdin: impl Into<String>, output: CapturedOutput) -> Self {
        self.responses
            .insert((command.into(), Some(stdin.into())), Response::Output(output));
        self
    }

    /// Make `command` fail to launch with `message`
    pub fn fail_launch(mut self, command: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .insert((command.into(), None), Response::LaunchFailure(message.into()));
        self
    }

    /// Requests seen so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    fn lookup(&self, request: &ExecRequest<'_>) -> Option<&Response> {
        let command = request.command.to_string();
        let with_stdin = request
            .stdin
            .and_then(|input| self.responses.get(&(command.clone(), Some(input.to_string()))));
        with_stdin.or_else(|| self.responses.get(&(command, None)))
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(&self, request: &ExecRequest<'_>) -> Result<CapturedOutput, ExecError> {
        self.calls.borrow_mut().push(RecordedCall {
            command: request.command.to_string(),
            stdin: request.stdin.map(str::to_string),
        });

        match self.lookup(request) {
            Some(Response::Output(output)) => Ok(output.clone()),
            Some(Response::LaunchFailure(message)) => Err(ExecError::Spawn {
                command: request.command.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, message.clone()),
            }),
            None => Ok(CapturedOutput::exited(127, "")
                .with_stderr(format!("sh: 1: {}: not found\n", request.command))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_output_is_replayed() {
        let exec = ScriptedExecutor::new().on("ddr_test -p 9", CapturedOutput::ok("Pattern Loaded\n"));
        let out = exec.execute(&ExecRequest::new("ddr_test -p 9")).unwrap();
        assert_eq!(out.stdout, "Pattern Loaded\n");
    }

    #[test]
    fn test_stdin_specific_response_wins() {
        let exec = ScriptedExecutor::new()
            .on("emmc.sh", CapturedOutput::exited(1, ""))
            .on_input("emmc.sh", "0\n2\n", CapturedOutput::ok("Throughput: 5 MB/s"));

        let specific = exec.execute(&ExecRequest::new("emmc.sh").with_stdin("0\n2\n")).unwrap();
        assert!(specific.success());

        let fallback = exec.execute(&ExecRequest::new("emmc.sh").with_stdin("0\n1\n")).unwrap();
        assert_eq!(fallback.exit_code, Some(1));
    }

    #[test]
    fn test_unregistered_command_is_not_found() {
        let exec = ScriptedExecutor::new();
        let out = exec.execute(&ExecRequest::new("missing")).unwrap();
        assert_eq!(out.exit_code, Some(127));
        assert!(out.stderr.contains("missing: not found"));
    }

    #[test]
    fn test_launch_failure() {
        let exec = ScriptedExecutor::new().fail_launch("dma.sh", "permission denied");
        let err = exec.execute(&ExecRequest::new("dma.sh")).unwrap_err();
        assert_eq!(err.to_string(), "failed to launch `dma.sh`: permission denied");
    }

    #[test]
    fn test_calls_are_recorded_in_order() {
        let exec = ScriptedExecutor::new();
        let _ = exec.execute(&ExecRequest::new("a"));
        let _ = exec.execute(&ExecRequest::new("b").with_stdin("1\n"));
        assert_eq!(
            exec.calls(),
            vec![
                RecordedCall {
                    command: "a".to_string(),
                    stdin: None
                },
                RecordedCall {
                    command: "b".to_string(),
                    stdin: Some("1\n".to_string())
                },
            ]
        );
    }
}
