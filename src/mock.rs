//! Mock implementations for testing
//!
//! Provides a scripted command runner for unit testing without real
//! hardware or installed vendor tools.

use crate::error::ProbeError;
use crate::probe::{CommandRunner, Invocation};

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Command runner answering from a fixed script
///
/// Responses are keyed by [`Invocation::command_line`]. Any command
/// without a scripted response behaves like a program that is not
/// installed.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: HashMap<String, Result<String, ProbeError>>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    /// Create a runner with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: succeed with `stdout` for `command_line`
    pub fn respond(mut self, command_line: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.responses
            .insert(command_line.into(), Ok(stdout.into()));
        self
    }

    /// Builder: fail with `error` for `command_line`
    pub fn fail(mut self, command_line: impl Into<String>, error: ProbeError) -> Self {
        self.responses.insert(command_line.into(), Err(error));
        self
    }

    /// Every command line run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether `command_line` has been run
    pub fn was_called(&self, command_line: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == command_line)
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, invocation: &Invocation) -> Result<String, ProbeError> {
        let command_line = invocation.command_line();
        self.calls.lock().unwrap().push(command_line.clone());

        self.responses
            .get(&command_line)
            .cloned()
            .unwrap_or_else(|| Err(ProbeError::NotFound(invocation.program.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_response() {
        let runner = MockRunner::new().respond("vm_stat", "Pages free: 1.\n");
        let out = runner.run(&Invocation::new("vm_stat")).await.unwrap();
        assert_eq!(out, "Pages free: 1.\n");
    }

    #[tokio::test]
    async fn test_unscripted_is_not_found() {
        let runner = MockRunner::new();
        let err = runner
            .run(&Invocation::new("system_profiler").arg("SPDisplaysDataType"))
            .await
            .unwrap_err();
        assert_eq!(err, ProbeError::NotFound("system_profiler".to_string()));
    }

    #[tokio::test]
    async fn test_records_calls() {
        let runner = MockRunner::new().fail(
            "which nvidia-smi",
            ProbeError::Failed {
                program: "which".to_string(),
                code: Some(1),
                stderr: String::new(),
            },
        );
        assert!(!runner.succeeds(&Invocation::new("which").arg("nvidia-smi")).await);
        assert!(runner.was_called("which nvidia-smi"));
        assert_eq!(runner.calls(), vec!["which nvidia-smi".to_string()]);
    }
}
