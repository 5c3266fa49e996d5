//! Process-spawning command runner
//!
//! Real implementation of `CommandRunner` on top of `tokio::process`.

use crate::error::ProbeError;
use crate::probe::traits::{CommandRunner, Invocation};

use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Default upper bound for a single tool invocation
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs commands as child processes with a per-invocation timeout
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    /// Create a runner with the given per-command timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<String, ProbeError> {
        log::debug!("Running: {}", invocation);

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .envs(invocation.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let program = invocation.program.clone();
        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Err(_) => {
                return Err(ProbeError::TimedOut {
                    program,
                    seconds: self.timeout.as_secs(),
                })
            }
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(ProbeError::NotFound(program))
            }
            Ok(Err(e)) => {
                return Err(ProbeError::Spawn {
                    program,
                    message: e.to_string(),
                })
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            return Err(ProbeError::Failed {
                program,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = SystemRunner::default();
        let out = runner
            .run(&Invocation::new("echo").arg("hello"))
            .await
            .unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_passes_environment() {
        let runner = SystemRunner::default();
        let inv = Invocation::new("sh")
            .args(["-c", "printf %s \"$CUDA_DEVICE_ORDER\""])
            .env("CUDA_DEVICE_ORDER", "PCI_BUS_ID");
        assert_eq!(runner.run(&inv).await.unwrap(), "PCI_BUS_ID");
    }

    #[tokio::test]
    async fn test_missing_program() {
        let runner = SystemRunner::default();
        let err = runner
            .run(&Invocation::new("gputel-definitely-not-installed"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_non_zero_exit() {
        let runner = SystemRunner::default();
        let err = runner
            .run(&Invocation::new("sh").args(["-c", "echo oops >&2; exit 3"]))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProbeError::Failed {
                program: "sh".to_string(),
                code: Some(3),
                stderr: "oops".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_timeout() {
        let runner = SystemRunner::new(Duration::from_millis(100));
        let err = runner
            .run(&Invocation::new("sleep").arg("5"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::TimedOut { .. }));
    }

    #[tokio::test]
    async fn test_succeeds() {
        let runner = SystemRunner::default();
        assert!(runner.succeeds(&Invocation::new("true")).await);
        assert!(!runner.succeeds(&Invocation::new("false")).await);
    }
}
