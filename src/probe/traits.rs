//! Trait definitions for running external tools
//!
//! The collector never spawns processes directly; it goes through
//! `CommandRunner` so tests can script tool output without real hardware.

use crate::error::ProbeError;
use async_trait::async_trait;
use std::fmt;

/// A single external command: program, arguments and extra environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl Invocation {
    /// Create an invocation with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Program and arguments joined by spaces (environment excluded)
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.envs {
            write!(f, "{}={} ", key, value)?;
        }
        f.write_str(&self.command_line())
    }
}

/// Runs external commands and returns their stdout
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion
    ///
    /// Returns stdout on a zero exit status. A missing program, non-zero
    /// exit or timeout is an error.
    async fn run(&self, invocation: &Invocation) -> Result<String, ProbeError>;

    /// Run the command and report only whether it succeeded
    async fn succeeds(&self, invocation: &Invocation) -> bool {
        match self.run(invocation).await {
            Ok(_) => true,
            Err(e) => {
                log::debug!("Probe '{}' failed: {}", invocation.command_line(), e);
                false
            }
        }
    }
}
