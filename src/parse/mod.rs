//! Parsers for external tool output
//!
//! Upstream output format drift is the most fragile boundary in the
//! system, so each format lives in its own small module with its own tests.
//!
//! - [`nvidia_smi`]: CSV rows from `nvidia-smi --query-gpu`
//! - [`sysctl`]: scalar `sysctl -n` values
//! - [`vm_stat`]: labeled page counters
//! - [`system_profiler`]: GPU core count from the displays report

pub mod nvidia_smi;
pub mod system_profiler;
pub mod sysctl;
pub mod vm_stat;

use crate::error::ParseError;
use regex::Regex;

/// Extracts the integer that follows a fixed label at the start of a line
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    label: &'static str,
    pattern: Regex,
}

impl LabelMatcher {
    /// Build a matcher for `label` (matched literally, leading whitespace allowed)
    pub fn new(label: &'static str) -> Self {
        let pattern = Regex::new(&format!(r"(?m)^[ \t]*{}[ \t]*(\d+)", regex::escape(label)))
            .expect("escaped label is always a valid pattern");
        Self { label, pattern }
    }

    /// The literal label
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// First integer found after the label, if any
    pub fn find(&self, text: &str) -> Option<u64> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Like [`find`](Self::find) but reports a missing label as an error
    pub fn require(&self, text: &str) -> Result<u64, ParseError> {
        self.find(text).ok_or(ParseError::NoMatch(self.label))
    }
}

/// Round a byte count to whole mebibytes
pub fn bytes_to_mb(bytes: u64) -> u64 {
    (bytes as f64 / (1024.0 * 1024.0)).round() as u64
}

/// Round a byte count to whole gibibytes
pub fn bytes_to_gb(bytes: u64) -> u64 {
    (bytes as f64 / (1024.0 * 1024.0 * 1024.0)).round() as u64
}
