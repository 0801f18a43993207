//! Result types for command execution

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Result of a command execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Exit status code (-1 when killed by a signal)
    pub status: i32,
    /// stdout output
    pub stdout: String,
    /// stderr output
    pub stderr: String,
    /// Time taken to execute
    pub duration: Duration,
}

impl CommandResult {
    /// Build a result from captured streams, mostly useful for mocks
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status: 0,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration: Duration::ZERO,
        }
    }

    /// Check if command exited with code 0
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Whether anything was written to stderr
    #[must_use]
    pub fn has_stderr(&self) -> bool {
        !self.stderr.is_empty()
    }
}
