//! Error types for pkgupdate-exec

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while running a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// No program was given
    #[error("empty command")]
    EmptyCommand,

    /// Command exceeded the caller-supplied deadline
    #[error("command timed out after {timeout:?}")]
    Timeout {
        /// Timeout duration that was exceeded
        timeout: Duration,
    },

    /// Process spawn error
    #[error("failed to spawn process: {0}")]
    SpawnError(String),

    /// I/O error while collecting output
    #[error("I/O error: {0}")]
    IoError(String),
}
