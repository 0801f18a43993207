//! Command runner trait

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ExecError;
use crate::result::CommandResult;

/// Executes an argument vector and captures its output.
///
/// Implementations never interpret the exit status; callers classify
/// failures from stdout and stderr.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run until the child exits. There is no deadline.
    async fn run(&self, argv: &[&str]) -> Result<CommandResult, ExecError>;

    /// Run, giving up once `timeout` has elapsed
    async fn run_with_timeout(
        &self,
        argv: &[&str],
        timeout: Duration,
    ) -> Result<CommandResult, ExecError>;

    /// Short name used in logs
    fn runner_type(&self) -> &'static str;
}
