//! Remote command execution trait

use async_trait::async_trait;

use crate::error::ExecError;

/// Runs a single shell command on the configured remote host
///
/// Each call is independent: implementations must not keep a connection
/// open between calls, and must not retry.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` verbatim and return its standard output
    ///
    /// Fails with [`ExecError::Remote`] if the command wrote anything to
    /// standard error, even when standard output is also non-empty.
    async fn run(&self, command: &str) -> Result<String, ExecError>;
}
