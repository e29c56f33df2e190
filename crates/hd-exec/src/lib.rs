//! hd-exec: Remote command executor for hostdeck
//!
//! Runs a single shell command on the configured host over SSH and
//! reports its output. Each call opens and closes its own connection.

pub mod executor;

pub use executor::{CommandOutput, SshExecutor};
