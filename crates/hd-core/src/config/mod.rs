//! Configuration for hostdeck
//!
//! All values come from the environment (see the `hostdeck` binary's
//! arguments); there is no configuration file.

mod remote;
mod server;

pub use remote::{RemoteConfig, RemoteCredentials, DEFAULT_CONNECT_TIMEOUT, DEFAULT_SSH_PORT};
pub use server::{ServerConfig, DEFAULT_BIND_ADDRESS, DEFAULT_SECRET_KEY};

/// Treat empty or whitespace-only values as unset
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
