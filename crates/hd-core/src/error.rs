//! Core error types for hostdeck

use thiserror::Error;

/// Errors raised while running a command on the remote host.
///
/// The `Display` output is what ends up in the `message` field of a failed
/// dispatch, so each variant reads as a complete sentence fragment.
#[derive(Error, Debug)]
pub enum ExecError {
    /// Username or password for the remote host is missing
    #[error("SSH Credentials not configured.")]
    NotConfigured,

    /// TCP connect or SSH handshake failed
    #[error("Failed to connect to {address}: {reason}")]
    Connect { address: String, reason: String },

    /// Connect did not complete within the configured timeout
    #[error("Connection to {address} timed out")]
    Timeout { address: String },

    /// The remote host rejected the credentials
    #[error("Authentication failed for user '{0}'")]
    AuthRejected(String),

    /// Protocol-level failure after the connection was established
    #[error("SSH error: {0}")]
    Ssh(String),

    /// The command produced output on stderr
    #[error("{0}")]
    Remote(String),
}

impl ExecError {
    /// Whether the failure happened before any network I/O
    pub fn is_config(&self) -> bool {
        matches!(self, ExecError::NotConfigured)
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_message() {
        let err = ExecError::NotConfigured;
        assert_eq!(err.to_string(), "SSH Credentials not configured.");
        assert!(err.is_config());
    }

    #[test]
    fn test_remote_error_is_stderr_verbatim() {
        let err = ExecError::Remote("Unable to find application named 'Foo'\n".into());
        assert_eq!(err.to_string(), "Unable to find application named 'Foo'\n");
        assert!(!err.is_config());
    }

    #[test]
    fn test_timeout_names_address() {
        let err = ExecError::Timeout {
            address: "10.0.0.2:22".into(),
        };
        assert_eq!(err.to_string(), "Connection to 10.0.0.2:22 timed out");
        assert!(!err.is_config());
    }
}
