//! Web server configuration

use std::fmt;
use std::net::SocketAddr;

use crate::error::ConfigError;

/// Address the web front end listens on by default
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

/// Placeholder session secret used when `SECRET_KEY` is not set
pub const DEFAULT_SECRET_KEY: &str = "super_secret_key_change_me";

/// Configuration for the HTTP surface
#[derive(Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    pub bind_address: SocketAddr,

    /// Secret used to sign session cookies
    pub secret_key: String,
}

impl ServerConfig {
    /// Build a server config, validating the bind address and secret
    pub fn new(bind_address: &str, secret_key: impl Into<String>) -> Result<Self, ConfigError> {
        let bind_address = bind_address
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("bind address '{}': {}", bind_address, e)))?;

        let secret_key = secret_key.into();
        if secret_key.is_empty() {
            return Err(ConfigError::MissingField("secret_key".to_string()));
        }

        Ok(Self {
            bind_address,
            secret_key,
        })
    }

    /// Whether the placeholder secret is in use
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 5000)),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_address", &self.bind_address)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert!(config.uses_default_secret());
    }

    #[test]
    fn test_new_parses_bind_address() {
        let config = ServerConfig::new("127.0.0.1:8080", "s3cret").unwrap();
        assert_eq!(config.bind_address.port(), 8080);
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn test_new_rejects_bad_address() {
        let err = ServerConfig::new("not-an-address", "s3cret").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_new_rejects_empty_secret() {
        let err = ServerConfig::new("127.0.0.1:8080", "").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }
}
