//! Remote host configuration

use std::fmt;
use std::time::Duration;

use super::non_empty;

/// Default SSH port on the target host
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Connect timeout for the single SSH connection made per dispatch
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default target host (the Docker host when running in a container)
const DEFAULT_HOST: &str = "host.docker.internal";

/// Where and as whom remote commands are run
#[derive(Clone)]
pub struct RemoteConfig {
    /// Host name or IP address of the target machine
    pub host: String,

    /// SSH port on the target machine
    pub port: u16,

    /// SSH username
    pub username: Option<String>,

    /// SSH password
    pub password: Option<String>,

    /// Connect timeout
    pub connect_timeout: Duration,
}

/// Username/password pair, present only when both are configured
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteCredentials {
    pub username: String,
    pub password: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_SSH_PORT,
            username: None,
            password: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl RemoteConfig {
    /// Create a config for `host:port` with the given (optional) credentials
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: non_empty(username),
            password: non_empty(password),
            ..Self::default()
        }
    }

    /// `host:port` as passed to the SSH client
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Credentials if both username and password are set
    pub fn credentials(&self) -> Option<RemoteCredentials> {
        match (
            non_empty(self.username.clone()),
            non_empty(self.password.clone()),
        ) {
            (Some(username), Some(password)) => Some(RemoteCredentials { username, password }),
            _ => None,
        }
    }

    /// Whether remote execution is possible at all
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl fmt::Debug for RemoteCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RemoteConfig::default();
        assert_eq!(config.host, "host.docker.internal");
        assert_eq!(config.port, 22);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert!(!config.is_configured());
    }

    #[test]
    fn test_address() {
        let config = RemoteConfig::new("192.168.1.20", 2222, None, None);
        assert_eq!(config.address(), "192.168.1.20:2222");
    }

    #[test]
    fn test_credentials_require_both_fields() {
        let only_user = RemoteConfig::new("h", 22, Some("me".into()), None);
        assert!(only_user.credentials().is_none());

        let only_pass = RemoteConfig::new("h", 22, None, Some("pw".into()));
        assert!(only_pass.credentials().is_none());

        let both = RemoteConfig::new("h", 22, Some("me".into()), Some("pw".into()));
        let creds = both.credentials().unwrap();
        assert_eq!(creds.username, "me");
        assert_eq!(creds.password, "pw");
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = RemoteConfig::new("h", 22, Some("".into()), Some("  ".into()));
        assert!(config.username.is_none());
        assert!(config.password.is_none());
        assert!(!config.is_configured());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = RemoteConfig::new("h", 22, Some("me".into()), Some("hunter2".into()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
