//! Shared server state

use std::sync::Arc;

use hd_core::config::ServerConfig;
use hd_core::{AppRegistry, CommandRunner, CredentialTable};

use crate::metrics::Metrics;
use crate::session::SessionStore;

/// State shared by every request handler
pub struct AppState {
    /// Accounts allowed to log in
    pub credentials: CredentialTable,
    /// Friendly app name → launch target
    pub registry: AppRegistry,
    /// Active login sessions
    pub sessions: SessionStore,
    /// Request and dispatch counters
    pub metrics: Metrics,
    /// Executes launch commands on the remote host
    pub runner: Arc<dyn CommandRunner>,
}

impl AppState {
    /// Create state with the built-in account and registry
    pub fn new(config: &ServerConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self::with_credentials(config, CredentialTable::with_default_user(), runner)
    }

    /// Create state with a custom credential table
    pub fn with_credentials(
        config: &ServerConfig,
        credentials: CredentialTable,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            credentials,
            registry: AppRegistry::new(),
            sessions: SessionStore::new(config.secret_key.clone()),
            metrics: Metrics::new(),
            runner,
        }
    }
}
