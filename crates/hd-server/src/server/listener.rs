//! HTTP listener
//!
//! Binds the configured address and serves the router until cancelled.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use hd_core::config::ServerConfig;

use super::handler::router;
use crate::state::AppState;

/// Web server for the login page, dashboard and dispatch endpoint
pub struct WebServer {
    /// Server configuration
    config: ServerConfig,
    /// Shared handler state
    state: Arc<AppState>,
    /// Cancellation token for graceful shutdown
    cancel: CancellationToken,
}

impl WebServer {
    /// Create a new web server
    pub fn new(config: ServerConfig, state: Arc<AppState>, cancel: CancellationToken) -> Self {
        Self {
            config,
            state,
            cancel,
        }
    }

    /// Bind the configured address
    pub async fn bind(&self) -> Result<TcpListener> {
        let bind_addr = self.config.bind_address;
        TcpListener::bind(bind_addr)
            .await
            .with_context(|| format!("Failed to bind to {}", bind_addr))
    }

    /// Bind the configured address and serve until cancelled
    pub async fn run(&self) -> Result<()> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until cancelled
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let local_addr: SocketAddr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        let cancel = self.cancel.clone();
        axum::serve(listener, router(Arc::clone(&self.state)))
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("Web server shutting down");
            })
            .await
            .context("Web server failed")?;

        Ok(())
    }
}
