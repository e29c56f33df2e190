//! hostdeck web front end
//!
//! Logs a user in and launches applications on a remote host over SSH.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hd_core::config::{
    RemoteConfig, ServerConfig, DEFAULT_BIND_ADDRESS, DEFAULT_SECRET_KEY, DEFAULT_SSH_PORT,
};
use hd_exec::SshExecutor;
use hd_server::{AppState, WebServer};

#[derive(Parser)]
#[command(name = "hostdeck")]
#[command(about = "Web launcher for applications on a remote host")]
#[command(version)]
struct Args {
    /// Address to serve the web front end on
    #[arg(short, long, env = "HOSTDECK_BIND", default_value = DEFAULT_BIND_ADDRESS)]
    bind: String,

    /// Host to run launch commands on
    #[arg(long, env = "HOST_IP", default_value = "host.docker.internal")]
    host: String,

    /// SSH port on the target host
    #[arg(long, env = "HOST_SSH_PORT", default_value_t = DEFAULT_SSH_PORT)]
    port: u16,

    /// SSH username on the target host
    #[arg(long, env = "HOST_USER")]
    user: Option<String>,

    /// SSH password on the target host
    #[arg(long, env = "HOST_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Secret used to sign session cookies
    #[arg(long, env = "SECRET_KEY", default_value = DEFAULT_SECRET_KEY, hide_env_values = true)]
    secret_key: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| args.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("hostdeck starting...");

    let server_config =
        ServerConfig::new(&args.bind, args.secret_key).context("Invalid server configuration")?;
    if server_config.uses_default_secret() {
        tracing::warn!("SECRET_KEY not set - using the built-in session secret");
    }

    let remote_config = RemoteConfig::new(args.host, args.port, args.user, args.password);
    let executor = Arc::new(SshExecutor::new(remote_config));
    tracing::info!(
        "Remote commands run on {} ({})",
        executor.config().address(),
        if executor.config().is_configured() {
            "credentials configured"
        } else {
            "no credentials"
        }
    );

    let state = Arc::new(AppState::new(&server_config, executor));

    // Create cancellation token for graceful shutdown
    let cancel = CancellationToken::new();

    // Setup signal handlers
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C, initiating shutdown...");
            }
            _ = terminate => {
                tracing::info!("Received SIGTERM, initiating shutdown...");
            }
        }

        cancel_clone.cancel();
    });

    let server = WebServer::new(server_config, state, cancel);
    server.run().await?;

    tracing::info!("hostdeck shutdown complete");
    Ok(())
}
