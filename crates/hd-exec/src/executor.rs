//! SSH command executor
//!
//! Opens one SSH connection per command, runs it, collects its output and
//! disconnects. Nothing is reused or retried between calls.

use std::sync::Arc;

use async_trait::async_trait;
use russh::client::{self, Config, Handle};
use russh::{ChannelMsg, Disconnect};
use russh_keys::key::PublicKey;

use hd_core::config::{RemoteConfig, RemoteCredentials};
use hd_core::{CommandRunner, ExecError};

/// SSH extended data type for standard error (RFC 4254 §5.2)
const SSH_EXTENDED_DATA_STDERR: u32 = 1;

/// Runs commands on the configured host over SSH with password auth
pub struct SshExecutor {
    /// Target host and credentials
    config: RemoteConfig,
    /// SSH client configuration, shared across connections
    ssh_config: Arc<Config>,
}

impl SshExecutor {
    /// Create an executor for the given remote host
    ///
    /// Missing credentials are not an error here; every `run` will fail with
    /// [`ExecError::NotConfigured`] instead.
    pub fn new(config: RemoteConfig) -> Self {
        if !config.is_configured() {
            tracing::warn!("SSH credentials not configured - remote execution is disabled");
        }

        Self {
            config,
            ssh_config: Arc::new(Config::default()),
        }
    }

    /// Get the remote configuration
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Open the TCP connection and complete the SSH handshake
    async fn connect(&self) -> Result<Handle<ClientHandler>, ExecError> {
        let address = self.config.address();
        tracing::debug!("Connecting to {}", address);

        tokio::time::timeout(
            self.config.connect_timeout,
            client::connect(
                Arc::clone(&self.ssh_config),
                (self.config.host.as_str(), self.config.port),
                ClientHandler,
            ),
        )
        .await
        .map_err(|_| ExecError::Timeout {
            address: address.clone(),
        })?
        .map_err(|e| ExecError::Connect {
            address,
            reason: e.to_string(),
        })
    }

    /// Authenticate and run the command on an established connection
    async fn execute(
        session: &mut Handle<ClientHandler>,
        credentials: &RemoteCredentials,
        command: &str,
    ) -> Result<CommandOutput, ExecError> {
        tracing::debug!("Authenticating as user '{}'", credentials.username);
        let authenticated = session
            .authenticate_password(credentials.username.as_str(), credentials.password.as_str())
            .await
            .map_err(ssh_error)?;

        if !authenticated {
            return Err(ExecError::AuthRejected(credentials.username.clone()));
        }

        let mut channel = session.channel_open_session().await.map_err(ssh_error)?;
        channel.exec(true, command).await.map_err(ssh_error)?;

        let mut output = CommandOutput::default();
        while let Some(msg) = channel.wait().await {
            match msg {
                ChannelMsg::Data { ref data } => output.stdout.extend_from_slice(data),
                ChannelMsg::ExtendedData { ref data, ext } if ext == SSH_EXTENDED_DATA_STDERR => {
                    output.stderr.extend_from_slice(data)
                }
                // More data may still follow the exit status
                ChannelMsg::ExitStatus { exit_status } => output.exit_status = Some(exit_status),
                // The server may leave the channel open after refusing the exec
                ChannelMsg::Failure => {
                    return Err(ExecError::Ssh("exec request rejected".into()));
                }
                _ => {}
            }
        }

        Ok(output)
    }
}

#[async_trait]
impl CommandRunner for SshExecutor {
    async fn run(&self, command: &str) -> Result<String, ExecError> {
        let Some(credentials) = self.config.credentials() else {
            tracing::error!("SSH credentials not configured");
            return Err(ExecError::NotConfigured);
        };

        tracing::info!("Executing SSH command: {}", command);

        let result = match self.connect().await {
            Ok(mut session) => {
                let result = Self::execute(&mut session, &credentials, command).await;
                if let Err(e) = session
                    .disconnect(Disconnect::ByApplication, "", "en")
                    .await
                {
                    tracing::debug!("Disconnect after command failed: {}", e);
                }
                result.and_then(CommandOutput::into_result)
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(stdout) => tracing::info!("SSH command succeeded: {}", stdout.trim_end()),
            Err(ExecError::Remote(stderr)) => {
                tracing::error!("SSH command failed: {}", stderr.trim_end())
            }
            Err(e) => tracing::error!("SSH connection error: {}", e),
        }

        result
    }
}

fn ssh_error(e: russh::Error) -> ExecError {
    ExecError::Ssh(e.to_string())
}

/// Everything a finished command sent back
#[derive(Debug, Default)]
pub struct CommandOutput {
    /// Bytes received on the channel's data stream
    pub stdout: Vec<u8>,
    /// Bytes received as stderr extended data
    pub stderr: Vec<u8>,
    /// Exit status, if the server reported one
    pub exit_status: Option<u32>,
}

impl CommandOutput {
    /// Apply the success policy: any stderr output means failure
    pub fn into_result(self) -> Result<String, ExecError> {
        if let Some(code) = self.exit_status {
            tracing::debug!("Remote command exited with status {}", code);
        }

        let stderr = String::from_utf8_lossy(&self.stderr);
        if !stderr.is_empty() {
            return Err(ExecError::Remote(stderr.into_owned()));
        }

        Ok(String::from_utf8_lossy(&self.stdout).into_owned())
    }
}

/// SSH client handler
///
/// Unknown host keys are accepted, matching an auto-add policy; the
/// fingerprint is logged so it can be checked after the fact.
struct ClientHandler;

#[async_trait]
impl client::Handler for ClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        tracing::debug!("Server host key: {}", server_public_key.fingerprint());
        Ok(true)
    }
}
