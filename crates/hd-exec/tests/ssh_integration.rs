//! SSH executor integration tests
//!
//! Runs `SshExecutor` against an in-process russh server that accepts one
//! password and answers exec requests with canned output.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::server::{Auth, Handler, Msg, Session};
use russh::{Channel, ChannelId, CryptoVec};
use russh_keys::key::KeyPair;
use tokio::net::TcpListener;
use tokio::time::timeout;

use hd_core::config::RemoteConfig;
use hd_core::{CommandRunner, ExecError};
use hd_exec::SshExecutor;

const USER: &str = "deck";
const PASSWORD: &str = "s3cret";

/// Upper bound on a single `run`; a hung drain loop fails here
const RUN_TIMEOUT: Duration = Duration::from_secs(10);

/// Server-side handler for one test connection
struct TestHandler;

#[async_trait]
impl Handler for TestHandler {
    type Error = anyhow::Error;

    async fn auth_password(&mut self, user: &str, password: &str) -> Result<Auth, Self::Error> {
        if user == USER && password == PASSWORD {
            Ok(Auth::Accept)
        } else {
            Ok(Auth::Reject {
                proceed_with_methods: None,
            })
        }
    }

    async fn channel_open_session(
        &mut self,
        _channel: Channel<Msg>,
        _session: &mut Session,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }

    async fn exec_request(
        &mut self,
        channel: ChannelId,
        data: &[u8],
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        let command = String::from_utf8_lossy(data);
        let exit_status = match command.as_ref() {
            "open -a \"Terminal\"" => {
                session.channel_success(channel);
                session.data(channel, CryptoVec::from_slice(b"launched\n"));
                0
            }
            "open -a \"Nope\"" => {
                session.channel_success(channel);
                session.data(channel, CryptoVec::from_slice(b"partial"));
                session.extended_data(
                    channel,
                    1,
                    CryptoVec::from_slice(b"Unable to find application named 'Nope'\n"),
                );
                1
            }
            _ => {
                // Refuse and leave the channel open
                session.channel_failure(channel);
                return Ok(());
            }
        };

        session.exit_status_request(channel, exit_status);
        session.eof(channel);
        session.close(channel);
        Ok(())
    }
}

/// Start a server on an ephemeral port, serving connections until the test ends
async fn start_server() -> u16 {
    let mut config = russh::server::Config::default();
    config.keys.push(KeyPair::generate_ed25519().unwrap());
    config.auth_rejection_time = Duration::from_millis(10);
    config.auth_rejection_time_initial = Some(Duration::from_secs(0));
    let config = Arc::new(config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let config = Arc::clone(&config);
            tokio::spawn(async move {
                let _ = russh::server::run_stream(config, socket, TestHandler).await;
            });
        }
    });

    port
}

fn executor(port: u16, password: &str) -> SshExecutor {
    let mut config = RemoteConfig::new("127.0.0.1", port, Some(USER.into()), Some(password.into()));
    config.connect_timeout = Duration::from_secs(5);
    SshExecutor::new(config)
}

async fn run(executor: &SshExecutor, command: &str) -> Result<String, ExecError> {
    timeout(RUN_TIMEOUT, executor.run(command))
        .await
        .expect("run did not finish")
}

#[tokio::test]
async fn test_stdout_returned_on_success() {
    let port = start_server().await;
    let executor = executor(port, PASSWORD);

    let stdout = run(&executor, "open -a \"Terminal\"").await.unwrap();
    assert_eq!(stdout, "launched\n");
}

#[tokio::test]
async fn test_stderr_reported_as_remote_failure() {
    let port = start_server().await;
    let executor = executor(port, PASSWORD);

    match run(&executor, "open -a \"Nope\"").await {
        Err(ExecError::Remote(stderr)) => {
            assert_eq!(stderr, "Unable to find application named 'Nope'\n")
        }
        other => panic!("expected remote failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let port = start_server().await;
    let executor = executor(port, "wrong");

    let err = run(&executor, "open -a \"Terminal\"").await.unwrap_err();
    assert!(matches!(err, ExecError::AuthRejected(ref user) if user == USER), "{:?}", err);
}

#[tokio::test]
async fn test_refused_exec_is_an_error() {
    let port = start_server().await;
    let executor = executor(port, PASSWORD);

    let err = run(&executor, "launchctl list").await.unwrap_err();
    match err {
        ExecError::Ssh(message) => assert_eq!(message, "exec request rejected"),
        other => panic!("expected ssh error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_per_command() {
    let port = start_server().await;
    let executor = executor(port, PASSWORD);

    for _ in 0..3 {
        assert_eq!(run(&executor, "open -a \"Terminal\"").await.unwrap(), "launched\n");
    }
    assert!(matches!(run(&executor, "open -a \"Nope\"").await, Err(ExecError::Remote(_))));
}
