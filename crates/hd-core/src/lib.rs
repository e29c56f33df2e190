//! hd-core: Core abstractions and configuration for hostdeck
//!
//! This crate provides the configuration structures, the static credential
//! table, the application registry and the remote execution trait shared by
//! the executor and the web server.

pub mod auth;
pub mod config;
pub mod error;
pub mod registry;
pub mod traits;

pub use auth::CredentialTable;
pub use error::{ConfigError, ExecError};
pub use registry::AppRegistry;
pub use traits::CommandRunner;
