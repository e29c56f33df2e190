//! hd-server: Web front end for hostdeck
//!
//! Serves a login form for a single static account, a dashboard of
//! launchable applications, and a dispatch endpoint that runs the matching
//! launch command on the configured host. Request and dispatch counters are
//! exposed at `/metrics`.

pub mod metrics;
pub mod server;
pub mod session;
pub mod state;

pub use metrics::Metrics;
pub use server::{router, WebServer};
pub use session::SessionStore;
pub use state::AppState;
