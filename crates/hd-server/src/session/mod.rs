//! Login session tracking

mod manager;

pub use manager::{clear_cookie, session_cookie, set_cookie, SessionStore, SESSION_COOKIE};
