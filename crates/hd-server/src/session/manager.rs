//! Session store implementation

use axum::http::{header, HeaderMap};
use dashmap::DashMap;

use hd_core::auth::{generate_token, sign_token, verify_signed_token};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "hostdeck_session";

/// Server-side login sessions, keyed by token
///
/// The browser only ever holds a signed token; the username it maps to
/// stays here. Sessions live until logout or process restart.
pub struct SessionStore {
    /// Logged-in username indexed by session token
    sessions: DashMap<String, String>,
    /// Secret used to sign cookie values
    secret: String,
}

impl SessionStore {
    /// Create an empty store that signs cookies with `secret`
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            sessions: DashMap::new(),
            secret: secret.into(),
        }
    }

    /// Start a session for `username` and return the signed cookie value
    pub fn create(&self, username: &str) -> String {
        let token = generate_token();
        self.sessions.insert(token.clone(), username.to_string());
        sign_token(&self.secret, &token)
    }

    /// Look up the username for a signed cookie value
    pub fn get(&self, cookie_value: &str) -> Option<String> {
        let token = verify_signed_token(&self.secret, cookie_value)?;
        self.sessions.get(token).map(|r| r.value().clone())
    }

    /// End the session behind a signed cookie value
    pub fn remove(&self, cookie_value: &str) -> Option<String> {
        let token = verify_signed_token(&self.secret, cookie_value)?;
        self.sessions.remove(token).map(|(_, username)| username)
    }

    /// Username of the session attached to a request, if any
    pub fn user_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        session_cookie(headers).and_then(|value| self.get(&value))
    }

    /// Number of active sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Extract the session cookie value from request headers
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == SESSION_COOKIE).then(|| value.to_string())
        })
}

/// `Set-Cookie` value that installs a session
pub fn set_cookie(value: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, value
    )
}

/// `Set-Cookie` value that clears the session cookie
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
}
