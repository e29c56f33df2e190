//! Credential checks and session tokens
//!
//! The front end has a single static user. Its password is kept only as a
//! salted SHA-256 digest, and every secret comparison goes through
//! [`constant_time_eq`].
//!
//! # Session cookies
//!
//! A session token is 32 bytes of random data, hex-encoded (64 chars). The
//! cookie carries `<token>.<signature>`, where the signature is
//! `hex(sha256(secret ":" token))`. A cookie with a bad signature never
//! reaches the session store lookup.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a session token in bytes (before hex encoding)
const TOKEN_BYTES: usize = 32;

/// Length of the per-credential salt in bytes
const SALT_BYTES: usize = 16;

/// Username of the built-in account
pub const DEFAULT_USERNAME: &str = "admin";

/// Password of the built-in account
const DEFAULT_PASSWORD: &str = "password123";

/// A salted password digest
#[derive(Clone)]
struct StoredSecret {
    salt: [u8; SALT_BYTES],
    digest: [u8; 32],
}

impl StoredSecret {
    fn new(password: &str) -> Self {
        let mut salt = [0u8; SALT_BYTES];
        rand::thread_rng().fill(&mut salt);
        let digest = salted_digest(&salt, password);
        Self { salt, digest }
    }

    fn matches(&self, password: &str) -> bool {
        let candidate = salted_digest(&self.salt, password);
        constant_time_eq(&candidate, &self.digest)
    }
}

fn salted_digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Static username → password table
///
/// Built once at startup and shared read-only by the request handlers.
#[derive(Clone, Default)]
pub struct CredentialTable {
    users: HashMap<String, StoredSecret>,
}

impl CredentialTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The table with the single built-in account
    pub fn with_default_user() -> Self {
        let mut table = Self::new();
        table.insert(DEFAULT_USERNAME, DEFAULT_PASSWORD);
        table
    }

    /// Add (or replace) an account
    pub fn insert(&mut self, username: impl Into<String>, password: &str) {
        self.users.insert(username.into(), StoredSecret::new(password));
    }

    /// Check a submitted username/password pair
    ///
    /// Returns true only if the user exists and the password matches
    /// exactly. A mismatch is an ordinary outcome, not an error.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        match self.users.get(username) {
            Some(secret) => secret.matches(password),
            None => false,
        }
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if there are no accounts
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl fmt::Debug for CredentialTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialTable")
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Generate a new random session token
///
/// Returns a 64-character hex string (32 random bytes)
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Compare two byte strings without short-circuiting on the first mismatch
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

fn token_signature(secret: &str, token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b":");
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Produce the cookie value for a session token
pub fn sign_token(secret: &str, token: &str) -> String {
    format!("{}.{}", token, token_signature(secret, token))
}

/// Extract the token from a signed cookie value
///
/// Returns `None` if the value is malformed or the signature does not match.
pub fn verify_signed_token<'a>(secret: &str, value: &'a str) -> Option<&'a str> {
    let (token, signature) = value.rsplit_once('.')?;
    if token.is_empty() {
        return None;
    }

    let expected = token_signature(secret, token);
    if constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
        Some(token)
    } else {
        None
    }
}
