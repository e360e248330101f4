//! API-key authentication.
//!
//! Credentials are injected at construction and sessions live in a keyed
//! table with per-session expiry. Nothing here is process-global; the
//! session store is shared explicitly through the router state. The core
//! catalogs have no knowledge of authentication.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use serde::Serialize;
use uuid::Uuid;

/// Header carrying the pre-shared API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// A session issued to an authenticated user.
#[derive(Debug, Clone)]
struct Session {
    username: String,
    expires_at: Instant,
}

/// An issued API key with its remaining lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedKey {
    pub api_key: String,
    pub expires_in_secs: u64,
}

/// Keyed session table guarding the data routes.
#[derive(Debug)]
pub struct SessionStore {
    /// Username to password, injected at startup
    credentials: HashMap<String, String>,
    /// Session lifetime
    ttl: Duration,
    /// API key to session
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Creates a session store over the given credential table.
    pub fn new(credentials: HashMap<String, String>, ttl: Duration) -> Self {
        Self {
            credentials,
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Validates credentials and issues a fresh API key.
    ///
    /// Each successful login gets its own session; earlier keys stay valid
    /// until they expire.
    pub fn login(&self, username: &str, password: &str) -> Option<IssuedKey> {
        let stored = self.credentials.get(username)?;
        if stored != password {
            return None;
        }

        let api_key = Uuid::new_v4().simple().to_string();
        let session = Session {
            username: username.to_string(),
            expires_at: Instant::now() + self.ttl,
        };

        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.retain(|_, s| s.expires_at > Instant::now());
        sessions.insert(api_key.clone(), session);

        Some(IssuedKey {
            api_key,
            expires_in_secs: self.ttl.as_secs(),
        })
    }

    /// Returns true if the key names an unexpired session.
    pub fn authorize(&self, api_key: &str) -> bool {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions
            .get(api_key)
            .map(|s| s.expires_at > Instant::now())
            .unwrap_or(false)
    }

    /// Returns the username behind an unexpired key, if any.
    pub fn session_user(&self, api_key: &str) -> Option<String> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions
            .get(api_key)
            .filter(|s| s.expires_at > Instant::now())
            .map(|s| s.username.clone())
    }
}
