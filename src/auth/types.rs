//! Types for authentication and session management

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Response from the auth endpoints.
///
/// The password-grant endpoint returns the token fields at the top level;
/// signup may return a nested session or, with email confirmation enabled,
/// no session at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The user data
    pub user: Option<User>,

    /// A nested session, when the endpoint returns one
    pub session: Option<Session>,

    /// The access token
    pub access_token: Option<String>,

    /// The refresh token
    pub refresh_token: Option<String>,

    /// The token type
    pub token_type: Option<String>,

    /// The expiry time in seconds
    pub expires_in: Option<i64>,
}

impl AuthResponse {
    /// Resolve the session carried by this response, whether it arrived
    /// nested or as top-level token fields.
    pub fn into_session(self) -> Option<Session> {
        if let Some(session) = self.session {
            return Some(session);
        }
        match (self.access_token, self.refresh_token) {
            (Some(access), Some(refresh)) => {
                Some(Session::new(access, refresh, self.expires_in.unwrap_or(3600)))
            }
            _ => None,
        }
    }
}

/// An authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The user ID (profile id in the data store)
    pub id: String,

    /// The user's email address
    pub email: Option<String>,

    /// The user metadata supplied at signup (first/last name)
    #[serde(default)]
    pub user_metadata: HashMap<String, serde_json::Value>,

    /// The creation time
    pub created_at: Option<String>,
}

impl User {
    /// A metadata field as a plain string, when present
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.user_metadata.get(key).and_then(|v| v.as_str())
    }
}

/// Session data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The access token
    pub access_token: String,

    /// The refresh token
    pub refresh_token: String,

    /// The token type
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// The expiry time in seconds
    pub expires_in: i64,

    /// The expiry timestamp
    pub expires_at: Option<i64>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Create a new session expiring `expires_in` seconds from now
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_secs() as i64;

        Self {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            expires_in,
            expires_at: Some(now + expires_in),
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or(Duration::from_secs(0))
                .as_secs() as i64;

            now >= expires_at
        } else {
            false
        }
    }
}
