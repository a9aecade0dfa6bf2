//! Error handling for the marketplace client

use std::fmt;
use thiserror::Error;

/// Unified error type for all marketplace flows
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication errors (bad credentials, missing session)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Data store query errors (PostgREST failures, constraint violations)
    #[error("Database error: {0}")]
    Database(String),

    /// Form validation errors, raised before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new database error
    pub fn database<T: fmt::Display>(msg: T) -> Self {
        Error::Database(msg.to_string())
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// True when the error originated from a pre-network form check
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
