//! Sarvam service-marketplace client core
//!
//! Client flows for a small service marketplace backed by a hosted
//! Supabase-style backend: authentication sessions, posting new service
//! requests, and the searchable listing pipeline that joins requests to
//! their customers, skills, and assigned providers.

pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod listing;
pub mod models;
pub mod postgrest;
pub mod search;
pub mod session;
pub mod submission;

use reqwest::Client;

use crate::auth::Auth;
use crate::config::ClientOptions;
use crate::postgrest::Table;

/// The main entry point for the marketplace client
pub struct Sarvam {
    /// The base URL for the backend project
    pub url: String,
    /// The anonymous API key for the backend project
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth client for user management and authentication
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
}

impl Sarvam {
    /// Create a new client
    ///
    /// # Example
    ///
    /// ```
    /// use sarvam::Sarvam;
    ///
    /// let client = Sarvam::new("https://your-project.example.co", "your-anon-key");
    /// ```
    pub fn new(url: &str, key: &str) -> Self {
        Self::new_with_options(url, key, ClientOptions::default())
    }

    /// Create a new client with custom options
    pub fn new_with_options(url: &str, key: &str, options: ClientOptions) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_default();

        let auth = Auth::new(url, key, http_client.clone());

        Self {
            url: url.to_string(),
            key: key.to_string(),
            http_client,
            auth,
            options,
        }
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Create a table client for data operations.
    ///
    /// Requests carry the signed-in user's bearer token when a session
    /// exists, so row-level security applies to writes.
    pub fn from(&self, table: &str) -> Table {
        let token = self.auth.get_session().map(|s| s.access_token);
        Table::new(
            &self.url,
            &self.key,
            token,
            &self.options.db_schema,
            table,
            self.http_client.clone(),
        )
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::{ClientOptions, ListingOptions};
    pub use crate::error::Error;
    pub use crate::listing::{ListingPipeline, ListingState, ServiceViewModel};
    pub use crate::search::SearchControl;
    pub use crate::session::{ProfileFields, SessionProvider};
    pub use crate::submission::ServiceForm;
    pub use crate::Sarvam;
}
