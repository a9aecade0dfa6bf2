//! Configuration options for the marketplace client

use std::time::Duration;

/// Configuration options for the backend client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// The database schema exposed through the data API
    pub db_schema: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            db_schema: "public".to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the database schema
    pub fn with_db_schema(mut self, value: &str) -> Self {
        self.db_schema = value.to_string();
        self
    }
}

/// Defaults for the service listing pipeline
#[derive(Debug, Clone)]
pub struct ListingOptions {
    /// Maximum number of rows fetched per listing refresh
    pub page_size: u32,

    /// Order results newest-first by creation time
    pub newest_first: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            newest_first: true,
        }
    }
}

impl ListingOptions {
    /// Set the page size
    pub fn with_page_size(mut self, value: u32) -> Self {
        self.page_size = value;
        self
    }

    /// Set whether results are ordered newest-first
    pub fn with_newest_first(mut self, value: bool) -> Self {
        self.newest_first = value;
        self
    }
}
