//! Data-store operations through the PostgREST API

mod query;

use reqwest::Client;
use serde::Serialize;

pub use query::*;

/// Client for operations on a single table or view
pub struct Table {
    /// The base URL for the backend project
    url: String,

    /// The anonymous API key
    key: String,

    /// Bearer token of the signed-in user, when a session exists
    token: Option<String>,

    /// The database schema the table lives in
    schema: String,

    /// The table or view name
    table: String,

    /// HTTP client
    client: Client,
}

impl Table {
    /// Create a new table client
    pub(crate) fn new(
        url: &str,
        key: &str,
        token: Option<String>,
        schema: &str,
        table: &str,
        client: Client,
    ) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            token,
            schema: schema.to_string(),
            table: table.to_string(),
            client,
        }
    }

    /// Get the base URL for REST API requests
    fn get_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    /// Select columns from the table, including embedded resources
    /// (`customers!inner(address)` style joins)
    pub fn select(&self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(
            self.get_url(),
            self.key.clone(),
            self.token.clone(),
            self.schema.clone(),
            columns,
            self.client.clone(),
        )
    }

    /// Insert a row into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(
            self.get_url(),
            self.key.clone(),
            self.token.clone(),
            self.schema.clone(),
            values,
            self.client.clone(),
        )
    }
}
