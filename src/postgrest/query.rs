//! Query builders for the PostgREST table client

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};

/// Collected query parameters for a single request
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    params: HashMap<String, String>,
}

impl QueryBuilder {
    /// Create a new QueryBuilder
    pub fn new() -> Self {
        Self {
            params: HashMap::new(),
        }
    }

    /// Add a parameter to the query
    pub fn add_param(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }

    /// Get the query parameters
    pub fn get_params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

fn authorize<'a>(fetch: FetchBuilder<'a>, key: &str, token: &Option<String>) -> FetchBuilder<'a> {
    let fetch = fetch.header("apikey", key).error_variant(Error::Database);
    match token {
        Some(token) => fetch.bearer_auth(token),
        None => fetch,
    }
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    url: String,
    key: String,
    token: Option<String>,
    schema: String,
    client: Client,
    query: QueryBuilder,
}

impl SelectBuilder {
    /// Create a new SelectBuilder
    pub fn new(
        url: String,
        key: String,
        token: Option<String>,
        schema: String,
        columns: &str,
        client: Client,
    ) -> Self {
        let mut query = QueryBuilder::new();
        query.add_param("select", columns);

        Self {
            url,
            key,
            token,
            schema,
            client,
            query,
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<T: ToString>(mut self, column: &str, value: T) -> Self {
        let filter = format!("eq.{}", value.to_string());
        self.query.add_param(column, &filter);
        self
    }

    /// Filter rows where column matches a pattern (case insensitive)
    pub fn ilike(mut self, column: &str, pattern: &str) -> Self {
        let filter = format!("ilike.{}", pattern);
        self.query.add_param(column, &filter);
        self
    }

    /// Filter rows matching any of the given PostgREST conditions,
    /// e.g. `title.ilike.%roof%,description.ilike.%roof%`
    pub fn or(mut self, filters: &str) -> Self {
        self.query.add_param("or", &format!("({})", filters));
        self
    }

    /// Order the results by a column
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.query.add_param("order", &format!("{}.{}", column, direction));
        self
    }

    /// Limit the number of rows returned
    pub fn limit(mut self, count: u32) -> Self {
        self.query.add_param("limit", &count.to_string());
        self
    }

    /// Execute the query and return the results
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        let fetch = authorize(Fetch::get(&self.client, &self.url), &self.key, &self.token)
            .header("Accept-Profile", &self.schema)
            .query(self.query.get_params().clone());

        let result = fetch.execute::<Vec<T>>().await?;
        Ok(result)
    }

    /// Execute the query and return the first row, if any
    pub async fn execute_one<T: DeserializeOwned>(self) -> Result<Option<T>, Error> {
        let results = self.limit(1).execute::<T>().await?;
        Ok(results.into_iter().next())
    }
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    url: String,
    key: String,
    token: Option<String>,
    schema: String,
    values: T,
    client: Client,
}

impl<T: Serialize> InsertBuilder<T> {
    /// Create a new InsertBuilder
    pub fn new(
        url: String,
        key: String,
        token: Option<String>,
        schema: String,
        values: T,
        client: Client,
    ) -> Self {
        Self {
            url,
            key,
            token,
            schema,
            values,
            client,
        }
    }

    /// Execute the insert and return the created rows
    pub async fn execute<R: DeserializeOwned>(&self) -> Result<Vec<R>, Error> {
        let fetch = authorize(Fetch::post(&self.client, &self.url), &self.key, &self.token)
            .header("Content-Profile", &self.schema)
            .header("Prefer", "return=representation")
            .json(&self.values)?;

        let result = fetch.execute::<Vec<R>>().await?;
        Ok(result)
    }

    /// Execute the insert and return the single created row
    pub async fn execute_one<R: DeserializeOwned>(&self) -> Result<R, Error> {
        let rows = self.execute::<R>().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database("insert returned no rows"))
    }
}
