//! Authentication client for the hosted auth collaborator

mod types;

use reqwest::Client;
use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a serde_json::Value>,
}

/// Client for the auth endpoints
pub struct Auth {
    /// The base URL for the backend project
    url: String,

    /// The anonymous API key
    key: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session
    session: Arc<Mutex<Option<Session>>>,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, key: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
            session: Arc::new(Mutex::new(None)),
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    /// Sign up a new user with email and password.
    ///
    /// `data` becomes the user metadata (profile fields such as first and
    /// last name). Depending on project settings the response may carry a
    /// session immediately or require email confirmation first.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<AuthResponse, Error> {
        let url = self.get_auth_url("/signup");

        let body = Credentials {
            email,
            password,
            data,
        };

        let result = Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .error_variant(Error::Auth)
            .json(&body)?
            .execute::<AuthResponse>()
            .await?;

        if let Some(session) = result.clone().into_session() {
            let mut current_session = self.session.lock().unwrap();
            *current_session = Some(session);
        }

        Ok(result)
    }

    /// Sign in a user with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, Error> {
        let url = self.get_auth_url("/token?grant_type=password");

        let body = Credentials {
            email,
            password,
            data: None,
        };

        let result = Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .error_variant(Error::Auth)
            .json(&body)?
            .execute::<AuthResponse>()
            .await?;

        if let Some(session) = result.clone().into_session() {
            let mut current_session = self.session.lock().unwrap();
            *current_session = Some(session);
        }

        Ok(result)
    }

    /// Sign out the current user and clear the stored session
    pub async fn sign_out(&self) -> Result<(), Error> {
        let url = self.get_auth_url("/logout");

        let token = {
            let current_session = self.session.lock().unwrap();
            match *current_session {
                Some(ref session) => session.access_token.clone(),
                None => return Err(Error::auth("Not logged in")),
            }
        };

        let result = Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .error_variant(Error::Auth)
            .bearer_auth(&token)
            .send()
            .await;

        // The local session is torn down even when the remote call fails.
        let mut current_session = self.session.lock().unwrap();
        *current_session = None;

        result.map(|_| ())
    }

    /// Get the user data for the currently authenticated user
    pub async fn get_user(&self) -> Result<User, Error> {
        let url = self.get_auth_url("/user");

        let token = {
            let current_session = self.session.lock().unwrap();
            match *current_session {
                Some(ref session) => session.access_token.clone(),
                None => return Err(Error::auth("Not logged in")),
            }
        };

        let user = Fetch::get(&self.client, &url)
            .header("apikey", &self.key)
            .error_variant(Error::Auth)
            .bearer_auth(&token)
            .execute::<User>()
            .await?;

        Ok(user)
    }

    /// Get the current session
    pub fn get_session(&self) -> Option<Session> {
        let current_session = self.session.lock().unwrap();
        current_session.clone()
    }

    /// Set the session
    pub fn set_session(&self, session: Session) {
        let mut current_session = self.session.lock().unwrap();
        *current_session = Some(session);
    }
}
