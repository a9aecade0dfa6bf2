//! Process-wide session state shared by every screen

use serde_json::json;
use tracing::{debug, warn};

use crate::auth::{Auth, User};
use crate::error::Error;

/// Profile fields captured at signup
#[derive(Debug, Clone)]
pub struct ProfileFields {
    pub first_name: String,
    pub last_name: String,
}

/// Observable current-user state, created at process start, updated on
/// sign-in/out, torn down at process exit.
///
/// `loading` is true from construction until [`initialize`] resolves
/// whether a persisted session is still valid.
///
/// [`initialize`]: SessionProvider::initialize
pub struct SessionProvider {
    current_user: Option<User>,
    loading: bool,
}

impl SessionProvider {
    /// Create a provider with no resolved user yet
    pub fn new() -> Self {
        Self {
            current_user: None,
            loading: true,
        }
    }

    /// Resolve the persisted session, if any, into a current user
    pub async fn initialize(&mut self, auth: &Auth) {
        match auth.get_session() {
            Some(session) if !session.is_expired() => match auth.get_user().await {
                Ok(user) => {
                    debug!(user = %user.id, "restored session");
                    self.current_user = Some(user);
                }
                Err(err) => {
                    warn!(error = %err, "could not restore session");
                    self.current_user = None;
                }
            },
            _ => self.current_user = None,
        }
        self.loading = false;
    }

    /// Sign in with email and password; on success the current user is
    /// updated for every consumer of this provider
    pub async fn sign_in(&mut self, auth: &Auth, email: &str, password: &str) -> Result<(), Error> {
        let response = auth.sign_in(email, password).await.map_err(|err| {
            warn!(error = %err, "sign-in failed");
            err
        })?;

        self.current_user = response.user;
        self.loading = false;
        Ok(())
    }

    /// Sign up with email, password, and profile fields.
    ///
    /// With email confirmation enabled the backend returns no session;
    /// the current user is set only when one arrives.
    pub async fn sign_up(
        &mut self,
        auth: &Auth,
        email: &str,
        password: &str,
        profile: &ProfileFields,
    ) -> Result<(), Error> {
        let data = json!({
            "first_name": profile.first_name,
            "last_name": profile.last_name,
        });

        let response = auth.sign_up(email, password, Some(&data)).await.map_err(|err| {
            warn!(error = %err, "sign-up failed");
            err
        })?;

        if auth.get_session().is_some() {
            self.current_user = response.user;
        }
        self.loading = false;
        Ok(())
    }

    /// Sign out. The local user state is cleared unconditionally; a remote
    /// failure is still reported to the caller.
    pub async fn sign_out(&mut self, auth: &Auth) -> Result<(), Error> {
        self.current_user = None;
        auth.sign_out().await
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// True until the persisted session has been resolved
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[cfg(test)]
    pub(crate) fn with_user(user: User) -> Self {
        Self {
            current_user: Some(user),
            loading: false,
        }
    }
}

impl Default for SessionProvider {
    fn default() -> Self {
        Self::new()
    }
}
