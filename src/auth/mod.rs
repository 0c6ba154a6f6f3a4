//! Authentication and session management for admin users

pub mod store;
mod session;
mod types;

use log::{debug, info, warn};
use serde::Serialize;

use crate::endpoints;
use crate::error::Result;
use crate::fetch::ApiClient;

pub use session::*;
pub use store::{CredentialStore, FileStore, MemoryStore, TOKEN_KEY, USER_KEY};
pub use types::*;

/// Client for the backend auth endpoints
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Sign in with email and password.
    ///
    /// On `success: true` with a token, the token and user record are
    /// persisted. Anything else leaves stored credentials untouched.
    pub async fn login(&self, credentials: &LoginCredentials) -> AuthOutcome {
        let outcome = self
            .authenticate(endpoints::AUTH_LOGIN, credentials, "Login failed")
            .await;

        if let AuthOutcome::Authenticated { token, user } = &outcome {
            if let Err(e) = self.persist(token, user.as_ref()) {
                warn!("login succeeded but credentials could not be stored: {}", e);
                return AuthOutcome::Rejected {
                    error: format!("Could not store credentials: {}", e),
                };
            }
            info!("signed in as {}", credentials.email);
        }

        outcome
    }

    /// Create a new admin account.
    ///
    /// The returned token belongs to the new account and is not persisted,
    /// so the caller's own session is unaffected.
    pub async fn register(&self, data: &RegisterData) -> AuthOutcome {
        let outcome = self
            .authenticate(endpoints::AUTH_REGISTER, data, "Registration failed")
            .await;
        if outcome.is_success() {
            info!("created admin account {}", data.email);
        }
        outcome
    }

    /// Validate the stored token against the backend.
    ///
    /// Any failure, including a missing user in the payload, is `None`.
    pub async fn get_current_user(&self) -> Option<AdminUser> {
        match self.fetch_current_user().await {
            Ok(user) => user,
            Err(e) => {
                debug!("session validation failed: {}", e);
                None
            }
        }
    }

    pub(crate) async fn fetch_current_user(&self) -> Result<Option<AdminUser>> {
        let response = self
            .client
            .get(endpoints::AUTH_SESSION)
            .execute::<SessionResponse>()
            .await?;
        Ok(response.user)
    }

    /// Clear stored credentials and redirect to the login view. No server
    /// call is made.
    pub fn logout(&self) {
        info!("signing out");
        self.client.end_session();
    }

    /// The persisted user record, if present and readable
    pub fn get_stored_user(&self) -> Option<AdminUser> {
        let raw = self.client.store().get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("ignoring unreadable stored user: {}", e);
                None
            }
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.client.token()
    }

    /// True when a token is stored
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    async fn authenticate<B: Serialize>(&self, path: &str, body: &B, fallback: &str) -> AuthOutcome {
        let response = match self.client.post(path).json(body) {
            Ok(request) => request.execute::<AuthResponse>().await,
            Err(e) => Err(e),
        };

        match response {
            Ok(AuthResponse {
                success: true,
                token: Some(token),
                user,
                ..
            }) => AuthOutcome::Authenticated { token, user },
            Ok(response) => AuthOutcome::Rejected {
                error: response.error.unwrap_or_else(|| fallback.to_string()),
            },
            Err(e) => {
                debug!("{} failed: {}", path, e);
                AuthOutcome::Rejected {
                    error: e.backend_message().unwrap_or(fallback).to_string(),
                }
            }
        }
    }

    fn persist(&self, token: &str, user: Option<&AdminUser>) -> Result<()> {
        let store = self.client.store();
        store.set(TOKEN_KEY, token)?;
        match user {
            Some(user) => store.set(USER_KEY, &serde_json::to_string(user)?),
            None => store.remove(USER_KEY),
        }
    }
}
