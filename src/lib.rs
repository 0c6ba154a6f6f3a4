//! Advoqat Admin Client Library
//!
//! A Rust client for the Advoqat admin backend, providing access to users,
//! barristers, freelancers, cases and documents, along with admin
//! authentication and dashboard statistics.

pub mod auth;
pub mod barristers;
pub mod cases;
pub mod config;
pub mod dashboard;
pub mod documents;
pub mod endpoints;
pub mod error;
pub mod fetch;
pub mod freelancers;
pub mod response;
pub mod users;
pub mod view;

use std::sync::Arc;

use crate::auth::{AuthService, CredentialStore, FileStore, MemoryStore, Session};
use crate::barristers::BarristersService;
use crate::cases::CasesService;
use crate::config::ClientOptions;
use crate::dashboard::DashboardService;
use crate::documents::DocumentsService;
use crate::error::Result;
use crate::fetch::{ApiClient, LogRedirect, LoginRedirect};
use crate::freelancers::FreelancersService;
use crate::users::UsersService;

/// The main entry point for the Advoqat admin client
pub struct Advoqat {
    client: ApiClient,
    session: Arc<Session>,
    /// Client options
    pub options: ClientOptions,
}

impl Advoqat {
    /// Create a client for the given backend with in-memory credentials
    ///
    /// # Example
    ///
    /// ```
    /// use advoqat_admin::Advoqat;
    ///
    /// let advoqat = Advoqat::new("https://legaliq.onrender.com/api");
    /// assert_eq!(advoqat.client().base_url(), "https://legaliq.onrender.com");
    /// ```
    pub fn new(base_url: &str) -> Self {
        let options = ClientOptions::new(base_url);
        let client = ApiClient::new(base_url);
        Self::with_client(client, options)
    }

    /// Create a client with custom options.
    ///
    /// Credentials are kept in a JSON file when `credentials_path` is set,
    /// otherwise in memory.
    pub fn new_with_options(options: ClientOptions) -> Result<Self> {
        Self::new_with_redirect(options, Arc::new(LogRedirect))
    }

    /// Like [`Advoqat::new_with_options`] with a custom hook for the
    /// navigate-to-login side effect
    pub fn new_with_redirect(
        options: ClientOptions,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self> {
        let store: Arc<dyn CredentialStore> = match &options.credentials_path {
            Some(path) => Arc::new(FileStore::new(path.clone())),
            None => Arc::new(MemoryStore::new()),
        };
        let client = ApiClient::from_options(&options, store, redirect)?;
        Ok(Self::with_client(client, options))
    }

    /// Create a client from `ADVOQAT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new_with_options(ClientOptions::from_env()?)
    }

    fn with_client(client: ApiClient, options: ClientOptions) -> Self {
        let session = Arc::new(Session::new(AuthService::new(client.clone())));
        Self {
            client,
            session,
            options,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The shared admin session
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.client.clone())
    }

    pub fn users(&self) -> UsersService {
        UsersService::new(self.client.clone())
    }

    pub fn barristers(&self) -> BarristersService {
        BarristersService::new(self.client.clone())
    }

    pub fn freelancers(&self) -> FreelancersService {
        FreelancersService::new(self.client.clone())
    }

    pub fn cases(&self) -> CasesService {
        CasesService::new(self.client.clone())
    }

    pub fn documents(&self) -> DocumentsService {
        DocumentsService::new(self.client.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.client.clone())
    }

    /// Whether the backend answers its health endpoint
    pub async fn health(&self) -> bool {
        self.client.health().await
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{AdminRole, AdminUser, AuthOutcome, LoginCredentials, Session};
    pub use crate::config::ClientOptions;
    pub use crate::dashboard::DashboardStats;
    pub use crate::error::{Error, Result};
    pub use crate::Advoqat;
}
