//! Configuration options for the Advoqat admin client

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Backend used when no URL is configured
pub const DEFAULT_API_URL: &str = "https://legaliq.onrender.com/api";

/// Primary environment variable for the backend URL
pub const API_URL_VAR: &str = "ADVOQAT_API_URL";

/// Fallback environment variable shared with the web dashboard build
pub const LEGACY_API_URL_VAR: &str = "NEXT_PUBLIC_API_URL";

/// Path of the JSON file holding persisted credentials
pub const CREDENTIALS_PATH_VAR: &str = "ADVOQAT_CREDENTIALS_PATH";

/// Request timeout in whole seconds
pub const REQUEST_TIMEOUT_VAR: &str = "ADVOQAT_REQUEST_TIMEOUT_SECS";

/// Configuration options for the Advoqat admin client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Backend origin, without a trailing `/api`
    pub base_url: String,

    /// The request timeout. `None` leaves reqwest's default in place.
    pub request_timeout: Option<Duration>,

    /// Where credentials are persisted. `None` keeps them in memory.
    pub credentials_path: Option<PathBuf>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: normalize_base_url(DEFAULT_API_URL),
            request_timeout: None,
            credentials_path: None,
        }
    }
}

impl ClientOptions {
    /// Create options pointing at the given backend URL
    pub fn new(base_url: &str) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Build options from the process environment.
    ///
    /// `ADVOQAT_API_URL` wins over `NEXT_PUBLIC_API_URL`; both fall back to
    /// the hosted backend.
    pub fn from_env() -> Result<Self> {
        let raw_url = std::env::var(API_URL_VAR)
            .or_else(|_| std::env::var(LEGACY_API_URL_VAR))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        url::Url::parse(&raw_url)
            .map_err(|e| Error::config(format!("invalid API URL {:?}: {}", raw_url, e)))?;

        let mut options = Self::new(&raw_url);

        if let Ok(path) = std::env::var(CREDENTIALS_PATH_VAR) {
            if !path.is_empty() {
                options = options.with_credentials_path(path);
            }
        }

        if let Ok(secs) = std::env::var(REQUEST_TIMEOUT_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::config(format!("{} must be a whole number of seconds", REQUEST_TIMEOUT_VAR))
            })?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        Ok(options)
    }

    /// Set the backend URL. A trailing `/api` is stripped so endpoint paths
    /// are not doubled.
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = normalize_base_url(value);
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Persist credentials to a JSON file
    pub fn with_credentials_path(mut self, value: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(value.into());
        self
    }
}

/// Strip a trailing `/api` (with or without slash) and any trailing `/`.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("/api").unwrap_or(trimmed);
    trimmed.trim_end_matches('/').to_string()
}
