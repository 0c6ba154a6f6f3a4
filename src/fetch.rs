//! HTTP client wrapper for the Advoqat backend
//!
//! Every request reads the bearer token from the credential store at send
//! time. A 401 clears the stored credentials and fires the
//! [`LoginRedirect`] hook before the error is returned.

use std::sync::Arc;

use log::{debug, info, warn};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::auth::store::{CredentialStore, MemoryStore, TOKEN_KEY};
use crate::config::ClientOptions;
use crate::endpoints;
use crate::error::{Error, Result};

const CLIENT_INFO: &str = concat!("advoqat-admin/", env!("CARGO_PKG_VERSION"));

/// Navigation side effect fired when the session is dropped
pub trait LoginRedirect: Send + Sync {
    fn redirect(&self, route: &str);
}

/// Default hook: there is no view to navigate, so just record it
#[derive(Debug, Default)]
pub struct LogRedirect;

impl LoginRedirect for LogRedirect {
    fn redirect(&self, route: &str) {
        info!("session ended, redirecting to {}", route);
    }
}

/// Configured client shared by every service
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: Client,
    store: Arc<dyn CredentialStore>,
    redirect: Arc<dyn LoginRedirect>,
}

impl ApiClient {
    /// Create a client with an in-memory store and the logging redirect hook
    pub fn new(base_url: &str) -> Self {
        Self::with_parts(
            base_url,
            Client::new(),
            Arc::new(MemoryStore::new()),
            Arc::new(LogRedirect),
        )
    }

    /// Create a client from options, building the reqwest client with the
    /// configured timeout
    pub fn from_options(
        options: &ClientOptions,
        store: Arc<dyn CredentialStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;
        Ok(Self::with_parts(&options.base_url, http_client, store, redirect))
    }

    pub fn with_parts(
        base_url: &str,
        http_client: Client,
        store: Arc<dyn CredentialStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Self {
        Self {
            base_url: crate::config::normalize_base_url(base_url),
            http_client,
            store,
            redirect,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Currently stored bearer token
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    /// Clear stored credentials and navigate to the login view
    pub fn end_session(&self) {
        if let Err(e) = self.store.clear() {
            warn!("failed to clear stored credentials: {}", e);
        }
        self.redirect.redirect(endpoints::LOGIN_ROUTE);
    }

    pub fn get(&self, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, path, Method::GET)
    }

    pub fn post(&self, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, path, Method::POST)
    }

    pub fn put(&self, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, path, Method::PUT)
    }

    /// Probe the backend health endpoint
    pub async fn health(&self) -> bool {
        match self.get(endpoints::HEALTH).execute_raw().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("health check failed: {}", e);
                false
            }
        }
    }
}

/// Helper for building and executing requests against the backend
pub struct FetchBuilder<'a> {
    api: &'a ApiClient,
    path: String,
    segments: Vec<String>,
    method: Method,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    fn new(api: &'a ApiClient, path: &str, method: Method) -> Self {
        Self {
            api,
            path: path.to_string(),
            segments: Vec::new(),
            method,
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Append a percent-encoded path segment, e.g. a record id
    pub fn segment(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Add a query parameter
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    fn url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.api.base_url, self.path))?;

        if !self.segments.is_empty() {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::general(format!("cannot append to {}", self.path)))?;
            path.pop_if_empty();
            for segment in &self.segments {
                path.push(segment);
            }
        }

        if !self.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("X-Client-Info", HeaderValue::from_static(CLIENT_INFO));

        if let Some(token) = self.api.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("stored token is not a valid header value, sending without it"),
            }
        }

        headers
    }

    /// Execute the request and return the raw response.
    ///
    /// Status handling is left to the caller except for 401, which always
    /// ends the session.
    pub async fn execute_raw(&self) -> Result<reqwest::Response> {
        let url = self.url()?;
        debug!("{} {}", self.method, url.path());

        let mut request = self
            .api
            .http_client
            .request(self.method.clone(), url)
            .headers(self.headers());
        if let Some(body) = &self.body {
            request = request.body(body.clone());
        }

        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("{} {} rejected with 401, dropping credentials", self.method, self.path);
            self.api.end_session();
            return Err(Error::Unauthorized);
        }

        Ok(response)
    }

    /// Execute the request and return the JSON body. Empty bodies are `null`.
    pub async fn execute_value(&self) -> Result<Value> {
        let response = self.execute_raw().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Execute the request and parse the response as `T`
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.execute_value().await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn api_error(status: StatusCode, text: &str) -> Error {
    let payload: Option<Value> = serde_json::from_str(text).ok();
    let message = payload
        .as_ref()
        .and_then(|p| {
            p.get("error")
                .or_else(|| p.get("message"))
                .and_then(|m| m.as_str())
        })
        .map(str::to_string)
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text.to_string()
            }
        });

    Error::Api {
        status: status.as_u16(),
        message,
        payload,
    }
}
