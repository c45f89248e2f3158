//! API Client
//!
//! Main client for the SquaredUp REST API, combining URL/API key composition
//! with the HTTP transport. Every call returns a typed result; nothing in
//! here terminates the process.

use super::error::{ApiError, RequestFailure};
use super::http::{parse_body, HttpTransport};
use reqwest::Method;
use serde_json::Value;
use std::fmt;

/// Name of the query parameter carrying the API key
pub const API_KEY_PARAM: &str = "apiKey";

/// Compose the full request URL for `path`.
///
/// The path gets a leading `/` if it lacks one, and the API key is appended
/// with `&` when the path already has a query string, `?` otherwise. Nothing
/// else about the path is touched.
pub fn build_url(base_url: &str, path: &str, api_key: &str) -> String {
    let slash = if path.starts_with('/') { "" } else { "/" };
    let separator = if path.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}{}{}={}",
        base_url, slash, path, separator, API_KEY_PARAM, api_key
    )
}

/// Connection settings for the API client, fixed at startup
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    /// Marker put at the start of every resource name the scenarios create
    pub name_prefix: String,
}

impl ApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.squaredup.com/api";
    pub const DEFAULT_NAME_PREFIX: &'static str = "[API Test]";

    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            name_prefix: Self::DEFAULT_NAME_PREFIX.to_string(),
        }
    }

    pub fn with_name_prefix(mut self, prefix: &str) -> Self {
        self.name_prefix = prefix.to_string();
        self
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &mask_key(&self.api_key))
            .field("name_prefix", &self.name_prefix)
            .finish()
    }
}

/// Show only the first and last four characters of a key
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Main SquaredUp API client
#[derive(Clone)]
pub struct ApiClient {
    http: HttpTransport,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        tracing::debug!("Creating ApiClient with {:?}", config);
        let http = HttpTransport::new()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn name_prefix(&self) -> &str {
        &self.config.name_prefix
    }

    /// Full URL for `path`, API key included
    pub fn url(&self, path: &str) -> String {
        build_url(&self.config.base_url, path, &self.config.api_key)
    }

    /// Make a GET request and return the parsed body
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let body = self.request(Method::GET, path, None).await?;
        parse_body(&body).map_err(|cause| ApiError::new(Method::GET, path, cause))
    }

    /// Make a GET request to a collection endpoint. A body that is not a JSON
    /// array fails like any other undecodable response.
    pub async fn get_list(&self, path: &str) -> Result<Vec<Value>, ApiError> {
        let response = self.get(path).await?;
        serde_json::from_value(response)
            .map_err(|err| ApiError::new(Method::GET, path, RequestFailure::Decode(err)))
    }

    /// Make a POST request and return the parsed body.
    ///
    /// Create endpoints often answer with a bare identifier rather than the
    /// created object; see [`super::resource_id`].
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self.request(Method::POST, path, Some(body)).await?;
        parse_body(&response).map_err(|cause| ApiError::new(Method::POST, path, cause))
    }

    /// Make a PUT request, discarding the response body
    pub async fn put(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.request(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    /// Make a DELETE request, discarding the response body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::DELETE, path, None).await?;
        Ok(())
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<String, ApiError> {
        // The URL carries the key, so only the path is logged
        tracing::debug!("{} {}", method, path);

        let url = self.url(path);
        self.http
            .send(method.clone(), &url, body)
            .await
            .map_err(|cause| ApiError::new(method, path, cause))
    }
}
