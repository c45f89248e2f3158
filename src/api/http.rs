//! HTTP utilities for SquaredUp REST API calls

use super::error::RequestFailure;
use anyhow::Context;
use reqwest::{Client, Method};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let total = body.len();
    let truncated = if total > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, total)
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP transport shared by all API calls
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(format!("sqdemo/{}", crate::VERSION))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Send a request and return the raw response body of a 2xx response
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<String, RequestFailure> {
        let mut request = self.client.request(method, url);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let response_body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            let sanitized = sanitize_for_log(&response_body);
            tracing::error!("API error: {} - {}", status, sanitized);
            return Err(RequestFailure::Status {
                status,
                body: sanitized,
            });
        }

        Ok(response_body)
    }
}

/// Parse a response body as JSON, treating an empty body as `null`
pub fn parse_body(body: &str) -> Result<Value, RequestFailure> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(body)?)
}
