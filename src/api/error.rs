//! API errors
//!
//! Every failed call surfaces as one kind of error, [`ApiError`], naming the
//! method and path that failed. The [`RequestFailure`] cause is kept for
//! logging and tests, but callers are not expected to branch on it.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// A request to the API failed
#[derive(Error, Debug)]
#[error("{method} {path} ERROR: {cause}")]
pub struct ApiError {
    pub method: Method,
    pub path: String,
    #[source]
    pub cause: RequestFailure,
}

impl ApiError {
    pub fn new(method: Method, path: &str, cause: RequestFailure) -> Self {
        Self {
            method,
            path: path.to_string(),
            cause,
        }
    }

    /// HTTP status of the response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match &self.cause {
            RequestFailure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Underlying reason a request failed
#[derive(Error, Debug)]
pub enum RequestFailure {
    /// Connection, TLS or body-read failure. The URL (which carries the API
    /// key) is stripped before the error is stored.
    #[error("{}", error_chain(.0))]
    Transport(reqwest::Error),

    #[error("Request failed with status code {}", .status.as_u16())]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RequestFailure {
    fn from(err: reqwest::Error) -> Self {
        RequestFailure::Transport(err.without_url())
    }
}

/// An error and its sources on one line, `outer: inner: root`
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // Some wrappers already repeat their source in their own message
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Diagnostic printed when a run fails.
///
/// A request failure keeps its single `METHOD path ERROR: ...` line; anything
/// else (configuration, templates) gets the full context chain.
pub fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(api_err) => api_err.to_string(),
        None => format!("Error: {:#}", err),
    }
}
