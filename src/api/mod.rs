//! SquaredUp API interaction module
//!
//! This module provides the request helper used by every scenario, plus thin
//! typed wrappers for the endpoints the scenarios exercise.
//!
//! # Module Structure
//!
//! - [`client`] - URL/API key composition and the GET/POST/PUT/DELETE helpers
//! - [`http`] - reqwest transport and response-body handling
//! - [`error`] - the single "request failed" error kind
//! - [`workspaces`], [`data_sources`], [`channels`], [`dashboards`] - endpoint helpers
//!
//! # Example
//!
//! ```ignore
//! use sqdemo::api::{ApiClient, ApiConfig};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ApiClient::new(ApiConfig::new(ApiConfig::DEFAULT_BASE_URL, "my-key"))?;
//!     let workspaces = client.get("/workspaces").await?;
//!     Ok(())
//! }
//! ```

pub mod channels;
pub mod client;
pub mod dashboards;
pub mod data_sources;
pub mod error;
pub mod http;
pub mod workspaces;

pub use client::{build_url, ApiClient, ApiConfig};
pub use error::{failure_message, ApiError, RequestFailure};

use serde_json::Value;

/// Extract a resource identifier from a create response.
///
/// Most create endpoints answer with a bare JSON string; some return the
/// created object instead.
pub fn resource_id(response: &Value) -> Option<String> {
    match response {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Object(map) => map
            .get("id")
            .and_then(|v| v.as_str())
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string()),
        _ => None,
    }
}

/// Read a string field from a JSON object, `"-"` when absent
pub(crate) fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("-")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_id_from_bare_string() {
        assert_eq!(resource_id(&json!("space-123")), Some("space-123".to_string()));
    }

    #[test]
    fn test_resource_id_from_object() {
        assert_eq!(
            resource_id(&json!({"id": "dash-1", "displayName": "x"})),
            Some("dash-1".to_string())
        );
    }

    #[test]
    fn test_resource_id_missing() {
        assert_eq!(resource_id(&Value::Null), None);
        assert_eq!(resource_id(&json!("")), None);
        assert_eq!(resource_id(&json!({"name": "no id"})), None);
        assert_eq!(resource_id(&json!(42)), None);
    }
}
