//! Workspaces
//!
//! Functions for creating, reading, updating and deleting workspaces, plus
//! the access control list lookup used when reading one back.

use super::client::ApiClient;
use super::{resource_id, str_field};
use anyhow::{anyhow, Result};
use serde_json::Value;

/// Workspace information
#[derive(Debug, Clone)]
pub struct Workspace {
    pub id: String,
    pub display_name: String,
    /// Raw `data` object (links, properties, alerting rules)
    pub data: Value,
}

impl Workspace {
    pub fn links(&self) -> &Value {
        self.data.get("links").unwrap_or(&Value::Null)
    }

    pub fn properties(&self) -> &Value {
        self.data.get("properties").unwrap_or(&Value::Null)
    }
}

impl From<&Value> for Workspace {
    fn from(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            display_name: str_field(value, "displayName"),
            data: value.get("data").cloned().unwrap_or(Value::Null),
        }
    }
}

/// List all workspaces visible to the API key
pub async fn list_workspaces(client: &ApiClient) -> Result<Vec<Workspace>> {
    let items = client.get_list("/workspaces").await?;
    Ok(items.iter().map(Workspace::from).collect())
}

/// Create a workspace and return its id
pub async fn create_workspace(client: &ApiClient, body: &Value) -> Result<String> {
    let response = client.post("/workspaces", body).await?;
    resource_id(&response).ok_or_else(|| anyhow!("POST /workspaces returned no workspace id"))
}

pub async fn get_workspace(client: &ApiClient, id: &str) -> Result<Workspace> {
    let response = client.get(&format!("/workspaces/{}", id)).await?;
    Ok(Workspace::from(&response))
}

/// Update a workspace.
///
/// Top-level fields left out of `body` are unchanged. The `properties` bag is
/// all-or-nothing: supplying it replaces every property.
pub async fn update_workspace(client: &ApiClient, id: &str, body: &Value) -> Result<()> {
    client.put(&format!("/workspaces/{}", id), body).await?;
    Ok(())
}

pub async fn delete_workspace(client: &ApiClient, id: &str) -> Result<()> {
    client.delete(&format!("/workspaces/{}", id)).await?;
    Ok(())
}

/// Get the access control list of a resource
pub async fn get_acl(client: &ApiClient, id: &str) -> Result<Value> {
    Ok(client.get(&format!("/accesscontrol/acl/{}", id)).await?)
}
