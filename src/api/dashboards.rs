//! Dashboards

use super::client::ApiClient;
use super::{resource_id, str_field};
use anyhow::{anyhow, Result};
use serde_json::Value;

/// Dashboard information
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub id: String,
    pub display_name: String,
    pub workspace_id: String,
    /// Tile layout document
    pub content: Value,
}

impl From<&Value> for Dashboard {
    fn from(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            display_name: str_field(value, "displayName"),
            workspace_id: str_field(value, "workspaceId"),
            content: value.get("content").cloned().unwrap_or(Value::Null),
        }
    }
}

/// Create a dashboard and return its id
pub async fn create_dashboard(client: &ApiClient, body: &Value) -> Result<String> {
    let response = client.post("/dashboards", body).await?;
    resource_id(&response).ok_or_else(|| anyhow!("POST /dashboards returned no dashboard id"))
}

pub async fn get_dashboard(client: &ApiClient, id: &str) -> Result<Dashboard> {
    let response = client.get(&format!("/dashboards/{}", id)).await?;
    Ok(Dashboard::from(&response))
}

pub async fn update_dashboard(client: &ApiClient, id: &str, body: &Value) -> Result<()> {
    client.put(&format!("/dashboards/{}", id), body).await?;
    Ok(())
}

pub async fn delete_dashboard(client: &ApiClient, id: &str) -> Result<()> {
    client.delete(&format!("/dashboards/{}", id)).await?;
    Ok(())
}
