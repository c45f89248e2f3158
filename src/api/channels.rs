//! Alerting channels

use super::client::ApiClient;
use super::{resource_id, str_field};
use anyhow::{anyhow, Result};
use serde_json::Value;

/// Alerting channel information
#[derive(Debug, Clone)]
pub struct Channel {
    pub id: String,
    pub display_name: String,
}

impl From<&Value> for Channel {
    fn from(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            display_name: str_field(value, "displayName"),
        }
    }
}

pub async fn list_channels(client: &ApiClient) -> Result<Vec<Channel>> {
    let items = client.get_list("/alerting/channels").await?;
    Ok(items.iter().map(Channel::from).collect())
}

/// Create an alerting channel and return its id
pub async fn create_channel(client: &ApiClient, body: &Value) -> Result<String> {
    let response = client.post("/alerting/channels", body).await?;
    resource_id(&response).ok_or_else(|| anyhow!("POST /alerting/channels returned no channel id"))
}

pub async fn delete_channel(client: &ApiClient, id: &str) -> Result<()> {
    client.delete(&format!("/alerting/channels/{}", id)).await?;
    Ok(())
}
