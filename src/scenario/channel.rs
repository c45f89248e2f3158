//! Alerting channel walkthrough: create an email channel and a workspace
//! whose alerting rule notifies it.

use super::print_section;
use super::workspace::workspace_view;
use crate::api::channels::{create_channel, list_channels};
use crate::api::workspaces::{create_workspace, get_acl, get_workspace};
use crate::api::ApiClient;
use anyhow::{anyhow, Result};
use serde_json::{json, Value};

pub fn channel_body(prefix: &str) -> Value {
    json!({
        "displayName": format!("{} My email channel", prefix),
        "description": "Email channel created by the API walkthrough",
        "channelTypeId": "channeltype-email",
        "enabled": true,
        "config": {
            "emailAddresses": ["alerts@example.com"]
        }
    })
}

/// Workspace body with one alerting rule sending rollup health changes to
/// `channel_id`
pub fn alerting_workspace_body(prefix: &str, channel_id: &str) -> Value {
    json!({
        "displayName": format!("{} My alerting workspace", prefix),
        "properties": {
            "openAccessEnabled": false,
            "description": "Workspace notifying an email channel",
            "type": "service"
        },
        "alertingRules": [
            {
                "channels": [
                    { "id": channel_id, "includePreviewImage": true }
                ],
                "conditions": {
                    "monitors": { "rollupHealth": true }
                }
            }
        ]
    })
}

/// Run the channel walkthrough and return the channel and workspace as read back
pub async fn run(client: &ApiClient) -> Result<Value> {
    let prefix = client.name_prefix();

    let existing = list_channels(client).await?;
    tracing::info!("Found {} alerting channels", existing.len());

    let channel_id = create_channel(client, &channel_body(prefix)).await?;
    tracing::info!("Created alerting channel {}", channel_id);

    let workspace_id =
        create_workspace(client, &alerting_workspace_body(prefix, &channel_id)).await?;
    tracing::info!("Created workspace {} alerting channel {}", workspace_id, channel_id);

    let channel = list_channels(client)
        .await?
        .into_iter()
        .find(|channel| channel.id == channel_id)
        .ok_or_else(|| anyhow!("Created channel {} is missing from the channel list", channel_id))?;

    let workspace = get_workspace(client, &workspace_id).await?;
    let acl = get_acl(client, &workspace_id).await?;
    let mut view = workspace_view(&workspace, acl);
    view["alertingRules"] = workspace
        .data
        .get("alertingRules")
        .cloned()
        .unwrap_or(Value::Null);

    let result = json!({
        "channel": { "id": channel.id, "displayName": channel.display_name },
        "workspace": view
    });
    print_section("ALERTING CHANNEL", &result)?;

    Ok(result)
}
