//! Workspace walkthrough: create, update, read back.

use super::print_section;
use crate::api::data_sources::list_plugin_data_sources;
use crate::api::workspaces::{
    create_workspace, get_acl, get_workspace, list_workspaces, update_workspace, Workspace,
};
use crate::api::ApiClient;
use anyhow::Result;
use serde_json::{json, Value};

/// Body for creating a workspace.
///
/// Permissions in an `acl` are `AD` (admin), `RW` (read-write) and `RO`
/// (read-only). Leaving `acl` out makes the workspace visible to all users.
/// Workspace `type` is one of: service, team, application, platform, product,
/// business service, microservice, customer, website, component, resource,
/// system, folder, other.
pub fn create_body(prefix: &str, plugin_ids: &[String], workspace_ids: &[String]) -> Value {
    json!({
        "displayName": format!("{} My workspace", prefix),
        "links": {
            // Data sources this workspace can read data from
            "plugins": plugin_ids,
            // Workspaces this one reads health state from (rollup)
            "workspaces": workspace_ids
        },
        "properties": {
            "openAccessEnabled": true,
            "tags": ["my tag", "other tag"],
            "description": "This is my workspace description",
            "type": "folder"
        }
    })
}

/// Body for updating the workspace created by [`create_body`].
///
/// `displayName` and `acl` merge (`acl: null` removes restrictions); `links`
/// is omitted and stays unchanged. `properties` is all-or-nothing, so every
/// property to keep is restated.
pub fn update_body(prefix: &str) -> Value {
    json!({
        "displayName": format!("{} My renamed workspace", prefix),
        "acl": null,
        "properties": {
            "openAccessEnabled": true,
            "tags": ["different tag"],
            "description": "Different workspace description",
            "type": "folder"
        }
    })
}

/// Shape printed for a workspace read back from the API
pub fn workspace_view(workspace: &Workspace, acl: Value) -> Value {
    json!({
        "id": workspace.id,
        "displayName": workspace.display_name,
        "links": workspace.links(),
        "properties": workspace.properties(),
        "acl": acl
    })
}

/// Read a workspace back together with its access control list
pub async fn read_workspace(client: &ApiClient, id: &str) -> Result<Value> {
    let workspace = get_workspace(client, id).await?;
    let acl = get_acl(client, id).await?;
    Ok(workspace_view(&workspace, acl))
}

/// Run the workspace walkthrough and return the workspace as read back
pub async fn run(client: &ApiClient) -> Result<Value> {
    let prefix = client.name_prefix();

    let plugin_ids: Vec<String> = list_plugin_data_sources(client)
        .await?
        .into_iter()
        .map(|source| source.id)
        .collect();
    let workspace_ids: Vec<String> = list_workspaces(client)
        .await?
        .into_iter()
        .map(|workspace| workspace.id)
        .collect();
    tracing::info!(
        "Found {} plugin data sources and {} workspaces",
        plugin_ids.len(),
        workspace_ids.len()
    );

    let id = create_workspace(client, &create_body(prefix, &plugin_ids, &workspace_ids)).await?;
    tracing::info!("Created workspace {}", id);

    update_workspace(client, &id, &update_body(prefix)).await?;
    tracing::info!("Updated workspace {}", id);

    let workspace = read_workspace(client, &id).await?;
    print_section("WORKSPACE", &workspace)?;

    Ok(workspace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_links_everything() {
        let body = create_body(
            "[API Test]",
            &["config-1".to_string(), "config-2".to_string()],
            &["space-9".to_string()],
        );

        assert_eq!(body["displayName"], "[API Test] My workspace");
        assert_eq!(body["links"]["plugins"], json!(["config-1", "config-2"]));
        assert_eq!(body["links"]["workspaces"], json!(["space-9"]));
        assert_eq!(body["properties"]["type"], "folder");
        assert!(body.get("acl").is_none());
    }

    #[test]
    fn test_update_body_replaces_properties_and_leaves_links() {
        let body = update_body("[API Test]");

        assert_eq!(body["displayName"], "[API Test] My renamed workspace");
        assert!(body["acl"].is_null());
        assert!(body.get("acl").is_some());
        assert!(body.get("links").is_none());

        // All-or-nothing: every property is restated
        let properties = body["properties"].as_object().unwrap();
        for key in ["openAccessEnabled", "tags", "description", "type"] {
            assert!(properties.contains_key(key), "missing {}", key);
        }
        assert_eq!(body["properties"]["description"], "Different workspace description");
    }
}
