//! Dashboard walkthrough: build a dashboard from the template for the first
//! plugin data source, rename it, read it back and delete it. The workspace
//! it was created in is left for cleanup.

use super::print_section;
use super::workspace;
use crate::api::dashboards::{create_dashboard, delete_dashboard, get_dashboard, update_dashboard};
use crate::api::data_sources::{list_data_streams, list_plugin_data_sources};
use crate::api::resource_id;
use crate::api::workspaces::create_workspace;
use crate::api::ApiClient;
use crate::template::{Bindings, Template};
use anyhow::{anyhow, Result};
use serde_json::{json, Value};

/// Bindings for the dashboard template
pub fn dashboard_bindings(
    workspace_id: &str,
    data_source_id: &str,
    data_stream_id: &str,
    generated_at: &str,
) -> Bindings {
    [
        ("workspaceId", workspace_id),
        ("dataSourceId", data_source_id),
        ("dataStreamId", data_stream_id),
        ("tileTitle", "Data stream preview"),
        ("generatedAt", generated_at),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
    .collect()
}

/// Run the dashboard walkthrough and return the dashboard as read back
/// before it was deleted
pub async fn run(client: &ApiClient, template: &Template) -> Result<Value> {
    let prefix = client.name_prefix();

    let source = list_plugin_data_sources(client)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No plugin data sources configured; add one before creating a dashboard"))?;
    tracing::info!("Using data source {} ({})", source.display_name, source.id);

    let data_stream_id = list_data_streams(client, &source.plugin_id)
        .await?
        .iter()
        .find_map(resource_id)
        .ok_or_else(|| anyhow!("Plugin {} has no data streams", source.plugin_id))?;

    let workspace_id = create_workspace(
        client,
        &workspace::create_body(prefix, &[source.id.clone()], &[]),
    )
    .await?;
    tracing::info!("Created workspace {} for the dashboard", workspace_id);

    let generated_at = chrono::Utc::now().to_rfc3339();
    let content = template.render(&dashboard_bindings(
        &workspace_id,
        &source.id,
        &data_stream_id,
        &generated_at,
    ))?;

    let dashboard_id = create_dashboard(
        client,
        &json!({
            "workspaceId": workspace_id,
            "displayName": format!("{} My dashboard", prefix),
            "content": content
        }),
    )
    .await?;
    tracing::info!("Created dashboard {}", dashboard_id);

    update_dashboard(
        client,
        &dashboard_id,
        &json!({ "displayName": format!("{} My renamed dashboard", prefix) }),
    )
    .await?;

    let dashboard = get_dashboard(client, &dashboard_id).await?;
    let result = json!({
        "id": dashboard.id,
        "displayName": dashboard.display_name,
        "workspaceId": dashboard.workspace_id,
        "content": dashboard.content
    });
    print_section("DASHBOARD", &result)?;

    delete_dashboard(client, &dashboard_id).await?;
    tracing::info!("Deleted dashboard {}", dashboard_id);
    println!("\n{} DASHBOARD DELETED\n", prefix);

    Ok(result)
}
