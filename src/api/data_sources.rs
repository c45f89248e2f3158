//! Plugin data sources and their data streams

use super::client::ApiClient;
use super::str_field;
use anyhow::Result;
use serde_json::Value;

/// Plugin data source information
#[derive(Debug, Clone)]
pub struct DataSource {
    pub id: String,
    pub display_name: String,
    pub plugin_id: String,
}

impl From<&Value> for DataSource {
    fn from(value: &Value) -> Self {
        // Accepts the id nested under `plugin` or at the top level
        let plugin_id = value
            .get("plugin")
            .and_then(|p| p.get("pluginId"))
            .or_else(|| value.get("pluginId"))
            .and_then(|v| v.as_str())
            .unwrap_or("-")
            .to_string();

        Self {
            id: str_field(value, "id"),
            display_name: str_field(value, "displayName"),
            plugin_id,
        }
    }
}

/// List all configured plugin data sources
pub async fn list_plugin_data_sources(client: &ApiClient) -> Result<Vec<DataSource>> {
    let items = client.get_list("/source/configs?type=source.plugin").await?;
    Ok(items.iter().map(DataSource::from).collect())
}

/// List the data streams a plugin provides, as raw JSON objects
pub async fn list_data_streams(client: &ApiClient, plugin_id: &str) -> Result<Vec<Value>> {
    Ok(client
        .get_list(&format!("/config/datastreams/plugin/{}", plugin_id))
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_source_nested_plugin_id() {
        let source = DataSource::from(&json!({
            "id": "config-1",
            "displayName": "AWS",
            "plugin": {"pluginId": "plugin-aws"}
        }));
        assert_eq!(source.id, "config-1");
        assert_eq!(source.plugin_id, "plugin-aws");
    }

    #[test]
    fn test_data_source_top_level_plugin_id() {
        let source = DataSource::from(&json!({"id": "config-2", "pluginId": "plugin-azure"}));
        assert_eq!(source.plugin_id, "plugin-azure");
        assert_eq!(source.display_name, "-");
    }
}
