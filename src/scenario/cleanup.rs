//! Cleanup of resources created by the scenarios.
//!
//! Nothing is tracked between runs: the current workspaces and channels are
//! listed and every one whose display name starts with the prefix is deleted.

use crate::api::channels::{delete_channel, list_channels};
use crate::api::workspaces::{delete_workspace, list_workspaces};
use crate::api::ApiClient;
use anyhow::Result;
use futures::future::join_all;
use std::future::Future;

/// Ids of the `(id, display_name)` pairs whose name starts with `prefix`
pub fn prefixed_ids<'a, I>(resources: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    resources
        .into_iter()
        .filter(|(_, name)| name.starts_with(prefix))
        .map(|(id, _)| id.to_string())
        .collect()
}

/// Delete all `ids` concurrently.
///
/// Every delete runs to completion. Failures are logged; if there were any,
/// the first one is returned once all deletes have finished. Returns the
/// number of successful deletes otherwise.
pub async fn delete_all<F, Fut>(ids: Vec<String>, delete: F) -> Result<usize>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let futures = ids.into_iter().map(|id| {
        let pending = delete(id.clone());
        async move { (id, pending.await) }
    });

    let results = join_all(futures).await;

    let mut deleted = 0;
    let mut first_error = None;
    for (id, result) in results {
        match result {
            Ok(()) => deleted += 1,
            Err(e) => {
                tracing::error!("Failed to delete {}: {:#}", id, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => {
            tracing::warn!("{} deleted before the failure was reported", deleted);
            Err(e)
        }
        None => Ok(deleted),
    }
}

/// Delete every workspace whose name starts with the client's prefix
pub async fn delete_workspaces(client: &ApiClient) -> Result<usize> {
    let workspaces = list_workspaces(client).await?;
    let ids = prefixed_ids(
        workspaces
            .iter()
            .map(|w| (w.id.as_str(), w.display_name.as_str())),
        client.name_prefix(),
    );
    tracing::info!("Deleting {} of {} workspaces", ids.len(), workspaces.len());

    let deleted = delete_all(ids, |id| async move { delete_workspace(client, &id).await }).await?;
    println!("\n{} WORKSPACES DELETED\n", client.name_prefix());
    Ok(deleted)
}

/// Delete every alerting channel whose name starts with the client's prefix
pub async fn delete_channels(client: &ApiClient) -> Result<usize> {
    let channels = list_channels(client).await?;
    let ids = prefixed_ids(
        channels
            .iter()
            .map(|c| (c.id.as_str(), c.display_name.as_str())),
        client.name_prefix(),
    );
    tracing::info!("Deleting {} of {} channels", ids.len(), channels.len());

    let deleted = delete_all(ids, |id| async move { delete_channel(client, &id).await }).await?;
    println!("\n{} CHANNELS DELETED\n", client.name_prefix());
    Ok(deleted)
}

/// Delete prefixed workspaces, then prefixed channels (workspace alerting
/// rules may still reference a channel). Returns the total deleted.
pub async fn run(client: &ApiClient) -> Result<usize> {
    let workspaces = delete_workspaces(client).await?;
    let channels = delete_channels(client).await?;
    Ok(workspaces + channels)
}
