//! Scripted API walkthroughs
//!
//! Each scenario is a straight-line sequence of calls: list prerequisites,
//! create, update, read back and print. Everything a scenario creates is
//! named with the configured prefix so [`cleanup`] can find it later.
//!
//! - [`workspace`] - create, rename and read back a workspace
//! - [`channel`] - create an email alerting channel and a workspace that uses it
//! - [`dashboard`] - render the dashboard template and create a dashboard from it
//! - [`cleanup`] - delete every prefixed workspace and channel

pub mod channel;
pub mod cleanup;
pub mod dashboard;
pub mod workspace;

use crate::api::ApiClient;
use crate::template::Template;
use anyhow::Result;
use clap::ValueEnum;
use serde_json::Value;
use std::path::Path;

/// Which walkthrough to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    Workspace,
    Channel,
    Dashboard,
    All,
}

/// Run the selected scenario(s)
pub async fn run(client: &ApiClient, scenario: Scenario, template_path: &Path) -> Result<()> {
    tracing::info!("Running scenario {:?}", scenario);

    match scenario {
        Scenario::Workspace => {
            workspace::run(client).await?;
        }
        Scenario::Channel => {
            channel::run(client).await?;
        }
        Scenario::Dashboard => {
            let template = Template::dashboard(template_path)?;
            dashboard::run(client, &template).await?;
        }
        Scenario::All => {
            // Fail on a bad template before anything is created
            let template = Template::dashboard(template_path)?;
            workspace::run(client).await?;
            channel::run(client).await?;
            dashboard::run(client, &template).await?;
        }
    }

    Ok(())
}

/// Print a titled, pretty-printed JSON section to stdout
pub fn print_section(title: &str, value: &Value) -> Result<()> {
    println!("\n========== {} ==========\n", title);
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
