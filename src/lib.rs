//! # sqdemo
//!
//! A scripted walkthrough of the SquaredUp REST API: workspaces, dashboards
//! and alerting channels. The binary drives the scenarios; the library holds
//! the API client, template renderer and scenario steps so they can be
//! exercised against a mock server.

pub mod api;
pub mod config;
pub mod scenario;
pub mod template;

/// Version injected at compile time via SQDEMO_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("SQDEMO_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
