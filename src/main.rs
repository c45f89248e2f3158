use anyhow::Result;
use clap::Parser;
use sqdemo::api::{failure_message, ApiClient};
use sqdemo::config::{self, Config, Overrides};
use sqdemo::scenario::{self, cleanup, Scenario};
use sqdemo::template::DEFAULT_DASHBOARD_PATH;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Walk through the SquaredUp workspace, dashboard and alerting-channel API
#[derive(Parser, Debug)]
#[command(name = "sqdemo", version = sqdemo::VERSION, about, long_about = None)]
struct Args {
    /// API key (defaults to the apiKey environment variable)
    api_key: Option<String>,

    /// Scenario to run
    #[arg(short, long, value_enum, default_value = "workspace")]
    scenario: Scenario,

    /// After the scenario, delete every workspace and channel named with the prefix
    #[arg(long)]
    cleanup: bool,

    /// Only delete prefixed workspaces and channels, run no scenario
    #[arg(long, conflicts_with = "cleanup")]
    cleanup_only: bool,

    /// Dashboard template (the embedded one is used if this file does not exist)
    #[arg(long, default_value = DEFAULT_DASHBOARD_PATH)]
    template: PathBuf,

    /// API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Name prefix marking resources created by this tool
    #[arg(long)]
    prefix: Option<String>,

    /// Write a log file at this level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<Level>,
}

/// Log to a file; the terminal is reserved for scenario output
fn setup_logging(level: Option<Level>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let level = level?;
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled, cannot open {}: {}", log_path.display(), e);
            return None;
        }
    };
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    // RUST_LOG, when set, replaces the level chosen on the command line
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!("Logging to {} at {}", log_path.display(), level);
    Some(guard)
}

fn get_log_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("sqdemo"))
        .unwrap_or_default()
        .join("sqdemo.log")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args).await {
        Ok(()) => {
            println!("\n========== FINISHED ==========\n");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Run failed: {:#}", err);
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let overrides = Overrides {
        api_key: args.api_key,
        base_url: args.base_url,
        name_prefix: args.prefix,
        ..Default::default()
    }
    .with_env();

    let api_config = config::resolve(overrides, &Config::load())?;
    tracing::info!("Using {:?}", api_config);

    let client = ApiClient::new(api_config)?;

    if !args.cleanup_only {
        scenario::run(&client, args.scenario, &args.template).await?;
    }

    if args.cleanup || args.cleanup_only {
        let deleted = cleanup::run(&client).await?;
        tracing::info!("Cleanup deleted {} resources", deleted);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        let path = get_log_path();
        assert_eq!(path.file_name().unwrap(), "sqdemo.log");
        if dirs::config_dir().is_some() {
            assert!(path.parent().unwrap().ends_with("sqdemo"));
        }
    }

    #[test]
    fn test_log_level_is_optional() {
        let args = Args::try_parse_from(["sqdemo", "key"]).unwrap();
        assert!(args.log_level.is_none());

        let args = Args::try_parse_from(["sqdemo", "key", "--log-level", "debug"]).unwrap();
        assert_eq!(args.log_level, Some(Level::DEBUG));
    }

    #[test]
    fn test_cleanup_flags_conflict() {
        let result = Args::try_parse_from(["sqdemo", "key", "--cleanup", "--cleanup-only"]);
        assert!(result.is_err());
    }
}
