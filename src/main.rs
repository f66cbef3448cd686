//! RM Dashboard - Main Entry Point
//!
//! Paged, filterable grid views over the Rick and Morty GraphQL API.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use rm_dashboard::app::Dashboard;
use rm_dashboard::cli::{Cli, run};
use rm_dashboard::helpers::get_or_create_data_dir;
use rm_dashboard::services::block_on;
use rm_dashboard::states::{AppConfig, SessionStore};

/// Log to a daily file in the data directory; stdout stays for tables
fn init_tracing(config: &AppConfig) -> anyhow::Result<WorkerGuard> {
    let log_dir = get_or_create_data_dir()?;
    let appender = tracing_appender::rolling::daily(log_dir, "rm-dashboard.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_timer(LocalTime::rfc_3339())
        .with_ansi(false)
        .init();
    Ok(guard)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::try_load(path),
        None => AppConfig::load_default(),
    }
    .context("Failed to load config")?;
    if let Some(endpoint) = cli.endpoint.clone() {
        config.endpoint = endpoint;
    }

    let _guard = init_tracing(&config)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting RM Dashboard");

    let session = SessionStore::open_default()?;
    let mut dashboard = Dashboard::new(config, session)?;

    let mut stdout = std::io::stdout();
    let ok = block_on(run(cli.command, &mut dashboard, &mut stdout))??;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
