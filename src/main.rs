//! dojo-roster - Main entry point

use anyhow::Result;
use clap::Parser;
use dojo_roster::cli::{Cli, Command};
use dojo_roster::commands;
use dojo_roster::config::{data_dir, Config};
use dojo_roster::constants::APP_VERSION;
use dojo_roster::model::{Group, Member};
use dojo_roster::repo::{sample_groups, sample_members};
use std::path::Path;
use tracing::info;

/// Initialize file logging plus a stderr layer. Returns a guard that must be
/// held for the process lifetime.
fn init_logging(data_dir: &Path, verbose: bool) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "dojo-roster.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dojo_roster=debug"));
    let stderr_filter = EnvFilter::new(if verbose { "debug" } else { "warn" });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(file_filter),
        )
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false)
                .with_filter(stderr_filter),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Guard must live for the entire process lifetime
    let _log_guard = init_logging(&data_dir, cli.verbose);

    info!(version = APP_VERSION, "dojo-roster starting");

    let config = Config::load(&data_dir);

    match cli.command {
        Command::Members { command } => {
            let store = commands::open_store::<Member>(
                &config,
                &config.members_sheet,
                sample_members(),
            )?;
            commands::members::run(&store, command).await
        }
        Command::Groups { command } => {
            let store =
                commands::open_store::<Group>(&config, &config.groups_sheet, sample_groups())?;
            commands::groups::run(&store, command).await
        }
        Command::Check { write } => commands::check::run(&config, write).await,
        Command::Config { command } => commands::config::run(&config, &data_dir, command),
    }
}
