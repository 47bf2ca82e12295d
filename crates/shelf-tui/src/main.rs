//! `shelf-tui` — interactive terminal browser for a REST product catalog.
//!
//! Built on [ratatui](https://ratatui.rs) with the view model published by
//! `shelf-core`'s [`Catalog`](shelf_core::Catalog). A background data
//! bridge forwards every view change into the TUI action loop.
//!
//! Logs are written to a file (default `/tmp/shelf-tui.log`) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use shelf_core::{Catalog, CatalogConfig};

use crate::app::App;

/// Terminal browser for REST product catalogs.
#[derive(Parser, Debug)]
#[command(name = "shelf-tui", version, about)]
struct Cli {
    /// Catalog profile from the shared config file
    #[arg(short = 'p', long, env = "SHELF_PROFILE")]
    profile: Option<String>,

    /// Catalog base URL (overrides profile)
    #[arg(short = 'b', long, env = "SHELF_BASE_URL")]
    base_url: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/shelf-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing; the returned guard flushes on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("shelf_tui={log_level},shelf_core={log_level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("shelf-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Profile (or public catalog) from the shared config, then `--base-url`.
fn build_catalog_config(cli: &Cli) -> Result<CatalogConfig> {
    let cfg = shelf_config::load_config().wrap_err("failed to load config")?;
    let mut config = shelf_config::resolve_catalog_config(&cfg, cli.profile.as_deref())
        .wrap_err("failed to resolve catalog profile")?;
    if let Some(ref raw) = cli.base_url {
        config.base_url = url::Url::parse(raw).wrap_err_with(|| format!("invalid URL: {raw}"))?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let config = build_catalog_config(&cli)?;
    info!(url = %config.base_url, "starting shelf-tui");

    let catalog = Catalog::new(config).wrap_err("failed to set up catalog")?;
    let mut app = App::new(catalog);
    app.run().await?;

    Ok(())
}
