//! lyrdb-fm (Fetch Monitor) - Lyrics fetch progress monitor
//!
//! Observes the external lyrics-fetch process and the catalog database and
//! reports progress on stdout. Read-only towards the catalog; exit code 0
//! on a normal status check or detected completion.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use lyrdb_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use lyrdb_common::db;
use lyrdb_fm::{CmdlineProbe, Monitor, MonitorSettings};

#[derive(Parser)]
#[command(name = "lyrdb-fm", version, about = "LyrDB lyrics fetch progress monitor")]
struct Cli {
    /// Root folder holding the catalog database and fetch log
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Catalog database path (overrides the root-folder default)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Fetch process log to tail (overrides the root-folder default)
    #[arg(long)]
    fetch_log: Option<PathBuf>,

    /// Command-line pattern identifying the fetch process
    #[arg(long)]
    process_pattern: Option<String>,

    /// Seconds to sleep between polls in watch mode
    #[arg(long)]
    poll_interval_secs: Option<u64>,

    /// Empirical seconds-per-song rate used for the ETA estimate
    #[arg(long)]
    secs_per_song: Option<f64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// One snapshot of fetch progress (the default)
    Status {
        /// Emit the snapshot as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Poll until the fetch process exits, then print a completion banner
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config file is read before the subscriber exists so its log level can
    // seed the filter; resolution failures degrade to defaults either way
    let resolver = RootFolderResolver::new("fetch-monitor").with_cli_override(cli.root_folder.clone());
    let config = resolver.load_toml_config().unwrap_or_else(TomlConfig::default);

    let level: tracing::Level = config
        .logging
        .level
        .parse()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    info!(
        "Starting LyrDB Fetch Monitor (lyrdb-fm) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let root_folder = resolver.resolve();
    let initializer = RootFolderInitializer::new(root_folder);

    let db_path = cli
        .database
        .clone()
        .unwrap_or_else(|| initializer.database_path());
    info!("Database path: {}", db_path.display());

    let pool = db::connect_readonly(&db_path)
        .await
        .context("Failed to connect to catalog database in read-only mode")?;
    info!("✓ Connected to database (read-only)");

    // CLI flags override the [monitor] config section
    let mut monitor_config = config.monitor.clone();
    if let Some(pattern) = cli.process_pattern.clone() {
        monitor_config.process_pattern = pattern;
    }
    if let Some(secs) = cli.poll_interval_secs {
        monitor_config.poll_interval_secs = secs;
    }
    if let Some(rate) = cli.secs_per_song {
        monitor_config.secs_per_song = rate;
    }

    let fetch_log = Some(
        cli.fetch_log
            .clone()
            .unwrap_or_else(|| initializer.fetch_log_path()),
    );
    let settings = MonitorSettings::from_config(&monitor_config, fetch_log);

    let probe = CmdlineProbe::new(settings.process_pattern.clone());
    let monitor = Monitor::new(pool, settings, probe);

    match cli.command.unwrap_or(Command::Status { json: false }) {
        Command::Status { json } => {
            if json {
                let snap = monitor.snapshot().await?;
                println!("{}", serde_json::to_string_pretty(&snap)?);
            } else {
                monitor.run_once().await?;
            }
        }
        Command::Watch => {
            monitor.run_until_complete().await?;
        }
    }

    Ok(())
}
