//! Fetch progress monitor
//!
//! Single-task cooperative polling loop: read aggregate counts, report,
//! sleep, repeat. Completion is signaled by the fetch process disappearing
//! from the process table, not by the catalog filling up; see the probe
//! module for the limitations of that signal.

use anyhow::Result;
use lyrdb_common::config::MonitorConfig;
use lyrdb_common::{db, ProgressSnapshot};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::logtail;
use crate::probe::ProcessProbe;
use crate::report;

/// Everything the monitor needs, passed in at construction
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Command-line pattern identifying the fetch process
    pub process_pattern: String,
    /// Sleep between polls in watch mode
    pub poll_interval: Duration,
    /// Empirical fetch rate used for the ETA estimate
    pub secs_per_song: f64,
    /// Fetch process log to tail, if any
    pub fetch_log: Option<PathBuf>,
    /// Maximum log lines surfaced per report
    pub log_tail_lines: usize,
}

impl MonitorSettings {
    /// Build settings from the `[monitor]` config section plus a resolved
    /// log path
    pub fn from_config(config: &MonitorConfig, fetch_log: Option<PathBuf>) -> Self {
        Self {
            process_pattern: config.process_pattern.clone(),
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            secs_per_song: config.secs_per_song,
            fetch_log,
            log_tail_lines: config.log_tail_lines,
        }
    }
}

/// Completion monitor over a read-only catalog connection
///
/// Holds no state across polls; every figure is recomputed fresh from the
/// store. The store itself is never mutated.
pub struct Monitor<P: ProcessProbe> {
    db: SqlitePool,
    settings: MonitorSettings,
    probe: P,
}

impl<P: ProcessProbe> Monitor<P> {
    pub fn new(db: SqlitePool, settings: MonitorSettings, probe: P) -> Self {
        Self {
            db,
            settings,
            probe,
        }
    }

    /// One point-in-time read of the catalog counts
    ///
    /// Query failures propagate; a broken store must never be reported as
    /// zero progress.
    pub async fn snapshot(&self) -> Result<ProgressSnapshot> {
        Ok(db::snapshot(&self.db).await?)
    }

    /// Status-check mode: one snapshot, one report
    pub async fn run_once(&self) -> Result<ProgressSnapshot> {
        let snap = self.snapshot().await?;
        print!("{}", report::status_report(&snap, self.settings.secs_per_song));
        self.print_log_tail();
        Ok(snap)
    }

    /// Watch mode: poll until the fetch process is gone
    ///
    /// Once the probe reports inactive, exactly one final snapshot is taken
    /// and the completion banner printed; the sleep is never re-entered.
    /// There is no iteration bound: termination depends solely on external
    /// process state.
    pub async fn run_until_complete(&self) -> Result<ProgressSnapshot> {
        println!("{}", report::watch_header());

        loop {
            if !self.probe.is_active() {
                let snap = self.snapshot().await?;
                print!(
                    "{}",
                    report::completion_banner(&snap, self.settings.secs_per_song)
                );
                return Ok(snap);
            }

            let snap = self.snapshot().await?;
            print!("{}", report::status_report(&snap, self.settings.secs_per_song));
            self.print_log_tail();

            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    /// Surface the filtered fetch-log tail, if a log is configured
    fn print_log_tail(&self) {
        let Some(path) = &self.settings.fetch_log else {
            return;
        };

        match logtail::tail_filtered(path, self.settings.log_tail_lines, logtail::DEFAULT_KEYWORDS)
        {
            Ok(lines) if !lines.is_empty() => {
                println!("--- fetch log ---");
                for line in lines {
                    println!("{}", line);
                }
            }
            Ok(_) => {}
            // Missing or unreadable log is a skip, not a failure
            Err(e) => debug!("Fetch log unavailable at {}: {}", path.display(), e),
        }
    }
}
