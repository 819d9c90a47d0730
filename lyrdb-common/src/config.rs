//! Configuration loading and root folder resolution
//!
//! Every path and tuning knob the tools rely on is resolved here and passed
//! in explicitly at construction; nothing reads ambient literals at the
//! point of use.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "discography.db";

/// Default fetch-process log file name inside the root folder
pub const FETCH_LOG_FILE: &str = "fetch_lyrics.log";

/// Compiled per-platform defaults, used when no other configuration source
/// provides a value.
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
}

impl CompiledDefaults {
    /// Defaults for the platform this binary was compiled for
    pub fn for_current_platform() -> Self {
        let root_folder = if cfg!(target_os = "linux") {
            // ~/.local/share/lyrdb (or /var/lib/lyrdb for system-wide)
            dirs::data_local_dir()
                .map(|d| d.join("lyrdb"))
                .unwrap_or_else(|| PathBuf::from("/var/lib/lyrdb"))
        } else if cfg!(target_os = "macos") {
            // ~/Library/Application Support/lyrdb
            dirs::data_dir()
                .map(|d| d.join("lyrdb"))
                .unwrap_or_else(|| PathBuf::from("/Library/Application Support/lyrdb"))
        } else if cfg!(target_os = "windows") {
            // %LOCALAPPDATA%\lyrdb
            dirs::data_local_dir()
                .map(|d| d.join("lyrdb"))
                .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\lyrdb"))
        } else {
            PathBuf::from("./lyrdb_data")
        };

        Self {
            root_folder,
            log_level: "info".to_string(),
        }
    }
}

/// TOML configuration file schema (`~/.config/lyrdb/<module>.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root folder override (lowest-priority explicit source)
    pub root_folder: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

/// Logging configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Monitor tuning section
///
/// `secs_per_song` is an empirical throughput constant (the fetcher's
/// rate-limit sleep), kept configurable rather than assumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_process_pattern")]
    pub process_pattern: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_secs_per_song")]
    pub secs_per_song: f64,
    #[serde(default = "default_log_tail_lines")]
    pub log_tail_lines: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            process_pattern: default_process_pattern(),
            poll_interval_secs: default_poll_interval_secs(),
            secs_per_song: default_secs_per_song(),
            log_tail_lines: default_log_tail_lines(),
        }
    }
}

fn default_process_pattern() -> String {
    "fetch_all_lyrics.py".to_string()
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_secs_per_song() -> f64 {
    1.5
}

fn default_log_tail_lines() -> usize {
    20
}

/// Root folder resolution, priority order:
/// 1. Command-line argument (highest priority)
/// 2. `LYRDB_ROOT_FOLDER` environment variable
/// 3. `LYRDB_ROOT` environment variable
/// 4. `root_folder` key in the per-module TOML config file
/// 5. Compiled platform default (fallback)
///
/// Missing config files never abort startup; resolution always succeeds.
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    cli_override: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_override: None,
        }
    }

    /// Attach a command-line override (highest priority when `Some`)
    pub fn with_cli_override(mut self, path: Option<PathBuf>) -> Self {
        self.cli_override = path;
        self
    }

    /// Resolve the root folder (infallible, falls back to compiled default)
    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_override {
            return path.clone();
        }

        if let Ok(path) = std::env::var("LYRDB_ROOT_FOLDER") {
            return PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("LYRDB_ROOT") {
            return PathBuf::from(path);
        }

        if let Some(config) = self.load_toml_config() {
            if let Some(root_folder) = config.root_folder {
                return root_folder;
            }
        }

        CompiledDefaults::for_current_platform().root_folder
    }

    /// Load the per-module TOML config file, if present and parseable.
    ///
    /// Any failure (missing file, unreadable, malformed TOML) degrades to
    /// `None` with a debug log; it never terminates startup.
    pub fn load_toml_config(&self) -> Option<TomlConfig> {
        let path = self.config_file_path()?;
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return None;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Could not read config file {}: {}", path.display(), e);
                return None;
            }
        };

        match toml::from_str::<TomlConfig>(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                debug!("Could not parse config file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// `~/.config/lyrdb/<module>.toml` (platform config dir)
    fn config_file_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lyrdb").join(format!("{}.toml", self.module_name)))
    }
}

/// Derives the well-known file paths under a resolved root folder and
/// creates the folder on first use.
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the root folder (and parents) if missing; idempotent
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the catalog database inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root.join(DATABASE_FILE)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }

    /// Default path of the fetch process log inside the root folder
    pub fn fetch_log_path(&self) -> PathBuf {
        self.root.join(FETCH_LOG_FILE)
    }
}
