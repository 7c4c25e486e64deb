use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use clap::Parser;
use std::fs;
use tracing::{info, warn};

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration for the Flashdeck server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Duration between periodic backups in minutes, 0 disables backups
    pub backup_interval_minutes: u64,
    /// Number of periodic backups to keep
    pub backup_count: u32,
    /// Directory backups are written to
    pub backup_dir: PathBuf,
    /// Server URL used by the CLI client
    pub server_url: Option<String>,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub backup_interval_minutes: Option<u64>,
    #[serde(default)]
    pub backup_count: Option<u32>,
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,
    #[serde(default)]
    pub server_url: Option<String>,
}

/// Command line arguments for the server
#[derive(Parser, Debug, Default)]
#[clap(name = "flashdeck", about = "A spaced repetition flashcard server")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Port to listen on
    #[clap(long, env = "FLASHDECK_PORT")]
    pub port: Option<u16>,

    /// Backup interval in minutes (0 disables backups)
    #[clap(long, env = "BACKUP_INTERVAL_MINUTES")]
    pub backup_interval_minutes: Option<u64>,

    /// Number of backups to keep
    #[clap(long, env = "BACKUP_COUNT")]
    pub backup_count: Option<u32>,

    /// Directory to write backups to
    #[clap(long, env = "BACKUP_DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Debug mode
    #[clap(long, env = "FLASHDECK_DEBUG", default_value_t = false)]
    pub debug: bool,

    /// Emit logs as JSON lines
    #[clap(long, env = "FLASHDECK_JSON_LOGS", default_value_t = false)]
    pub json_logs: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            port: update.port.unwrap_or(self.port),
            backup_interval_minutes: update.backup_interval_minutes.unwrap_or(self.backup_interval_minutes),
            backup_count: update.backup_count.unwrap_or(self.backup_count),
            backup_dir: update.backup_dir.unwrap_or(self.backup_dir),
            server_url: update.server_url.or(self.server_url),
        }
    }

    /// Returns the backup interval as a Duration, or None when backups are disabled
    pub fn backup_interval(&self) -> Option<Duration> {
        if self.backup_interval_minutes == 0 {
            return None;
        }
        Some(Duration::from_secs(self.backup_interval_minutes * 60))
    }
}

/// Default port: 3001 in debug builds so a dev server can run next to a release one
pub fn default_port() -> u16 {
    if cfg!(debug_assertions) { 3001 } else { 3000 }
}

/// Returns the base (default) configuration
///
/// When a data directory is given the database and backups live inside it,
/// otherwise they are relative to the working directory.
pub fn base_config(data_path: Option<PathBuf>) -> Config {
    let database_url = data_path.as_ref().map_or("flashdeck.db".to_string(), |path| {
        path.join("flashdeck.db").to_string_lossy().to_string()
    });
    let backup_dir = data_path.map_or(PathBuf::from("backups"), |path| path.join("backups"));

    Config {
        database_url,
        port: default_port(),
        backup_interval_minutes: 20,
        backup_count: 10,
        backup_dir,
        server_url: None,
    }
}

/// Loads configuration from a TOML file
///
/// A missing path or missing file yields an empty update.
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            },
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: &CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url.clone(),
        port: args.port,
        backup_interval_minutes: args.backup_interval_minutes,
        backup_count: args.backup_count,
        backup_dir: args.backup_dir.clone(),
        server_url: None,
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "flashdeck", "flashdeck")
}

/// Returns the XDG config directory, if it can be determined
pub fn get_config_dir_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the XDG data directory, if it can be determined
pub fn get_data_dir_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: &CliArgs) -> Config {
    let data_path = get_data_dir_path().and_then(|path| {
        if path.exists() {
            Some(path)
        } else {
            info!("Data directory not found at {:?}, using working directory", path);
            None
        }
    });

    let config_path = match get_config_dir_path() {
        Some(dir) => Some(dir.join(CONFIG_FILE_NAME)),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    };

    let config = base_config(data_path)
        .apply_update(config_from_file(config_path).unwrap_or_default())
        .apply_update(config_from_args(args));

    info!(
        "Final configuration: database_url={}, port={}, backup_interval={}min, backup_count={}, backup_dir={:?}",
        config.database_url, config.port, config.backup_interval_minutes, config.backup_count, config.backup_dir
    );

    config
}

#[cfg(test)]
mod tests;
