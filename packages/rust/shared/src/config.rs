//! Application configuration for QueryLens.
//!
//! User config lives at `~/.querylens/querylens.toml`, or under
//! `$QUERYLENS_HOME` when that is set.
//! CLI flags override config file values, which override defaults.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QueryLensError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "querylens.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".querylens";

/// Environment variable that replaces the whole config directory.
pub const HOME_ENV: &str = "QUERYLENS_HOME";

/// Upper bound for the event poll interval.
const MAX_TICK_RATE_MS: u64 = 10_000;

/// Levels accepted in `[logging] level`.
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// ---------------------------------------------------------------------------
// Config structs (matching querylens.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Terminal UI behaviour.
    #[serde(default)]
    pub ui: UiConfig,

    /// Log filter and destination.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which tab the TUI opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartTab {
    #[default]
    Overview,
    Decisions,
}

/// `[ui]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval in milliseconds.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    /// Tab shown on startup.
    #[serde(default)]
    pub start_tab: StartTab,

    /// Initial state of every disclosure panel on the overview.
    #[serde(default)]
    pub expand_sections: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            start_tab: StartTab::default(),
            expand_sections: false,
        }
    }
}

fn default_tick_rate() -> u64 {
    100
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base level, used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file for interactive mode. Logs are discarded when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

fn default_level() -> String {
    "info".into()
}

impl AppConfig {
    /// Check value ranges that TOML typing alone cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.ui.tick_rate_ms == 0 || self.ui.tick_rate_ms > MAX_TICK_RATE_MS {
            return Err(QueryLensError::validation(format!(
                "ui.tick_rate_ms must be between 1 and {MAX_TICK_RATE_MS}, got {}",
                self.ui.tick_rate_ms
            )));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(QueryLensError::validation(format!(
                "logging.level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// The config directory: `$QUERYLENS_HOME` if set and non-empty, else
/// `~/.querylens/`.
pub fn config_dir() -> Result<PathBuf> {
    pick_config_dir(std::env::var_os(HOME_ENV), dirs::home_dir())
}

fn pick_config_dir(from_env: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf> {
    match (from_env.filter(|dir| !dir.is_empty()), home) {
        (Some(dir), _) => Ok(PathBuf::from(dir)),
        (None, Some(home)) => Ok(home.join(CONFIG_DIR_NAME)),
        (None, None) => Err(QueryLensError::config(format!(
            "could not determine home directory; set {HOME_ENV}"
        ))),
    }
}

/// The default config file inside [`config_dir`].
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config.
///
/// An `explicit` path must exist. Without one the default file is read, and
/// a missing default file yields [`AppConfig::default`].
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let path = config_file_path()?;
    match std::fs::metadata(&path) {
        Ok(_) => load_config_from(&path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(?path, "config file not found, using defaults");
            Ok(AppConfig::default())
        }
        Err(e) => Err(QueryLensError::io(&path, e)),
    }
}

/// Load and validate the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| QueryLensError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        QueryLensError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;

    tracing::debug!(?path, "loaded config");
    Ok(config)
}

/// Create the default config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_at(&config_dir()?)
}

/// Write a default config file into `dir`, creating it if needed.
pub fn init_config_at(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| QueryLensError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| QueryLensError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| QueryLensError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
