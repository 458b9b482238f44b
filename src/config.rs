//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local runs.
//! Without `MAPTY_DATA_DIR`, workouts live under the per-user data directory
//! (e.g. `~/.local/share/mapty` on Linux), independent of the working directory.

use std::env;
use std::path::PathBuf;

/// Storage key used by earlier releases; kept so existing data is found.
pub const DEFAULT_STORAGE_KEY: &str = "workouts";
pub const DEFAULT_MAP_ZOOM: u8 = 15;
const APP_DIR_NAME: &str = "mapty";
/// Used only when the platform reports no per-user data directory.
const FALLBACK_DATA_DIR: &str = "mapty-data";

/// Per-user data directory for the store.
pub fn default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(base) => base.join(APP_DIR_NAME),
        None => PathBuf::from(FALLBACK_DATA_DIR),
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory backing the durable key/value store
    pub data_dir: PathBuf,
    /// Name of the single blob holding every workout
    pub storage_key: String,
    /// Zoom level used when panning the map to a workout
    pub map_zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            map_zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default; unparseable values fall back to it.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage_key =
            env::var("MAPTY_STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());
        if storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("MAPTY_STORAGE_KEY"));
        }

        Ok(Self {
            data_dir: env::var("MAPTY_DATA_DIR")
                .map(|dir| expand_tilde(&dir))
                .unwrap_or_else(|_| default_data_dir()),
            storage_key: storage_key.trim().to_string(),
            map_zoom: env::var("MAPTY_MAP_ZOOM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAP_ZOOM),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
