use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

const APP_DIR: &str = "weektodo";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Default config file: `<config dir>/weektodo/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Directory for the database and the TUI log file
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn default_db_path() -> PathBuf {
    data_dir().join("database.db")
}

/// Where the TUI writes its log while it owns the terminal
pub fn tui_log_path() -> PathBuf {
    data_dir().join("weektodo.log")
}

/// Read a config file. A missing file yields the defaults; an unreadable
/// or malformed one is an error.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Load the config from an explicit path, or the default location
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Some(path) => read_config(&path),
            None => Ok(Config::default()),
        },
    }
}

/// Pick the database path: command-line flag, then config, then default
pub fn resolve_db_path(flag: Option<&Path>, config: &Config) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.store.path.clone())
        .unwrap_or_else(default_db_path)
}
