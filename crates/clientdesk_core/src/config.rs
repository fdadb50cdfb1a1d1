//! Application configuration.
//!
//! Precedence, lowest first: built-in defaults, TOML file, environment
//! (`CLIENTDESK_DATA_FILE`, `CLIENTDESK_LOG_LEVEL`), then explicit overrides
//! applied by the caller.

use crate::model::meeting::UPCOMING_WINDOW_DAYS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_DATA_FILE: &str = "CLIENTDESK_DATA_FILE";
pub const ENV_LOG_LEVEL: &str = "CLIENTDESK_LOG_LEVEL";
/// Upper bound for `upcoming_window_days`, roughly a century.
pub const MAX_UPCOMING_WINDOW_DAYS: u32 = 36_500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config `{}`: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite database holding the person list.
    pub data_file: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
    /// How far ahead a meeting counts as coming up.
    pub upcoming_window_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/clientdesk.db"),
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: PathBuf::from("logs"),
            upcoming_window_days: UPCOMING_WINDOW_DAYS,
        }
    }
}

impl AppConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml_str(&raw).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(raw).map_err(|err| err.to_string())?;
        if config.upcoming_window_days > MAX_UPCOMING_WINDOW_DAYS {
            return Err(format!(
                "upcoming_window_days must be at most {MAX_UPCOMING_WINDOW_DAYS}, got {}",
                config.upcoming_window_days
            ));
        }
        Ok(config)
    }

    /// `load` followed by process environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::load(path)?.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(data_file) = non_blank(ENV_DATA_FILE) {
            self.data_file = PathBuf::from(data_file.trim());
        }
        if let Some(level) = non_blank(ENV_LOG_LEVEL) {
            self.log_level = level.trim().to_string();
        }
        self
    }

    pub fn upcoming_window(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.upcoming_window_days))
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, ENV_DATA_FILE, ENV_LOG_LEVEL, MAX_UPCOMING_WINDOW_DAYS};
    use std::path::PathBuf;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.upcoming_window_days, 7);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::from_toml_str("data_file = \"book.db\"\n").unwrap();
        assert_eq!(config.data_file, PathBuf::from("book.db"));
        assert_eq!(config.log_dir, AppConfig::default().log_dir);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clientdesk.toml");
        std::fs::write(&path, "data_fiel = \"typo.db\"\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn oversized_upcoming_window_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clientdesk.toml");
        std::fs::write(&path, "upcoming_window_days = 4000000000\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { message, .. }) if message.contains("upcoming_window_days")
        ));

        let raw = format!("upcoming_window_days = {MAX_UPCOMING_WINDOW_DAYS}\n");
        let config = AppConfig::from_toml_str(&raw).unwrap();
        assert_eq!(config.upcoming_window_days, MAX_UPCOMING_WINDOW_DAYS);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let config = AppConfig::default().with_env_overrides(|key| match key {
            ENV_DATA_FILE => Some(" /tmp/other.db ".to_string()),
            ENV_LOG_LEVEL => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.data_file, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.log_level, AppConfig::default().log_level);
    }
}
