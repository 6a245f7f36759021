use crate::grid::SortDirection;
use anyhow::{anyhow, Context};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dataset file last opened
    #[serde(default)]
    pub data_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// How long notifications stay on screen
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,
    #[serde(default = "default_sort_key")]
    pub default_sort_key: String,
    #[serde(default = "default_sort_descending")]
    pub default_sort_descending: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_notification_ms() -> u64 {
    5000
}

fn default_sort_key() -> String {
    "updated_at".to_string()
}

fn default_sort_descending() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: String::new(),
            log_level: default_log_level(),
            notification_ms: default_notification_ms(),
            default_sort_key: default_sort_key(),
            default_sort_descending: default_sort_descending(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".portal-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("portal-tui.log"))
    }

    /// Scratch directory for records opened in the external editor
    pub fn edit_dir() -> PathBuf {
        Self::config_dir()
            .unwrap_or_else(env::temp_dir)
            .join("edit")
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir =
            Self::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create {}", config_dir.display()))?;
        }

        let config_path =
            Self::config_path().ok_or_else(|| anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        Ok(())
    }

    /// Log level, falling back to Info for unknown names
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    /// Initial sort column and direction of every grid
    pub fn default_sort(&self) -> (String, SortDirection) {
        let direction = if self.default_sort_descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        (self.default_sort_key.clone(), direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"data_path": "/tmp/portal.json"}"#).unwrap();

        assert_eq!(config.data_path, "/tmp/portal.json");
        assert_eq!(config.notification_duration(), Duration::from_millis(5000));
        assert_eq!(
            config.default_sort(),
            ("updated_at".to_string(), SortDirection::Descending)
        );
    }

    #[test]
    fn test_log_level_filter() {
        let mut config = Config::default();
        assert_eq!(config.log_level_filter(), LevelFilter::Info);

        config.log_level = "debug".to_string();
        assert_eq!(config.log_level_filter(), LevelFilter::Debug);

        config.log_level = "chatty".to_string();
        assert_eq!(config.log_level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_ascending_default_sort() {
        let config = Config {
            default_sort_key: "name".to_string(),
            default_sort_descending: false,
            ..Config::default()
        };
        assert_eq!(
            config.default_sort(),
            ("name".to_string(), SortDirection::Ascending)
        );
    }
}
