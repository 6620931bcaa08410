//! Application configuration
//!
//! This module re-exports shared types from squadlog-types and provides
//! platform-specific defaults and persistence for AppConfig.

use std::path::PathBuf;

pub use squadlog_types::{AppConfig, ConverterConfig, DeliveryConfig};

use super::ConfigError;

const APP_NAME: &str = "squadlog";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Defaults
// ─────────────────────────────────────────────────────────────────────────────

fn default_log_directory() -> String {
    dirs::document_dir()
        .map(|p| p.join("Guild Wars 2").join("addons").join("arcdps").join("arcdps.cbtlogs"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_default()
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
}

fn default_output_directory() -> String {
    data_dir().join("input").to_string_lossy().into_owned()
}

fn default_backup_path() -> String {
    data_dir()
        .join("out")
        .join("stat-table.txt")
        .to_string_lossy()
        .into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence and path resolution
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn load_with_defaults() -> Self;
    fn save(self) -> Result<(), ConfigError>;
    /// Fill any empty path with its platform default
    fn with_defaults(self) -> Self;
    fn backup_file(&self) -> PathBuf;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        match confy::load::<AppConfig>(APP_NAME, CONFIG_NAME) {
            Ok(config) => config.with_defaults(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load configuration, using defaults");
                Self::load_with_defaults()
            }
        }
    }

    fn load_with_defaults() -> Self {
        AppConfig::with_log_directory(default_log_directory()).with_defaults()
    }

    fn save(self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn with_defaults(mut self) -> Self {
        if self.log_directory.is_empty() {
            self.log_directory = default_log_directory();
        }
        if self.converter.output_directory.is_empty() {
            self.converter.output_directory = default_output_directory();
        }
        if self.backup_path.is_empty() {
            self.backup_path = default_backup_path();
        }
        self
    }

    fn backup_file(&self) -> PathBuf {
        PathBuf::from(&self.backup_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_only_empty_paths() {
        let mut config = AppConfig::with_log_directory("/watch".to_string());
        config.backup_path = "/tmp/board.txt".to_string();

        let config = config.with_defaults();
        assert_eq!(config.log_directory, "/watch");
        assert_eq!(config.backup_file(), PathBuf::from("/tmp/board.txt"));
        assert!(config.converter.output_directory.ends_with("input"));
    }

    #[test]
    fn default_backup_is_stat_table_text() {
        let config = AppConfig::default().with_defaults();
        assert!(config.backup_path.ends_with("stat-table.txt"));
    }

    #[test]
    fn saved_config_without_clear_flag_keeps_directories() {
        let config: AppConfig = serde_json::from_str(r#"{"log_directory": "/watch"}"#).unwrap();
        assert!(!config.clear_directories_on_reset);
        assert!(!AppConfig::load_with_defaults().clear_directories_on_reset);
    }
}
