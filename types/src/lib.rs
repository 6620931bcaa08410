//! Shared configuration types for squadlog
//!
//! This crate contains serializable configuration types that are shared between
//! the core library (squadlog-core) and the command-line front-end.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Delivery
// ─────────────────────────────────────────────────────────────────────────────

/// Limits and destinations for outbound messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Hard per-message character budget of the chat platform.
    #[serde(default = "default_message_budget")]
    pub message_budget: usize,
    /// Characters kept free in every message for the caption and code fences.
    #[serde(default = "default_reserved")]
    pub reserved: usize,
    /// Channel receiving fight reports and leaderboards.
    #[serde(default = "default_stats_channel")]
    pub stats_channel: String,
    /// Channel receiving liveness announcements.
    #[serde(default = "default_general_channel")]
    pub general_channel: String,
}

fn default_message_budget() -> usize {
    2000
}

fn default_reserved() -> usize {
    50
}

fn default_stats_channel() -> String {
    "raid-stats".to_string()
}

fn default_general_channel() -> String {
    "general".to_string()
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            message_budget: default_message_budget(),
            reserved: default_reserved(),
            stats_channel: default_stats_channel(),
            general_channel: default_general_channel(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Log Converter
// ─────────────────────────────────────────────────────────────────────────────

/// The external tool that turns a raw combat log into a JSON fight document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Path to the converter executable.
    #[serde(default)]
    pub executable: String,
    /// Settings file handed to the converter with `-c`.
    #[serde(default)]
    pub config_file: String,
    /// Directory the converter writes its JSON output into.
    #[serde(default)]
    pub output_directory: String,
    /// Appended to the log's file stem to build the JSON file name.
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
}

fn default_output_suffix() -> String {
    "_wvw_kill".to_string()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            executable: String::new(),
            config_file: String::new(),
            output_directory: String::new(),
            output_suffix: default_output_suffix(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory watched for newly written combat logs.
    #[serde(default)]
    pub log_directory: String,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    /// Plain-text copy of the most recent leaderboard render.
    #[serde(default)]
    pub backup_path: String,
    /// Empty the log and converter output directories on reset. Off by
    /// default since the log directory holds the player's own combat logs.
    #[serde(default)]
    pub clear_directories_on_reset: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_log_directory(String::new())
    }
}

impl AppConfig {
    /// Create a new AppConfig with the specified log directory.
    /// Other fields use their default values.
    pub fn with_log_directory(log_directory: String) -> Self {
        Self {
            log_directory,
            converter: ConverterConfig::default(),
            delivery: DeliveryConfig::default(),
            backup_path: String::new(),
            clear_directories_on_reset: false,
        }
    }
}
