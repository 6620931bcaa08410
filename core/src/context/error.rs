//! Error types for context operations

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors during directory watching
#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("log directory {path} does not exist")]
    MissingDirectory { path: PathBuf },

    #[error("failed to initialize file watcher")]
    InitWatcher(#[source] notify::Error),

    #[error("failed to watch path {path}")]
    WatchPath {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}

/// The external converter did not produce a fight document.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("no converter executable configured")]
    NotConfigured,

    #[error("log path {path} has no file name")]
    InvalidLogName { path: PathBuf },

    #[error("failed to start converter {executable}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("converter exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("converter finished but {path} was not written")]
    MissingOutput { path: PathBuf },
}
