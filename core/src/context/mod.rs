mod background_tasks;
mod config;
mod converter;
mod error;
mod log_files;
mod processed;
pub mod watcher;

pub use background_tasks::BackgroundTasks;
pub use config::{AppConfig, AppConfigExt, ConverterConfig, DeliveryConfig};
pub use converter::LogConverter;
pub use error::{ConfigError, ConversionError, WatcherError};
pub use log_files::clear_directory;
pub use processed::ProcessedLogs;
