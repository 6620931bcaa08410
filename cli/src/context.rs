use squadlog_core::{
    AppConfig, AppConfigExt, BackgroundTasks, Leaderboard, LogConverter, ProcessedLogs,
    StatService,
};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the individual state types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    pub service: Arc<StatService>,
    /// Log file names already run through the pipeline
    pub processed: Arc<Mutex<ProcessedLogs>>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    pub fn new() -> Self {
        Self::with_config(AppConfig::load())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let service = StatService::from_config(&config, Arc::new(Leaderboard::new()));
        Self {
            config: Arc::new(RwLock::new(config)),
            service: Arc::new(service),
            processed: Arc::new(Mutex::new(ProcessedLogs::new())),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
        }
    }

    /// Converter built from the current settings.
    pub async fn converter(&self) -> LogConverter {
        LogConverter::new(self.config.read().await.converter.clone())
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
