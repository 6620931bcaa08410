pub mod context;
pub mod fight;
pub mod leaderboard;
pub mod messages;
pub mod paginate;
pub mod service;
pub mod table;

// Re-exports for convenience
pub use context::watcher as directory_watcher;
pub use context::{
    AppConfig, AppConfigExt, BackgroundTasks, ConfigError, ConversionError, ConverterConfig,
    DeliveryConfig, LogConverter, ProcessedLogs, WatcherError,
};
pub use fight::{DataShapeError, FightDocument, FightRecord, FightSummary, extract};
pub use leaderboard::{CumulativeStat, Leaderboard, MergeOutcome, Standings};
pub use paginate::{PaginationError, paginate};
pub use service::{Command, FightReport, LeaderboardReport, ReportError, Response, StatService};
pub use table::{TableGrid, TableSchema};
