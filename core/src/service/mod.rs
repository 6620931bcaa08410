//! Report pipeline
//!
//! [`StatService`] ties the components together and is the entry point for
//! everything the chat side can ask for:
//!
//! ```text
//!  fight document ──► extract ──► merge into Leaderboard
//!                        │
//!                        ├──► render friendly table ──► paginate ──► "Squad Stat Table k of n"
//!                        └──► render enemy table ────► paginate ──► "Stats for Enemy Players..."
//!
//!  !raidStats [sort] ──► snapshot ──► render leaderboard ──► backup file
//!                                                       └──► paginate ──► "Stat Table k of n"
//! ```
//!
//! Every step is fallible and propagates with `?`. The merge is the only step
//! that mutates shared state and happens only after extraction fully succeeded.

mod error;

#[cfg(test)]
mod service_tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::context::{AppConfig, AppConfigExt, DeliveryConfig};
use crate::fight::{FightDocument, extract};
use crate::leaderboard::{Leaderboard, MergeOutcome};
use crate::messages::{self, ENEMY_CAPTION, LEADERBOARD_TITLE, SQUAD_TABLE_TITLE};
use crate::paginate::paginate;
use crate::table::{TableGrid, render_enemy, render_friendly, render_leaderboard};

pub use error::ReportError;

/// Messages produced for one fight.
#[derive(Debug, Clone)]
pub struct FightReport {
    pub header: String,
    pub friendly_chunks: Vec<String>,
    pub enemy_chunks: Vec<String>,
    pub merge: MergeOutcome,
}

#[derive(Debug, Clone)]
pub struct LeaderboardReport {
    pub messages: Vec<String>,
    /// Set when the plain-text backup was written
    pub backup: Option<PathBuf>,
}

/// Verbs the chat side can invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RaidStats { sort: Option<String> },
    Reset,
    Introduce,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Messages {
        messages: Vec<String>,
        attachment: Option<PathBuf>,
    },
    Status(String),
}

impl Response {
    pub fn from_error(error: &ReportError) -> Self {
        Response::Status(error.user_message())
    }
}

pub struct StatService {
    leaderboard: Arc<Leaderboard>,
    delivery: DeliveryConfig,
    backup_path: PathBuf,
}

impl StatService {
    pub fn new(leaderboard: Arc<Leaderboard>, delivery: DeliveryConfig, backup_path: PathBuf) -> Self {
        Self {
            leaderboard,
            delivery,
            backup_path,
        }
    }

    pub fn from_config(config: &AppConfig, leaderboard: Arc<Leaderboard>) -> Self {
        Self::new(leaderboard, config.delivery.clone(), config.backup_file())
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Extract a fight, merge it into the leaderboard and render its tables.
    ///
    /// A malformed document fails before anything is merged.
    pub fn process_fight(&self, doc: &FightDocument) -> Result<FightReport, ReportError> {
        let generation = self.leaderboard.generation();
        let summary = extract(doc)?;

        let merge = self.leaderboard.merge_fight(generation, &summary.players);

        let friendly = render_friendly(&summary.players, None);
        let enemy = render_enemy(&summary.enemy);

        let report = FightReport {
            header: messages::fight_header(&summary.meta),
            friendly_chunks: messages::numbered(SQUAD_TABLE_TITLE, self.paginate(&friendly)?),
            enemy_chunks: messages::captioned(ENEMY_CAPTION, self.paginate(&enemy)?),
            merge,
        };

        tracing::info!(
            map = %summary.meta.map,
            players = summary.players.len(),
            merged = matches!(merge, MergeOutcome::Applied),
            "Processed fight"
        );
        Ok(report)
    }

    pub async fn process_fight_file(&self, path: &Path) -> Result<FightReport, ReportError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ReportError::ReadDocument {
                path: path.to_path_buf(),
                source,
            })?;
        let doc = FightDocument::from_slice(&bytes)?;
        self.process_fight(&doc)
    }

    /// Render the cumulative leaderboard, refreshing the backup file.
    pub async fn render_leaderboard(
        &self,
        sort_hint: Option<&str>,
    ) -> Result<LeaderboardReport, ReportError> {
        let grid = render_leaderboard(&self.leaderboard.snapshot(), sort_hint);

        let backup = match self.write_backup(&grid).await {
            Ok(()) => Some(self.backup_path.clone()),
            Err(e) => {
                tracing::warn!(error = %e, "Leaderboard backup not written");
                None
            }
        };

        let messages = messages::numbered(LEADERBOARD_TITLE, self.paginate(&grid)?);
        Ok(LeaderboardReport { messages, backup })
    }

    pub fn reset(&self) -> String {
        self.leaderboard.reset();
        messages::RESET_DONE.to_string()
    }

    pub fn introduce(&self) -> &'static str {
        messages::INTRODUCTION
    }

    /// Run a command, folding failures into a status line.
    pub async fn respond(&self, command: Command) -> Response {
        match command {
            Command::RaidStats { sort } => match self.render_leaderboard(sort.as_deref()).await {
                Ok(report) if report.messages.is_empty() => {
                    Response::Status(messages::EMPTY_LEADERBOARD.to_string())
                }
                Ok(report) => Response::Messages {
                    messages: report.messages,
                    attachment: report.backup,
                },
                Err(e) => {
                    tracing::error!(error = %e, "Leaderboard render failed");
                    Response::from_error(&e)
                }
            },
            Command::Reset => Response::Status(self.reset()),
            Command::Introduce => Response::Status(self.introduce().to_string()),
        }
    }

    fn paginate(&self, grid: &TableGrid) -> Result<Vec<String>, ReportError> {
        Ok(paginate(
            grid,
            self.delivery.message_budget,
            self.delivery.reserved,
        )?)
    }

    async fn write_backup(&self, grid: &TableGrid) -> Result<(), ReportError> {
        let path = &self.backup_path;
        let to_error = |source| ReportError::WriteBackup {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(to_error)?;
        }
        tokio::fs::write(path, grid.to_string())
            .await
            .map_err(to_error)?;

        tracing::debug!(path = %path.display(), "Wrote leaderboard backup");
        Ok(())
    }
}
