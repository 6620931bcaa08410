//! Error types for the report pipeline

use std::path::PathBuf;
use thiserror::Error;

use crate::context::ConversionError;
use crate::fight::DataShapeError;
use crate::paginate::PaginationError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    DataShape(#[from] DataShapeError),

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("failed to read fight document {path}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write leaderboard backup {path}")]
    WriteBackup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// One line suitable for posting back to the channel.
    pub fn user_message(&self) -> String {
        match self {
            ReportError::DataShape(e) => {
                format!("Skipped a fight, the report could not be read: {e}.")
            }
            ReportError::Pagination(e) => {
                format!("Could not split the table into messages: {e}.")
            }
            ReportError::Conversion(e) => format!("Could not convert the combat log: {e}."),
            ReportError::ReadDocument { path, .. } => {
                format!("Could not open the fight report {}.", path.display())
            }
            ReportError::WriteBackup { path, .. } => {
                format!("Could not save the leaderboard backup to {}.", path.display())
            }
        }
    }
}
