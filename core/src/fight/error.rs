//! Error types for fight document extraction

use thiserror::Error;

/// The fight document does not have the shape the extractor needs.
///
/// Any of these aborts the whole fight: nothing is merged into the leaderboard.
#[derive(Debug, Error)]
pub enum DataShapeError {
    #[error("fight document does not match the expected layout")]
    Json(#[from] serde_json::Error),

    #[error("player {account} has no {block} entry")]
    MissingBlock {
        account: String,
        block: &'static str,
    },

    #[error("player {account} has buff {buff_id} without uptime data")]
    EmptyBuffData { account: String, buff_id: u32 },

    #[error("fight document has no enemy summary")]
    MissingTarget,
}
