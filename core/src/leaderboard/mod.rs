//! Cross-fight leaderboard
//!
//! The [`Leaderboard`] is the only long-lived mutable state in the pipeline. It
//! is keyed by account name, never by character name, so character swaps fold
//! into one entry. Entries are created on first sighting and only ever removed
//! all at once by [`Leaderboard::reset`].
//!
//! Merge, snapshot and reset all go through one `RwLock`. A fight is merged
//! under a single write-lock acquisition, so concurrent readers never observe
//! half of a fight. Each reset bumps a generation counter; a fight extracted
//! against an older generation is discarded instead of being written into the
//! freshly cleared board.

mod stat;


use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::HashMap;

use crate::fight::FightRecord;

pub use stat::CumulativeStat;

/// Account name -> cumulative stats
pub type Standings = HashMap<String, CumulativeStat>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Applied,
    /// The board was reset after the fight was read; nothing was merged.
    Stale,
}

#[derive(Debug, Default)]
struct Board {
    generation: u64,
    standings: Standings,
}

#[derive(Debug, Default)]
pub struct Leaderboard {
    board: RwLock<Board>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current reset generation. Capture before extracting a fight and pass
    /// it to [`merge_fight`](Self::merge_fight).
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    /// Merge a single record into its account's totals.
    pub fn merge(&self, record: &FightRecord) {
        let mut board = self.write();
        board
            .standings
            .entry(record.account.clone())
            .or_default()
            .add(record);
    }

    /// Merge every record of one fight atomically.
    ///
    /// Not idempotent: calling this twice for the same fight counts it twice.
    pub fn merge_fight(&self, generation: u64, records: &[FightRecord]) -> MergeOutcome {
        let mut board = self.write();
        if board.generation != generation {
            tracing::warn!(
                expected = generation,
                current = board.generation,
                "Leaderboard was reset while the fight was processed, discarding merge"
            );
            return MergeOutcome::Stale;
        }

        for record in records {
            board
                .standings
                .entry(record.account.clone())
                .or_default()
                .add(record);
        }

        tracing::debug!(
            players = records.len(),
            accounts = board.standings.len(),
            "Merged fight into leaderboard"
        );
        MergeOutcome::Applied
    }

    /// Point-in-time copy of the standings for rendering.
    pub fn snapshot(&self) -> Standings {
        self.read().standings.clone()
    }

    /// Totals for a single account, if it has been seen.
    pub fn get(&self, account: &str) -> Option<CumulativeStat> {
        self.read().standings.get(account).cloned()
    }

    /// Drop every entry and start a new generation.
    pub fn reset(&self) {
        let mut board = self.write();
        board.standings = Standings::new();
        board.generation += 1;
        tracing::info!(generation = board.generation, "Leaderboard reset");
    }

    pub fn len(&self) -> usize {
        self.read().standings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().standings.is_empty()
    }

    // Updates never panic mid-way, so a poisoned lock still holds a consistent board.
    fn read(&self) -> RwLockReadGuard<'_, Board> {
        self.board.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Board> {
        self.board.write().unwrap_or_else(PoisonError::into_inner)
    }
}
