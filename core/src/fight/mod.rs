//! Fight documents and the per-fight records extracted from them
//!
//! A converted combat log is deserialized into a [`FightDocument`], then
//! [`extract`] turns it into one [`FightRecord`] per participant and a single
//! [`EnemyAggregateRecord`] for the opposing side.

mod document;
mod error;
mod extract;

pub use document::{
    BuffData, BuffUptime, DeathRecap, DefenseStats, EnemyDps, FightDocument, GeneralStats,
    PlayerEntry, SupportStats, TargetDamage, TargetEntry,
};
pub use error::DataShapeError;
pub use extract::{ALACRITY_BUFF_ID, STABILITY_BUFF_ID, extract};

/// One participant's stats for a single fight. Immutable once extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct FightRecord {
    /// Account name, stable across character swaps
    pub account: String,
    /// Character name shown in this fight
    pub character: String,
    pub active_ms: u64,
    pub damage: u64,
    pub cleanses: u64,
    pub strips: u64,
    pub stab_uptime: f64,
    pub alac_uptime: f64,
    pub dodges: u64,
    /// Average distance to commander over the fight
    pub distance: f64,
    pub downs: u64,
    pub deaths: u64,
    /// Time of death, or the full active time if the participant never died
    pub fight_time_ms: u64,
}

/// Damage output of the opposing side as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemyAggregateRecord {
    pub total_damage: u64,
    pub power_damage: u64,
    pub power_dps: u64,
    pub condi_damage: u64,
    pub condi_dps: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FightMeta {
    pub map: String,
    pub duration: String,
}

/// Everything extracted from one fight document.
#[derive(Debug, Clone, PartialEq)]
pub struct FightSummary {
    pub meta: FightMeta,
    pub players: Vec<FightRecord>,
    pub enemy: EnemyAggregateRecord,
}

impl FightSummary {
    pub fn player(&self, account: &str) -> Option<&FightRecord> {
        self.players.iter().find(|p| p.account == account)
    }
}
