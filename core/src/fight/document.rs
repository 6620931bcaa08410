//! Serde model of a converted fight document.
//!
//! Only the fields the extractor reads are modelled; everything else in the
//! converter's output is ignored. Arrays indexed per phase or per target are
//! kept as `Vec` and resolved by the extractor, which reports a missing entry
//! as a [`DataShapeError`](super::DataShapeError).

use serde::Deserialize;

use super::DataShapeError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightDocument {
    /// Map or encounter name, e.g. "Detailed WvW - Eternal Battlegrounds"
    pub fight_name: String,
    /// Human readable duration, e.g. "03m 12s 410ms"
    pub duration: String,
    pub players: Vec<PlayerEntry>,
    #[serde(default)]
    pub targets: Vec<TargetEntry>,
}

impl FightDocument {
    pub fn from_json(json: &str) -> Result<Self, DataShapeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, DataShapeError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEntry {
    pub account: String,
    pub name: String,
    /// Outer index: target, inner index: phase.
    #[serde(default)]
    pub dps_targets: Vec<Vec<TargetDamage>>,
    #[serde(default)]
    pub defenses: Vec<DefenseStats>,
    #[serde(default)]
    pub support: Vec<SupportStats>,
    #[serde(default)]
    pub stats_all: Vec<GeneralStats>,
    #[serde(default)]
    pub buff_uptimes: Vec<BuffUptime>,
    #[serde(default)]
    pub active_times: Vec<u64>,
    #[serde(default)]
    pub death_recap: Option<Vec<DeathRecap>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetDamage {
    pub damage: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseStats {
    pub dodge_count: u64,
    pub down_count: u64,
    pub dead_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportStats {
    pub condi_cleanse: u64,
    pub condi_cleanse_self: u64,
    pub boon_strips: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralStats {
    pub dist_to_com: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuffUptime {
    pub id: u32,
    #[serde(default)]
    pub buff_data: Vec<BuffData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuffData {
    pub uptime: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeathRecap {
    pub death_time: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetEntry {
    #[serde(default)]
    pub dps_all: Vec<EnemyDps>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyDps {
    pub damage: u64,
    pub power_damage: u64,
    pub power_dps: u64,
    pub condi_damage: u64,
    pub condi_dps: u64,
}
