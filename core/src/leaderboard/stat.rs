use crate::fight::FightRecord;

/// Running totals for one account across every merged fight.
///
/// Uptimes and distance are stored as `value * active_ms` sums. Averages are
/// only recovered by dividing by `active_ms` when read, so fights of different
/// length are weighted by how long the player was active in them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CumulativeStat {
    /// Character names in order of first appearance
    pub characters: Vec<String>,
    pub fights: u32,
    pub active_ms: u64,
    pub damage: u64,
    pub cleanses: u64,
    pub strips: u64,
    pub dodges: u64,
    pub downs: u64,
    pub deaths: u64,
    pub fight_time_ms: u64,
    pub stab_weighted: f64,
    pub alac_weighted: f64,
    pub distance_weighted: f64,
}

impl CumulativeStat {
    pub fn add(&mut self, record: &FightRecord) {
        if !self.characters.iter().any(|c| c == &record.character) {
            self.characters.push(record.character.clone());
        }

        let weight = record.active_ms as f64;

        self.fights += 1;
        self.active_ms += record.active_ms;
        self.damage += record.damage;
        self.cleanses += record.cleanses;
        self.strips += record.strips;
        self.dodges += record.dodges;
        self.downs += record.downs;
        self.deaths += record.deaths;
        self.fight_time_ms += record.fight_time_ms;
        self.stab_weighted += record.stab_uptime * weight;
        self.alac_weighted += record.alac_uptime * weight;
        self.distance_weighted += record.distance * weight;
    }

    /// Active-time weighted stability uptime, 0 with no active time.
    pub fn stab_uptime(&self) -> f64 {
        weighted_mean(self.stab_weighted, self.active_ms)
    }

    pub fn alac_uptime(&self) -> f64 {
        weighted_mean(self.alac_weighted, self.active_ms)
    }

    pub fn distance(&self) -> f64 {
        weighted_mean(self.distance_weighted, self.active_ms)
    }

    /// Most recently added characters first, at most `limit` of them.
    pub fn recent_characters(&self, limit: usize) -> impl Iterator<Item = &str> {
        self.characters.iter().rev().take(limit).map(String::as_str)
    }
}

fn weighted_mean(weighted_sum: f64, active_ms: u64) -> f64 {
    if active_ms == 0 {
        return 0.0;
    }
    weighted_sum / active_ms as f64
}
