use chrono::{DateTime, Local};
use hashbrown::HashMap;

/// Log file names that already went through the pipeline.
///
/// Merging is not idempotent, so a log must be claimed here before it is
/// converted. Cleared together with the leaderboard.
#[derive(Debug, Default)]
pub struct ProcessedLogs {
    seen: HashMap<String, DateTime<Local>>,
}

impl ProcessedLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a log name. Returns false if it was already processed.
    pub fn claim(&mut self, name: &str) -> bool {
        if self.seen.contains_key(name) {
            return false;
        }
        self.seen.insert(name.to_string(), Local::now());
        true
    }

    pub fn processed_at(&self, name: &str) -> Option<DateTime<Local>> {
        self.seen.get(name).copied()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
