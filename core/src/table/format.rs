//! Derived display values computed at render time

use crate::leaderboard::CumulativeStat;

const CHARACTERS_SHOWN: usize = 2;
const CHARACTERS_MAX_LEN: usize = 25;

/// Rate per second of `total` over `active_ms`, rounded. 0 with no active time.
pub fn per_second(total: u64, active_ms: u64) -> u64 {
    if active_ms == 0 {
        return 0;
    }
    (total as f64 / (active_ms as f64 / 1000.0)).round() as u64
}

/// Elapsed time as `{minutes}m {seconds}s`, rounded to the nearest second.
///
/// Rounding happens before the minute split, so 119.6 s shows as `2m 0s`,
/// never as a floored `1m 0s` with the seconds rounded up to 60 and wrapped.
pub fn format_elapsed(ms: u64) -> String {
    let secs = (ms + 500) / 1000;
    format!("{}m {}s", secs / 60, secs % 60)
}

/// Last characters an account played, newest first, shortened for the table.
pub fn format_characters(stat: &CumulativeStat) -> String {
    let joined = stat
        .recent_characters(CHARACTERS_SHOWN)
        .collect::<Vec<_>>()
        .join(" , ");

    if joined.chars().count() > CHARACTERS_MAX_LEN {
        let mut short: String = joined.chars().take(CHARACTERS_MAX_LEN).collect();
        short.push_str("...");
        short
    } else {
        joined
    }
}
