//! Text of outbound messages
//!
//! Table chunks are wrapped in a code fence and prefixed with a caption. The
//! caption and fences must fit in the `reserved` part of the message budget.

use crate::fight::FightMeta;

pub const INTRODUCTION: &str = "I'm alive. I am your raid historian.";
pub const EMPTY_LEADERBOARD: &str = "No fights recorded yet.";
pub const RESET_DONE: &str = "Leaderboard cleared.";

pub const SQUAD_TABLE_TITLE: &str = "Squad Stat Table";
pub const LEADERBOARD_TITLE: &str = "Stat Table";
pub const ENEMY_CAPTION: &str = "Stats for Enemy Players as a whole.";

pub fn fight_header(meta: &FightMeta) -> String {
    format!(
        "__**Reports for fight on {} lasting {}**__",
        meta.map, meta.duration
    )
}

/// Prefix each chunk with `{title} {k} of {n}`.
pub fn numbered(title: &str, chunks: Vec<String>) -> Vec<String> {
    let total = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| fenced(&format!("{title} {} of {total}", i + 1), &chunk))
        .collect()
}

/// Prefix every chunk with the same caption.
pub fn captioned(caption: &str, chunks: Vec<String>) -> Vec<String> {
    chunks
        .into_iter()
        .map(|chunk| fenced(caption, &chunk))
        .collect()
}

fn fenced(caption: &str, chunk: &str) -> String {
    format!("{caption}\n```\n{chunk}```")
}
