//! Column layouts and row builders for the three tables the bot posts
//!
//! - [`FRIENDLY`]: one row per participant of a single fight
//! - [`LEADERBOARD`]: one row per account across all fights since the last reset
//! - [`ENEMY`]: the opposing side of a single fight as one row

use crate::fight::{EnemyAggregateRecord, FightRecord};
use crate::leaderboard::Standings;

use super::format::{format_characters, format_elapsed, per_second};
use super::{Cell, Column, RenderRow, TableGrid, TableSchema, render};

const UPTIME_DECIMALS: usize = 2;

pub static FRIENDLY: TableSchema = TableSchema {
    columns: &[
        Column::text("Character"),
        Column::numeric("DPS"),
        Column::numeric("Damage"),
        Column::numeric("Cleanses"),
        Column::numeric("Strips"),
        Column::numeric("Stab"),
        Column::numeric("Alac"),
        Column::numeric("Dodges"),
        Column::numeric("Distance"),
        Column::numeric("Downs"),
        Column::numeric("Deaths"),
        Column::numeric("Time"),
    ],
    default_sort: 2,
};

pub static LEADERBOARD: TableSchema = TableSchema {
    columns: &[
        Column::text("Account"),
        Column::text("Characters"),
        Column::numeric("Fights"),
        Column::numeric("DPS"),
        Column::numeric("Damage"),
        Column::numeric("Cleanses"),
        Column::numeric("Strips"),
        Column::numeric("Stab"),
        Column::numeric("Alac"),
        Column::numeric("Dodges"),
        Column::numeric("Dist"),
        Column::numeric("Downs"),
        Column::numeric("Deaths"),
        Column::numeric("Time"),
    ],
    default_sort: 3,
};

pub static ENEMY: TableSchema = TableSchema {
    columns: &[
        Column::text("Name"),
        Column::numeric("Total Damage"),
        Column::numeric("Power Damage"),
        Column::numeric("Power DPS"),
        Column::numeric("Condi Damage"),
        Column::numeric("Condi DPS"),
    ],
    default_sort: 1,
};

pub fn friendly_rows(records: &[FightRecord]) -> Vec<RenderRow> {
    records
        .iter()
        .map(|p| {
            vec![
                Cell::text(&p.character),
                Cell::int(per_second(p.damage, p.active_ms)),
                Cell::int(p.damage),
                Cell::int(p.cleanses),
                Cell::int(p.strips),
                Cell::fixed(p.stab_uptime, UPTIME_DECIMALS),
                Cell::fixed(p.alac_uptime, UPTIME_DECIMALS),
                Cell::int(p.dodges),
                Cell::signed(p.distance.round() as i64),
                Cell::int(p.downs),
                Cell::int(p.deaths),
                Cell::keyed(p.fight_time_ms as f64, format_elapsed(p.fight_time_ms)),
            ]
        })
        .collect()
}

/// Rows in account order, so ties in the sort column come out deterministic.
pub fn leaderboard_rows(standings: &Standings) -> Vec<RenderRow> {
    let mut accounts: Vec<_> = standings.iter().collect();
    accounts.sort_by(|a, b| a.0.cmp(b.0));

    accounts
        .into_iter()
        .map(|(account, stat)| {
            vec![
                Cell::text(account),
                Cell::text(format_characters(stat)),
                Cell::int(u64::from(stat.fights)),
                Cell::int(per_second(stat.damage, stat.active_ms)),
                Cell::int(stat.damage),
                Cell::int(stat.cleanses),
                Cell::int(stat.strips),
                Cell::fixed(stat.stab_uptime(), UPTIME_DECIMALS),
                Cell::fixed(stat.alac_uptime(), UPTIME_DECIMALS),
                Cell::int(stat.dodges),
                Cell::signed(stat.distance().round() as i64),
                Cell::int(stat.downs),
                Cell::int(stat.deaths),
                Cell::keyed(stat.fight_time_ms as f64, format_elapsed(stat.fight_time_ms)),
            ]
        })
        .collect()
}

pub fn enemy_rows(enemy: &EnemyAggregateRecord) -> Vec<RenderRow> {
    vec![vec![
        Cell::text("Enemy Players"),
        Cell::int(enemy.total_damage),
        Cell::int(enemy.power_damage),
        Cell::int(enemy.power_dps),
        Cell::int(enemy.condi_damage),
        Cell::int(enemy.condi_dps),
    ]]
}

pub fn render_friendly(records: &[FightRecord], sort_hint: Option<&str>) -> TableGrid {
    render(friendly_rows(records), &FRIENDLY, sort_hint)
}

pub fn render_leaderboard(standings: &Standings, sort_hint: Option<&str>) -> TableGrid {
    render(leaderboard_rows(standings), &LEADERBOARD, sort_hint)
}

pub fn render_enemy(enemy: &EnemyAggregateRecord) -> TableGrid {
    render(enemy_rows(enemy), &ENEMY, None)
}
