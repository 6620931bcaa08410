use super::document::{BuffUptime, PlayerEntry};
use super::{
    DataShapeError, EnemyAggregateRecord, FightDocument, FightMeta, FightRecord, FightSummary,
};

pub const STABILITY_BUFF_ID: u32 = 1122;
pub const ALACRITY_BUFF_ID: u32 = 30328;

/// Extract per-participant records and the enemy aggregate from a fight document.
///
/// Fails as a whole: a single malformed participant aborts the extraction so a
/// partially read fight never reaches the leaderboard.
pub fn extract(doc: &FightDocument) -> Result<FightSummary, DataShapeError> {
    let players = doc
        .players
        .iter()
        .map(extract_player)
        .collect::<Result<Vec<_>, _>>()?;

    let enemy = doc
        .targets
        .first()
        .and_then(|t| t.dps_all.first())
        .map(|dps| EnemyAggregateRecord {
            total_damage: dps.damage,
            power_damage: dps.power_damage,
            power_dps: dps.power_dps,
            condi_damage: dps.condi_damage,
            condi_dps: dps.condi_dps,
        })
        .ok_or(DataShapeError::MissingTarget)?;

    tracing::debug!(
        map = %doc.fight_name,
        players = players.len(),
        "Extracted fight"
    );

    Ok(FightSummary {
        meta: FightMeta {
            map: doc.fight_name.clone(),
            duration: doc.duration.clone(),
        },
        players,
        enemy,
    })
}

fn extract_player(player: &PlayerEntry) -> Result<FightRecord, DataShapeError> {
    let missing = |block: &'static str| DataShapeError::MissingBlock {
        account: player.account.clone(),
        block,
    };

    // Primary target, first phase
    let offense = player
        .dps_targets
        .first()
        .and_then(|phases| phases.first())
        .ok_or_else(|| missing("dpsTargets"))?;
    let defense = player.defenses.first().ok_or_else(|| missing("defenses"))?;
    let support = player.support.first().ok_or_else(|| missing("support"))?;
    let general = player.stats_all.first().ok_or_else(|| missing("statsAll"))?;
    let active_ms = *player
        .active_times
        .first()
        .ok_or_else(|| missing("activeTimes"))?;

    let stab_uptime = buff_uptime(player, STABILITY_BUFF_ID)?;
    let alac_uptime = buff_uptime(player, ALACRITY_BUFF_ID)?;

    let fight_time_ms = player
        .death_recap
        .as_ref()
        .and_then(|recaps| recaps.first())
        .map(|recap| recap.death_time)
        .unwrap_or(active_ms);

    Ok(FightRecord {
        account: player.account.clone(),
        character: player.name.clone(),
        active_ms,
        damage: offense.damage,
        cleanses: support.condi_cleanse + support.condi_cleanse_self,
        strips: support.boon_strips,
        stab_uptime,
        alac_uptime,
        dodges: defense.dodge_count,
        distance: general.dist_to_com,
        downs: defense.down_count,
        deaths: defense.dead_count,
        fight_time_ms,
    })
}

/// Uptime of a buff in the first phase. A buff the player never had is 0.
fn buff_uptime(player: &PlayerEntry, buff_id: u32) -> Result<f64, DataShapeError> {
    let Some(entry) = player.buff_uptimes.iter().find(|b| b.id == buff_id) else {
        return Ok(0.0);
    };
    first_uptime(entry).ok_or_else(|| DataShapeError::EmptyBuffData {
        account: player.account.clone(),
        buff_id,
    })
}

fn first_uptime(entry: &BuffUptime) -> Option<f64> {
    entry.buff_data.first().map(|d| d.uptime)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../test-data/wvw_fight.json");

    fn fixture() -> FightDocument {
        FightDocument::from_json(FIXTURE).expect("fixture should parse")
    }

    #[test]
    fn extracts_meta_and_every_player() {
        let summary = extract(&fixture()).unwrap();
        assert_eq!(summary.meta.map, "Detailed WvW - Eternal Battlegrounds");
        assert_eq!(summary.meta.duration, "01m 30s 000ms");
        assert_eq!(summary.players.len(), 2);
    }

    #[test]
    fn extracts_player_stats() {
        let summary = extract(&fixture()).unwrap();
        let a = summary.player("acct1.1234").unwrap();
        assert_eq!(a.character, "CharA");
        assert_eq!(a.active_ms, 60000);
        assert_eq!(a.damage, 100000);
        assert_eq!(a.cleanses, 12);
        assert_eq!(a.strips, 5);
        assert_eq!(a.stab_uptime, 0.5);
        assert_eq!(a.alac_uptime, 0.25);
        assert_eq!(a.dodges, 4);
        assert_eq!(a.distance, 250.4);
        assert_eq!(a.downs, 1);
        assert_eq!(a.deaths, 1);
    }

    #[test]
    fn death_time_comes_from_recap() {
        let summary = extract(&fixture()).unwrap();
        assert_eq!(summary.player("acct1.1234").unwrap().fight_time_ms, 45000);
    }

    #[test]
    fn survivor_fight_time_is_active_time() {
        let summary = extract(&fixture()).unwrap();
        let z = summary.player("acct2.5678").unwrap();
        assert_eq!(z.fight_time_ms, 90000);
    }

    #[test]
    fn absent_buffs_mean_zero_uptime() {
        let summary = extract(&fixture()).unwrap();
        let z = summary.player("acct2.5678").unwrap();
        assert_eq!(z.stab_uptime, 0.0);
        assert_eq!(z.alac_uptime, 0.0);
    }

    #[test]
    fn extracts_enemy_aggregate() {
        let summary = extract(&fixture()).unwrap();
        assert_eq!(
            summary.enemy,
            EnemyAggregateRecord {
                total_damage: 80000,
                power_damage: 60000,
                power_dps: 667,
                condi_damage: 20000,
                condi_dps: 222,
            }
        );
    }

    #[test]
    fn missing_defense_block_aborts_extraction() {
        let mut doc = fixture();
        doc.players[1].defenses.clear();
        match extract(&doc) {
            Err(DataShapeError::MissingBlock { account, block }) => {
                assert_eq!(account, "acct2.5678");
                assert_eq!(block, "defenses");
            }
            other => panic!("expected MissingBlock, got {other:?}"),
        }
    }

    #[test]
    fn missing_enemy_summary_is_an_error() {
        let mut doc = fixture();
        doc.targets.clear();
        assert!(matches!(extract(&doc), Err(DataShapeError::MissingTarget)));
    }

    #[test]
    fn buff_entry_without_data_is_an_error() {
        let mut doc = fixture();
        doc.players[0]
            .buff_uptimes
            .iter_mut()
            .find(|b| b.id == STABILITY_BUFF_ID)
            .unwrap()
            .buff_data
            .clear();
        assert!(matches!(
            extract(&doc),
            Err(DataShapeError::EmptyBuffData { buff_id: STABILITY_BUFF_ID, .. })
        ));
    }

    #[test]
    fn document_without_players_array_fails_to_parse() {
        let err = FightDocument::from_json(r#"{"fightName": "x", "duration": "0s"}"#);
        assert!(matches!(err, Err(DataShapeError::Json(_))));
    }
}
