//! End-to-end tests for the report pipeline
//!
//! Fight documents are either the JSON fixture or built inline with `json!`.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

use crate::context::DeliveryConfig;
use crate::fight::FightDocument;
use crate::leaderboard::{Leaderboard, MergeOutcome};
use crate::messages::{EMPTY_LEADERBOARD, INTRODUCTION, RESET_DONE};

use super::{Command, ReportError, Response, StatService};

const FIXTURE: &str = include_str!("../../test-data/wvw_fight.json");

fn backup_path(dir: &TempDir) -> PathBuf {
    dir.path().join("out").join("stat-table.txt")
}

/// Service with its backup file inside a fresh temp dir. Keep the dir alive
/// for the whole test.
fn service() -> (StatService, TempDir) {
    service_with(DeliveryConfig::default())
}

fn service_with(delivery: DeliveryConfig) -> (StatService, TempDir) {
    let dir = tempdir().unwrap();
    let service = StatService::new(Arc::new(Leaderboard::new()), delivery, backup_path(&dir));
    (service, dir)
}

fn player(account: &str, name: &str, active_ms: u64, damage: u64) -> Value {
    json!({
        "account": account,
        "name": name,
        "activeTimes": [active_ms],
        "dpsTargets": [[{ "damage": damage }]],
        "defenses": [{ "dodgeCount": 1, "downCount": 0, "deadCount": 0 }],
        "support": [{ "condiCleanse": 2, "condiCleanseSelf": 1, "boonStrips": 0 }],
        "statsAll": [{ "distToCom": 120.0 }],
        "buffUptimes": []
    })
}

fn fight(players: Vec<Value>) -> FightDocument {
    let doc = json!({
        "fightName": "Detailed WvW - Red Desert Borderlands",
        "duration": "01m 00s 000ms",
        "players": players,
        "targets": [{
            "dpsAll": [{
                "damage": 1000, "powerDamage": 600, "powerDps": 10,
                "condiDamage": 400, "condiDps": 7
            }]
        }]
    });
    serde_json::from_value(doc).expect("test document should deserialize")
}

fn fixture() -> FightDocument {
    FightDocument::from_json(FIXTURE).unwrap()
}

#[test]
fn fight_report_has_header_and_both_tables() {
    let (service, _dir) = service();
    let report = service.process_fight(&fixture()).unwrap();

    assert_eq!(
        report.header,
        "__**Reports for fight on Detailed WvW - Eternal Battlegrounds lasting 01m 30s 000ms**__"
    );
    assert_eq!(report.merge, MergeOutcome::Applied);

    assert_eq!(report.friendly_chunks.len(), 1);
    assert!(report.friendly_chunks[0].starts_with("Squad Stat Table 1 of 1\n```\nCharacter"));
    assert!(report.friendly_chunks[0].contains("CharA"));
    assert!(report.friendly_chunks[0].contains("CharZ"));

    assert_eq!(report.enemy_chunks.len(), 1);
    assert!(report.enemy_chunks[0].starts_with("Stats for Enemy Players as a whole.\n```\nName"));
    assert!(report.enemy_chunks[0].contains("Enemy Players"));
}

#[test]
fn fight_is_merged_into_leaderboard() {
    let (service, _dir) = service();
    service.process_fight(&fixture()).unwrap();

    let board = service.leaderboard();
    assert_eq!(board.len(), 2);
    assert_eq!(board.get("acct1.1234").unwrap().damage, 100_000);
    assert_eq!(board.get("acct2.5678").unwrap().damage, 45_000);
}

#[test]
fn malformed_fight_leaves_leaderboard_untouched() {
    let (service, _dir) = service();
    let mut broken = player("acct2", "Broken", 1000, 10);
    broken["defenses"] = json!([]);
    let doc = fight(vec![player("acct1", "Fine", 1000, 10), broken]);

    let result = service.process_fight(&doc);

    assert!(matches!(result, Err(ReportError::DataShape(_))));
    assert!(service.leaderboard().is_empty());
}

#[tokio::test]
async fn two_fights_accumulate_into_one_account() {
    let (service, _dir) = service();
    service
        .process_fight(&fight(vec![player("acct1", "CharA", 60_000, 100_000)]))
        .unwrap();
    service
        .process_fight(&fight(vec![player("acct1", "CharB", 30_000, 50_000)]))
        .unwrap();

    let stat = service.leaderboard().get("acct1").unwrap();
    assert_eq!(stat.damage, 150_000);
    assert_eq!(stat.active_ms, 90_000);
    assert_eq!(stat.characters, vec!["CharA", "CharB"]);

    let report = service.render_leaderboard(None).await.unwrap();
    assert_eq!(report.messages.len(), 1);
    let table = &report.messages[0];
    assert!(table.starts_with("Stat Table 1 of 1\n```\nAccount"));
    assert!(table.contains("1667"));
    assert!(table.contains("150000"));
    assert!(table.contains("CharB , CharA"));
}

#[tokio::test]
async fn leaderboard_render_writes_backup() {
    let (service, _dir) = service();
    service.process_fight(&fixture()).unwrap();

    let report = service.render_leaderboard(Some("strips")).await.unwrap();

    let path = report.backup.expect("backup should be written");
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("Account"));
    assert!(written.contains("acct1.1234"));
    assert!(!written.contains("```"));

    // Sorted by strips: acct2 (21) before acct1 (5)
    let acct1 = written.find("acct1.1234").unwrap();
    let acct2 = written.find("acct2.5678").unwrap();
    assert!(acct2 < acct1);
}

#[tokio::test]
async fn large_leaderboard_spans_several_messages() {
    let (service, _dir) = service();
    let players = (0..60)
        .map(|i| player(&format!("account{i:02}.1234"), &format!("Character {i}"), 60_000, 1000 + i))
        .collect();
    service.process_fight(&fight(players)).unwrap();

    let report = service.render_leaderboard(Some("damage")).await.unwrap();
    let total = report.messages.len();
    assert!(total > 1);
    for (i, message) in report.messages.iter().enumerate() {
        assert!(message.starts_with(&format!("Stat Table {} of {total}\n", i + 1)));
        assert!(message.chars().count() <= 2000);
    }
    // Highest damage first
    assert!(report.messages[0].contains("account59.1234"));
}

#[tokio::test]
async fn empty_leaderboard_is_a_status() {
    let (service, _dir) = service();
    let response = service
        .respond(Command::RaidStats { sort: None })
        .await;
    assert_eq!(response, Response::Status(EMPTY_LEADERBOARD.to_string()));
}

#[tokio::test]
async fn raid_stats_attaches_backup() {
    let (service, dir) = service();
    service.process_fight(&fixture()).unwrap();

    match service.respond(Command::RaidStats { sort: Some("dps".into()) }).await {
        Response::Messages { messages, attachment } => {
            assert_eq!(messages.len(), 1);
            assert_eq!(attachment, Some(backup_path(&dir)));
        }
        other => panic!("expected messages, got {other:?}"),
    }
}

#[tokio::test]
async fn reset_command_clears_leaderboard() {
    let (service, _dir) = service();
    service.process_fight(&fixture()).unwrap();

    let response = service.respond(Command::Reset).await;

    assert_eq!(response, Response::Status(RESET_DONE.to_string()));
    assert!(service.leaderboard().snapshot().is_empty());
}

#[tokio::test]
async fn introduce_announces_liveness() {
    let (service, _dir) = service();
    assert_eq!(
        service.respond(Command::Introduce).await,
        Response::Status(INTRODUCTION.to_string())
    );
}

#[tokio::test]
async fn pagination_overflow_surfaces_as_status() {
    let (service, _dir) = service_with(DeliveryConfig {
        message_budget: 200,
        reserved: 50,
        ..DeliveryConfig::default()
    });
    service.leaderboard().merge(&crate::fight::FightRecord {
        account: "acct1".into(),
        character: "CharA".into(),
        active_ms: 1000,
        damage: 1,
        cleanses: 0,
        strips: 0,
        stab_uptime: 0.0,
        alac_uptime: 0.0,
        dodges: 0,
        distance: 0.0,
        downs: 0,
        deaths: 0,
        fight_time_ms: 1000,
    });

    match service.respond(Command::RaidStats { sort: None }).await {
        Response::Status(message) => assert!(message.starts_with("Could not split the table")),
        other => panic!("expected status, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_document_file_is_a_read_error() {
    let (service, _dir) = service();
    let result = service
        .process_fight_file(&PathBuf::from("/nonexistent/fight_wvw_kill.json"))
        .await;
    assert!(matches!(result, Err(ReportError::ReadDocument { .. })));
}

#[tokio::test]
async fn fight_file_is_processed() {
    let (service, dir) = service();
    let path = dir.path().join("fight_wvw_kill.json");
    std::fs::write(&path, FIXTURE).unwrap();

    let report = service.process_fight_file(&path).await.unwrap();
    assert_eq!(report.friendly_chunks.len(), 1);
    assert_eq!(service.leaderboard().len(), 2);
}
