//! Integration tests for tournament persistence, CSV export and server config.

use round_robin_web::storage::{from_json, to_json};
use round_robin_web::{
    create_tournament, record_result, standings_csv, SavedTournament, ServerConfig, Tournament,
    TournamentError, TournamentStore,
};
use std::collections::HashMap;
use std::time::Duration;

fn played_tournament() -> Tournament {
    let mut t = create_tournament("league", &["Ann", "Bob", "Cat", "Dan", "Eve"]).unwrap();
    record_result(&mut t, 1, 1, "10", "8").unwrap();
    record_result(&mut t, 2, 2, "5", "5").unwrap();
    t
}

#[test]
fn json_round_trip_keeps_every_match_field() {
    let t = played_tournament();
    let json = to_json(&t).unwrap();
    let back = from_json(&json).unwrap();
    assert_eq!(back.id, t.id);
    assert_eq!(back.name, t.name);
    assert_eq!(back.created_at, t.created_at);
    assert_eq!(back.players, t.players);
    assert_eq!(back.matches, t.matches);
    assert_eq!(back.standings(), t.standings());
}

#[test]
fn saved_document_has_players_matches_and_scores() {
    let t = played_tournament();
    let value: serde_json::Value = serde_json::from_str(&to_json(&t).unwrap()).unwrap();
    assert_eq!(value["players"].as_array().unwrap().len(), 5);
    assert_eq!(value["matches"].as_array().unwrap().len(), 10);
    let m = &t.matches[0];
    let scores = &value["scores"][m.player_a.as_str()];
    assert_eq!(scores["wins"], 1);
    assert_eq!(scores["points_for"], 15);
}

#[test]
fn stale_scores_are_recomputed_on_load() {
    let t = played_tournament();
    let mut saved = SavedTournament::from_tournament(&t);
    for totals in saved.scores.values_mut() {
        totals.wins = 99;
    }
    let back = saved.into_tournament().unwrap();
    assert!(back.standings().iter().all(|r| r.wins <= 1));
}

#[test]
fn corrupt_documents_are_rejected() {
    let t = played_tournament();

    let mut unknown = SavedTournament::from_tournament(&t);
    unknown.matches[0].player_b = "Zed".to_string();
    assert!(matches!(unknown.into_tournament(), Err(TournamentError::CorruptData(_))));

    let mut missing = SavedTournament::from_tournament(&t);
    missing.matches.pop();
    assert!(matches!(missing.into_tournament(), Err(TournamentError::CorruptData(_))));

    let mut repeated = SavedTournament::from_tournament(&t);
    let first = repeated.matches[0].clone();
    repeated.matches[1].player_a = first.player_a;
    repeated.matches[1].player_b = first.player_b;
    assert!(matches!(repeated.into_tournament(), Err(TournamentError::CorruptData(_))));

    let mut duplicate_player = SavedTournament::from_tournament(&t);
    duplicate_player.players[1] = duplicate_player.players[0].clone();
    assert!(matches!(
        duplicate_player.into_tournament(),
        Err(TournamentError::CorruptData(_))
    ));

    assert!(matches!(from_json("{ not json"), Err(TournamentError::Serialization(_))));
}

#[test]
fn player_twice_in_one_round_is_rejected() {
    let t = create_tournament("cup", &["A", "B", "C", "D"]).unwrap();
    let mut squashed = SavedTournament::from_tournament(&t);
    for (i, m) in squashed.matches.iter_mut().enumerate() {
        m.round = 1;
        m.match_number = i as u32 + 1;
    }
    match squashed.into_tournament() {
        Err(TournamentError::CorruptData(msg)) => assert!(msg.contains("round 1"), "{msg}"),
        other => panic!("expected corrupt data, got {other:?}"),
    }
}

#[test]
fn store_saves_loads_and_deletes() {
    let tmp = tempfile::tempdir().unwrap();
    let store = TournamentStore::new(tmp.path().join("tournaments")).unwrap();
    let t = played_tournament();

    assert!(store.load(t.id).unwrap().is_none());
    store.save(&t).unwrap();
    let loaded = store.load(t.id).unwrap().unwrap();
    assert_eq!(loaded.matches, t.matches);

    let other = create_tournament("cup", &["X", "Y"]).unwrap();
    store.save(&other).unwrap();
    std::fs::write(store.base_dir().join("broken.json"), "{}").unwrap();
    std::fs::write(store.base_dir().join("notes.txt"), "ignored").unwrap();
    let mut ids: Vec<_> = store.load_all().unwrap().into_iter().map(|t| t.id).collect();
    ids.sort();
    let mut expected = vec![t.id, other.id];
    expected.sort();
    assert_eq!(ids, expected);

    assert!(store.delete(t.id).unwrap());
    assert!(!store.delete(t.id).unwrap());
    assert!(store.load(t.id).unwrap().is_none());
}

#[test]
fn standings_csv_has_header_and_ranked_rows() {
    let t = played_tournament();
    let csv = standings_csv(&t.standings()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Rank,Player,Wins,Losses,Win%,Points For,Points Against,Point Diff"
    );
    assert_eq!(lines.len(), 6);
    let winner = &t.matches[0].player_a;
    assert_eq!(lines[1], format!("1,{winner},1,0,100.0%,15,13,2"));
}

#[test]
fn config_defaults_and_overrides() {
    let defaults = ServerConfig::from_lookup(|_| None);
    assert_eq!(defaults, ServerConfig::default());
    assert_eq!(defaults.port, 8080);
    assert_eq!(defaults.host, "0.0.0.0");
    assert!(defaults.data_dir.is_none());
    assert_eq!(defaults.inactivity_timeout, Duration::from_secs(12 * 3600));

    let env: HashMap<&str, &str> = [
        ("HOST", "127.0.0.1"),
        ("PORT", "9000"),
        ("DATA_DIR", "/var/lib/rr"),
        ("INACTIVITY_HOURS", "2"),
    ]
    .into_iter()
    .collect();
    let config = ServerConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(config.data_dir.as_deref(), Some(std::path::Path::new("/var/lib/rr")));
    assert_eq!(config.inactivity_timeout, Duration::from_secs(2 * 3600));

    let bad = ServerConfig::from_lookup(|k| match k {
        "PORT" => Some("eighty".to_string()),
        "INACTIVITY_HOURS" => Some("0".to_string()),
        _ => None,
    });
    assert_eq!(bad.port, 8080);
    assert_eq!(bad.inactivity_timeout, Duration::from_secs(12 * 3600));

    let huge = ServerConfig::from_lookup(|k| match k {
        "INACTIVITY_HOURS" => Some(u64::MAX.to_string()),
        _ => None,
    });
    assert_eq!(huge.inactivity_timeout, Duration::from_secs(12 * 3600));
}
