//! Integration tests for schedule generation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use round_robin_web::{
    create_shuffled_tournament, create_tournament, flatten_rounds, schedule, schedule_shuffled,
    GameMatch, MatchState, TournamentError, TournamentPhase,
};
use std::collections::{HashMap, HashSet};

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

fn pair_key(m: &GameMatch) -> (String, String) {
    if m.player_a < m.player_b {
        (m.player_a.clone(), m.player_b.clone())
    } else {
        (m.player_b.clone(), m.player_a.clone())
    }
}

#[test]
fn four_players_give_three_rounds_of_two() {
    let rounds = schedule(&["A", "B", "C", "D"]).unwrap();
    assert_eq!(rounds.len(), 3);
    for r in &rounds {
        assert_eq!(r.len(), 2);
    }
    let all = flatten_rounds(rounds);
    assert_eq!(all.len(), 6);
    for p in ["A", "B", "C", "D"] {
        assert_eq!(all.iter().filter(|m| m.involves(p)).count(), 3);
    }
}

#[test]
fn every_pair_meets_exactly_once() {
    for n in 2..=12 {
        let players = names(n);
        let rounds = schedule(&players).unwrap();
        let all = flatten_rounds(rounds.clone());
        assert_eq!(all.len(), n * (n - 1) / 2, "n = {n}");

        let pairs: HashSet<_> = all.iter().map(pair_key).collect();
        assert_eq!(pairs.len(), all.len(), "n = {n}: a pair was scheduled twice");

        let mut appearances: HashMap<&str, usize> = HashMap::new();
        for m in &all {
            assert_ne!(m.player_a, m.player_b);
            *appearances.entry(m.player_a.as_str()).or_default() += 1;
            *appearances.entry(m.player_b.as_str()).or_default() += 1;
        }
        for p in &players {
            assert_eq!(appearances[p.as_str()], n - 1, "n = {n}, player {p}");
        }

        for round in &rounds {
            assert!(round.len() <= n / 2);
            let mut seen = HashSet::new();
            for m in round {
                assert!(seen.insert(&m.player_a), "n = {n}: {} twice in a round", m.player_a);
                assert!(seen.insert(&m.player_b), "n = {n}: {} twice in a round", m.player_b);
            }
        }
    }
}

#[test]
fn round_and_match_numbers_have_no_gaps() {
    for n in [2, 5, 6, 7, 8] {
        let rounds = schedule(&names(n)).unwrap();
        let expected_rounds = if n % 2 == 0 { n - 1 } else { n };
        assert_eq!(rounds.len(), expected_rounds);
        for (i, round) in rounds.iter().enumerate() {
            for (j, m) in round.iter().enumerate() {
                assert_eq!(m.round as usize, i + 1);
                assert_eq!(m.match_number as usize, j + 1);
            }
        }
    }
}

#[test]
fn odd_count_gives_each_player_one_bye() {
    let players = names(7);
    let rounds = schedule(&players).unwrap();
    assert_eq!(rounds.len(), 7);
    let mut byes: HashMap<&str, usize> = HashMap::new();
    for round in &rounds {
        assert_eq!(round.len(), 3);
        let sitting: Vec<&String> = players
            .iter()
            .filter(|p| !round.iter().any(|m| m.involves(p)))
            .collect();
        assert_eq!(sitting.len(), 1);
        *byes.entry(sitting[0].as_str()).or_default() += 1;
    }
    assert!(players.iter().all(|p| byes[p.as_str()] == 1));
}

#[test]
fn new_matches_are_unplayed() {
    let all = flatten_rounds(schedule(&names(5)).unwrap());
    for m in &all {
        assert_eq!((m.score_a, m.score_b), (0, 0));
        assert!(!m.completed);
        assert_eq!(m.state(), MatchState::Scheduled);
        assert!(m.recorded_at.is_none());
    }
}

#[test]
fn same_input_same_schedule() {
    let players = names(6);
    assert_eq!(schedule(&players).unwrap(), schedule(&players).unwrap());
}

#[test]
fn fixed_seat_meets_the_rest_in_reverse_order() {
    let rounds = schedule(&["A", "B", "C", "D"]).unwrap();
    let first: Vec<(&str, &str)> = rounds
        .iter()
        .map(|r| (r[0].player_a.as_str(), r[0].player_b.as_str()))
        .collect();
    assert_eq!(first, vec![("A", "D"), ("A", "C"), ("A", "B")]);
}

#[test]
fn rejects_too_few_players() {
    assert_eq!(schedule::<&str>(&[]), Err(TournamentError::NotEnoughPlayers));
    assert_eq!(schedule(&["Solo"]), Err(TournamentError::NotEnoughPlayers));
}

#[test]
fn rejects_duplicate_and_empty_names() {
    let dup = schedule(&["Ann", "Bob", " Ann "]).unwrap_err();
    assert_eq!(dup, TournamentError::DuplicatePlayerName("Ann".to_string()));
    assert!(dup.is_invalid_input());

    let empty = schedule(&["Ann", "  ", "Bob"]).unwrap_err();
    assert_eq!(empty, TournamentError::EmptyPlayerName);
    assert!(empty.is_invalid_input());
}

#[test]
fn names_are_trimmed() {
    let all = flatten_rounds(schedule(&["  Ann", "Bob  "]).unwrap());
    assert_eq!(all.len(), 1);
    assert!(all[0].involves("Ann"));
    assert!(all[0].involves("Bob"));
}

#[test]
fn shuffled_schedule_is_reproducible_with_a_seed() {
    let players = names(8);
    let (seating_1, rounds_1) = schedule_shuffled(&players, &mut StdRng::seed_from_u64(7)).unwrap();
    let (seating_2, rounds_2) = schedule_shuffled(&players, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(seating_1, seating_2);
    assert_eq!(rounds_1, rounds_2);

    let mut sorted = seating_1.clone();
    sorted.sort();
    let mut expected = players.clone();
    expected.sort();
    assert_eq!(sorted, expected);
    assert_eq!(flatten_rounds(rounds_1).len(), 28);
}

#[test]
fn create_tournament_schedules_everything() {
    let t = create_tournament("Club night", &["Ann", "Bob", "Cat"]).unwrap();
    assert_eq!(t.name, "Club night");
    assert_eq!(t.players, vec!["Ann", "Bob", "Cat"]);
    assert_eq!(t.matches.len(), 3);
    assert_eq!(t.rounds(), vec![1, 2, 3]);
    assert_eq!(t.phase(), TournamentPhase::InProgress);
    assert_eq!(t.progress(), (0, 3));
    for round in t.rounds() {
        assert_eq!(t.sitting_out(round).len(), 1);
        assert_eq!(t.round_matches(round).unwrap().len(), 1);
    }
    assert_eq!(t.round_matches(4), Err(TournamentError::RoundNotFound(4)));
}

#[test]
fn create_shuffled_tournament_keeps_all_players() {
    let t = create_shuffled_tournament("", &names(5), &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(t.players.len(), 5);
    assert_eq!(t.matches.len(), 10);
}

#[test]
fn create_tournament_rejects_bad_players() {
    assert!(create_tournament("x", &["Ann", "Ann"]).unwrap_err().is_invalid_input());
}
