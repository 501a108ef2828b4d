//! Standings: per-player records rebuilt from completed matches, then ranked.

use crate::models::{GameMatch, PlayerName, PlayerRecord};
use std::collections::HashMap;

/// Compute ranked standings for `players` from `matches`.
///
/// Every listed player gets a record, even with nothing played. Only completed matches count,
/// and matches naming someone outside `players` are skipped. A strictly higher score is a win;
/// equal scores add points but no win or loss.
///
/// Sorted by wins, then point differential, both descending. The sort is stable, so remaining
/// ties keep the order of `players`.
pub fn compute_standings(players: &[PlayerName], matches: &[GameMatch]) -> Vec<PlayerRecord> {
    let mut records: Vec<PlayerRecord> = players.iter().map(PlayerRecord::new).collect();
    let index: HashMap<&str, usize> = players
        .iter()
        .enumerate()
        .map(|(i, p)| (p.as_str(), i))
        .collect();

    for m in matches.iter().filter(|m| m.completed) {
        let (a, b) = match (index.get(m.player_a.as_str()), index.get(m.player_b.as_str())) {
            (Some(&a), Some(&b)) => (a, b),
            _ => {
                log::warn!(
                    "Skipping round {} match {}: {} vs {} names an unknown player",
                    m.round,
                    m.match_number,
                    m.player_a,
                    m.player_b
                );
                continue;
            }
        };
        apply_result(&mut records, a, b, m.score_a, m.score_b);
    }

    records.sort_by(|x, y| {
        y.wins
            .cmp(&x.wins)
            .then_with(|| y.point_diff().cmp(&x.point_diff()))
    });
    records
}

/// Pair each record with its 1-based rank (sort position).
pub fn ranked(records: &[PlayerRecord]) -> impl Iterator<Item = (usize, &PlayerRecord)> {
    records.iter().enumerate().map(|(i, r)| (i + 1, r))
}

fn apply_result(records: &mut [PlayerRecord], a: usize, b: usize, score_a: u32, score_b: u32) {
    records[a].add_points(score_a, score_b);
    records[b].add_points(score_b, score_a);
    if score_a > score_b {
        records[a].add_win();
        records[b].add_loss();
    } else if score_b > score_a {
        records[b].add_win();
        records[a].add_loss();
    }
}
