//! Result entry: validate raw scores, then record them on the tournament's matches.

use crate::models::{Tournament, TournamentError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw score entry for one match of a round, as typed by the user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub match_number: u32,
    pub score_a: String,
    pub score_b: String,
}

/// Parse a raw score: a non-negative whole number, surrounding whitespace allowed.
pub fn parse_score(raw: &str) -> Result<u32, TournamentError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| TournamentError::MalformedScoreInput(raw.to_string()))
}

/// Record the result of one match. Re-recording overwrites the earlier score.
///
/// Both scores are validated before the match is touched, so a bad input leaves it as it was.
pub fn record_result(
    tournament: &mut Tournament,
    round: u32,
    match_number: u32,
    score_a: &str,
    score_b: &str,
) -> Result<(), TournamentError> {
    if tournament.find_match(round, match_number).is_none() {
        return Err(TournamentError::MatchNotFound { round, match_number });
    }
    let a = parse_score(score_a)?;
    let b = parse_score(score_b)?;

    let m = tournament
        .find_match_mut(round, match_number)
        .ok_or(TournamentError::MatchNotFound { round, match_number })?;
    m.record(a, b);
    log::info!(
        "Recorded round {} match {}: {} {}-{} {}",
        round,
        match_number,
        m.player_a,
        a,
        b,
        m.player_b
    );
    Ok(())
}

/// Record several results of one round at once. All entries are validated first; if any
/// is bad, or a match is entered twice, nothing is recorded. Returns how many matches
/// were recorded.
pub fn record_round_results(
    tournament: &mut Tournament,
    round: u32,
    entries: &[ScoreEntry],
) -> Result<usize, TournamentError> {
    tournament.round_matches(round)?;

    let mut parsed = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();
    for entry in entries {
        if tournament.find_match(round, entry.match_number).is_none() {
            return Err(TournamentError::MatchNotFound {
                round,
                match_number: entry.match_number,
            });
        }
        if !seen.insert(entry.match_number) {
            return Err(TournamentError::RepeatedScoreEntry {
                round,
                match_number: entry.match_number,
            });
        }
        let a = parse_score(&entry.score_a)?;
        let b = parse_score(&entry.score_b)?;
        parsed.push((entry.match_number, a, b));
    }

    for &(match_number, a, b) in &parsed {
        if let Some(m) = tournament.find_match_mut(round, match_number) {
            m.record(a, b);
        }
    }
    log::info!("Recorded {} result(s) for round {}", parsed.len(), round);
    Ok(parsed.len())
}
