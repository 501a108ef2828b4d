//! Round-robin schedule generation (circle method).

use crate::models::{normalize_name, GameMatch, PlayerName, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// One round's matches, in match-number order.
pub type Round = Vec<GameMatch>;

/// Trim names and check the list can be scheduled: no empty names, no duplicates, at least 2.
pub fn validate_players<S: AsRef<str>>(players: &[S]) -> Result<Vec<PlayerName>, TournamentError> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(players.len());
    for raw in players {
        let name = normalize_name(raw.as_ref()).ok_or(TournamentError::EmptyPlayerName)?;
        if !seen.insert(name.clone()) {
            return Err(TournamentError::DuplicatePlayerName(name));
        }
        names.push(name);
    }
    if names.len() < 2 {
        return Err(TournamentError::NotEnoughPlayers);
    }
    Ok(names)
}

/// Generate every round of a single round-robin for `players`, in seating order.
///
/// Player 0 stays fixed while the rest rotate one position per round. Each round pairs the
/// fixed seat with the seat opposite it and the remaining seats by symmetric offset from
/// both ends. Odd player counts get an empty seat: whoever faces it has a bye that round,
/// and no match is emitted for it.
///
/// Even N gives N-1 rounds of N/2 matches; odd N gives N rounds of (N-1)/2 matches.
/// Output is deterministic for the same input. Every match starts 0-0 and not completed.
pub fn schedule<S: AsRef<str>>(players: &[S]) -> Result<Vec<Round>, TournamentError> {
    let names = validate_players(players)?;
    Ok(circle_rounds(&names))
}

/// Shuffle the seating with `rng`, then schedule. Returns the seating order used.
pub fn schedule_shuffled<S: AsRef<str>, R: Rng + ?Sized>(
    players: &[S],
    rng: &mut R,
) -> Result<(Vec<PlayerName>, Vec<Round>), TournamentError> {
    let mut names = validate_players(players)?;
    names.shuffle(rng);
    let rounds = circle_rounds(&names);
    Ok((names, rounds))
}

/// Concatenate rounds into the flat list a tournament stores.
pub fn flatten_rounds(rounds: Vec<Round>) -> Vec<GameMatch> {
    rounds.into_iter().flatten().collect()
}

fn circle_rounds(names: &[PlayerName]) -> Vec<Round> {
    // None is the bye seat.
    let mut seats: Vec<Option<usize>> = (0..names.len()).map(Some).collect();
    if seats.len() % 2 == 1 {
        seats.push(None);
    }
    let size = seats.len();
    let fixed = seats[0];
    let mut circle: Vec<Option<usize>> = seats[1..].to_vec();

    let mut rounds = Vec::with_capacity(size - 1);
    for round_idx in 0..size - 1 {
        let round = round_idx as u32 + 1;
        let table: Vec<Option<usize>> = std::iter::once(fixed).chain(circle.iter().copied()).collect();

        let mut matches = Vec::with_capacity(size / 2);
        for i in 0..size / 2 {
            let (a, b) = match (table[i], table[size - 1 - i]) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };
            if a == b {
                continue;
            }
            let match_number = matches.len() as u32 + 1;
            matches.push(GameMatch::new(round, match_number, &names[a], &names[b]));
        }
        log::debug!("Scheduled round {} with {} match(es)", round, matches.len());
        rounds.push(matches);

        circle.rotate_right(1);
    }
    rounds
}
