//! Setup phase: turn a player list into a scheduled tournament.

use crate::logic::schedule::{flatten_rounds, schedule, schedule_shuffled, validate_players};
use crate::models::{Tournament, TournamentError};
use rand::Rng;

/// Validate players and schedule every round, keeping the given seating order.
pub fn create_tournament<S: AsRef<str>>(name: &str, players: &[S]) -> Result<Tournament, TournamentError> {
    let seating = validate_players(players)?;
    let rounds = schedule(&seating)?;
    let tournament = Tournament::from_schedule(name, seating, flatten_rounds(rounds));
    log::info!(
        "Created tournament {} ({} players, {} matches)",
        tournament.id,
        tournament.players.len(),
        tournament.matches.len()
    );
    Ok(tournament)
}

/// Like `create_tournament`, but the seating (and so the draw) is shuffled with `rng`.
pub fn create_shuffled_tournament<S: AsRef<str>, R: Rng + ?Sized>(
    name: &str,
    players: &[S],
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    let (seating, rounds) = schedule_shuffled(players, rng)?;
    let tournament = Tournament::from_schedule(name, seating, flatten_rounds(rounds));
    log::info!(
        "Created tournament {} with shuffled seating ({} players)",
        tournament.id,
        tournament.players.len()
    );
    Ok(tournament)
}
