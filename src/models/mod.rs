//! Data structures for the round-robin: players, matches, tournament.

mod game;
mod player;
mod tournament;

pub use game::{GameMatch, MatchState};
pub use player::{normalize_name, PlayerName, PlayerRecord, ScoreTotals};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentPhase};
