//! Round-robin tournament tracker: library with models, scheduling, standings and storage.

pub mod api;
pub mod config;
pub mod export;
pub mod logic;
pub mod models;
pub mod storage;

pub use config::ServerConfig;
pub use export::standings_csv;
pub use logic::{
    compute_standings, create_shuffled_tournament, create_tournament, flatten_rounds, parse_score,
    ranked, record_result, record_round_results, schedule, schedule_shuffled, validate_players,
    Round, ScoreEntry,
};
pub use models::{
    GameMatch, MatchState, PlayerName, PlayerRecord, ScoreTotals, Tournament, TournamentError,
    TournamentId, TournamentPhase,
};
pub use storage::{SavedTournament, TournamentStore};
