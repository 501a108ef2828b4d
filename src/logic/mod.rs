//! Tournament business logic: setup, scheduling, results, standings.

mod results;
mod schedule;
mod setup;
mod standings;

pub use results::{parse_score, record_result, record_round_results, ScoreEntry};
pub use schedule::{flatten_rounds, schedule, schedule_shuffled, validate_players, Round};
pub use setup::{create_shuffled_tournament, create_tournament};
pub use standings::{compute_standings, ranked};
