//! Tournament aggregate and TournamentError.

use crate::models::game::GameMatch;
use crate::models::player::{PlayerName, PlayerRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A player name is empty (or only whitespace).
    EmptyPlayerName,
    /// The same name appears twice in the player list.
    DuplicatePlayerName(PlayerName),
    /// A round-robin needs at least 2 players.
    NotEnoughPlayers,
    /// A score is not a non-negative integer. Holds the raw input.
    MalformedScoreInput(String),
    /// No match with this round / match number.
    MatchNotFound { round: u32, match_number: u32 },
    /// The same match is given twice in one round submission.
    RepeatedScoreEntry { round: u32, match_number: u32 },
    /// No matches are scheduled in this round.
    RoundNotFound(u32),
    /// A saved tournament failed validation on load.
    CorruptData(String),
    /// Reading or writing a tournament file failed.
    Io(String),
    /// JSON or CSV encoding failed.
    Serialization(String),
}

impl TournamentError {
    /// Rejected player list (the scheduler generated nothing).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            TournamentError::EmptyPlayerName
                | TournamentError::DuplicatePlayerName(_)
                | TournamentError::NotEnoughPlayers
        )
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyPlayerName => write!(f, "All player names must be filled"),
            TournamentError::DuplicatePlayerName(name) => {
                write!(f, "Player names must be unique ({} appears twice)", name)
            }
            TournamentError::NotEnoughPlayers => write!(f, "Need at least 2 players to schedule a round-robin"),
            TournamentError::MalformedScoreInput(raw) => {
                write!(f, "Scores must be non-negative whole numbers (got {:?})", raw)
            }
            TournamentError::MatchNotFound { round, match_number } => {
                write!(f, "No match {} in round {}", match_number, round)
            }
            TournamentError::RepeatedScoreEntry { round, match_number } => {
                write!(f, "Match {} of round {} is entered more than once", match_number, round)
            }
            TournamentError::RoundNotFound(round) => write!(f, "No round {}", round),
            TournamentError::CorruptData(msg) => write!(f, "Corrupt tournament data: {}", msg),
            TournamentError::Io(msg) => write!(f, "I/O error: {}", msg),
            TournamentError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<std::io::Error> for TournamentError {
    fn from(e: std::io::Error) -> Self {
        TournamentError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for TournamentError {
    fn from(e: serde_json::Error) -> Self {
        TournamentError::Serialization(e.to_string())
    }
}

impl From<csv::Error> for TournamentError {
    fn from(e: csv::Error) -> Self {
        TournamentError::Serialization(e.to_string())
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase, derived from the match list.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// No matches scheduled yet.
    Setup,
    /// At least one match still has no result.
    InProgress,
    /// Every match has a result.
    Completed,
}

/// A scheduled round-robin: the player list and every match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Players in seating order. Standings ties keep this order.
    pub players: Vec<PlayerName>,
    /// All matches, ordered by round then match number.
    pub matches: Vec<GameMatch>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Wrap an already validated player list and its schedule.
    pub fn from_schedule(name: impl Into<String>, players: Vec<PlayerName>, matches: Vec<GameMatch>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            players,
            matches,
            created_at: Utc::now(),
        }
    }

    /// Distinct round numbers, ascending.
    pub fn rounds(&self) -> Vec<u32> {
        let mut rounds: Vec<u32> = self.matches.iter().map(|m| m.round).collect();
        rounds.sort_unstable();
        rounds.dedup();
        rounds
    }

    /// Matches of one round in match-number order.
    pub fn round_matches(&self, round: u32) -> Result<Vec<&GameMatch>, TournamentError> {
        let mut matches: Vec<&GameMatch> = self.matches.iter().filter(|m| m.round == round).collect();
        if matches.is_empty() {
            return Err(TournamentError::RoundNotFound(round));
        }
        matches.sort_by_key(|m| m.match_number);
        Ok(matches)
    }

    pub fn find_match(&self, round: u32, match_number: u32) -> Option<&GameMatch> {
        self.matches
            .iter()
            .find(|m| m.round == round && m.match_number == match_number)
    }

    pub fn find_match_mut(&mut self, round: u32, match_number: u32) -> Option<&mut GameMatch> {
        self.matches
            .iter_mut()
            .find(|m| m.round == round && m.match_number == match_number)
    }

    /// Players with no match in `round` (the bye, for odd player counts).
    pub fn sitting_out(&self, round: u32) -> Vec<&str> {
        self.players
            .iter()
            .filter(|p| !self.matches.iter().any(|m| m.round == round && m.involves(p)))
            .map(|p| p.as_str())
            .collect()
    }

    /// Ranked standings, recomputed from the match list.
    pub fn standings(&self) -> Vec<PlayerRecord> {
        crate::logic::compute_standings(&self.players, &self.matches)
    }

    /// (completed, total) match counts.
    pub fn progress(&self) -> (usize, usize) {
        let completed = self.matches.iter().filter(|m| m.completed).count();
        (completed, self.matches.len())
    }

    pub fn phase(&self) -> TournamentPhase {
        match self.progress() {
            (_, 0) => TournamentPhase::Setup,
            (done, total) if done == total => TournamentPhase::Completed,
            _ => TournamentPhase::InProgress,
        }
    }
}
