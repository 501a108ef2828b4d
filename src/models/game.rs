//! A single scheduled match between two players and its result.

use crate::models::player::PlayerName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a match is in its lifecycle. Derived from `completed`, never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// Generated by the scheduler, 0-0, no result yet.
    Scheduled,
    /// A result has been entered (possibly corrected since).
    Recorded,
}

/// One match of the round-robin.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    /// 1-based round number.
    pub round: u32,
    /// 1-based position within the round.
    pub match_number: u32,
    pub player_a: PlayerName,
    pub player_b: PlayerName,
    pub score_a: u32,
    pub score_b: u32,
    pub completed: bool,
    /// Time of the latest recording. None while scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl GameMatch {
    /// A fresh 0-0 match that has not been played.
    pub fn new(
        round: u32,
        match_number: u32,
        player_a: impl Into<PlayerName>,
        player_b: impl Into<PlayerName>,
    ) -> Self {
        Self {
            round,
            match_number,
            player_a: player_a.into(),
            player_b: player_b.into(),
            score_a: 0,
            score_b: 0,
            completed: false,
            recorded_at: None,
        }
    }

    pub fn state(&self) -> MatchState {
        if self.completed {
            MatchState::Recorded
        } else {
            MatchState::Scheduled
        }
    }

    /// Set the final score. Overwrites any earlier result instead of adding to it.
    pub fn record(&mut self, score_a: u32, score_b: u32) {
        self.score_a = score_a;
        self.score_b = score_b;
        self.completed = true;
        self.recorded_at = Some(Utc::now());
    }

    /// True if `name` plays in this match.
    pub fn involves(&self, name: &str) -> bool {
        self.player_a == name || self.player_b == name
    }
}
