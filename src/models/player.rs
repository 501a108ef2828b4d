//! Player names and the derived PlayerRecord used for standings.

use serde::{Deserialize, Serialize};

/// A player is identified by their display name (unique within a tournament).
pub type PlayerName = String;

/// Per-player statistics accumulated from completed matches.
///
/// Never stored as the source of truth: standings rebuild these from the match list
/// every time, so a corrected score cannot leave stale totals behind.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player: PlayerName,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u64,
    pub points_against: u64,
}

impl PlayerRecord {
    /// Zeroed record for a player with no completed matches.
    pub fn new(player: impl Into<PlayerName>) -> Self {
        Self {
            player: player.into(),
            ..Self::default()
        }
    }

    /// Record a win for this player.
    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    /// Record a loss for this player.
    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    /// Add one match's points scored and conceded.
    pub fn add_points(&mut self, scored: u32, conceded: u32) {
        self.points_for += u64::from(scored);
        self.points_against += u64::from(conceded);
    }

    /// Decided matches only; drawn matches count toward neither.
    pub fn decided(&self) -> u32 {
        self.wins + self.losses
    }

    /// Wins as a percentage of decided matches, 0 when nothing has been decided.
    pub fn win_pct(&self) -> f64 {
        match self.decided() {
            0 => 0.0,
            decided => f64::from(self.wins) / f64::from(decided) * 100.0,
        }
    }

    pub fn point_diff(&self) -> i64 {
        self.points_for as i64 - self.points_against as i64
    }

    /// Totals without the name, as written under `scores` in a saved tournament.
    pub fn totals(&self) -> ScoreTotals {
        ScoreTotals {
            wins: self.wins,
            losses: self.losses,
            points_for: self.points_for,
            points_against: self.points_against,
        }
    }
}

/// Score totals keyed by player name in the persisted `scores` map.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreTotals {
    pub wins: u32,
    pub losses: u32,
    pub points_for: u64,
    pub points_against: u64,
}

/// Trim a raw name and reject it if nothing is left.
pub fn normalize_name(raw: &str) -> Option<PlayerName> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
