//! JSON persistence for tournaments.
//!
//! A saved tournament holds `players`, `matches` and a derived `scores` map:
//! ```text
//! {
//!   "id": "…", "name": "…", "created_at": "…",
//!   "players": ["Ann", "Bob", …],
//!   "matches": [{ "round": 1, "match_number": 1, "player_a": "Ann", … }, …],
//!   "scores": { "Ann": { "wins": 1, "losses": 0, "points_for": 10, "points_against": 8 }, … }
//! }
//! ```
//! `scores` is written for readers of the file only. Loading rebuilds it from `matches`.

use crate::logic::{compute_standings, validate_players};
use crate::models::{GameMatch, PlayerName, ScoreTotals, Tournament, TournamentError, TournamentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// On-disk shape of a tournament.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedTournament {
    pub id: TournamentId,
    #[serde(default)]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub players: Vec<PlayerName>,
    pub matches: Vec<GameMatch>,
    #[serde(default)]
    pub scores: BTreeMap<PlayerName, ScoreTotals>,
}

impl SavedTournament {
    pub fn from_tournament(t: &Tournament) -> Self {
        let scores = t
            .standings()
            .into_iter()
            .map(|r| {
                let totals = r.totals();
                (r.player, totals)
            })
            .collect();
        Self {
            id: t.id,
            name: t.name.clone(),
            created_at: t.created_at,
            players: t.players.clone(),
            matches: t.matches.clone(),
            scores,
        }
    }

    /// Validate the document and rebuild the tournament from it.
    pub fn into_tournament(self) -> Result<Tournament, TournamentError> {
        let players =
            validate_players(&self.players).map_err(|e| TournamentError::CorruptData(e.to_string()))?;
        if players != self.players {
            return Err(TournamentError::CorruptData(
                "player names have surrounding whitespace".to_string(),
            ));
        }
        validate_matches(&players, &self.matches)?;

        for record in compute_standings(&players, &self.matches) {
            let stored = self.scores.get(&record.player);
            if stored != Some(&record.totals()) {
                log::warn!(
                    "Tournament {}: stored scores for {} disagree with matches, using recomputed totals",
                    self.id,
                    record.player
                );
            }
        }

        Ok(Tournament {
            id: self.id,
            name: self.name,
            players,
            matches: self.matches,
            created_at: self.created_at,
        })
    }
}

/// Check a match list is a complete single round-robin over `players`, with nobody
/// playing twice in the same round.
fn validate_matches(players: &[PlayerName], matches: &[GameMatch]) -> Result<(), TournamentError> {
    let known: HashSet<&str> = players.iter().map(|p| p.as_str()).collect();
    let mut pairs = HashSet::new();
    let mut slots = HashSet::new();
    let mut seated = HashSet::new();

    for m in matches {
        if m.round == 0 || m.match_number == 0 {
            return Err(TournamentError::CorruptData(format!(
                "round {} match {}: numbers are 1-based",
                m.round, m.match_number
            )));
        }
        if !slots.insert((m.round, m.match_number)) {
            return Err(TournamentError::CorruptData(format!(
                "round {} match {} appears twice",
                m.round, m.match_number
            )));
        }
        for p in [&m.player_a, &m.player_b] {
            if !known.contains(p.as_str()) {
                return Err(TournamentError::CorruptData(format!("unknown player {}", p)));
            }
        }
        if m.player_a == m.player_b {
            return Err(TournamentError::CorruptData(format!("{} is paired with themselves", m.player_a)));
        }
        for p in [&m.player_a, &m.player_b] {
            if !seated.insert((m.round, p.as_str())) {
                return Err(TournamentError::CorruptData(format!(
                    "{} plays twice in round {}",
                    p, m.round
                )));
            }
        }
        let pair = if m.player_a < m.player_b {
            (m.player_a.as_str(), m.player_b.as_str())
        } else {
            (m.player_b.as_str(), m.player_a.as_str())
        };
        if !pairs.insert(pair) {
            return Err(TournamentError::CorruptData(format!(
                "{} and {} are scheduled twice",
                pair.0, pair.1
            )));
        }
    }

    let n = players.len();
    let expected = n * (n - 1) / 2;
    if matches.len() != expected {
        return Err(TournamentError::CorruptData(format!(
            "expected {} matches for {} players, found {}",
            expected,
            n,
            matches.len()
        )));
    }
    Ok(())
}

/// Serialize a tournament to pretty JSON.
pub fn to_json(t: &Tournament) -> Result<String, TournamentError> {
    Ok(serde_json::to_string_pretty(&SavedTournament::from_tournament(t))?)
}

/// Parse and validate a tournament from JSON.
pub fn from_json(json: &str) -> Result<Tournament, TournamentError> {
    let saved: SavedTournament = serde_json::from_str(json)?;
    saved.into_tournament()
}

/// Directory of saved tournaments, one `<id>.json` file each.
pub struct TournamentStore {
    base_dir: PathBuf,
}

impl TournamentStore {
    /// Open a store, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, TournamentError> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, id: TournamentId) -> PathBuf {
        self.base_dir.join(format!("{}.json", id))
    }

    pub fn save(&self, t: &Tournament) -> Result<(), TournamentError> {
        let json = to_json(t)?;
        std::fs::write(self.path_for(t.id), json)?;
        log::debug!("Saved tournament {} to {}", t.id, self.base_dir.display());
        Ok(())
    }

    /// Load one tournament. None if no file exists for `id`.
    pub fn load(&self, id: TournamentId) -> Result<Option<Tournament>, TournamentError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path)?;
        from_json(&json).map(Some)
    }

    /// Load every readable tournament in the directory. Files that fail validation are skipped.
    pub fn load_all(&self) -> Result<Vec<Tournament>, TournamentError> {
        let mut tournaments = Vec::new();
        for entry in std::fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let loaded = std::fs::read_to_string(&path)
                .map_err(TournamentError::from)
                .and_then(|json| from_json(&json));
            match loaded {
                Ok(t) => tournaments.push(t),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        Ok(tournaments)
    }

    /// Remove a saved tournament. Returns false if there was nothing to remove.
    pub fn delete(&self, id: TournamentId) -> Result<bool, TournamentError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }
}
