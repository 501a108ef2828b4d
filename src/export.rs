//! CSV export of the standings table.

use crate::logic::ranked;
use crate::models::{PlayerRecord, TournamentError};

pub const STANDINGS_HEADER: [&str; 8] = [
    "Rank",
    "Player",
    "Wins",
    "Losses",
    "Win%",
    "Points For",
    "Points Against",
    "Point Diff",
];

/// Render already-ranked records as CSV, one row per player in rank order.
pub fn standings_csv(records: &[PlayerRecord]) -> Result<String, TournamentError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(STANDINGS_HEADER)?;
    for (rank, r) in ranked(records) {
        writer.write_record([
            rank.to_string(),
            r.player.clone(),
            r.wins.to_string(),
            r.losses.to_string(),
            format!("{:.1}%", r.win_pct()),
            r.points_for.to_string(),
            r.points_against.to_string(),
            r.point_diff().to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TournamentError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TournamentError::Serialization(e.to_string()))
}
