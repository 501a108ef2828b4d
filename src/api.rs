//! REST API over in-memory tournaments, optionally backed by a `TournamentStore`.
//!
//! Errors come back as `{"error": "..."}`: 404 for unknown tournaments, rounds and matches,
//! 400 for rejected input, 500 for storage failures.

use crate::export::standings_csv;
use crate::logic::{
    create_shuffled_tournament, create_tournament, ranked, record_result, record_round_results,
    ScoreEntry,
};
use crate::models::{GameMatch, PlayerRecord, Tournament, TournamentError, TournamentId, TournamentPhase};
use crate::storage::TournamentStore;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
pub struct TournamentEntry {
    pub tournament: Tournament,
    pub last_activity: Instant,
}

impl TournamentEntry {
    fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            last_activity: Instant::now(),
        }
    }
}

/// Shared server state. Writes are serialized by the lock, so standings are always
/// computed from a finished write.
pub struct AppState {
    pub tournaments: RwLock<HashMap<TournamentId, TournamentEntry>>,
    pub store: Option<TournamentStore>,
}

impl AppState {
    pub fn new(store: Option<TournamentStore>) -> Self {
        Self {
            tournaments: RwLock::new(HashMap::new()),
            store,
        }
    }

    /// Load every saved tournament into memory. Returns how many were loaded.
    pub fn restore(&self) -> Result<usize, TournamentError> {
        let Some(store) = &self.store else {
            return Ok(0);
        };
        let loaded = store.load_all()?;
        let count = loaded.len();
        let mut g = self.tournaments.write().map_err(|_| poisoned())?;
        for t in loaded {
            g.insert(t.id, TournamentEntry::new(t));
        }
        Ok(count)
    }

    /// Drop tournaments idle for at least `timeout` from memory. Saved files are kept.
    pub fn cleanup_inactive(&self, timeout: Duration) -> usize {
        let mut g = match self.tournaments.write() {
            Ok(guard) => guard,
            Err(_) => return 0,
        };
        let before = g.len();
        g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
        before - g.len()
    }

    /// Write `t` to the store, if there is one.
    pub fn persist(&self, t: &Tournament) -> Result<(), TournamentError> {
        match &self.store {
            Some(store) => store.save(t).map_err(|e| {
                log::error!("Error saving tournament {}: {}", t.id, e);
                e
            }),
            None => Ok(()),
        }
    }
}

type SharedState = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    name: String,
    players: Vec<String>,
    #[serde(default)]
    shuffle: bool,
}

/// Score as sent by a client: JSON number or string. Validated by `parse_score`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(serde_json::Number),
    Text(String),
}

impl RawScore {
    fn raw(&self) -> String {
        match self {
            RawScore::Number(n) => n.to_string(),
            RawScore::Text(s) => s.clone(),
        }
    }
}

#[derive(Deserialize)]
struct RecordResultBody {
    score_a: RawScore,
    score_b: RawScore,
}

#[derive(Deserialize)]
struct RoundResultEntry {
    match_number: u32,
    score_a: RawScore,
    score_b: RawScore,
}

#[derive(Deserialize)]
struct RecordRoundBody {
    results: Vec<RoundResultEntry>,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct RoundPath {
    id: TournamentId,
    round: u32,
}

#[derive(Deserialize)]
struct MatchPath {
    id: TournamentId,
    round: u32,
    match_number: u32,
}

#[derive(Serialize)]
struct TournamentView<'a> {
    #[serde(flatten)]
    tournament: &'a Tournament,
    phase: TournamentPhase,
    rounds: Vec<u32>,
    completed_matches: usize,
    total_matches: usize,
}

impl<'a> TournamentView<'a> {
    fn new(tournament: &'a Tournament) -> Self {
        let (completed_matches, total_matches) = tournament.progress();
        Self {
            tournament,
            phase: tournament.phase(),
            rounds: tournament.rounds(),
            completed_matches,
            total_matches,
        }
    }
}

#[derive(Serialize)]
struct RoundView<'a> {
    round: u32,
    matches: Vec<&'a GameMatch>,
    sitting_out: Vec<&'a str>,
}

/// One row of the standings table.
#[derive(Serialize)]
struct StandingRow<'a> {
    rank: usize,
    player: &'a str,
    wins: u32,
    losses: u32,
    win_pct: f64,
    points_for: u64,
    points_against: u64,
    point_diff: i64,
}

fn standing_rows(records: &[PlayerRecord]) -> Vec<StandingRow<'_>> {
    ranked(records)
        .map(|(rank, r)| StandingRow {
            rank,
            player: &r.player,
            wins: r.wins,
            losses: r.losses,
            win_pct: r.win_pct(),
            points_for: r.points_for,
            points_against: r.points_against,
            point_diff: r.point_diff(),
        })
        .collect()
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::MatchNotFound { .. } | TournamentError::RoundNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        TournamentError::Io(_) | TournamentError::Serialization(_) | TournamentError::CorruptData(_) => {
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn poisoned() -> TournamentError {
    TournamentError::Io("lock error".to_string())
}

fn blocking_failed(e: actix_web::error::BlockingError) -> TournamentError {
    TournamentError::Io(e.to_string())
}

/// Make sure tournament `id` is in memory, reading it from the store on a miss.
/// The file is read on the blocking pool with no lock held.
async fn ensure_loaded(state: &SharedState, id: TournamentId) -> Result<(), TournamentError> {
    if state.store.is_none() {
        return Ok(());
    }
    if state.tournaments.read().map_err(|_| poisoned())?.contains_key(&id) {
        return Ok(());
    }
    let reader = state.clone();
    let loaded = web::block(move || reader.store.as_ref().map(|s| s.load(id)).transpose())
        .await
        .map_err(blocking_failed)??
        .flatten();
    if let Some(t) = loaded {
        let mut g = state.tournaments.write().map_err(|_| poisoned())?;
        g.entry(id).or_insert_with(|| {
            log::info!("Reloaded tournament {} from disk", id);
            TournamentEntry::new(t)
        });
    }
    Ok(())
}

/// Save a snapshot on the blocking pool, after the write lock is released.
async fn save_snapshot(state: &SharedState, snapshot: Tournament) -> Result<(), TournamentError> {
    if state.store.is_none() {
        return Ok(());
    }
    let writer = state.clone();
    web::block(move || writer.persist(&snapshot))
        .await
        .map_err(blocking_failed)?
}

/// Run `f` on the in-memory tournament `id` under the write lock. Touching it refreshes
/// last_activity. Any failure comes back as the response to send.
fn with_tournament<R, F>(state: &AppState, id: TournamentId, f: F) -> Result<R, HttpResponse>
where
    F: FnOnce(&mut Tournament) -> Result<R, TournamentError>,
{
    let mut g = state.tournaments.write().map_err(|_| lock_error())?;
    let entry = g.get_mut(&id).ok_or_else(not_found)?;
    entry.last_activity = Instant::now();
    f(&mut entry.tournament).map_err(|e| error_response(&e))
}

/// Load if needed, then run a read-only `f` that builds the response.
async fn read_tournament<F>(state: &SharedState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> Result<HttpResponse, TournamentError>,
{
    if let Err(e) = ensure_loaded(state, id).await {
        return error_response(&e);
    }
    with_tournament(state, id, |t| f(t)).unwrap_or_else(|resp| resp)
}

/// Load if needed, apply `f`, then save the result. The client only gets 200 once the
/// change is on disk (when a store is configured).
async fn update_tournament<F>(state: &SharedState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    if let Err(e) = ensure_loaded(state, id).await {
        return error_response(&e);
    }
    let snapshot = match with_tournament(state, id, |t| f(t).map(|()| t.clone())) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let response = HttpResponse::Ok().json(TournamentView::new(&snapshot));
    match save_snapshot(state, snapshot).await {
        Ok(()) => response,
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "round-robin-web",
    })
}

/// Create and schedule a tournament (returns it with id; client stores id for later requests).
/// Nothing is kept in memory if it cannot be saved.
#[post("/api/tournaments")]
async fn api_create_tournament(state: SharedState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let created = if body.shuffle {
        create_shuffled_tournament(body.name.trim(), &body.players, &mut rand::thread_rng())
    } else {
        create_tournament(body.name.trim(), &body.players)
    };
    let tournament = match created {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    if let Err(e) = save_snapshot(&state, tournament.clone()).await {
        return error_response(&e);
    }
    let response = HttpResponse::Ok().json(TournamentView::new(&tournament));
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.insert(tournament.id, TournamentEntry::new(tournament));
    response
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    read_tournament(&state, path.id, |t| Ok(HttpResponse::Ok().json(TournamentView::new(t)))).await
}

/// Remove a tournament from memory and from disk.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    let in_memory = match state.tournaments.write() {
        Ok(mut g) => g.remove(&id).is_some(),
        Err(_) => return lock_error(),
    };
    let remover = state.clone();
    let on_disk = web::block(move || remover.store.as_ref().map(|s| s.delete(id)).transpose())
        .await
        .map_err(blocking_failed)
        .and_then(|removed| removed);
    let on_disk = match on_disk {
        Ok(removed) => removed.unwrap_or(false),
        Err(e) => return error_response(&e),
    };
    if in_memory || on_disk {
        log::info!("Deleted tournament {}", id);
        HttpResponse::NoContent().finish()
    } else {
        not_found()
    }
}

/// Matches of one round plus whoever has the bye.
#[get("/api/tournaments/{id}/rounds/{round}")]
async fn api_get_round(state: SharedState, path: Path<RoundPath>) -> HttpResponse {
    let round = path.round;
    read_tournament(&state, path.id, |t| {
        let matches = t.round_matches(round)?;
        Ok(HttpResponse::Ok().json(RoundView {
            round,
            matches,
            sitting_out: t.sitting_out(round),
        }))
    })
    .await
}

/// Record (or correct) one match result.
#[put("/api/tournaments/{id}/rounds/{round}/matches/{match_number}")]
async fn api_record_result(
    state: SharedState,
    path: Path<MatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    let (round, match_number) = (path.round, path.match_number);
    let (score_a, score_b) = (body.score_a.raw(), body.score_b.raw());
    update_tournament(&state, path.id, |t| {
        record_result(t, round, match_number, &score_a, &score_b)
    })
    .await
}

/// Record every submitted result of a round; nothing is recorded if any score is bad.
#[put("/api/tournaments/{id}/rounds/{round}")]
async fn api_record_round(
    state: SharedState,
    path: Path<RoundPath>,
    body: Json<RecordRoundBody>,
) -> HttpResponse {
    let round = path.round;
    let entries: Vec<ScoreEntry> = body
        .results
        .iter()
        .map(|r| ScoreEntry {
            match_number: r.match_number,
            score_a: r.score_a.raw(),
            score_b: r.score_b.raw(),
        })
        .collect();
    update_tournament(&state, path.id, |t| {
        record_round_results(t, round, &entries).map(|_| ())
    })
    .await
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    read_tournament(&state, path.id, |t| {
        let records = t.standings();
        Ok(HttpResponse::Ok().json(standing_rows(&records)))
    })
    .await
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    read_tournament(&state, path.id, |t| {
        let csv = standings_csv(&t.standings())?;
        Ok(HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(csv))
    })
    .await
}

/// Register every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_tournament)
        .service(api_standings_csv)
        .service(api_standings)
        .service(api_get_round)
        .service(api_record_result)
        .service(api_record_round)
        .service(api_get_tournament)
        .service(api_delete_tournament);
}
