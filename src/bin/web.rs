//! Single binary web server: JSON API over the bracket engine with in-memory storage.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 127.0.0.1), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Mutex;
use table_tennis_bracket::{
    compute_standings, generate_bracket, latest_bracket_id, record_match_update, AthleteId, AthleteProfile,
    AthleteStore, EngineError, ErrorKind, MatchId, MatchPatch, MatchStore, MemoryStore, Tournament, TournamentFormat,
    TournamentId, TournamentStore,
};

struct AppState {
    store: MemoryStore,
    /// Tournaments with a bracket generation in flight.
    generating: Mutex<HashSet<TournamentId>>,
}

type State = Data<AppState>;

/// Marks a tournament as generating until dropped.
struct GenerationGuard<'a> {
    state: &'a AppState,
    id: TournamentId,
}

impl<'a> GenerationGuard<'a> {
    fn acquire(state: &'a AppState, id: TournamentId) -> Result<Self, EngineError> {
        let mut g = state
            .generating
            .lock()
            .map_err(|_| EngineError::Store("lock error".to_string()))?;
        if !g.insert(id) {
            return Err(EngineError::GenerationInProgress(id));
        }
        Ok(Self { state, id })
    }
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut g) = self.state.generating.lock() {
            g.remove(&self.id);
        }
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    format: TournamentFormat,
    start_date: DateTime<Utc>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default = "default_max_participants")]
    max_participants: usize,
}

fn default_max_participants() -> usize {
    32
}

#[derive(Deserialize)]
struct RegisterBody {
    athlete_id: AthleteId,
}

#[derive(Deserialize)]
struct CreateAthleteBody {
    display_name: String,
}

#[derive(Deserialize)]
struct GenerateBracketBody {
    #[serde(default)]
    seeds: Option<Vec<AthleteId>>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct AthletePath {
    id: AthleteId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Map an engine error to a JSON error response with a status matching its kind.
fn error_response(e: &EngineError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string(), "kind": e.kind() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::Conflict => HttpResponse::Conflict().json(body),
        ErrorKind::TransientIo => HttpResponse::ServiceUnavailable().json(body),
    }
}

fn respond<T: serde::Serialize>(result: Result<T, EngineError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "table-tennis-bracket",
    })
}

/// Create a tournament (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: State, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut tournament = Tournament::new(body.name.trim(), body.format, body.start_date, body.max_participants);
    tournament.location = body.location;
    respond(state.store.put_tournament(tournament.clone()).map(|()| tournament))
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    let result = state
        .store
        .get_tournament(path.id)
        .await
        .and_then(|t| t.ok_or(EngineError::TournamentNotFound(path.id)));
    respond(result)
}

/// Register an existing athlete for a tournament.
#[post("/api/tournaments/{id}/participants")]
async fn api_register_participant(state: State, path: Path<TournamentPath>, body: Json<RegisterBody>) -> HttpResponse {
    respond(state.store.register_participant(path.id, body.athlete_id))
}

#[post("/api/athletes")]
async fn api_create_athlete(state: State, body: Json<CreateAthleteBody>) -> HttpResponse {
    let profile = AthleteProfile::new(body.display_name.trim());
    respond(state.store.put_athlete(profile.clone()).map(|()| profile))
}

#[get("/api/athletes/{id}")]
async fn api_get_athlete(state: State, path: Path<AthletePath>) -> HttpResponse {
    let result = state
        .store
        .get_athlete_profile(path.id)
        .await
        .and_then(|a| a.ok_or(EngineError::AthleteNotFound(path.id)));
    respond(result)
}

/// Generate a new bracket. Seeds are shuffled unless given explicitly.
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(
    state: State,
    path: Path<TournamentPath>,
    body: Option<Json<GenerateBracketBody>>,
) -> HttpResponse {
    let _guard = match GenerationGuard::acquire(&state, path.id) {
        Ok(guard) => guard,
        Err(e) => return error_response(&e),
    };
    let seeds = body.and_then(|b| b.into_inner().seeds);
    let mut rng = rand::thread_rng();
    let result = generate_bracket(&state.store, &state.store, path.id, seeds.as_deref(), &mut rng).await;
    respond(result)
}

/// All matches of a tournament, every bracket generation included.
#[get("/api/tournaments/{id}/matches")]
async fn api_list_matches(state: State, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.store.list_matches_by_tournament(path.id).await)
}

/// Update scores/status/winner of a match; completion triggers stats and advancement.
#[put("/api/matches/{id}")]
async fn api_update_match(state: State, path: Path<MatchPath>, body: Json<MatchPatch>) -> HttpResponse {
    let result = record_match_update(&state.store, &state.store, &state.store, path.id, body.into_inner()).await;
    respond(result)
}

/// Standings for the most recent bracket of a tournament.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: State, path: Path<TournamentPath>) -> HttpResponse {
    let tournament = match state.store.get_tournament(path.id).await {
        Ok(Some(t)) => t,
        Ok(None) => return error_response(&EngineError::TournamentNotFound(path.id)),
        Err(e) => return error_response(&e),
    };
    let matches = match state.store.list_matches_by_tournament(path.id).await {
        Ok(m) => m,
        Err(e) => return error_response(&e),
    };
    let current: Vec<_> = match latest_bracket_id(&matches) {
        Some(bracket_id) => matches
            .into_iter()
            .filter(|m| m.position.bracket_id == bracket_id)
            .collect(),
        None => Vec::new(),
    };
    HttpResponse::Ok().json(compute_standings(&tournament.registered_participants, &current))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppState {
        store: MemoryStore::new(),
        generating: Mutex::new(HashSet::new()),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_register_participant)
            .service(api_create_athlete)
            .service(api_get_athlete)
            .service(api_generate_bracket)
            .service(api_list_matches)
            .service(api_update_match)
            .service(api_standings)
    })
    .bind(bind)?
    .run()
    .await
}
