//! REST API over the tournament engine. Mount with [`configure`] and share one [`AppState`].
//!
//! Every mutation takes the store's write lock, so draws and result recordings are serialized.
//! Errors are returned as `{"error": "..."}` with 404 for unknown ids, 500 for storage
//! failures and 400 for everything else.

use crate::logic::{
    add_participant, add_prediction, bracket_view, create_tournament, delete_tournament, draw,
    leaderboard, record_result, remove_participant, rename_participant, standings,
    tournament_details, Advancement,
};
use crate::models::{
    GameMatch, MatchId, ParticipantId, ParticipantKind, TournamentError, TournamentId,
    TournamentKind,
};
use crate::store::{MemoryStore, TournamentStore};
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Any store the handlers can share between workers.
pub type SharedStore = Box<dyn TournamentStore + Send + Sync>;

/// Shared store behind a lock.
pub type AppState = Data<RwLock<SharedStore>>;

/// State over an empty [`MemoryStore`].
pub fn new_state() -> AppState {
    state_with(MemoryStore::new())
}

pub fn state_with(store: impl TournamentStore + Send + Sync + 'static) -> AppState {
    let store: SharedStore = Box::new(store);
    Data::new(RwLock::new(store))
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(rename = "type")]
    kind: TournamentKind,
}

#[derive(Deserialize)]
struct AddParticipantBody {
    name: String,
    #[serde(rename = "type", default)]
    kind: ParticipantKind,
}

#[derive(Deserialize)]
struct RenameParticipantBody {
    name: String,
}

#[derive(Deserialize)]
struct RecordResultBody {
    winner_id: ParticipantId,
    score: String,
}

#[derive(Serialize)]
struct RecordResultResponse {
    #[serde(rename = "match")]
    game: GameMatch,
    advancement: Advancement,
}

#[derive(Deserialize)]
struct PredictionBody {
    match_id: MatchId,
    user_name: String,
    predicted_winner_id: ParticipantId,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segment: participant id (e.g. /api/participants/{id})
#[derive(Deserialize)]
struct ParticipantPath {
    id: ParticipantId,
}

/// Path segment: match id (e.g. /api/matches/{id}/result)
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else if matches!(e, TournamentError::Storage(_)) {
        log::error!("{}", e);
        HttpResponse::InternalServerError().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

fn reply<T: Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&e),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": "lock error" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-engine",
    })
}

#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(create_tournament(&mut **store, &body.name, body.kind))
}

/// All tournaments, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(store.list_tournaments())
}

/// Tournament with participants and matches (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(tournament_details(&**store, path.id))
}

/// Delete a tournament and everything that belongs to it.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(delete_tournament(&mut **store, path.id).map(|()| MessageResponse {
        message: "Tournament deleted",
    }))
}

/// Register a participant (tournament must be in Draft).
#[post("/api/tournaments/{id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddParticipantBody>,
) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(add_participant(&mut **store, path.id, &body.name, body.kind))
}

#[put("/api/participants/{id}")]
async fn api_rename_participant(
    state: AppState,
    path: Path<ParticipantPath>,
    body: Json<RenameParticipantBody>,
) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(rename_participant(&mut **store, path.id, &body.name))
}

/// Remove a participant (tournament must be in Draft).
#[delete("/api/participants/{id}")]
async fn api_remove_participant(state: AppState, path: Path<ParticipantPath>) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(remove_participant(&mut **store, path.id).map(|()| MessageResponse {
        message: "Participant removed",
    }))
}

/// Shuffle and generate the full schedule; the tournament becomes Active.
#[post("/api/tournaments/{id}/draw")]
async fn api_draw(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(draw(&mut **store, path.id, &mut rand::thread_rng()))
}

/// Record a winner and score; knockout winners move into the next round.
#[put("/api/matches/{id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let body = body.into_inner();
    let result = record_result(&mut **store, path.id, body.winner_id, body.score).and_then(
        |advancement| {
            let game = store
                .get_match(path.id)?
                .ok_or(TournamentError::MatchNotFound(path.id))?;
            Ok(RecordResultResponse { game, advancement })
        },
    );
    reply(result)
}

/// Round-robin table (group tournaments only).
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(standings(&**store, path.id))
}

#[get("/api/tournaments/{id}/bracket")]
async fn api_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(bracket_view(&**store, path.id))
}

#[post("/api/predictions")]
async fn api_add_prediction(state: AppState, body: Json<PredictionBody>) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(add_prediction(
        &mut **store,
        body.match_id,
        &body.user_name,
        body.predicted_winner_id,
    ))
}

#[get("/api/tournaments/{id}/leaderboard")]
async fn api_leaderboard(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    reply(leaderboard(&**store, path.id))
}

/// Register every route. The caller provides the [`AppState`] via `app_data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_tournament)
        .service(api_list_tournaments)
        .service(api_get_tournament)
        .service(api_delete_tournament)
        .service(api_add_participant)
        .service(api_rename_participant)
        .service(api_remove_participant)
        .service(api_draw)
        .service(api_record_result)
        .service(api_standings)
        .service(api_bracket)
        .service(api_add_prediction)
        .service(api_leaderboard);
}
