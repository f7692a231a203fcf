//! Single binary web server: HTML from templates/, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! The session autosaves to DATA_FILE (default pickleball_data.json) after
//! every change and resumes from it on startup.

use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use pickleball_open_play::{
    add_player, export, fill_open_courts, resolve_winning_team, storage, submit_result,
    CourtStatus, FillOutcome, Session, SessionConfig,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory state: the one open-play session plus its autosave path.
struct SessionStore {
    session: Option<Session>,
    data_file: PathBuf,
}

type AppState = Data<RwLock<SessionStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSessionBody {
    #[serde(default = "default_max_consecutive_wins")]
    max_consecutive_wins: u32,
    #[serde(default = "default_num_courts")]
    num_courts: u32,
}

fn default_max_consecutive_wins() -> u32 {
    2
}

fn default_num_courts() -> u32 {
    3
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

/// The two winning players, as the UI knows them.
#[derive(Deserialize)]
struct SubmitResultBody {
    winners: Vec<Uuid>,
}

/// Path segment: court id (e.g. /api/session/courts/{id}/result)
#[derive(Deserialize)]
struct CourtPath {
    id: u32,
}

/// Persist after a committed mutation. Failure is logged and the in-memory
/// session continues unchanged.
fn autosave(store: &SessionStore) {
    if let Some(session) = &store.session {
        if let Err(e) = storage::save(&store.data_file, session) {
            log::warn!(
                "Autosave to {} failed: {} (session continues in memory)",
                store.data_file.display(),
                e
            );
        }
    }
}

/// Log courts still waiting on players after a mutation.
fn log_short_courts(session: &Session) {
    for court in &session.courts {
        if court.status == CourtStatus::Filling {
            log::info!(
                "Court {} awaiting players ({} seated)",
                court.id,
                court.pending.len()
            );
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pickleball-open-play",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Start a fresh session with the given config (replaces any current one).
#[post("/api/session")]
async fn api_create_session(state: AppState, body: Option<Json<CreateSessionBody>>) -> HttpResponse {
    let config = SessionConfig {
        max_consecutive_wins: body
            .as_ref()
            .map(|b| b.max_consecutive_wins)
            .unwrap_or_else(default_max_consecutive_wins),
        num_courts: body
            .as_ref()
            .map(|b| b.num_courts)
            .unwrap_or_else(default_num_courts),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.session = Some(Session::new(config));
    autosave(&g);
    HttpResponse::Ok().json(g.session.as_ref().unwrap())
}

/// Current session snapshot (404 if none started).
#[get("/api/session")]
async fn api_get_session(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.session.as_ref() {
        Some(session) => HttpResponse::Ok().json(session),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

/// Drop the session and its save file (start over).
#[delete("/api/session")]
async fn api_delete_session(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.session = None;
    if g.data_file.exists() {
        if let Err(e) = std::fs::remove_file(&g.data_file) {
            log::warn!("Could not remove {}: {}", g.data_file.display(), e);
        }
    }
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

/// Register a player; they join the back of the queue and may be seated
/// immediately if a court is open.
#[post("/api/session/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Name is empty" }));
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let store = &mut *g;
    let session = match store.session.as_mut() {
        Some(s) => s,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    match add_player(session, name) {
        Ok(_) => {
            log_short_courts(session);
            autosave(store);
            HttpResponse::Ok().json(store.session.as_ref().unwrap())
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Report a game result: the two winners stay (below the streak cap) and
/// the court refills from the queue.
#[post("/api/session/courts/{id}/result")]
async fn api_submit_result(
    state: AppState,
    path: Path<CourtPath>,
    body: Json<SubmitResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let store = &mut *g;
    let session = match store.session.as_mut() {
        Some(s) => s,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    let team = match resolve_winning_team(session, path.id, &body.winners) {
        Ok(team) => team,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    match submit_result(session, path.id, team) {
        Ok(outcome) => {
            if let FillOutcome::AwaitingPlayers { seated, missing } = outcome {
                log::info!(
                    "Court {} awaiting players ({} seated, {} more needed)",
                    path.id,
                    seated,
                    missing
                );
            }
            autosave(store);
            HttpResponse::Ok().json(store.session.as_ref().unwrap())
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Manual fill pass over all open courts (normally runs automatically on
/// arrivals and results).
#[post("/api/session/fill")]
async fn api_fill_courts(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let store = &mut *g;
    let session = match store.session.as_mut() {
        Some(s) => s,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    match fill_open_courts(session) {
        Ok(_) => {
            log_short_courts(session);
            autosave(store);
            HttpResponse::Ok().json(store.session.as_ref().unwrap())
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Game history as a CSV download.
#[get("/api/session/export/history.csv")]
async fn api_export_history(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let session = match g.session.as_ref() {
        Some(s) => s,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    match export::history_csv(session) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(bytes),
        Err(e) => {
            log::warn!("History export failed: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// Player standings as a CSV download.
#[get("/api/session/export/players.csv")]
async fn api_export_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let session = match g.session.as_ref() {
        Some(s) => s,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    match export::players_csv(session) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(bytes),
        Err(e) => {
            log::warn!("Standings export failed: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> String {
    "pickleball_data.json".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_file = PathBuf::from(std::env::var("DATA_FILE").unwrap_or_else(|_| default_data_file()));

    let session = storage::load(&data_file);
    match &session {
        Some(_) => log::info!("Resumed session from {}", data_file.display()),
        None => log::info!("No saved session at {}; starting empty", data_file.display()),
    }

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(SessionStore { session, data_file }));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_delete_session)
            .service(api_add_player)
            .service(api_submit_result)
            .service(api_fill_courts)
            .service(api_export_history)
            .service(api_export_players)
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
