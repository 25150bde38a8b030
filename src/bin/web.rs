//! Single binary web server: JSON API over in-memory tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use elimination_tournament::{
    apply_game_action, import_seeds_csv, next_up, record_game_result, set_game_slot,
    start_tournament, tick_games, BracketEvent, GameAction, GameId, SeedingMode, SeedingType, Settings, Slot, SlotSide, TeamId,
    Tournament, TournamentError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct NewTeamBody {
    name: String,
    #[serde(default)]
    seed: Option<u32>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    seeding_mode: SeedingMode,
    #[serde(default)]
    seeding_type: SeedingType,
    #[serde(default)]
    teams: Vec<NewTeamBody>,
}

fn default_name() -> String {
    "Tournament".to_string()
}

#[derive(Deserialize)]
struct SetSeedBody {
    seed: Option<u32>,
}

/// Seeding fields left out of the body keep their current values.
#[derive(Deserialize)]
struct SetSettingsBody {
    settings: Settings,
    #[serde(default)]
    seeding_mode: Option<SeedingMode>,
    #[serde(default)]
    seeding_type: Option<SeedingType>,
}

fn apply_settings(t: &mut Tournament, body: SetSettingsBody) -> Result<(), TournamentError> {
    let mode = body.seeding_mode.unwrap_or(t.seeding_mode);
    let seeding_type = body.seeding_type.unwrap_or(t.seeding_type);
    t.set_settings(body.settings)?;
    t.set_seeding(mode, seeding_type)
}

#[derive(Deserialize)]
struct FinishGameBody {
    winner: TeamId,
    #[serde(default)]
    score_a: u32,
    #[serde(default)]
    score_b: u32,
}

#[derive(Deserialize)]
struct SetSlotBody {
    side: SlotSide,
    slot: Slot,
}

#[derive(Deserialize)]
struct GameActionBody {
    action: GameAction,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and team id (e.g. /api/tournaments/{id}/teams/{team_id})
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

/// Path segments: tournament id and game id (e.g. /api/tournaments/{id}/games/{game_id})
#[derive(Deserialize)]
struct TournamentGamePath {
    id: TournamentId,
    game_id: GameId,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Lock state, touch the entry, and apply `f`. Responds with the tournament, plus the
/// engine events when `f` produced any.
fn update<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<Option<Vec<BracketEvent>>, TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match f(&mut *t) {
        Ok(None) => HttpResponse::Ok().json(&*t),
        Ok(Some(events)) => {
            HttpResponse::Ok().json(serde_json::json!({ "events": events, "tournament": &*t }))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "elimination-tournament",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Option<Json<CreateTournamentBody>>) -> HttpResponse {
    let body = body.map(Json::into_inner).unwrap_or_else(|| CreateTournamentBody {
        name: default_name(),
        settings: Settings::default(),
        seeding_mode: SeedingMode::default(),
        seeding_type: SeedingType::default(),
        teams: Vec::new(),
    });
    let mut tournament = Tournament::new(body.name, body.settings);
    tournament.seeding_mode = body.seeding_mode;
    tournament.seeding_type = body.seeding_type;
    for team in body.teams {
        if let Err(e) = tournament.add_team(team.name, team.seed) {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
        }
    }
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update(&state, path.id, |_| Ok(None))
}

/// Add a team (tournament must be in Setup).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<TournamentPath>, body: Json<NewTeamBody>) -> HttpResponse {
    let body = body.into_inner();
    update(&state, path.id, |t| t.add_team(body.name, body.seed).map(|_| None))
}

/// Upload a CSV roster with seeds (`name,seed`); switches seeding to upload mode.
#[post("/api/tournaments/{id}/teams/upload")]
async fn api_upload_seeds(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    update(&state, path.id, |t| import_seeds_csv(t, &body).map(|_| None))
}

/// Remove a team by id.
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    update(&state, path.id, |t| t.remove_team(path.team_id).map(|_| None))
}

/// Set or clear a team's seed (tournament must be in Setup).
#[put("/api/tournaments/{id}/teams/{team_id}/seed")]
async fn api_set_team_seed(
    state: AppState,
    path: Path<TournamentTeamPath>,
    body: Json<SetSeedBody>,
) -> HttpResponse {
    update(&state, path.id, |t| t.set_team_seed(path.team_id, body.seed).map(|_| None))
}

/// Replace settings and seeding (tournament must be in Setup).
#[put("/api/tournaments/{id}/settings")]
async fn api_set_settings(state: AppState, path: Path<TournamentPath>, body: Json<SetSettingsBody>) -> HttpResponse {
    let body = body.into_inner();
    update(&state, path.id, |t| apply_settings(t, body).map(|_| None))
}

/// Build the bracket (Setup -> InProgress).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update(&state, path.id, |t| start_tournament(t).map(Some))
}

/// Restart tournament: back to Setup with the same roster.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update(&state, path.id, |t| t.restart_tournament().map(|_| None))
}

/// Enter a game result and run the advancement cascade.
#[post("/api/tournaments/{id}/games/{game_id}/finish")]
async fn api_finish_game(
    state: AppState,
    path: Path<TournamentGamePath>,
    body: Json<FinishGameBody>,
) -> HttpResponse {
    update(&state, path.id, |t| {
        record_game_result(t, path.game_id, body.winner, body.score_a, body.score_b).map(Some)
    })
}

/// Manually set one slot of a game that has not started.
#[put("/api/tournaments/{id}/games/{game_id}/slot")]
async fn api_set_slot(state: AppState, path: Path<TournamentGamePath>, body: Json<SetSlotBody>) -> HttpResponse {
    update(&state, path.id, |t| set_game_slot(t, path.game_id, body.side, body.slot).map(Some))
}

/// Start, pause, resume, or skip ahead a game's clock.
#[post("/api/tournaments/{id}/games/{game_id}/clock")]
async fn api_game_clock(
    state: AppState,
    path: Path<TournamentGamePath>,
    body: Json<GameActionBody>,
) -> HttpResponse {
    update(&state, path.id, |t| {
        apply_game_action(t, path.game_id, body.action, Utc::now()).map(|_| None)
    })
}

/// Advance every running game's clock to now.
#[post("/api/tournaments/{id}/tick")]
async fn api_tick(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update(&state, path.id, |t| {
        tick_games(t, Utc::now());
        Ok(None)
    })
}

/// Flat game rows, as a persistence layer would store them.
#[get("/api/tournaments/{id}/rows")]
async fn api_rows(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => {
            let rows = entry
                .tournament
                .bracket
                .as_ref()
                .map(|b| b.to_rows())
                .unwrap_or_default();
            HttpResponse::Ok().json(rows)
        }
        None => not_found(),
    }
}

/// Playable games, one per court.
#[get("/api/tournaments/{id}/next-up")]
async fn api_next_up(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(next_up(&entry.tournament)),
        None => not_found(),
    }
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

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_upload_seeds)
            .service(api_remove_team)
            .service(api_set_team_seed)
            .service(api_set_settings)
            .service(api_start_tournament)
            .service(api_restart_tournament)
            .service(api_finish_game)
            .service(api_set_slot)
            .service(api_game_clock)
            .service(api_tick)
            .service(api_rows)
            .service(api_next_up)
    })
    .bind(bind)?
    .run()
    .await
}
