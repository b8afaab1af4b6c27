use super::state::AppState;
use super::time::now_millis;
use crate::error::StoreError;
use crate::game::store::StoreItem;
use crate::game::types::{SessionSnapshot, Variant};
use crate::transport::ws_session::handle_socket;
use axum::{
  extract::{rejection::JsonRejection, Path, Query, State, WebSocketUpgrade},
  http::{Method, StatusCode},
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

#[derive(Debug, Serialize)]
struct OkResponse {
  ok: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
  ok: bool,
  error: String,
}

#[derive(Debug, Serialize)]
struct StoreResponse {
  ok: bool,
  state: SessionSnapshot,
}

#[derive(Debug, Serialize)]
struct GemsResponse {
  ok: bool,
  gems: u32,
}

#[derive(Debug, Deserialize)]
struct PlayQuery {
  mode: Option<Variant>,
}

#[derive(Debug, Deserialize)]
struct StoreRequest {
  item: StoreItem,
}

#[derive(Debug, Deserialize)]
struct GemsRequest {
  amount: i64,
}

pub fn router(state: Arc<AppState>) -> Router {
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST])
    .allow_headers(Any);

  let mut app: Router<Arc<AppState>> = Router::new()
    .route("/api/health", get(health))
    .route("/api/play", get(ws_handler))
    .route("/api/session/:id", get(session_get))
    .route("/api/session/:id/store", post(store_post))
    .route("/api/session/:id/gems", post(gems_post))
    .nest_service("/assets", ServeDir::new(&state.config.assets_dir));

  if state.config.debug_commands {
    app = app.route("/api/debug/kill/:id", post(debug_kill));
  }

  app.layer(cors).with_state(state)
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
  (
    status,
    Json(ErrorResponse {
      ok: false,
      error: error.into(),
    }),
  )
    .into_response()
}

fn unknown_session() -> Response {
  error_response(StatusCode::NOT_FOUND, "Unknown session")
}

async fn health() -> impl IntoResponse {
  Json(OkResponse { ok: true })
}

async fn ws_handler(
  ws: WebSocketUpgrade,
  Query(params): Query<PlayQuery>,
  State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
  let variant = params.mode.unwrap_or(Variant::Grid);
  ws.on_upgrade(move |socket| handle_socket(socket, state, variant))
}

async fn session_get(
  Path(id): Path<String>,
  State(state): State<Arc<AppState>>,
) -> Response {
  let Some(room) = state.session(&id) else { return unknown_session() };
  Json(room.snapshot(now_millis()).await).into_response()
}

async fn store_post(
  Path(id): Path<String>,
  State(state): State<Arc<AppState>>,
  payload: Result<Json<StoreRequest>, JsonRejection>,
) -> Response {
  let Ok(Json(payload)) = payload else {
    return error_response(StatusCode::BAD_REQUEST, "Invalid JSON");
  };
  let Some(room) = state.session(&id) else { return unknown_session() };

  match room.purchase(payload.item, now_millis()).await {
    Ok(snapshot) => Json(StoreResponse {
      ok: true,
      state: snapshot,
    })
    .into_response(),
    Err(error @ StoreError::AlreadyActive) => error_response(StatusCode::CONFLICT, error.to_string()),
    Err(error) => error_response(StatusCode::BAD_REQUEST, error.to_string()),
  }
}

async fn gems_post(
  Path(id): Path<String>,
  State(state): State<Arc<AppState>>,
  payload: Result<Json<GemsRequest>, JsonRejection>,
) -> Response {
  let Ok(Json(payload)) = payload else {
    return error_response(StatusCode::BAD_REQUEST, "Invalid JSON");
  };
  let Some(room) = state.session(&id) else { return unknown_session() };

  match room.grant_gems(payload.amount).await {
    Ok(gems) => Json(GemsResponse { ok: true, gems }).into_response(),
    Err(error) => error_response(StatusCode::BAD_REQUEST, error.to_string()),
  }
}

async fn debug_kill(
  Path(id): Path<String>,
  State(state): State<Arc<AppState>>,
) -> Response {
  if !state.config.debug_commands {
    return error_response(StatusCode::FORBIDDEN, "Debug commands disabled");
  }
  let Some(room) = state.session(&id) else { return unknown_session() };

  if room.debug_kill(now_millis()).await {
    Json(OkResponse { ok: true }).into_response()
  } else {
    error_response(StatusCode::CONFLICT, "Snake is already dying")
  }
}
