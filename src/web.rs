use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::net::{AddrParseError, SocketAddr};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::board::Square;
use crate::game::{GameError, GameState, GameStatus, Player};
use crate::session::{Session, SessionConfig};

pub const ADDR_ENV: &str = "QUORIDOR_ADDR";

pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl ServerConfig {
    /// Read the listen address from `QUORIDOR_ADDR`, falling back to the default when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_var(std::env::var(ADDR_ENV))
    }

    fn from_var(var: Result<String, VarError>) -> Result<Self, ConfigError> {
        match var {
            Ok(value) => Ok(ServerConfig {
                addr: value.parse()?,
            }),
            Err(VarError::NotPresent) => Ok(ServerConfig::default()),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("QUORIDOR_ADDR is not a valid socket address: {0}")]
    Addr(#[from] AddrParseError),
    #[error("QUORIDOR_ADDR is not valid unicode")]
    NotUnicode,
}

#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            session: Arc::new(Mutex::new(Session::new(SessionConfig::default()))),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Session>, ApiError> {
        self.session.lock().map_err(|_| ApiError::Poisoned)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Body(#[from] JsonRejection),
    #[error("Session lock poisoned")]
    Poisoned,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Game(_) | ApiError::Body(_) => StatusCode::BAD_REQUEST,
            ApiError::Poisoned => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(serde_json::json!({
                "error": self.to_string()
            })),
        )
            .into_response()
    }
}

#[derive(Serialize, Deserialize)]
pub struct MoveRequest {
    pub square: String,
}

#[derive(Serialize)]
pub struct GameResponse {
    positions: GameState,
    current_player: Player,
    status: GameStatus,
    winner: Option<Player>,
    legal_destinations: Vec<Square>,
    move_count: usize,
    board: String,
    message: String,
}

impl GameResponse {
    fn from_session(session: &Session, message: String) -> Self {
        GameResponse {
            positions: *session.state(),
            current_player: session.current_player(),
            status: session.status(),
            winner: session.status().winner(),
            legal_destinations: session.legal_destinations(),
            move_count: session.move_count(),
            board: session.state().display_board(),
            message,
        }
    }
}

#[axum::debug_handler]
async fn new_game(State(app_state): State<AppState>) -> Result<Json<GameResponse>, ApiError> {
    let mut session = app_state.lock()?;
    session.reset();
    Ok(Json(GameResponse::from_session(
        &session,
        format!("Player {} to move", session.current_player()),
    )))
}

#[axum::debug_handler]
async fn make_move(
    State(app_state): State<AppState>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<GameResponse>, ApiError> {
    let Json(req) = payload?;
    let mut session = app_state.lock()?;
    let player = session.current_player();

    let message = match session.submit(&req.square)? {
        GameStatus::GameOver { winner } => format!("Player {} wins!", winner),
        GameStatus::InProgress => format!("Player {} moved to {}", player, req.square),
    };

    Ok(Json(GameResponse::from_session(&session, message)))
}

async fn get_game_state(State(app_state): State<AppState>) -> Result<Json<GameResponse>, ApiError> {
    let session = app_state.lock()?;
    Ok(Json(GameResponse::from_session(&session, String::new())))
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/new-game", post(new_game))
        .route("/api/move", post(make_move))
        .route("/api/game-state", get(get_game_state))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(AppState::new());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "web server running");

    axum::serve(listener, app).await?;
    Ok(())
}
