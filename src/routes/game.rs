use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};

use super::parse_body;
use crate::{
    error::GameError,
    models::{
        BoardResponse, DestroyGameRequest, MessageResponse, MoveRequest, MoveResponse,
        StartGameRequest, StartGameResponse,
    },
    services::gameplay,
    state::AppState,
};

/// Start a new game
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `body` - JSON `{width, height}`
///
/// # Returns
///
/// JSON response with the session token
pub async fn start_game(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StartGameResponse>, GameError> {
    let request: StartGameRequest = parse_body(&body)?;

    let token = gameplay::create_game(&state.game_manager, request.width, request.height).await?;

    Ok(Json(StartGameResponse::new(token)))
}

/// End a game on request
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `body` - JSON `{token}`
pub async fn destroy_game(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>, GameError> {
    let request: DestroyGameRequest = parse_body(&body)?;

    gameplay::destroy_game(&state.game_manager, &request.token).await?;

    Ok(Json(MessageResponse {
        message: "Success".to_string(),
    }))
}

/// Move the snake of a game one cell
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `body` - JSON `{token, direction}`
///
/// # Returns
///
/// The board after the move with the snake's status; games that ended are
/// already removed when this returns
pub async fn move_snake(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MoveResponse>, GameError> {
    let request: MoveRequest = parse_body(&body)?;

    let report = gameplay::move_game(&state.game_manager, &request.token, &request.direction).await?;

    Ok(Json(report.into()))
}

/// Show the current board of a game without moving
pub async fn show_board(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<BoardResponse>, GameError> {
    let board = gameplay::render_grid(&state.game_manager, &token).await?;
    Ok(Json(BoardResponse { board }))
}
