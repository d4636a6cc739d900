use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;

/// Service banner
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "snake_server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Health check endpoint
///
/// # Returns
///
/// JSON response with status and the number of running games
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.game_manager.read().await.get_stats();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "active_games": stats["active_games"],
        })),
    )
}
