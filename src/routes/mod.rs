pub mod game;
pub mod health;
pub mod snapshot;

use axum::{
    body::Bytes,
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::GameError, state::AppState};

/// Build the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        // Health and root
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Game lifecycle
        .route("/start", post(game::start_game))
        .route("/destroy", post(game::destroy_game))
        .route("/move", post(game::move_snake))
        .route("/board/:token", get(game::show_board))
        // Snapshots
        .route("/image", post(snapshot::create_image))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}

/// Decode a JSON request body
///
/// Clients are not required to send a JSON content type, so the body is
/// parsed directly instead of going through the `Json` extractor.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, GameError> {
    serde_json::from_slice(body).map_err(|e| GameError::InvalidJson(e.to_string()))
}
