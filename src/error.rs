use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errors reported by the game entry points
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid {0} parameter passed, must be a positive integer")]
    InvalidDimension(&'static str),

    #[error("Invalid {name} parameter passed, must be at most {max}")]
    DimensionTooLarge { name: &'static str, max: i32 },

    #[error("Board too small, no room left for an apple")]
    BoardTooSmall,

    #[error("No token provided")]
    MissingToken,

    #[error("Malformed token")]
    MalformedToken,

    /// Unknown, destroyed or already finished game
    #[error("Invalid Token")]
    InvalidToken,

    #[error("Missing direction")]
    MissingDirection,

    #[error("Invalid Direction: {0}")]
    InvalidDirection(String),

    #[error("Invalid JSON Form: {0}")]
    InvalidJson(String),

    #[error("Missing board_positions parameter")]
    MissingBoard,

    #[error("Inconsistent row width")]
    InconsistentRowWidth,

    #[error("Invalid {0} parameter, components must be between 0 and 255")]
    InvalidColour(&'static str),

    #[error("{0} must be greater than 0 and at most 256")]
    InvalidBlockSize(&'static str),

    #[error("Requested image is too large")]
    ImageTooLarge,

    #[error("Error creating image: {0}")]
    ImageEncoding(#[from] image::ImageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GameError {
    /// HTTP status reported for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GameError::InvalidToken => StatusCode::NOT_FOUND,
            GameError::ImageEncoding(_) | GameError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
