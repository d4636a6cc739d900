use axum::{body::Bytes, Json};
use base64::{engine::general_purpose::STANDARD, Engine};

use super::parse_body;
use crate::{
    error::GameError,
    models::{ImageRequest, ImageResponse},
    services::rendering::render_png,
};

/// Draw a board snapshot
///
/// Stateless: the board comes from the request, not from a running game.
///
/// # Returns
///
/// JSON response with the PNG image as standard base64
pub async fn create_image(body: Bytes) -> Result<Json<ImageResponse>, GameError> {
    let request: ImageRequest = parse_body(&body)?;
    let (grid, config) = request.into_render_job()?;

    let png = render_png(&grid, &config)?;

    Ok(Json(ImageResponse {
        image: STANDARD.encode(png),
    }))
}
