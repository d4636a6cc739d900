use serde::{Deserialize, Serialize};

use crate::{
    core::{CellTag, Grid},
    error::GameError,
    services::rendering::{RenderConfig, MAX_BLOCK_SIZE},
};

// Missing fields default to zero or empty and are rejected by validation.

/// Request to start a game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StartGameRequest {
    pub width: i64,
    pub height: i64,
}

/// Request to end a game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DestroyGameRequest {
    pub token: String,
}

/// Request to move a game's snake
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveRequest {
    pub token: String,
    /// `u`, `d`, `l`, `r` or the full direction name
    pub direction: String,
}

/// Request to draw a board snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRequest {
    /// Rows of cell tags as returned by `/move`
    pub board_positions: Vec<Vec<String>>,
    pub head_colour: [i64; 3],
    pub body_colour: [i64; 3],
    pub apple_colour: [i64; 3],
    pub background_colour: [i64; 3],
    pub border_colour: [i64; 3],
    pub block_width: i64,
    pub block_height: i64,
}

impl ImageRequest {
    /// Validate a colour triple
    ///
    /// # Arguments
    ///
    /// * `name` - Parameter name used in the error message
    /// * `colour` - Raw RGB components
    pub fn validate_colour(name: &'static str, colour: [i64; 3]) -> Result<[u8; 3], GameError> {
        let mut rgb = [0u8; 3];
        for (slot, component) in rgb.iter_mut().zip(colour) {
            *slot = u8::try_from(component).map_err(|_| GameError::InvalidColour(name))?;
        }
        Ok(rgb)
    }

    /// Validate a block side length in pixels
    pub fn validate_block_size(name: &'static str, size: i64) -> Result<u32, GameError> {
        match u32::try_from(size) {
            Ok(size) if (1..=MAX_BLOCK_SIZE).contains(&size) => Ok(size),
            _ => Err(GameError::InvalidBlockSize(name)),
        }
    }

    /// Check the request and split it into a grid and render settings
    ///
    /// Unrecognised cell tags are drawn in the background colour.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, checking the grid first, then
    /// colours, then block sizes
    pub fn into_render_job(self) -> Result<(Grid, RenderConfig), GameError> {
        let columns = self.board_positions.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(GameError::MissingBoard);
        }
        if self.board_positions.iter().any(|row| row.len() != columns) {
            return Err(GameError::InconsistentRowWidth);
        }

        let config = RenderConfig {
            head_colour: Self::validate_colour("head_colour", self.head_colour)?,
            body_colour: Self::validate_colour("body_colour", self.body_colour)?,
            apple_colour: Self::validate_colour("apple_colour", self.apple_colour)?,
            border_colour: Self::validate_colour("border_colour", self.border_colour)?,
            background_colour: Self::validate_colour(
                "background_colour",
                self.background_colour,
            )?,
            block_height: Self::validate_block_size("block_height", self.block_height)?,
            block_width: Self::validate_block_size("block_width", self.block_width)?,
        };

        let grid = self
            .board_positions
            .iter()
            .map(|row| {
                row.iter()
                    .map(|tag| CellTag::from_tag(tag).unwrap_or(CellTag::Empty))
                    .collect()
            })
            .collect();

        Ok((grid, config))
    }
}
