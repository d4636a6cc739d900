use serde::{Deserialize, Serialize};

use crate::{core::Grid, services::MoveReport};

/// Reply to a successful game start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameResponse {
    /// Session token for all later requests on this game
    pub token: String,
    pub message: String,
}

impl StartGameResponse {
    pub fn new(token: String) -> Self {
        Self {
            token,
            message: "Game started successfully, use the provided token for same session requests"
                .to_string(),
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Board state after a move
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    pub board: Grid,
    pub alive: bool,
    pub won: bool,
    pub length: usize,
    pub eaten: u32,
}

impl From<MoveReport> for MoveResponse {
    fn from(report: MoveReport) -> Self {
        Self {
            board: report.grid,
            alive: report.alive,
            won: report.won,
            length: report.length,
            eaten: report.eaten,
        }
    }
}

/// Current board of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardResponse {
    pub board: Grid,
}

/// Base64 encoded PNG snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    pub image: String,
}
