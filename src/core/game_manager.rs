use std::{
    collections::{hash_map::Entry, HashMap},
    sync::Arc,
};
use tokio::sync::Mutex;

use super::{Board, TOKEN_ATTEMPTS};
use crate::{auth::TokenIssuer, error::GameError};

/// A registered board, locked independently of the registry
pub type SharedBoard = Arc<Mutex<Board>>;

/// Registry of all running games, keyed by session token
///
/// The manager only guards the token -> board mapping. Gameplay runs under
/// each board's own mutex, taken after the board has been looked up.
#[derive(Debug)]
pub struct GameManager {
    /// Map of token to board
    games: HashMap<String, SharedBoard>,
    tokens: TokenIssuer,
}

impl GameManager {
    /// Create an empty manager with a randomly keyed token issuer
    pub fn new() -> Self {
        Self::with_issuer(TokenIssuer::new())
    }

    pub fn with_issuer(tokens: TokenIssuer) -> Self {
        Self {
            games: HashMap::new(),
            tokens,
        }
    }

    /// Create and register a new game
    ///
    /// # Arguments
    ///
    /// * `width` - Board width, already validated as positive
    /// * `height` - Board height, already validated as positive
    ///
    /// # Returns
    ///
    /// The token of the newly created game
    ///
    /// # Errors
    ///
    /// Returns `BoardTooSmall` if the board cannot hold a snake and an apple
    pub fn create_game(&mut self, width: i32, height: i32) -> Result<String, GameError> {
        let token = self.issue_token()?;
        let board = Board::new(token, width, height).map_err(|_| GameError::BoardTooSmall)?;
        self.add(board)
    }

    /// Generate a token that no registered game uses
    ///
    /// # Errors
    ///
    /// Returns an internal error if every attempt collided
    pub fn issue_token(&mut self) -> Result<String, GameError> {
        for attempt in 0..TOKEN_ATTEMPTS {
            let token = self.tokens.candidate(attempt)?;
            if !self.games.contains_key(&token) {
                return Ok(token);
            }

            tracing::warn!("⚠️ Token collision, regenerating (attempt {})", attempt + 1);
        }

        Err(GameError::Internal(
            "Could not issue a unique game token".to_string(),
        ))
    }

    /// Register a board under its own token
    ///
    /// # Errors
    ///
    /// Returns an internal error instead of replacing an existing game
    pub fn add(&mut self, board: Board) -> Result<String, GameError> {
        match self.games.entry(board.id().to_string()) {
            Entry::Occupied(_) => Err(GameError::Internal(
                "Game token already registered".to_string(),
            )),
            Entry::Vacant(slot) => {
                let token = slot.key().clone();
                slot.insert(Arc::new(Mutex::new(board)));
                Ok(token)
            }
        }
    }

    /// Retrieve a game by token
    ///
    /// # Returns
    ///
    /// A handle to the board if registered, None otherwise
    pub fn get_game(&self, token: &str) -> Option<SharedBoard> {
        self.games.get(token).cloned()
    }

    /// Remove a game
    ///
    /// # Errors
    ///
    /// Returns `InvalidToken` if no game is registered under `token`
    pub fn remove_game(&mut self, token: &str) -> Result<(), GameError> {
        self.games
            .remove(token)
            .map(|_| ())
            .ok_or(GameError::InvalidToken)
    }

    pub fn exists(&self, token: &str) -> bool {
        self.games.contains_key(token)
    }

    /// Number of running games
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Get statistics about running games
    ///
    /// # Returns
    ///
    /// JSON value with game statistics
    pub fn get_stats(&self) -> serde_json::Value {
        serde_json::json!({
            "active_games": self.games.len(),
        })
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}
