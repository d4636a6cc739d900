use time::OffsetDateTime;

use crate::{
    auth::is_well_formed_token,
    core::{Direction, Grid, MoveOutcome, SharedBoard, MAX_BOARD_DIMENSION},
    error::GameError,
    state::SharedGameManager,
};

/// Everything a client learns from one move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub grid: Grid,
    pub outcome: MoveOutcome,
    /// False only after a collision
    pub alive: bool,
    pub won: bool,
    pub length: usize,
    pub eaten: u32,
}

/// Check a requested board dimension
///
/// # Arguments
///
/// * `name` - Parameter name used in the error message
/// * `value` - Raw value from the request
///
/// # Returns
///
/// The dimension if it lies in `1..=MAX_BOARD_DIMENSION`
pub fn validate_dimension(name: &'static str, value: i64) -> Result<i32, GameError> {
    if value <= 0 {
        return Err(GameError::InvalidDimension(name));
    }

    if value > i64::from(MAX_BOARD_DIMENSION) {
        return Err(GameError::DimensionTooLarge {
            name,
            max: MAX_BOARD_DIMENSION,
        });
    }

    Ok(value as i32)
}

/// Reject empty or malformed tokens before touching the registry
pub fn validate_token(token: &str) -> Result<&str, GameError> {
    if token.is_empty() {
        return Err(GameError::MissingToken);
    }

    if !is_well_formed_token(token) {
        return Err(GameError::MalformedToken);
    }

    Ok(token)
}

/// Look a board up, releasing the registry lock before returning
async fn find_board(manager: &SharedGameManager, token: &str) -> Result<SharedBoard, GameError> {
    let board = manager.read().await.get_game(token);
    board.ok_or(GameError::InvalidToken)
}

/// Start a new game
///
/// # Returns
///
/// The session token for the new game
pub async fn create_game(
    manager: &SharedGameManager,
    width: i64,
    height: i64,
) -> Result<String, GameError> {
    let height = validate_dimension("height", height)?;
    let width = validate_dimension("width", width)?;

    let token = manager.write().await.create_game(width, height)?;

    tracing::info!("🐍 Game {} created ({}x{})", token, width, height);
    Ok(token)
}

/// End a game on request
pub async fn destroy_game(manager: &SharedGameManager, token: &str) -> Result<(), GameError> {
    let token = validate_token(token)?;

    manager.write().await.remove_game(token)?;

    tracing::info!("🗑️ Game {} destroyed on request", token);
    Ok(())
}

/// Move a game's snake one cell
///
/// The board lock is released before a finished game is removed from the
/// registry.
///
/// # Errors
///
/// Returns `InvalidToken` for unknown or already finished games, and a
/// validation error for malformed input; neither mutates any game.
pub async fn move_game(
    manager: &SharedGameManager,
    token: &str,
    direction: &str,
) -> Result<MoveReport, GameError> {
    let token = validate_token(token)?;
    let direction: Direction = direction.parse()?;

    let board = find_board(manager, token).await?;

    let (report, started_at) = {
        let mut board = board.lock().await;
        let outcome = board.advance(direction).ok_or(GameError::InvalidToken)?;
        let snake = board.snake();

        let report = MoveReport {
            grid: board.map(),
            outcome,
            alive: outcome.is_alive(),
            won: outcome.is_won(),
            length: snake.length(),
            eaten: snake.eaten(),
        };
        (report, board.created_at())
    };

    if report.outcome.is_terminal() {
        // A concurrent destroy may already have removed it
        if manager.write().await.remove_game(token).is_ok() {
            tracing::info!(
                "🏁 Game {} ended with {:?} (length {}, eaten {}, {}s)",
                token,
                report.outcome,
                report.length,
                report.eaten,
                (OffsetDateTime::now_utc() - started_at).whole_seconds()
            );
        }
    }

    Ok(report)
}

/// Current grid of a game, without moving
pub async fn render_grid(manager: &SharedGameManager, token: &str) -> Result<Grid, GameError> {
    let token = validate_token(token)?;
    let board = find_board(manager, token).await?;
    let grid = board.lock().await.map();
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{Apple, Board, CellTag, Position, Snake, TOKEN_LENGTH},
        state::AppState,
    };

    fn unknown_token() -> String {
        "x".repeat(TOKEN_LENGTH)
    }

    fn find(grid: &Grid, tag: CellTag) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == tag {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn test_validate_dimension() {
        assert_eq!(validate_dimension("width", 10).unwrap(), 10);
        assert_eq!(
            validate_dimension("width", i64::from(MAX_BOARD_DIMENSION)).unwrap(),
            MAX_BOARD_DIMENSION
        );
        assert!(matches!(
            validate_dimension("width", 0),
            Err(GameError::InvalidDimension("width"))
        ));
        assert!(matches!(
            validate_dimension("height", -3),
            Err(GameError::InvalidDimension("height"))
        ));
        assert!(matches!(
            validate_dimension("height", i64::from(MAX_BOARD_DIMENSION) + 1),
            Err(GameError::DimensionTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_token() {
        assert!(matches!(validate_token(""), Err(GameError::MissingToken)));
        assert!(matches!(
            validate_token("abc"),
            Err(GameError::MalformedToken)
        ));
        assert!(validate_token(&unknown_token()).is_ok());
    }

    #[tokio::test]
    async fn test_create_and_render() {
        let state = AppState::new();

        let token = create_game(&state.game_manager, 10, 10).await.unwrap();
        let grid = render_grid(&state.game_manager, &token).await.unwrap();

        assert_eq!(grid.len(), 10);
        assert_eq!(grid[0].len(), 10);
        assert_eq!(find(&grid, CellTag::Head), vec![(0, 5)]);
        assert_eq!(find(&grid, CellTag::Body), vec![(0, 6), (0, 7)]);
        assert_eq!(find(&grid, CellTag::Apple).len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_dimensions() {
        let state = AppState::new();

        assert!(matches!(
            create_game(&state.game_manager, 0, 10).await,
            Err(GameError::InvalidDimension("width"))
        ));
        assert!(matches!(
            create_game(&state.game_manager, 10, -1).await,
            Err(GameError::InvalidDimension("height"))
        ));
        assert!(state.game_manager.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_move_up_keeps_game_alive() {
        let state = AppState::new();
        let token = "u".repeat(TOKEN_LENGTH);
        let board = Board::from_parts(
            &token,
            10,
            10,
            Snake::spawn(10, 10),
            Apple {
                position: Position::new(9, 9),
            },
        );
        state.game_manager.write().await.add(board).unwrap();

        let report = move_game(&state.game_manager, &token, "u").await.unwrap();

        assert_eq!(report.outcome, MoveOutcome::Continue);
        assert!(report.alive);
        assert!(!report.won);
        assert_eq!(report.length, 3);
        assert_eq!(report.eaten, 0);
        assert_eq!(find(&report.grid, CellTag::Head), vec![(0, 4)]);
        assert_eq!(find(&report.grid, CellTag::Body), vec![(0, 5), (0, 6)]);
        assert!(state.game_manager.read().await.exists(&token));
    }

    #[tokio::test]
    async fn test_winning_move_removes_game() {
        let state = AppState::new();
        let token = "w".repeat(TOKEN_LENGTH);
        let snake = Snake::from_segments(vec![
            Position::new(1, 1),
            Position::new(1, 0),
            Position::new(0, 0),
        ]);
        let board = Board::from_parts(
            &token,
            2,
            2,
            snake,
            Apple {
                position: Position::new(0, 1),
            },
        );
        state.game_manager.write().await.add(board).unwrap();

        let report = move_game(&state.game_manager, &token, "l").await.unwrap();

        assert_eq!(report.outcome, MoveOutcome::Win);
        assert!(report.alive);
        assert!(report.won);
        assert_eq!(report.length, 4);
        assert_eq!(report.eaten, 1);
        assert!(!state.game_manager.read().await.exists(&token));
    }

    #[tokio::test]
    async fn test_wall_collision_removes_game() {
        let state = AppState::new();
        let token = create_game(&state.game_manager, 10, 10).await.unwrap();

        let report = move_game(&state.game_manager, &token, "l").await.unwrap();

        assert_eq!(report.outcome, MoveOutcome::WallCollision);
        assert!(!report.alive);
        assert!(!report.won);
        assert!(!state.game_manager.read().await.exists(&token));
        assert!(matches!(
            move_game(&state.game_manager, &token, "r").await,
            Err(GameError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_move_unknown_token() {
        let state = AppState::new();
        let token = create_game(&state.game_manager, 10, 10).await.unwrap();
        let before = render_grid(&state.game_manager, &token).await.unwrap();

        let result = move_game(&state.game_manager, &unknown_token(), "u").await;

        assert!(matches!(result, Err(GameError::InvalidToken)));
        assert_eq!(
            render_grid(&state.game_manager, &token).await.unwrap(),
            before
        );
    }

    #[tokio::test]
    async fn test_move_invalid_direction_does_not_mutate() {
        let state = AppState::new();
        let token = create_game(&state.game_manager, 10, 10).await.unwrap();
        let before = render_grid(&state.game_manager, &token).await.unwrap();

        let result = move_game(&state.game_manager, &token, "sideways").await;

        assert!(matches!(result, Err(GameError::InvalidDirection(_))));
        assert_eq!(
            render_grid(&state.game_manager, &token).await.unwrap(),
            before
        );
    }

    #[tokio::test]
    async fn test_destroy_game() {
        let state = AppState::new();
        let token = create_game(&state.game_manager, 10, 10).await.unwrap();

        destroy_game(&state.game_manager, &token).await.unwrap();

        assert!(matches!(
            render_grid(&state.game_manager, &token).await,
            Err(GameError::InvalidToken)
        ));
        assert!(matches!(
            destroy_game(&state.game_manager, &token).await,
            Err(GameError::InvalidToken)
        ));
    }
}
