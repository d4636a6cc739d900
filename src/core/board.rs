use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Apple, Direction, MoveOutcome, NoFreeCell, Snake};

/// Symbolic occupant of a grid cell, serialized with the wire letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellTag {
    #[serde(rename = " ")]
    Empty,
    #[serde(rename = "h")]
    Head,
    #[serde(rename = "s")]
    Body,
    #[serde(rename = "a")]
    Apple,
}

impl CellTag {
    /// Parse a wire letter, case-insensitively
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            " " => Some(CellTag::Empty),
            "h" => Some(CellTag::Head),
            "s" => Some(CellTag::Body),
            "a" => Some(CellTag::Apple),
            _ => None,
        }
    }
}

/// Rows of cell tags, `height` rows of `width` cells each
pub type Grid = Vec<Vec<CellTag>>;

/// A single game: one snake and one apple on a bounded grid
#[derive(Debug)]
pub struct Board {
    /// Session token the board is registered under
    id: String,
    width: i32,
    height: i32,
    snake: Snake,
    apple: Apple,
    created_at: OffsetDateTime,
    /// Terminal outcome, once the game has ended
    finished: Option<MoveOutcome>,
}

impl Board {
    /// Create a board with a freshly spawned snake and apple
    ///
    /// # Errors
    ///
    /// Returns `NoFreeCell` if the starting snake leaves no room for an apple
    pub fn new(id: String, width: i32, height: i32) -> Result<Self, NoFreeCell> {
        Self::with_rng(id, width, height, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        id: String,
        width: i32,
        height: i32,
        rng: &mut R,
    ) -> Result<Self, NoFreeCell> {
        let snake = Snake::spawn(width, height);
        let apple = Apple::place(rng, width, height, &snake.occupied_cells(width, height))?;

        Ok(Self {
            id,
            width,
            height,
            snake,
            apple,
            created_at: OffsetDateTime::now_utc(),
            finished: None,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(id: &str, width: i32, height: i32, snake: Snake, apple: Apple) -> Self {
        Self {
            id: id.to_string(),
            width,
            height,
            snake,
            apple,
            created_at: OffsetDateTime::now_utc(),
            finished: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Move the snake one cell in `direction`
    ///
    /// # Returns
    ///
    /// The move outcome, or None if the game had already ended
    pub fn advance(&mut self, direction: Direction) -> Option<MoveOutcome> {
        self.advance_with(direction, &mut rand::thread_rng())
    }

    pub fn advance_with<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> Option<MoveOutcome> {
        if self.finished.is_some() {
            return None;
        }

        let outcome = self
            .snake
            .advance(direction, self.width, self.height, &mut self.apple, rng);

        if outcome.is_terminal() {
            self.finished = Some(outcome);
        }

        Some(outcome)
    }

    /// Render the board as rows of cell tags
    ///
    /// Snake segments are drawn over the apple; they only share a cell on
    /// the last grid of a won game. Off-board segments are skipped.
    pub fn map(&self) -> Grid {
        let mut grid = vec![vec![CellTag::Empty; self.width as usize]; self.height as usize];

        let mut paint = |position: super::Position, tag: CellTag| {
            if position.is_within(self.width, self.height) {
                grid[position.y as usize][position.x as usize] = tag;
            }
        };

        paint(self.apple.position, CellTag::Apple);
        for segment in self.snake.segments().skip(1) {
            paint(segment, CellTag::Body);
        }
        paint(self.snake.head(), CellTag::Head);

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use rand::{rngs::StdRng, SeedableRng};

    fn count(grid: &Grid, tag: CellTag) -> usize {
        grid.iter().flatten().filter(|&&cell| cell == tag).count()
    }

    #[test]
    fn test_new_board() {
        let mut rng = StdRng::seed_from_u64(4);
        let board = Board::with_rng("token".to_string(), 10, 10, &mut rng).unwrap();

        assert_eq!(board.id(), "token");
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 10);
        assert_eq!(board.snake().length(), 3);
        assert!(!board.is_finished());
        assert!(!board
            .snake()
            .segments()
            .any(|segment| segment == board.apple().position));
    }

    #[test]
    fn test_tiny_board_has_no_room() {
        let result = Board::new("token".to_string(), 1, 1);
        assert_eq!(result.err(), Some(NoFreeCell));
    }

    #[test]
    fn test_map_dimensions_and_tags() {
        let board = Board::from_parts(
            "token",
            6,
            4,
            Snake::from_segments(vec![Position::new(2, 1), Position::new(2, 2)]),
            Apple {
                position: Position::new(5, 3),
            },
        );

        let grid = board.map();

        assert_eq!(grid.len(), 4);
        assert!(grid.iter().all(|row| row.len() == 6));
        assert_eq!(grid[1][2], CellTag::Head);
        assert_eq!(grid[2][2], CellTag::Body);
        assert_eq!(grid[3][5], CellTag::Apple);
        assert_eq!(count(&grid, CellTag::Empty), 24 - 3);
    }

    #[test]
    fn test_map_skips_off_board_segments() {
        let board = Board::from_parts(
            "token",
            5,
            2,
            Snake::spawn(5, 2),
            Apple {
                position: Position::new(4, 0),
            },
        );

        let grid = board.map();

        assert_eq!(count(&grid, CellTag::Head), 1);
        assert_eq!(count(&grid, CellTag::Body), 1);
    }

    #[test]
    fn test_move_up_shifts_snake_one_row() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut board = Board::from_parts(
            "token",
            10,
            10,
            Snake::spawn(10, 10),
            Apple {
                position: Position::new(9, 0),
            },
        );

        let outcome = board.advance_with(Direction::Up, &mut rng);
        let grid = board.map();

        assert_eq!(outcome, Some(MoveOutcome::Continue));
        assert_eq!(grid[4][0], CellTag::Head);
        assert_eq!(grid[5][0], CellTag::Body);
        assert_eq!(grid[6][0], CellTag::Body);
        assert_eq!(grid[7][0], CellTag::Empty);
        assert_eq!(board.snake().length(), 3);
    }

    #[test]
    fn test_filling_the_board_wins() {
        // 3x2 board: five cells taken, the apple holds the last one
        let mut rng = StdRng::seed_from_u64(0);
        let snake = Snake::from_segments(vec![
            Position::new(1, 0),
            Position::new(2, 0),
            Position::new(2, 1),
            Position::new(1, 1),
            Position::new(0, 1),
        ]);
        let mut board = Board::from_parts(
            "token",
            3,
            2,
            snake,
            Apple {
                position: Position::new(0, 0),
            },
        );

        let outcome = board.advance_with(Direction::Left, &mut rng);

        assert_eq!(outcome, Some(MoveOutcome::Win));
        assert_eq!(board.snake().length(), 6);
        assert_eq!(board.snake().eaten(), 1);
        assert!(board.is_finished());
        assert_eq!(count(&board.map(), CellTag::Empty), 0);
    }

    #[test]
    fn test_finished_board_rejects_moves() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut board = Board::from_parts(
            "token",
            10,
            10,
            Snake::spawn(10, 10),
            Apple {
                position: Position::new(9, 9),
            },
        );

        assert_eq!(
            board.advance_with(Direction::Left, &mut rng),
            Some(MoveOutcome::WallCollision)
        );
        let head = board.snake().head();

        assert_eq!(board.advance_with(Direction::Right, &mut rng), None);
        assert_eq!(board.snake().head(), head);
    }

    #[test]
    fn test_cell_tag_wire_format() {
        let row = vec![CellTag::Empty, CellTag::Head, CellTag::Body, CellTag::Apple];
        let json = serde_json::to_string(&row).unwrap();

        assert_eq!(json, r#"[" ","h","s","a"]"#);
        assert_eq!(CellTag::from_tag("H"), Some(CellTag::Head));
        assert_eq!(CellTag::from_tag("x"), None);
    }
}
