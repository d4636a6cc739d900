use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use super::{Apple, Direction, Position, SPAWN_OFFSET};

/// Result of a single snake move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Nothing worth noting happened
    Continue,
    /// The head ran into the body
    SelfCollision,
    /// The apple was eaten and no free cell is left for another one
    Win,
    /// The head left the board
    WallCollision,
}

impl MoveOutcome {
    /// Whether the snake survived the move
    pub fn is_alive(self) -> bool {
        matches!(self, MoveOutcome::Continue | MoveOutcome::Win)
    }

    pub fn is_won(self) -> bool {
        self == MoveOutcome::Win
    }

    /// Whether the game is over after this move
    pub fn is_terminal(self) -> bool {
        self != MoveOutcome::Continue
    }
}

/// A snake: its chain of segments from head to tail plus a score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Front is the head, back is the tail; never fewer than two entries
    segments: VecDeque<Position>,
    /// Apples consumed so far
    eaten: u32,
}

impl Snake {
    /// Create the starting snake for a board
    ///
    /// The snake lies in column 0 heading up, with its head at row
    /// `SPAWN_OFFSET` when the board is tall enough. Single-row boards get a
    /// horizontal snake heading left instead. The third segment comes from
    /// the regular tail growth.
    pub fn spawn(width: i32, height: i32) -> Self {
        let (head, neck) = if height > 1 {
            let row = SPAWN_OFFSET.min(height - 3).max(0);
            (Position::new(0, row), Position::new(0, row + 1))
        } else {
            let column = SPAWN_OFFSET.min(width - 3).max(0);
            (Position::new(column, 0), Position::new(column + 1, 0))
        };

        let mut snake = Self {
            segments: VecDeque::from([head, neck]),
            eaten: 0,
        };
        snake.grow(width, height);
        snake
    }

    /// Build a snake from explicit segments, head first
    #[cfg(test)]
    pub(crate) fn from_segments(segments: Vec<Position>) -> Self {
        assert!(segments.len() >= 2, "a snake has at least two segments");
        Self {
            segments: segments.into(),
            eaten: 0,
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Segments from head to tail
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().copied()
    }

    pub fn length(&self) -> usize {
        self.segments.len()
    }

    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    /// On-board cells covered by the snake
    pub fn occupied_cells(&self, width: i32, height: i32) -> HashSet<Position> {
        self.segments()
            .filter(|segment| segment.is_within(width, height))
            .collect()
    }

    /// Append one segment behind the tail
    ///
    /// The tail's travel direction is inferred from its predecessor and the
    /// new segment goes one cell further back along it. Coordinates are
    /// clamped to `[0, width]` and `[0, height]`: the upper clamp is the
    /// board size itself, one past the last valid cell.
    fn grow(&mut self, width: i32, height: i32) {
        let len = self.segments.len();
        let tail = self.segments[len - 1];
        let before_tail = self.segments[len - 2];

        let dx = (tail.x - before_tail.x).signum();
        let dy = (tail.y - before_tail.y).signum();

        let extension = Position::new(
            (tail.x + dx).clamp(0, width),
            (tail.y + dy).clamp(0, height),
        );
        self.segments.push_back(extension);
    }

    /// Move the snake one cell
    ///
    /// # Arguments
    ///
    /// * `direction` - Where the head goes
    /// * `width`, `height` - Bounds of the owning board
    /// * `apple` - The board's apple, re-placed when eaten
    /// * `rng` - Randomness for apple placement
    ///
    /// # Returns
    ///
    /// The move outcome. A win is reported before any collision check.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        width: i32,
        height: i32,
        apple: &mut Apple,
        rng: &mut R,
    ) -> MoveOutcome {
        let new_head = self.head().step(direction);
        let ate = new_head == apple.position;

        if ate {
            self.grow(width, height);
            self.eaten += 1;
        }

        // Each segment takes the cell its predecessor held before the move.
        // After growth this pulls the extension into the old tail cell.
        self.segments.push_front(new_head);
        self.segments.pop_back();

        if ate {
            let occupied = self.occupied_cells(width, height);
            if apple.relocate(rng, width, height, &occupied).is_err() {
                return MoveOutcome::Win;
            }
        }

        if self.segments().skip(1).any(|segment| segment == new_head) {
            return MoveOutcome::SelfCollision;
        }

        if !new_head.is_within(width, height) {
            return MoveOutcome::WallCollision;
        }

        MoveOutcome::Continue
    }
}
