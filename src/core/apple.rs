use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

use super::{Position, APPLE_PLACEMENT_ATTEMPTS};

/// Every cell of the board is taken by the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No blank spaces left on the board")]
pub struct NoFreeCell;

/// The single apple of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apple {
    pub position: Position,
}

impl Apple {
    /// Place a new apple on a cell not in `occupied`
    ///
    /// # Errors
    ///
    /// Returns `NoFreeCell` if the snake covers the whole board
    pub fn place<R: Rng + ?Sized>(
        rng: &mut R,
        width: i32,
        height: i32,
        occupied: &HashSet<Position>,
    ) -> Result<Self, NoFreeCell> {
        find_free_cell(rng, width, height, occupied).map(|position| Self { position })
    }

    /// Move the apple to a fresh free cell, leaving it untouched on failure
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        width: i32,
        height: i32,
        occupied: &HashSet<Position>,
    ) -> Result<(), NoFreeCell> {
        self.position = find_free_cell(rng, width, height, occupied)?;
        Ok(())
    }
}

/// Select an unoccupied cell of a `width` x `height` grid
///
/// Samples uniformly at random first; after `APPLE_PLACEMENT_ATTEMPTS`
/// misses the grid is scanned row by row and the first free cell wins, so
/// dense boards terminate in bounded time.
///
/// # Arguments
///
/// * `rng` - Source of randomness
/// * `width` - Board width in cells
/// * `height` - Board height in cells
/// * `occupied` - Cells taken by the snake (off-grid entries are ignored)
///
/// # Errors
///
/// Returns `NoFreeCell` if every cell is occupied
pub fn find_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    width: i32,
    height: i32,
    occupied: &HashSet<Position>,
) -> Result<Position, NoFreeCell> {
    let total_cells = width as usize * height as usize;
    let taken = occupied
        .iter()
        .filter(|position| position.is_within(width, height))
        .count();

    if taken >= total_cells {
        return Err(NoFreeCell);
    }

    for _ in 0..APPLE_PLACEMENT_ATTEMPTS {
        let candidate = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }

    tracing::debug!(
        "Apple sampling missed {} times on a {}x{} board, scanning",
        APPLE_PLACEMENT_ATTEMPTS,
        width,
        height
    );

    (0..height)
        .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
        .find(|cell| !occupied.contains(cell))
        .ok_or(NoFreeCell)
}
