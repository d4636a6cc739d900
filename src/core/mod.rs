pub mod apple;
pub mod board;
pub mod constants;
pub mod game_manager;
pub mod position;
pub mod snake;

pub use apple::{Apple, NoFreeCell};
pub use board::{Board, CellTag, Grid};
pub use constants::*;
pub use game_manager::{GameManager, SharedBoard};
pub use position::{Direction, Position};
pub use snake::{MoveOutcome, Snake};
