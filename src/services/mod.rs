pub mod gameplay;
pub mod rendering;

pub use gameplay::{create_game, destroy_game, move_game, render_grid, MoveReport};
pub use rendering::{render_png, RenderConfig};
