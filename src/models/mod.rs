pub mod requests;
pub mod responses;

pub use requests::{DestroyGameRequest, ImageRequest, MoveRequest, StartGameRequest};
pub use responses::{BoardResponse, ImageResponse, MessageResponse, MoveResponse, StartGameResponse};
