/// Largest accepted board side, in cells
pub const MAX_BOARD_DIMENSION: i32 = 1024;

/// Row (or column, on single-row boards) the snake's head spawns at
pub const SPAWN_OFFSET: i32 = 5;

/// Random samples tried before apple placement falls back to a grid scan
pub const APPLE_PLACEMENT_ATTEMPTS: usize = 30;

/// Candidate tokens tried before giving up on issuing a unique one
pub const TOKEN_ATTEMPTS: u32 = 8;

/// Length of an issued token (base64url of a SHA-256 digest, no padding)
pub const TOKEN_LENGTH: usize = 43;
