//! Game constants

/// Rows and columns of the default board
pub const DEFAULT_BOARD_SIZE: usize = 30;

/// Row holding the initial snake
pub const INITIAL_SNAKE_ROW: usize = 15;

/// Body cells laid down on reset, starting at column 0
pub const INITIAL_SNAKE_LENGTH: usize = 5;

/// Column of the tail after reset. Column 0 is overwritten by the border wall.
pub const INITIAL_TAIL_COL: usize = 1;

pub const REWARD_SNACK: u32 = 10;
pub const REWARD_DESSERT: u32 = 50;

/// Every this many eaten items, the next one placed is a dessert
pub const DESSERT_INTERVAL: u32 = 10;

/// Length of one simulation tick
pub const TICK_MS: u64 = 100;

/// How often the driver polls for input
pub const POLL_INTERVAL_MS: u64 = 5;
