//! Grid snake simulation core.
//!
//! The board owns all positional state; the snake is the chain of body cells
//! linked by their stored direction, from `tail` to `head`. A driver calls
//! [`Engine::step`] on a fixed cadence, [`Engine::set_direction`] on input and
//! reads [`Engine::get_board`] / [`Engine::get_score`] to render.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod map;
pub mod snack;

/// (row, column) index into the board.
pub type Coords = (usize, usize);

pub use board::{Cell, CellType, Direction, GameBoard};
pub use engine::{Engine, StepOutcome};
pub use error::MapError;
