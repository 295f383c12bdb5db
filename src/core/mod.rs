//! Core game rules.
//!
//! Pure state and movement logic: no terminal, no runtime, no I/O. Everything
//! here is driven by the game loop in [`crate::runner`] or directly by tests.

pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod walk;

// Re-export commonly used types
pub use board::Board;
pub use common::{Direction, GameError, MoverKind, Position};
pub use config::*;
pub use game::{GameEngine, GameEvent, GameStatus};
pub use walk::{random_direction, random_step, RandomWalk};
