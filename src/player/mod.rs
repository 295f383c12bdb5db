//! Player trait and implementations
//!
//! - KeyboardPlayer: reads WASD/arrow keys from the terminal
//! - AutoPlayer: greedy item collector that keeps away from opponents

use crate::core::GameEngine;
use crate::input::Command;

/// Source of the player's commands, asked once per tick.
pub trait Player: Send {
    /// Next command, or `None` to stand still this tick.
    fn next_command(&mut self, engine: &GameEngine) -> anyhow::Result<Option<Command>>;
}

pub mod ai;
pub use ai::AutoPlayer;

pub mod cli;
pub use cli::KeyboardPlayer;
