use std::time::Duration;

use crossterm::event::{self, Event};

use crate::core::GameEngine;
use crate::input::{command_for_key, pick_command, Command};

use super::Player;

/// Interactive player reading the terminal's key events.
///
/// Every tick drains all pending events without blocking, so holding a key
/// moves one cell per frame at most.
pub struct KeyboardPlayer;

impl KeyboardPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeyboardPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for KeyboardPlayer {
    fn next_command(&mut self, engine: &GameEngine) -> anyhow::Result<Option<Command>> {
        let mut pressed = Vec::new();
        while event::poll(Duration::ZERO)
            .map_err(|e| anyhow::anyhow!("Input poll error: {}", e))?
        {
            let ev = event::read().map_err(|e| anyhow::anyhow!("Input read error: {}", e))?;
            if let Event::Key(key) = ev {
                if let Some(cmd) = command_for_key(key) {
                    pressed.push(cmd);
                }
            }
        }
        Ok(pick_command(&pressed, engine.board(), engine.player()))
    }
}
