//! Keyboard mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::{Board, Direction, Position};

/// What the player asked for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Quit,
}

/// Map one key event. Releases and unbound keys map to `None`.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    let dir = match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Direction::Up,
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Direction::Down,
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Direction::Left,
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Direction::Right,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Move(dir))
}

/// Reduce everything pressed during one tick to a single command.
///
/// Quit beats movement; among movements up, down, left, right win in that
/// order. A held key that would leave the board from `player` gives way to
/// the next one.
pub fn pick_command(commands: &[Command], board: &Board, player: Position) -> Option<Command> {
    if commands.contains(&Command::Quit) {
        return Some(Command::Quit);
    }
    Direction::ALL
        .iter()
        .filter(|&&d| board.step(player, d).is_some())
        .map(|&d| Command::Move(d))
        .find(|c| commands.contains(c))
}
