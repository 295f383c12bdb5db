//! Common types: board coordinates, movement directions and engine errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell address on the board, `(col, row)` with the origin in the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: u8,
    pub row: u8,
}

impl Position {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Position) -> u16 {
        let dc = (self.col as i16 - other.col as i16).unsigned_abs();
        let dr = (self.row as i16 - other.row as i16).unsigned_abs();
        dc + dr
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the priority order used when several are requested at once.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Which concurrency primitive drives an opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoverKind {
    /// Cooperative async task on the game's runtime.
    Task,
    /// Preemptive OS thread.
    Thread,
    /// Separate worker process talking over a pipe.
    Process,
}

impl fmt::Display for MoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoverKind::Task => write!(f, "task"),
            MoverKind::Thread => write!(f, "thread"),
            MoverKind::Process => write!(f, "process"),
        }
    }
}

/// Errors returned by board and engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Board size outside `1..=MAX_BOARD_SIZE`.
    InvalidBoardSize(u8),
    /// Position does not lie on the board.
    OutOfBounds(Position),
    /// Update referenced an opponent slot that does not exist.
    UnknownOpponent(u8),
    /// A configuration value is out of range.
    InvalidConfig(&'static str),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidBoardSize(n) => write!(f, "Invalid board size: {}", n),
            GameError::OutOfBounds(p) => write!(f, "Position {} is off the board", p),
            GameError::UnknownOpponent(id) => write!(f, "No opponent with id {}", id),
            GameError::InvalidConfig(what) => write!(f, "Invalid configuration: {}", what),
        }
    }
}

impl std::error::Error for GameError {}
