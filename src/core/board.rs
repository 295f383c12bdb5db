//! The N×N playing field and boundary-clamped movement.

use super::common::{Direction, GameError, Position};
use super::config::MAX_BOARD_SIZE;

/// Square board of `size × size` unit cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    size: u8,
}

impl Board {
    /// Create a board; `size` must lie in `1..=MAX_BOARD_SIZE`.
    pub fn new(size: u8) -> Result<Self, GameError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidBoardSize(size));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.col < self.size && pos.row < self.size
    }

    /// Starting cell of the player.
    pub fn center(&self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    /// The `i`-th corner, cycling top-left, top-right, bottom-left, bottom-right.
    pub fn corner(&self, i: usize) -> Position {
        let far = self.size - 1;
        match i % 4 {
            0 => Position::new(0, 0),
            1 => Position::new(far, 0),
            2 => Position::new(0, far),
            _ => Position::new(far, far),
        }
    }

    /// The neighbouring cell in `dir`, or `None` if the move would leave the board.
    pub fn step(&self, pos: Position, dir: Direction) -> Option<Position> {
        let next = match dir {
            Direction::Up => Position::new(pos.col, pos.row.checked_sub(1)?),
            Direction::Down => Position::new(pos.col, pos.row.checked_add(1)?),
            Direction::Left => Position::new(pos.col.checked_sub(1)?, pos.row),
            Direction::Right => Position::new(pos.col.checked_add(1)?, pos.row),
        };
        if self.contains(next) {
            Some(next)
        } else {
            None
        }
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(col, row)))
    }
}
