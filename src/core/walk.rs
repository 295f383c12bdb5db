// Random-walk movement shared by every opponent, whatever drives it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::board::Board;
use super::common::{Direction, GameError, Position};

/// Pick one of the four directions uniformly at random.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    Direction::ALL[rng.random_range(0..Direction::ALL.len())]
}

/// Apply the walk rule once: move one cell in a random direction, or stay put
/// if that direction leads off the board.
pub fn random_step<R: Rng + ?Sized>(board: &Board, pos: Position, rng: &mut R) -> Position {
    board.step(pos, random_direction(rng)).unwrap_or(pos)
}

/// A seeded walker that owns its position.
pub struct RandomWalk {
    board: Board,
    pos: Position,
    rng: SmallRng,
}

impl RandomWalk {
    pub fn new(board: Board, start: Position, seed: u64) -> Result<Self, GameError> {
        if !board.contains(start) {
            return Err(GameError::OutOfBounds(start));
        }
        Ok(Self {
            board,
            pos: start,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Take one step and return the new position.
    pub fn advance(&mut self) -> Position {
        self.pos = random_step(&self.board, self.pos, &mut self.rng);
        self.pos
    }
}
