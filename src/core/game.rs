use rand::seq::IndexedRandom;
use rand::Rng;

use super::{
    board::Board,
    common::{Direction, GameError, MoverKind, Position},
    config::GameConfig,
};
use crate::protocol::OpponentUpdate;

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Life ran out.
    Starved,
    /// An opponent reached the player's cell.
    Caught { by: u8 },
    /// The player left the game.
    Quit,
}

/// Things that happened during one [`GameEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ItemCollected(Position),
    ItemSpawned(Position),
    LifeLost { remaining: u32 },
    Caught { by: u8 },
    Starved,
}

/// Authoritative game state, owned by the game loop.
///
/// Opponents never touch this directly: their movers publish
/// [`OpponentUpdate`]s and the loop hands them to [`GameEngine::apply_update`].
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    player: Position,
    items: Vec<Position>,
    life: u32,
    opponents: Vec<Position>,
    ticks: u64,
    items_collected: u32,
    status: GameStatus,
}

impl GameEngine {
    /// Start a game: player in the centre, opponent `i` in corner `i`.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let board = Board::new(config.board_size)?;
        let opponents = (0..config.movers.len()).map(|i| board.corner(i)).collect();
        Ok(Self {
            board,
            player: board.center(),
            items: Vec::new(),
            life: config.start_life,
            opponents,
            ticks: 0,
            items_collected: 0,
            status: GameStatus::Running,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn items(&self) -> &[Position] {
        &self.items
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    /// Last known position of each opponent, indexed by id.
    pub fn opponents(&self) -> &[Position] {
        &self.opponents
    }

    /// Concurrency primitive driving opponent `id`.
    pub fn mover_kind(&self, id: u8) -> Option<MoverKind> {
        self.config.movers.get(id as usize).copied()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn items_collected(&self) -> u32 {
        self.items_collected
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Running
    }

    /// Move the player one cell; returns `false` if the move was clamped or the game is over.
    pub fn move_player(&mut self, dir: Direction) -> bool {
        if self.is_over() {
            return false;
        }
        match self.board.step(self.player, dir) {
            Some(next) => {
                self.player = next;
                true
            }
            None => false,
        }
    }

    /// Record the latest position published by an opponent's mover.
    pub fn apply_update(&mut self, update: OpponentUpdate) -> Result<(), GameError> {
        if !self.board.contains(update.pos) {
            return Err(GameError::OutOfBounds(update.pos));
        }
        let slot = self
            .opponents
            .get_mut(update.id as usize)
            .ok_or(GameError::UnknownOpponent(update.id))?;
        *slot = update.pos;
        Ok(())
    }

    /// Place an item on a random free cell. Free means neither the player nor
    /// another item is there. Returns `None` when the cap is reached or the
    /// board is full.
    pub fn spawn_item<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        if self.items.len() >= self.config.max_items {
            return None;
        }
        let free: Vec<Position> = self
            .board
            .cells()
            .filter(|&c| c != self.player && !self.items.contains(&c))
            .collect();
        let pos = *free.choose(rng)?;
        self.items.push(pos);
        Some(pos)
    }

    /// End the game at the player's request.
    pub fn quit(&mut self) {
        if !self.is_over() {
            self.status = GameStatus::Quit;
        }
    }

    /// Advance one frame: pickup, capture, life decay, spawning.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }
        self.ticks += 1;

        if self.config.items {
            if let Some(idx) = self.items.iter().position(|&p| p == self.player) {
                let item = self.items.remove(idx);
                self.life = self.life.saturating_add(self.config.item_life);
                self.items_collected += 1;
                events.push(GameEvent::ItemCollected(item));
            }
        }

        if let Some(by) = self.opponents.iter().position(|&p| p == self.player) {
            let by = by as u8;
            self.status = GameStatus::Caught { by };
            events.push(GameEvent::Caught { by });
            return events;
        }

        if self.config.items {
            if self.ticks % self.config.decay_ticks == 0 {
                self.life = self.life.saturating_sub(1);
                events.push(GameEvent::LifeLost {
                    remaining: self.life,
                });
                if self.life == 0 {
                    self.status = GameStatus::Starved;
                    events.push(GameEvent::Starved);
                    return events;
                }
            }
            if self.ticks % self.config.spawn_ticks == 0 {
                if let Some(pos) = self.spawn_item(rng) {
                    events.push(GameEvent::ItemSpawned(pos));
                }
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn engine(stage: u8) -> GameEngine {
        GameEngine::new(GameConfig::for_stage(stage).unwrap()).unwrap()
    }

    #[test]
    fn starts_in_the_centre() {
        let e = engine(5);
        assert_eq!(e.player(), Position::new(5, 5));
        assert_eq!(e.opponents().len(), 3);
        assert_eq!(e.life(), e.config().start_life);
        assert_eq!(e.status(), GameStatus::Running);
    }

    #[test]
    fn stage_one_never_decays() {
        let mut e = engine(1);
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(e.tick(&mut rng).is_empty());
        }
        assert_eq!(e.life(), e.config().start_life);
        assert!(e.items().is_empty());
    }

    #[test]
    fn rejects_unknown_opponent() {
        let mut e = engine(3);
        let err = e
            .apply_update(OpponentUpdate {
                id: 1,
                pos: Position::new(0, 0),
            })
            .unwrap_err();
        assert_eq!(err, GameError::UnknownOpponent(1));
    }

    #[test]
    fn quit_is_final() {
        let mut e = engine(2);
        e.quit();
        assert_eq!(e.status(), GameStatus::Quit);
        assert!(!e.move_player(Direction::Up));
        assert!(e.tick(&mut SmallRng::seed_from_u64(0)).is_empty());
    }
}
