use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::core::{Direction, GameEngine, Position};
use crate::input::Command;

use super::Player;

/// Headless player: walks towards the nearest item, avoids cells next to an
/// opponent, and breaks ties at random. When every step is threatened it
/// picks any step at random.
pub struct AutoPlayer {
    rng: SmallRng,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Choose a step for the current state without touching the engine.
    pub fn choose(&mut self, engine: &GameEngine) -> Option<Direction> {
        let board = engine.board();
        let here = engine.player();
        let threatened = |p: Position| engine.opponents().iter().any(|&o| o.manhattan(p) <= 1);

        let steps: Vec<(Direction, Position)> = Direction::ALL
            .iter()
            .filter_map(|&d| board.step(here, d).map(|p| (d, p)))
            .collect();
        let mut options: Vec<(Direction, Position)> =
            steps.iter().copied().filter(|&(_, p)| !threatened(p)).collect();
        if options.is_empty() {
            return steps.choose(&mut self.rng).map(|&(d, _)| d);
        }

        let nearest = engine
            .items()
            .iter()
            .copied()
            .min_by_key(|item| item.manhattan(here));
        if let Some(target) = nearest {
            if let Some(best) = options.iter().map(|(_, p)| p.manhattan(target)).min() {
                options.retain(|(_, p)| p.manhattan(target) == best);
            }
        }

        options.choose(&mut self.rng).map(|&(d, _)| d)
    }
}

impl Player for AutoPlayer {
    fn next_command(&mut self, engine: &GameEngine) -> anyhow::Result<Option<Command>> {
        Ok(self.choose(engine).map(Command::Move))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::protocol::OpponentUpdate;

    #[test]
    fn heads_for_the_item() {
        let mut engine = GameEngine::new(GameConfig::for_stage(2).unwrap()).unwrap();
        let mut rng = SmallRng::seed_from_u64(5);
        let item = engine.spawn_item(&mut rng).unwrap();
        let mut player = AutoPlayer::new(1);

        let before = engine.player().manhattan(item);
        let dir = player.choose(&engine).unwrap();
        engine.move_player(dir);
        if before > 0 {
            assert_eq!(engine.player().manhattan(item), before - 1);
        }
    }

    #[test]
    fn stays_away_from_opponents() {
        let mut engine = GameEngine::new(GameConfig::for_stage(3).unwrap()).unwrap();
        // centre is (5, 5); park the opponent two cells to the right
        engine
            .apply_update(OpponentUpdate {
                id: 0,
                pos: Position::new(7, 5),
            })
            .unwrap();
        let mut player = AutoPlayer::new(9);
        for _ in 0..20 {
            assert_ne!(player.choose(&engine), Some(Direction::Right));
        }
    }

    #[test]
    fn cornered_player_still_moves() {
        let mut config = GameConfig::for_stage(4).unwrap();
        config.board_size = 3;
        let mut engine = GameEngine::new(config).unwrap();
        // player at (1, 1); every neighbour is next to one of these
        engine
            .apply_update(OpponentUpdate { id: 0, pos: Position::new(0, 0) })
            .unwrap();
        engine
            .apply_update(OpponentUpdate { id: 1, pos: Position::new(2, 2) })
            .unwrap();
        let mut player = AutoPlayer::new(3);
        for _ in 0..10 {
            assert!(player.choose(&engine).is_some());
        }
    }
}
