use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::common::{GameError, MoverKind};

pub const BOARD_SIZE: u8 = 10;
pub const MAX_BOARD_SIZE: u8 = 12;
pub const FPS: u32 = 10;
pub const MAX_FPS: u32 = 120;
pub const START_LIFE: u32 = 10;
/// Life restored by one item.
pub const ITEM_LIFE: u32 = 3;
/// Ticks between life decrements (one second at the default frame rate).
pub const DECAY_TICKS: u64 = 10;
/// Ticks between item spawns.
pub const SPAWN_TICKS: u64 = 20;
pub const MAX_ITEMS: usize = 5;
pub const OPPONENT_INTERVAL_MS: u64 = 400;
/// Tick limit for headless games.
pub const DEFAULT_SIM_TICKS: u64 = 600;
pub const FIRST_STAGE: u8 = 1;
pub const LAST_STAGE: u8 = 5;

/// Concurrency primitive of each opponent, in the order stages introduce them.
pub const STAGE_MOVERS: [MoverKind; 3] = [MoverKind::Task, MoverKind::Thread, MoverKind::Process];

/// Tunables for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub stage: u8,
    pub board_size: u8,
    pub fps: u32,
    pub start_life: u32,
    pub item_life: u32,
    pub decay_ticks: u64,
    pub spawn_ticks: u64,
    pub max_items: usize,
    /// Items spawn and life decays only when set.
    pub items: bool,
    pub opponent_interval: Duration,
    /// One entry per opponent; the index is the opponent id.
    pub movers: Vec<MoverKind>,
}

impl GameConfig {
    /// Default configuration for one of the tutorial stages.
    ///
    /// Stage 1 is the bare board, stage 2 adds items and life, and each later
    /// stage adds one opponent driven by the next kind in [`STAGE_MOVERS`].
    pub fn for_stage(stage: u8) -> Result<Self, GameError> {
        if !(FIRST_STAGE..=LAST_STAGE).contains(&stage) {
            return Err(GameError::InvalidConfig("stage must be between 1 and 5"));
        }
        let opponents = stage.saturating_sub(2) as usize;
        Ok(Self {
            stage,
            board_size: BOARD_SIZE,
            fps: FPS,
            start_life: START_LIFE,
            item_life: ITEM_LIFE,
            decay_ticks: DECAY_TICKS,
            spawn_ticks: SPAWN_TICKS,
            max_items: MAX_ITEMS,
            items: stage >= 2,
            opponent_interval: Duration::from_millis(OPPONENT_INTERVAL_MS),
            movers: STAGE_MOVERS[..opponents].to_vec(),
        })
    }

    /// Check every value is within the range the engine supports.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidBoardSize(self.board_size));
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(GameError::InvalidConfig("fps must be between 1 and 120"));
        }
        if self.start_life == 0 {
            return Err(GameError::InvalidConfig("start life must be positive"));
        }
        if self.decay_ticks == 0 || self.spawn_ticks == 0 {
            return Err(GameError::InvalidConfig("tick intervals must be positive"));
        }
        if self.movers.len() > 9 {
            return Err(GameError::InvalidConfig("at most 9 opponents are supported"));
        }
        if self.opponent_interval < Duration::from_millis(1) && !self.movers.is_empty() {
            return Err(GameError::InvalidConfig("opponent interval must be at least 1 ms"));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stage: LAST_STAGE,
            board_size: BOARD_SIZE,
            fps: FPS,
            start_life: START_LIFE,
            item_life: ITEM_LIFE,
            decay_ticks: DECAY_TICKS,
            spawn_ticks: SPAWN_TICKS,
            max_items: MAX_ITEMS,
            items: true,
            opponent_interval: Duration::from_millis(OPPONENT_INTERVAL_MS),
            movers: STAGE_MOVERS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_add_features_in_order() {
        let one = GameConfig::for_stage(1).unwrap();
        assert!(!one.items);
        assert!(one.movers.is_empty());

        let two = GameConfig::for_stage(2).unwrap();
        assert!(two.items);
        assert!(two.movers.is_empty());

        assert_eq!(GameConfig::for_stage(3).unwrap().movers, vec![MoverKind::Task]);
        assert_eq!(
            GameConfig::for_stage(4).unwrap().movers,
            vec![MoverKind::Task, MoverKind::Thread]
        );
        assert_eq!(GameConfig::for_stage(5).unwrap(), GameConfig::default());
    }

    #[test]
    fn rejects_unknown_stage() {
        assert!(GameConfig::for_stage(0).is_err());
        assert!(GameConfig::for_stage(6).is_err());
    }

    #[test]
    fn validate_checks_ranges() {
        let mut cfg = GameConfig::default();
        assert!(cfg.validate().is_ok());
        cfg.board_size = MAX_BOARD_SIZE + 1;
        assert_eq!(
            cfg.validate(),
            Err(GameError::InvalidBoardSize(MAX_BOARD_SIZE + 1))
        );
        cfg.board_size = BOARD_SIZE;
        cfg.fps = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_sub_millisecond_interval() {
        let mut cfg = GameConfig::default();
        cfg.opponent_interval = Duration::from_micros(500);
        assert!(cfg.validate().is_err());
        cfg.movers.clear();
        assert!(cfg.validate().is_ok());
    }
}
