//! The game loop.
//!
//! One tick: read the player's command, drain opponent updates, move the
//! player, advance the engine, redraw.

use std::path::PathBuf;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::time::{interval, MissedTickBehavior};

use crate::core::{GameConfig, GameEngine, GameStatus};
use crate::input::Command;
use crate::opponent::{self, MoverSpec, Movers, UpdateReceiver};
use crate::player::Player;
use crate::ui::{render_lines, Screen};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub status: GameStatus,
    pub ticks: u64,
    pub life: u32,
    pub items_collected: u32,
    /// The tick limit was reached before the game ended on its own.
    pub timed_out: bool,
}

/// Drives one game: owns the engine, the player, the screen and the update queue.
pub struct Runner {
    player: Box<dyn Player>,
    screen: Box<dyn Screen>,
    engine: GameEngine,
    updates: UpdateReceiver,
    max_ticks: Option<u64>,
}

impl Runner {
    pub fn new(
        player: Box<dyn Player>,
        screen: Box<dyn Screen>,
        engine: GameEngine,
        updates: UpdateReceiver,
    ) -> Self {
        Self {
            player,
            screen,
            engine,
            updates,
            max_ticks: None,
        }
    }

    /// Stop after `ticks` frames even if the game is still running.
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Perform one frame without waiting for the clock.
    pub fn step(&mut self, rng: &mut SmallRng) -> anyhow::Result<()> {
        let command = self.player.next_command(&self.engine)?;

        for update in opponent::drain(&mut self.updates) {
            if let Err(e) = self.engine.apply_update(update) {
                log::warn!("ignoring update {:?}: {}", update, e);
            }
        }

        match command {
            Some(Command::Quit) => {
                log::info!("player quit at tick {}", self.engine.ticks());
                self.engine.quit();
            }
            Some(Command::Move(dir)) => {
                self.engine.move_player(dir);
            }
            None => {}
        }

        for event in self.engine.tick(rng) {
            log::debug!("tick {}: {:?}", self.engine.ticks(), event);
        }
        self.screen.draw(&render_lines(&self.engine))
    }

    /// Run at the configured frame rate until the game ends or the tick limit is hit.
    pub async fn run(&mut self, rng: &mut SmallRng) -> anyhow::Result<GameSummary> {
        let period = Duration::from_secs_f64(1.0 / self.engine.config().fps as f64);
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.screen.draw(&render_lines(&self.engine))?;
        let mut timed_out = false;
        while !self.engine.is_over() {
            if self.max_ticks.map_or(false, |max| self.engine.ticks() >= max) {
                timed_out = true;
                break;
            }
            ticker.tick().await;
            self.step(rng)?;
        }
        log::info!(
            "game finished after {} ticks: {:?}",
            self.engine.ticks(),
            self.engine.status()
        );
        Ok(self.summary(timed_out))
    }

    fn summary(&self, timed_out: bool) -> GameSummary {
        GameSummary {
            status: self.engine.status(),
            ticks: self.engine.ticks(),
            life: self.engine.life(),
            items_collected: self.engine.items_collected(),
            timed_out,
        }
    }
}

/// Everything needed to play one game.
pub struct GameSetup {
    pub config: GameConfig,
    pub player: Box<dyn Player>,
    pub screen: Box<dyn Screen>,
    /// Executable providing the `walker` subcommand for process movers.
    pub program: PathBuf,
    pub seed: u64,
    pub max_ticks: Option<u64>,
}

/// Start the movers, run the loop, and stop the movers again.
///
/// Returns the summary together with the final console message.
pub async fn play(setup: GameSetup) -> anyhow::Result<(GameSummary, String)> {
    let GameSetup {
        config,
        player,
        screen,
        program,
        seed,
        max_ticks,
    } = setup;

    let engine = GameEngine::new(config).map_err(|e| anyhow::anyhow!(e))?;
    let specs = MoverSpec::from_config(engine.config(), engine.board(), seed);
    let (tx, rx) = opponent::channel();
    let movers = Movers::spawn(&specs, *engine.board(), &program, &tx)?;
    drop(tx);

    let mut runner = Runner::new(player, screen, engine, rx);
    if let Some(max) = max_ticks {
        runner = runner.with_max_ticks(max);
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    let result = runner.run(&mut rng).await;
    movers.shutdown().await;

    let summary = result?;
    let message = crate::ui::game_over_message(runner.engine());
    Ok((summary, message))
}
