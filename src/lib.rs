pub mod core;
pub mod input;
mod logging;
pub mod opponent;
pub mod player;
pub mod protocol;
pub mod runner;
pub mod ui;

pub use crate::core::*;
pub use input::{command_for_key, pick_command, Command};
pub use logging::{init_logging, level_from_env, LOG_ENV};
pub use opponent::{MoverSpec, Movers, WalkerArgs};
pub use player::{AutoPlayer, KeyboardPlayer, Player};
pub use protocol::OpponentUpdate;
pub use runner::{play, GameSetup, GameSummary, Runner};
pub use ui::{render_lines, NullScreen, Screen, Terminal};
