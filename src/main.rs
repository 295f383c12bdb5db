use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use rand::Rng;

use gridchase::{
    init_logging, opponent::run_walker, play, GameConfig, GameSetup, KeyboardPlayer, Terminal,
    WalkerArgs, LAST_STAGE,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal.
    Play {
        #[arg(long, default_value_t = LAST_STAGE, help = "Tutorial stage 1-5; each adds a feature")]
        stage: u8,
        #[arg(long, help = "Board edge length (1-12)")]
        size: Option<u8>,
        #[arg(long, help = "Frames per second")]
        fps: Option<u32>,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Write logs to this file instead of stderr")]
        log_file: Option<PathBuf>,
    },
    /// Worker process behind a process-driven opponent.
    #[command(hide = true)]
    Walker(WalkerArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            stage,
            size,
            fps,
            seed,
            log_file,
        } => {
            // keep stderr quiet while the terminal is in raw mode
            let default_level = if log_file.is_some() {
                LevelFilter::Info
            } else {
                LevelFilter::Warn
            };
            init_logging(log_file.as_deref(), default_level)?;

            let mut config = GameConfig::for_stage(stage).map_err(|e| anyhow::anyhow!(e))?;
            if let Some(size) = size {
                config.board_size = size;
            }
            if let Some(fps) = fps {
                config.fps = fps;
                // keep life decay at one per second
                config.decay_ticks = fps as u64;
                config.spawn_ticks = 2 * fps as u64;
            }
            config.validate().map_err(|e| anyhow::anyhow!(e))?;

            let seed = seed.unwrap_or_else(|| rand::rng().random());
            log::info!("stage {} with seed {}", stage, seed);
            let program = std::env::current_exe()?;

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            let terminal = Terminal::enter()?;
            let setup = GameSetup {
                config,
                player: Box::new(KeyboardPlayer::new()),
                screen: Box::new(terminal),
                program,
                seed,
                max_ticks: None,
            };
            let (_summary, message) = runtime.block_on(play(setup))?;
            println!("{}", message);
        }
        Commands::Walker(args) => {
            init_logging(None, LevelFilter::Info)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_walker(&args, &mut out)?;
        }
    }
    Ok(())
}
