use std::time::Duration;

use gridchase::{
    play, AutoPlayer, GameConfig, GameSetup, NullScreen, DEFAULT_SIM_TICKS, LAST_STAGE,
    OPPONENT_INTERVAL_MS,
};
use serde_json::json;

/// Headless games keep the tick-based rules but run ten times faster.
const SPEEDUP: u32 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [stage]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let stage: u8 = match args.get(2) {
        Some(s) => s.parse()?,
        None => LAST_STAGE,
    };

    let mut config = GameConfig::for_stage(stage).map_err(|e| anyhow::anyhow!(e))?;
    config.fps *= SPEEDUP;
    config.opponent_interval = Duration::from_millis(OPPONENT_INTERVAL_MS / SPEEDUP as u64);

    let config_json = serde_json::to_value(&config)?;

    // process movers need the main binary, which cargo places next to this one
    let program = std::env::current_exe()?.with_file_name(format!(
        "gridchase{}",
        std::env::consts::EXE_SUFFIX
    ));

    let setup = GameSetup {
        config,
        player: Box::new(AutoPlayer::new(seed)),
        screen: Box::new(NullScreen),
        program,
        seed,
        max_ticks: Some(DEFAULT_SIM_TICKS),
    };
    let (summary, _message) = play(setup).await?;

    let result = json!({
        "seed": seed,
        "stage": stage,
        "status": format!("{:?}", summary.status),
        "ticks": summary.ticks,
        "life": summary.life,
        "items_collected": summary.items_collected,
        "timed_out": summary.timed_out,
        "config": config_json,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
