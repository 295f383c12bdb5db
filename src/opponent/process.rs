use std::io::Write;
use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Args;
use tokio::io::{AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

use super::{MoverSpec, UpdateSender};
use crate::core::{Board, Position, RandomWalk, OPPONENT_INTERVAL_MS};
use crate::protocol::{read_frame, write_frame, OpponentUpdate};

/// Subcommand name the parent uses to launch a worker.
pub const WALKER_COMMAND: &str = "walker";

/// Arguments of the worker process.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct WalkerArgs {
    /// Opponent id stamped on every update.
    #[arg(long)]
    pub id: u8,
    /// Board edge length.
    #[arg(long)]
    pub size: u8,
    #[arg(long)]
    pub col: u8,
    #[arg(long)]
    pub row: u8,
    #[arg(long, default_value_t = OPPONENT_INTERVAL_MS)]
    pub interval_ms: u64,
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Stop after this many steps instead of running until the pipe closes.
    #[arg(long)]
    pub steps: Option<u64>,
}

impl WalkerArgs {
    pub fn from_spec(spec: &MoverSpec, board: &Board) -> Self {
        Self {
            id: spec.id,
            size: board.size(),
            col: spec.start.col,
            row: spec.start.row,
            interval_ms: (spec.interval.as_millis() as u64).max(1),
            seed: spec.seed,
            steps: None,
        }
    }

    /// Command line for the worker, starting with the subcommand.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            WALKER_COMMAND.to_string(),
            "--id".into(),
            self.id.to_string(),
            "--size".into(),
            self.size.to_string(),
            "--col".into(),
            self.col.to_string(),
            "--row".into(),
            self.row.to_string(),
            "--interval-ms".into(),
            self.interval_ms.to_string(),
            "--seed".into(),
            self.seed.to_string(),
        ];
        if let Some(steps) = self.steps {
            args.push("--steps".into());
            args.push(steps.to_string());
        }
        args
    }
}

/// Worker-process entry point: walk and write one frame per step to `out`.
///
/// Returns the number of frames written. A write failure means the parent is
/// gone, which ends the walk without an error.
pub fn run_walker<W: Write>(args: &WalkerArgs, out: &mut W) -> anyhow::Result<u64> {
    let board = Board::new(args.size).map_err(|e| anyhow::anyhow!(e))?;
    let start = Position::new(args.col, args.row);
    let mut walk = RandomWalk::new(board, start, args.seed).map_err(|e| anyhow::anyhow!(e))?;
    let interval = Duration::from_millis(args.interval_ms);
    log::info!("walker {} starting at {}", args.id, start);

    let mut written = 0u64;
    while args.steps.map_or(true, |n| written < n) {
        thread::sleep(interval);
        let pos = walk.advance();
        if let Err(e) = write_frame(out, &OpponentUpdate { id: args.id, pos }) {
            log::debug!("walker {}: {}; exiting", args.id, e);
            break;
        }
        written += 1;
    }
    Ok(written)
}

/// A running worker process and the task forwarding its frames.
pub struct ProcessMover {
    id: u8,
    child: Child,
    reader: JoinHandle<()>,
}

impl ProcessMover {
    /// Kill the worker and stop forwarding.
    pub async fn stop(&mut self) {
        if let Err(e) = self.child.kill().await {
            log::debug!("walker {} already gone: {}", self.id, e);
        }
        self.reader.abort();
    }

    /// Start killing the worker without waiting for it to exit.
    pub(super) fn kill(&mut self) {
        if let Err(e) = self.child.start_kill() {
            log::debug!("walker {} already gone: {}", self.id, e);
        }
        self.reader.abort();
    }
}

/// Launch `program walker …` and forward its frames to `tx`.
pub fn spawn_process(
    spec: MoverSpec,
    board: Board,
    program: &Path,
    tx: UpdateSender,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<ProcessMover> {
    let args = WalkerArgs::from_spec(&spec, &board);
    let mut child = Command::new(program)
        .args(args.to_args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            anyhow::anyhow!("Failed to start walker {}: {}", program.display(), e)
        })?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!("Walker stdout was not captured"))?;
    let reader = tokio::spawn(forward_frames(spec.id, BufReader::new(stdout), tx, shutdown));
    Ok(ProcessMover {
        id: spec.id,
        child,
        reader,
    })
}

/// Decode frames from a worker's pipe and publish them until the pipe closes,
/// a frame is malformed, shutdown is flagged, or the loop goes away.
pub async fn forward_frames<R: AsyncRead + Unpin>(
    id: u8,
    mut input: R,
    tx: UpdateSender,
    shutdown: Arc<AtomicBool>,
) {
    loop {
        match read_frame(&mut input).await {
            Ok(Some(update)) => {
                if shutdown.load(Ordering::SeqCst) {
                    break;
                }
                if update.id != id {
                    log::warn!("walker {} sent an update for opponent {}; dropped", id, update.id);
                    continue;
                }
                if tx.send(update).is_err() {
                    break;
                }
            }
            Ok(None) => {
                log::info!("walker {} closed its pipe", id);
                break;
            }
            Err(e) => {
                log::warn!("walker {}: {}", id, e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_round_trip_through_clap() {
        #[derive(clap::Parser)]
        struct Wrapper {
            #[command(subcommand)]
            cmd: Sub,
        }
        #[derive(clap::Subcommand)]
        enum Sub {
            Walker(WalkerArgs),
        }

        let args = WalkerArgs {
            id: 2,
            size: 10,
            col: 0,
            row: 9,
            interval_ms: 250,
            seed: 77,
            steps: Some(4),
        };
        let mut argv = vec!["gridchase".to_string()];
        argv.extend(args.to_args());
        let parsed = <Wrapper as clap::Parser>::try_parse_from(argv).unwrap();
        let Sub::Walker(back) = parsed.cmd;
        assert_eq!(back, args);
    }

    #[test]
    fn sub_millisecond_interval_rounds_up() {
        let board = Board::new(6).unwrap();
        let spec = MoverSpec {
            id: 0,
            kind: crate::core::MoverKind::Process,
            start: board.corner(1),
            interval: Duration::from_micros(300),
            seed: 1,
        };
        let args = WalkerArgs::from_spec(&spec, &board);
        assert_eq!(args.interval_ms, 1);
        assert_eq!((args.col, args.row), (5, 0));
    }

    #[test]
    fn walker_writes_requested_steps() {
        let args = WalkerArgs {
            id: 1,
            size: 5,
            col: 4,
            row: 0,
            interval_ms: 0,
            seed: 3,
            steps: Some(6),
        };
        let mut out = Vec::new();
        assert_eq!(run_walker(&args, &mut out).unwrap(), 6);
        assert!(!out.is_empty());
    }

    #[test]
    fn walker_rejects_bad_start() {
        let args = WalkerArgs {
            id: 0,
            size: 5,
            col: 5,
            row: 0,
            interval_ms: 0,
            seed: 0,
            steps: Some(1),
        };
        assert!(run_walker(&args, &mut Vec::new()).is_err());
    }
}
