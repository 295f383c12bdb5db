//! Opponent movers.
//!
//! Every opponent performs its own [`RandomWalk`](crate::core::RandomWalk) and
//! publishes each new position as an [`OpponentUpdate`] on one shared channel.
//! Three drivers demonstrate three concurrency primitives:
//! - [`task`]: a cooperative tokio task
//! - [`thread`]: a preemptive OS thread
//! - [`process`]: a separate worker process writing frames to a pipe

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{Board, GameConfig, MoverKind, Position};
use crate::protocol::OpponentUpdate;

pub mod process;
pub mod task;
pub mod thread;

pub use process::{run_walker, ProcessMover, WalkerArgs};

pub type UpdateSender = mpsc::UnboundedSender<OpponentUpdate>;
pub type UpdateReceiver = mpsc::UnboundedReceiver<OpponentUpdate>;

/// Channel every mover publishes on and the game loop drains.
pub fn channel() -> (UpdateSender, UpdateReceiver) {
    mpsc::unbounded_channel()
}

/// Everything needed to start one mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoverSpec {
    pub id: u8,
    pub kind: MoverKind,
    pub start: Position,
    pub interval: Duration,
    pub seed: u64,
}

impl MoverSpec {
    /// One spec per configured opponent, starting in the corners. Seeds are
    /// derived from `seed` so a fixed game seed fixes every walk.
    pub fn from_config(config: &GameConfig, board: &Board, seed: u64) -> Vec<MoverSpec> {
        config
            .movers
            .iter()
            .enumerate()
            .map(|(i, &kind)| MoverSpec {
                id: i as u8,
                kind,
                start: board.corner(i),
                interval: config.opponent_interval,
                seed: seed.wrapping_add(i as u64 + 1),
            })
            .collect()
    }
}

/// Collect every update queued so far without waiting.
///
/// A disconnected channel just means every mover has stopped; it yields
/// whatever was left in the queue.
pub fn drain(rx: &mut UpdateReceiver) -> Vec<OpponentUpdate> {
    let mut updates = Vec::new();
    while let Ok(update) = rx.try_recv() {
        updates.push(update);
    }
    updates
}

/// Handles to every running mover.
pub struct Movers {
    shutdown: Arc<AtomicBool>,
    tasks: Vec<JoinHandle<()>>,
    threads: Vec<std::thread::JoinHandle<()>>,
    processes: Vec<ProcessMover>,
}

impl Movers {
    /// Start one mover per spec. `program` is the executable that provides
    /// the hidden `walker` subcommand for process movers.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        specs: &[MoverSpec],
        board: Board,
        program: &Path,
        tx: &UpdateSender,
    ) -> anyhow::Result<Self> {
        let mut movers = Movers {
            shutdown: Arc::new(AtomicBool::new(false)),
            tasks: Vec::new(),
            threads: Vec::new(),
            processes: Vec::new(),
        };
        for spec in specs {
            if let Err(e) = movers.start(spec, board, program, tx) {
                movers.abandon();
                return Err(e);
            }
        }
        Ok(movers)
    }

    fn start(
        &mut self,
        spec: &MoverSpec,
        board: Board,
        program: &Path,
        tx: &UpdateSender,
    ) -> anyhow::Result<()> {
        if !board.contains(spec.start) {
            return Err(anyhow::anyhow!(
                "Mover {} starts off the board at {}",
                spec.id,
                spec.start
            ));
        }
        log::info!("starting {} mover {} at {}", spec.kind, spec.id, spec.start);
        match spec.kind {
            MoverKind::Task => self.tasks.push(task::spawn_task(
                *spec,
                board,
                tx.clone(),
                self.shutdown.clone(),
            )),
            MoverKind::Thread => self.threads.push(thread::spawn_thread(
                *spec,
                board,
                tx.clone(),
                self.shutdown.clone(),
            )?),
            MoverKind::Process => self.processes.push(process::spawn_process(
                *spec,
                board,
                program,
                tx.clone(),
                self.shutdown.clone(),
            )?),
        }
        Ok(())
    }

    /// Stop whatever a failed `spawn` already started. Threads are left to
    /// notice the flag on their next wake-up.
    fn abandon(self) {
        log::warn!("stopping {} mover(s) after a failed start", self.len());
        self.shutdown.store(true, Ordering::SeqCst);
        for handle in self.tasks {
            handle.abort();
        }
        for mut proc in self.processes {
            proc.kill();
        }
    }

    /// Number of movers started.
    pub fn len(&self) -> usize {
        self.tasks.len() + self.threads.len() + self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop every mover: tasks are aborted, threads joined, workers killed.
    pub async fn shutdown(self) {
        self.shutdown.store(true, Ordering::SeqCst);
        for handle in self.tasks {
            handle.abort();
        }
        for mut proc in self.processes {
            proc.stop().await;
        }
        for handle in self.threads {
            match tokio::task::spawn_blocking(move || handle.join()).await {
                Ok(Ok(())) => {}
                Ok(Err(_)) => log::warn!("mover thread panicked"),
                Err(e) => log::warn!("failed to join mover thread: {}", e),
            }
        }
        log::debug!("all movers stopped");
    }
}
