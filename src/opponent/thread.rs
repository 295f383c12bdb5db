use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use super::{MoverSpec, UpdateSender};
use crate::core::{Board, RandomWalk};
use crate::protocol::OpponentUpdate;

/// Drive a walk from a dedicated OS thread, preempted by the scheduler like
/// any other thread. Stops when shutdown is flagged or the loop goes away.
pub fn spawn_thread(
    spec: MoverSpec,
    board: Board,
    tx: UpdateSender,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<thread::JoinHandle<()>> {
    let mut walk = RandomWalk::new(board, spec.start, spec.seed)
        .map_err(|e| anyhow::anyhow!(e))?;
    thread::Builder::new()
        .name(format!("mover-{}", spec.id))
        .spawn(move || {
            loop {
                thread::sleep(spec.interval);
                if shutdown.load(Ordering::SeqCst) {
                    break;
                }
                let pos = walk.advance();
                if tx.send(OpponentUpdate { id: spec.id, pos }).is_err() {
                    break;
                }
            }
            log::debug!("thread mover {} finished", spec.id);
        })
        .map_err(|e| anyhow::anyhow!("Failed to spawn mover thread: {}", e))
}
