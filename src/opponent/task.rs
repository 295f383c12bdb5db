use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::interval;

use super::{MoverSpec, UpdateSender};
use crate::core::{Board, RandomWalk};
use crate::protocol::OpponentUpdate;

/// Drive a walk from a tokio task. The task only yields at its interval, so
/// it shares runtime threads cooperatively with the game loop.
pub fn spawn_task(
    spec: MoverSpec,
    board: Board,
    tx: UpdateSender,
    shutdown: Arc<AtomicBool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut walk = match RandomWalk::new(board, spec.start, spec.seed) {
            Ok(walk) => walk,
            Err(e) => {
                log::error!("task mover {}: {}", spec.id, e);
                return;
            }
        };
        let mut ticker = interval(spec.interval);
        // first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if shutdown.load(Ordering::SeqCst) {
                break;
            }
            let pos = walk.advance();
            if tx.send(OpponentUpdate { id: spec.id, pos }).is_err() {
                break;
            }
        }
        log::debug!("task mover {} finished", spec.id);
    })
}
