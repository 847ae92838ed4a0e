//! Periodic tick task for a running session

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, error, trace};

use crate::{state::LapTimerState, utils::Clock};

/// Owned handle to the background ticker.
///
/// `cancel` consumes the handle, so a ticker is cancelled at most once.
/// Dropping a handle that was never cancelled aborts the task.
pub struct TickerHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Spawn a ticker that advances `session` every `period` until cancelled
    /// or until the session stops running
    pub fn spawn(
        session: Arc<Mutex<LapTimerState>>,
        publisher: Arc<watch::Sender<LapTimerState>>,
        clock: Clock,
        period: Duration,
    ) -> Self {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        debug!("Spawning ticker with a {:?} period", period);
        let task = tokio::spawn(ticker_task(session, publisher, clock, period, cancel_rx));
        Self {
            cancel_tx: Some(cancel_tx),
            task,
        }
    }

    /// Stop the ticker
    pub fn cancel(mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            // The task may already have exited on its own
            let _ = cancel_tx.send(());
        }
    }

    /// Whether the background task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if self.cancel_tx.is_some() {
            self.task.abort();
        }
    }
}

async fn ticker_task(
    session: Arc<Mutex<LapTimerState>>,
    publisher: Arc<watch::Sender<LapTimerState>>,
    clock: Clock,
    period: Duration,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            _ = &mut cancel_rx => {
                debug!("Ticker cancelled");
                break;
            }

            _ = ticks.tick() => {
                let now = clock();
                let updated = match session.lock() {
                    Ok(mut timer) => {
                        if !timer.is_running() {
                            debug!("Session no longer running, ticker exiting");
                            break;
                        }
                        timer.tick(now);
                        timer.clone()
                    }
                    Err(e) => {
                        error!("Failed to lock session for tick: {}", e);
                        break;
                    }
                };

                trace!("Tick at {}: elapsed={}ms", now, updated.elapsed());
                publisher.send_replace(updated);
            }
        }
    }
}
