//! Log-based presentation of session changes

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

use crate::{
    state::{AppState, LapTimerState, Phase, TimerSnapshot},
    stats::format_millis,
};

/// Background task that renders session changes to the log until the
/// channel closes
pub async fn display_task(state: Arc<AppState>) {
    info!("Starting display task");

    let mut rx: watch::Receiver<LapTimerState> = state.subscribe();
    let mut previous = rx.borrow_and_update().clone();

    while rx.changed().await.is_ok() {
        let current = rx.borrow_and_update().clone();

        if let Some(line) = describe_change(&previous, &current) {
            info!("{}", line);
        } else if current.elapsed() / 1000 != previous.elapsed() / 1000 {
            debug!("Elapsed {}", format_millis(current.elapsed()));
        }

        match serde_json::to_string(&TimerSnapshot::from_state(&current)) {
            Ok(json) => trace!("Snapshot: {}", json),
            Err(e) => warn!("Failed to serialize snapshot: {}", e),
        }

        previous = current;
    }

    debug!("State channel closed, display task exiting");
}

/// Summarise a lifecycle change worth an info line. Plain ticks yield `None`.
pub fn describe_change(previous: &LapTimerState, current: &LapTimerState) -> Option<String> {
    if previous.phase() != current.phase() {
        return Some(match current.phase() {
            Phase::Running => "Running from 00:00,00".to_string(),
            Phase::Stopped => format!(
                "Stopped at {} after {} completed laps",
                format_millis(current.elapsed()),
                current.completed_laps().len()
            ),
            Phase::Idle => "Reset to idle".to_string(),
        });
    }

    if current.phase() == Phase::Running && current.lap_count() > previous.lap_count() {
        let completed = current.completed_laps();
        let number = completed.len();
        let duration = completed.last().copied().unwrap_or(0);
        return Some(format!("Lap {}: {}", number, format_millis(duration)));
    }

    if current.phase() == Phase::Running && current.start_epoch_ms() != previous.start_epoch_ms() {
        return Some("Restarted".to_string());
    }

    None
}
