//! Display-ready view of a timing session

use serde::{Deserialize, Serialize};

use super::{LapTimerState, Phase};
use crate::stats::{compute_stats, format_millis};

/// One row of the lap table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapRow {
    /// 1 for the oldest lap
    pub number: usize,
    pub duration_ms: u64,
    /// `MM:SS,CC`
    pub display: String,
    pub in_progress: bool,
    pub fastest: bool,
    pub slowest: bool,
}

/// Everything a presentation layer needs to draw the timer screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: String,
    pub running: bool,
    pub elapsed_ms: u64,
    pub elapsed: String,
    pub lap_count: usize,
    pub fastest_index: Option<usize>,
    pub slowest_index: Option<usize>,
    /// Newest first
    pub laps: Vec<LapRow>,
}

impl TimerSnapshot {
    /// Derive a snapshot from the current session
    pub fn from_state(state: &LapTimerState) -> Self {
        let completed = state.completed_laps();
        let stats = compute_stats(completed);
        let elapsed_ms = state.elapsed();

        let mut laps = Vec::with_capacity(state.lap_count());
        if state.phase() != Phase::Idle {
            let current = state.current_lap();
            laps.push(LapRow {
                number: state.lap_count(),
                duration_ms: current,
                display: format_millis(current).to_string(),
                in_progress: true,
                fastest: false,
                slowest: false,
            });
        }
        for (index, &duration_ms) in completed.iter().enumerate().rev() {
            laps.push(LapRow {
                number: index + 1,
                duration_ms,
                display: format_millis(duration_ms).to_string(),
                in_progress: false,
                fastest: stats.is_fastest(index),
                slowest: stats.is_slowest(index),
            });
        }

        Self {
            phase: state.phase().as_str().to_string(),
            running: state.is_running(),
            elapsed_ms,
            elapsed: format_millis(elapsed_ms).to_string(),
            lap_count: state.lap_count(),
            fastest_index: stats.fastest_index,
            slowest_index: stats.slowest_index,
            laps,
        }
    }
}
