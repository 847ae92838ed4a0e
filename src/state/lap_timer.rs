//! Lap timer session state machine

use serde::Serialize;

use crate::error::TimerError;

/// Lifecycle phase of a timing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Stopped,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Stopped => "stopped",
        }
    }
}

/// A single timing session: timestamps plus the recorded lap boundaries.
///
/// `laps` is kept in insertion order. Its last entry is the in-progress lap
/// marker, every earlier entry is a closed lap duration in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LapTimerState {
    phase: Phase,
    start_epoch_ms: u64,
    now_epoch_ms: u64,
    laps: Vec<u64>,
}

impl LapTimerState {
    /// Create an idle session with no laps
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            start_epoch_ms: 0,
            now_epoch_ms: 0,
            laps: Vec::new(),
        }
    }

    /// Begin a new session at `now_ms`. A stopped session is re-armed and its
    /// laps are discarded.
    pub fn start(&mut self, now_ms: u64) -> Result<(), TimerError> {
        if self.phase == Phase::Running {
            return Err(TimerError::AlreadyRunning);
        }
        self.start_epoch_ms = now_ms;
        self.now_epoch_ms = now_ms;
        self.laps.clear();
        self.laps.push(0);
        self.phase = Phase::Running;
        Ok(())
    }

    /// Advance the current timestamp. Ignored unless running; never moves
    /// the clock backwards.
    pub fn tick(&mut self, now_ms: u64) {
        if self.phase == Phase::Running {
            self.now_epoch_ms = self.now_epoch_ms.max(now_ms);
        }
    }

    /// Close the in-progress lap at the current elapsed time and open a new one
    pub fn lap(&mut self) -> Result<(), TimerError> {
        if self.phase != Phase::Running {
            return Err(TimerError::NotRunning);
        }
        let closed = self.current_lap();
        if let Some(last) = self.laps.last_mut() {
            *last = closed;
        }
        self.laps.push(0);
        Ok(())
    }

    /// Freeze the session. Elapsed time and laps stay readable.
    pub fn stop(&mut self) -> Result<(), TimerError> {
        if self.phase != Phase::Running {
            return Err(TimerError::NotRunning);
        }
        self.phase = Phase::Stopped;
        Ok(())
    }

    /// Return a stopped session to idle. Resetting an idle session is a no-op.
    pub fn reset(&mut self) -> Result<(), TimerError> {
        if self.phase == Phase::Running {
            return Err(TimerError::ResetWhileRunning);
        }
        *self = Self::new();
        Ok(())
    }

    /// Milliseconds since the session started, 0 when idle
    pub fn elapsed(&self) -> u64 {
        match self.phase {
            Phase::Idle => 0,
            Phase::Running | Phase::Stopped => {
                self.now_epoch_ms.saturating_sub(self.start_epoch_ms)
            }
        }
    }

    /// Live duration of the lap that has not been closed yet
    pub fn current_lap(&self) -> u64 {
        let closed: u64 = self.completed_laps().iter().sum();
        self.elapsed().saturating_sub(closed)
    }

    /// Every closed lap, oldest first
    pub fn completed_laps(&self) -> &[u64] {
        match self.laps.split_last() {
            Some((_, completed)) => completed,
            None => &[],
        }
    }

    /// Raw lap list including the in-progress marker
    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    pub fn lap_count(&self) -> usize {
        self.laps.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn start_epoch_ms(&self) -> u64 {
        self.start_epoch_ms
    }

    pub fn now_epoch_ms(&self) -> u64 {
        self.now_epoch_ms
    }
}

impl Default for LapTimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let timer = LapTimerState::new();
        assert_eq!(timer.phase(), Phase::Idle);
        assert_eq!(timer.elapsed(), 0);
        assert!(timer.laps().is_empty());
        assert!(timer.completed_laps().is_empty());
    }

    #[test]
    fn start_seeds_a_zero_lap() {
        let mut timer = LapTimerState::new();
        timer.start(10_000).unwrap();
        assert!(timer.is_running());
        assert_eq!(timer.laps(), &[0]);
        assert_eq!(timer.start_epoch_ms(), 10_000);
        assert_eq!(timer.now_epoch_ms(), 10_000);
        assert_eq!(timer.elapsed(), 0);
    }

    #[test]
    fn start_while_running_is_rejected() {
        let mut timer = LapTimerState::new();
        timer.start(1_000).unwrap();
        timer.tick(1_500);
        let before = timer.clone();
        assert_eq!(timer.start(2_000), Err(TimerError::AlreadyRunning));
        assert_eq!(timer, before);
    }

    #[test]
    fn tick_advances_only_while_running() {
        let mut timer = LapTimerState::new();
        timer.tick(5_000);
        assert_eq!(timer.elapsed(), 0);

        timer.start(1_000).unwrap();
        timer.tick(1_100);
        timer.tick(1_100);
        assert_eq!(timer.elapsed(), 100);

        timer.stop().unwrap();
        timer.tick(9_000);
        assert_eq!(timer.elapsed(), 100);
    }

    #[test]
    fn elapsed_never_decreases() {
        let mut timer = LapTimerState::new();
        timer.start(1_000).unwrap();
        let mut last = 0;
        for now in [1_000, 1_100, 1_100, 1_050, 1_400, 900, 2_000] {
            timer.tick(now);
            assert!(timer.elapsed() >= last);
            last = timer.elapsed();
        }
        assert_eq!(last, 1_000);
    }

    #[test]
    fn n_laps_give_n_plus_one_entries() {
        let mut timer = LapTimerState::new();
        timer.start(0).unwrap();
        for n in 1..=5u64 {
            timer.tick(n * 1_000);
            timer.lap().unwrap();
        }
        assert_eq!(timer.lap_count(), 6);
        assert_eq!(timer.completed_laps(), &[1_000; 5]);
    }

    #[test]
    fn laps_split_elapsed_time_into_segments() {
        let mut timer = LapTimerState::new();
        timer.start(0).unwrap();
        timer.tick(500);
        timer.lap().unwrap();
        timer.tick(600);
        timer.lap().unwrap();
        timer.tick(900);
        timer.lap().unwrap();
        timer.tick(1_250);

        assert_eq!(timer.completed_laps(), &[500, 100, 300]);
        assert_eq!(timer.current_lap(), 350);
        let total: u64 = timer.completed_laps().iter().sum::<u64>() + timer.current_lap();
        assert_eq!(total, timer.elapsed());
    }

    #[test]
    fn back_to_back_laps_record_zero_duration() {
        let mut timer = LapTimerState::new();
        timer.start(0).unwrap();
        timer.tick(700);
        timer.lap().unwrap();
        timer.lap().unwrap();
        assert_eq!(timer.completed_laps(), &[700, 0]);
    }

    #[test]
    fn lap_and_stop_need_a_running_session() {
        let mut timer = LapTimerState::new();
        assert_eq!(timer.lap(), Err(TimerError::NotRunning));
        assert_eq!(timer.stop(), Err(TimerError::NotRunning));
        assert_eq!(timer, LapTimerState::new());

        timer.start(0).unwrap();
        timer.tick(300);
        timer.stop().unwrap();
        let stopped = timer.clone();
        assert_eq!(timer.lap(), Err(TimerError::NotRunning));
        assert_eq!(timer.stop(), Err(TimerError::NotRunning));
        assert_eq!(timer, stopped);
    }

    #[test]
    fn stop_keeps_results_readable() {
        let mut timer = LapTimerState::new();
        timer.start(0).unwrap();
        timer.tick(400);
        timer.lap().unwrap();
        timer.tick(1_000);
        timer.stop().unwrap();

        assert_eq!(timer.phase(), Phase::Stopped);
        assert_eq!(timer.elapsed(), 1_000);
        assert_eq!(timer.completed_laps(), &[400]);
        assert_eq!(timer.current_lap(), 600);
    }

    #[test]
    fn stop_then_reset_returns_to_initial_state() {
        let mut timer = LapTimerState::new();
        timer.start(42).unwrap();
        timer.tick(1_042);
        timer.lap().unwrap();
        timer.stop().unwrap();
        timer.reset().unwrap();
        assert_eq!(timer, LapTimerState::new());
    }

    #[test]
    fn reset_while_running_is_rejected() {
        let mut timer = LapTimerState::new();
        timer.start(0).unwrap();
        timer.tick(250);
        timer.lap().unwrap();
        let before = timer.clone();
        assert_eq!(timer.reset(), Err(TimerError::ResetWhileRunning));
        assert_eq!(timer, before);
    }

    #[test]
    fn reset_when_idle_is_a_no_op() {
        let mut timer = LapTimerState::new();
        assert_eq!(timer.reset(), Ok(()));
        assert_eq!(timer, LapTimerState::new());
    }

    #[test]
    fn restart_from_stopped_discards_previous_laps() {
        let mut timer = LapTimerState::new();
        timer.start(0).unwrap();
        timer.tick(800);
        timer.lap().unwrap();
        timer.stop().unwrap();

        timer.start(5_000).unwrap();
        assert!(timer.is_running());
        assert_eq!(timer.laps(), &[0]);
        assert_eq!(timer.elapsed(), 0);
    }
}
