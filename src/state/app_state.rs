//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{LapTimerState, TimerSnapshot};
use crate::{
    error::TimerError,
    tasks::TickerHandle,
    utils::{system_clock, Clock},
};

/// Owns the timing session, its ticker and the change notifications
pub struct AppState {
    /// The one timing session
    pub session: Arc<Mutex<LapTimerState>>,
    /// Ticker cadence while running
    pub tick_interval: Duration,
    clock: Clock,
    /// Present only while a session is running
    ticker: Mutex<Option<TickerHandle>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel carrying every session change, ticks included
    pub state_change_tx: Arc<watch::Sender<LapTimerState>>,
    /// Keep the receiver alive to prevent channel closure
    pub _state_change_rx: watch::Receiver<LapTimerState>,
}

impl AppState {
    /// Create a new AppState driven by the system wall clock
    pub fn new(port: u16, host: String, tick_interval: Duration) -> Self {
        Self::with_clock(port, host, tick_interval, system_clock())
    }

    /// Create a new AppState with a custom time source
    pub fn with_clock(port: u16, host: String, tick_interval: Duration, clock: Clock) -> Self {
        let (state_change_tx, state_change_rx) = watch::channel(LapTimerState::new());

        Self {
            session: Arc::new(Mutex::new(LapTimerState::new())),
            tick_interval,
            clock,
            ticker: Mutex::new(None),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            state_change_tx: Arc::new(state_change_tx),
            _state_change_rx: state_change_rx,
        }
    }

    fn lock_ticker(&self) -> Result<MutexGuard<'_, Option<TickerHandle>>, TimerError> {
        self.ticker
            .lock()
            .map_err(|e| TimerError::StateUnavailable(format!("ticker lock poisoned: {}", e)))
    }

    /// Apply a transition to the session and notify subscribers.
    ///
    /// Rejected transitions leave the session untouched and publish nothing.
    pub fn update_session<F>(&self, action: &str, updater: F) -> Result<LapTimerState, TimerError>
    where
        F: FnOnce(&mut LapTimerState, u64) -> Result<(), TimerError>,
    {
        let now = (self.clock)();
        let mut session = self.session.lock()
            .map_err(|e| TimerError::StateUnavailable(format!("session lock poisoned: {}", e)))?;

        updater(&mut *session, now)?;
        let updated = session.clone();
        drop(session); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.state_change_tx.send_replace(updated.clone());
        Ok(updated)
    }

    /// Start a session and arm the ticker
    pub fn start(&self) -> Result<LapTimerState, TimerError> {
        let mut ticker = self.lock_ticker()?;
        let updated = self.update_session("start", |timer, now| timer.start(now))?;

        if let Some(stale) = ticker.take() {
            debug!("Replacing stale ticker");
            stale.cancel();
        }
        *ticker = Some(TickerHandle::spawn(
            Arc::clone(&self.session),
            Arc::clone(&self.state_change_tx),
            Arc::clone(&self.clock),
            self.tick_interval,
        ));

        info!("Timer started");
        Ok(updated)
    }

    /// Close the current lap at the present time
    pub fn lap(&self) -> Result<LapTimerState, TimerError> {
        let updated = self.update_session("lap", |timer, now| {
            timer.tick(now);
            timer.lap()
        })?;
        info!("Lap {} recorded", updated.completed_laps().len());
        Ok(updated)
    }

    /// Freeze the session and cancel the ticker
    pub fn stop(&self) -> Result<LapTimerState, TimerError> {
        let mut ticker = self.lock_ticker()?;
        let updated = self.update_session("stop", |timer, now| {
            timer.tick(now);
            timer.stop()
        })?;

        if let Some(handle) = ticker.take() {
            handle.cancel();
        }

        info!("Timer stopped at {}ms", updated.elapsed());
        Ok(updated)
    }

    /// Clear a stopped session back to idle
    pub fn reset(&self) -> Result<LapTimerState, TimerError> {
        let mut ticker = self.lock_ticker()?;
        let updated = self.update_session("reset", |timer, _| timer.reset())?;

        if let Some(handle) = ticker.take() {
            handle.cancel();
        }

        info!("Timer reset");
        Ok(updated)
    }

    /// Cancel the ticker, if any, without touching the session
    pub fn shutdown(&self) {
        if let Ok(mut ticker) = self.ticker.lock() {
            if let Some(handle) = ticker.take() {
                handle.cancel();
                debug!("Ticker cancelled on shutdown");
            }
        }
    }

    /// Get a copy of the current session
    pub fn get_session(&self) -> Result<LapTimerState, TimerError> {
        self.session.lock()
            .map(|session| session.clone())
            .map_err(|e| TimerError::StateUnavailable(format!("session lock poisoned: {}", e)))
    }

    /// Derive a display snapshot of the current session
    pub fn snapshot(&self) -> Result<TimerSnapshot, TimerError> {
        self.get_session().map(|session| TimerSnapshot::from_state(&session))
    }

    /// Whether a ticker task is currently alive
    pub fn ticker_active(&self) -> bool {
        self.ticker
            .lock()
            .map(|ticker| ticker.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> watch::Receiver<LapTimerState> {
        self.state_change_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
