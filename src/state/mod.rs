//! State management module
//! 
//! This module contains the timing session, its display snapshot and the
//! shared application state that owns them.

pub mod lap_timer;
pub mod snapshot;
pub mod app_state;

// Re-export main types
pub use lap_timer::{LapTimerState, Phase};
pub use snapshot::{LapRow, TimerSnapshot};
pub use app_state::AppState;
