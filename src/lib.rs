//! Lap Timer - a stopwatch with lap tracking behind a small HTTP API
//! 
//! This library holds the timing session state machine, the lap statistics
//! and formatting helpers, and the HTTP surface a presentation layer drives.

pub mod config;
pub mod error;
pub mod state;
pub mod stats;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, LapTimerState, Phase, TimerSnapshot};
pub use stats::{compute_stats, format_duration, format_millis, DurationText, LapStats};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
