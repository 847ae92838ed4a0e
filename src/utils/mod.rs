//! Utility functions module
//! 
//! Clock access and signal handling shared by the binary and the tasks.

pub mod clock;
pub mod signals;

// Re-export main functions
pub use clock::{epoch_millis, system_clock, Clock};
pub use signals::shutdown_signal;
