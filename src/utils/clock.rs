//! Wall-clock source for session timestamps

use std::sync::Arc;

use chrono::Utc;

/// Shared source of the current time in epoch milliseconds
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn epoch_millis() -> u64 {
    // Clamp pre-1970 clocks to zero instead of wrapping
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Clock backed by the system wall clock
pub fn system_clock() -> Clock {
    Arc::new(epoch_millis)
}
