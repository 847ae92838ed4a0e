//! Error types for timer operations

use std::fmt;

/// Errors returned by session transitions and formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// `start` while a session is already running
    AlreadyRunning,
    /// `lap` or `stop` without a running session
    NotRunning,
    /// `reset` must follow `stop`
    ResetWhileRunning,
    /// Negative millisecond value handed to the formatter
    InvalidArgument(i64),
    /// The shared session could not be locked
    StateUnavailable(String),
}

impl TimerError {
    /// Whether this error is a rejected state-machine transition
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            TimerError::AlreadyRunning | TimerError::NotRunning | TimerError::ResetWhileRunning
        )
    }
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::AlreadyRunning => write!(f, "timer is already running"),
            TimerError::NotRunning => write!(f, "timer is not running"),
            TimerError::ResetWhileRunning => {
                write!(f, "reset is not allowed while running, stop the timer first")
            }
            TimerError::InvalidArgument(ms) => {
                write!(f, "invalid duration: {}ms is negative", ms)
            }
            TimerError::StateUnavailable(reason) => {
                write!(f, "timer state unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for TimerError {}
