//! Lap statistics and duration formatting
//!
//! Everything here is a pure function over lap durations. Callers recompute on
//! every read instead of caching the results next to the session.

use std::fmt;

use serde::Serialize;

use crate::error::TimerError;

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;
const MS_PER_CENTISECOND: u64 = 10;

/// Fastest and slowest completed laps, as indices into the completed lap slice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LapStats {
    pub fastest_index: Option<usize>,
    pub slowest_index: Option<usize>,
}

impl LapStats {
    /// No highlighting
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_fastest(&self, index: usize) -> bool {
        self.fastest_index == Some(index)
    }

    pub fn is_slowest(&self, index: usize) -> bool {
        self.slowest_index == Some(index)
    }
}

/// Find the fastest (minimum) and slowest (maximum) completed laps.
///
/// Comparisons are strict, so on ties the first lap encountered wins. Fewer
/// than two laps leave both indices unset.
pub fn compute_stats(completed: &[u64]) -> LapStats {
    if completed.len() < 2 {
        return LapStats::none();
    }

    let mut fastest = 0;
    let mut slowest = 0;
    for (index, &lap) in completed.iter().enumerate().skip(1) {
        if lap < completed[fastest] {
            fastest = index;
        }
        if lap > completed[slowest] {
            slowest = index;
        }
    }

    LapStats {
        fastest_index: Some(fastest),
        slowest_index: Some(slowest),
    }
}

/// Zero-padded `MM`, `SS` and `CC` components of a duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationText {
    pub minutes: String,
    pub seconds: String,
    pub centiseconds: String,
}

impl fmt::Display for DurationText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{},{}", self.minutes, self.seconds, self.centiseconds)
    }
}

/// Format a millisecond count, rejecting negative input
pub fn format_duration(ms: i64) -> Result<DurationText, TimerError> {
    u64::try_from(ms)
        .map(format_millis)
        .map_err(|_| TimerError::InvalidArgument(ms))
}

/// Format a millisecond count. Truncates, never rounds.
pub fn format_millis(ms: u64) -> DurationText {
    let minutes = ms / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let centiseconds = (ms % MS_PER_SECOND) / MS_PER_CENTISECOND;

    DurationText {
        minutes: format!("{:02}", minutes),
        seconds: format!("{:02}", seconds),
        centiseconds: format!("{:02}", centiseconds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_need_two_laps() {
        assert_eq!(compute_stats(&[]), LapStats::none());
        assert_eq!(compute_stats(&[1234]), LapStats::none());
    }

    #[test]
    fn stats_pick_min_as_fastest_and_max_as_slowest() {
        let stats = compute_stats(&[500, 100, 300]);
        assert_eq!(stats.fastest_index, Some(1));
        assert_eq!(stats.slowest_index, Some(0));
    }

    #[test]
    fn stats_ties_keep_first_encountered() {
        let stats = compute_stats(&[200, 100, 300, 100, 300]);
        assert_eq!(stats.fastest_index, Some(1));
        assert_eq!(stats.slowest_index, Some(2));

        let flat = compute_stats(&[700, 700, 700]);
        assert_eq!(flat.fastest_index, Some(0));
        assert_eq!(flat.slowest_index, Some(0));
    }

    #[test]
    fn stats_accept_zero_duration_laps() {
        let stats = compute_stats(&[0, 450]);
        assert!(stats.is_fastest(0));
        assert!(stats.is_slowest(1));
    }

    #[test]
    fn format_zero() {
        let text = format_duration(0).unwrap();
        assert_eq!(text.minutes, "00");
        assert_eq!(text.seconds, "00");
        assert_eq!(text.centiseconds, "00");
        assert_eq!(text.to_string(), "00:00,00");
    }

    #[test]
    fn format_truncates_centiseconds() {
        let text = format_duration(754_321).unwrap();
        assert_eq!(
            text,
            DurationText {
                minutes: "12".into(),
                seconds: "34".into(),
                centiseconds: "32".into(),
            }
        );
        assert_eq!(format_millis(999).to_string(), "00:00,99");
        assert_eq!(format_millis(59_999).to_string(), "00:59,99");
    }

    #[test]
    fn format_does_not_wrap_minutes() {
        assert_eq!(format_millis(75 * 60_000).to_string(), "75:00,00");
        assert_eq!(format_millis(100 * 60_000 + 1_010).to_string(), "100:01,01");
    }

    #[test]
    fn format_rejects_negative_input() {
        assert_eq!(format_duration(-1), Err(TimerError::InvalidArgument(-1)));
    }
}
