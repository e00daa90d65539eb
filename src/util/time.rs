//! Time utilities for round pacing

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp in milliseconds
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Session start time for uptime tracking
static SESSION_START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize session start time (call once at startup)
pub fn init_session_time() {
    SESSION_START.get_or_init(Instant::now);
}

/// Get session uptime in seconds
pub fn uptime_secs() -> u64 {
    SESSION_START
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0)
}

/// Deliberation pacing
pub const SHUFFLE_INTERVAL_MS: u64 = 500; // cosmetic cycle period
pub const THINK_TOTAL_MS: u64 = 3000; // opponent deliberation window

/// Timer configuration for one round of deliberation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTiming {
    /// Period of the cosmetic shuffle cycle
    pub shuffle_interval: Duration,
    /// Total deliberation window, measured from the start of the round
    pub think_total: Duration,
}

impl RoundTiming {
    pub fn from_millis(shuffle_interval_ms: u64, think_total_ms: u64) -> Self {
        Self {
            shuffle_interval: Duration::from_millis(shuffle_interval_ms),
            think_total: Duration::from_millis(think_total_ms),
        }
    }

    /// Number of cosmetic ticks that render before the deadline fires
    pub fn visible_ticks(&self) -> u128 {
        let period = self.shuffle_interval.as_millis();
        if period == 0 {
            return 0;
        }
        // A tick landing exactly on the deadline loses to it
        (self.think_total.as_millis().saturating_sub(1)) / period
    }
}

impl Default for RoundTiming {
    fn default() -> Self {
        Self::from_millis(SHUFFLE_INTERVAL_MS, THINK_TOTAL_MS)
    }
}

/// A simple timer for measuring durations
#[derive(Debug, Clone)]
pub struct Timer {
    start: tokio::time::Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: tokio::time::Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_matches_pacing_constants() {
        let timing = RoundTiming::default();
        assert_eq!(timing.shuffle_interval, Duration::from_millis(500));
        assert_eq!(timing.think_total, Duration::from_millis(3000));
    }

    #[test]
    fn visible_ticks_excludes_tick_on_deadline() {
        assert_eq!(RoundTiming::default().visible_ticks(), 5);
        assert_eq!(RoundTiming::from_millis(400, 3000).visible_ticks(), 7);
        assert_eq!(RoundTiming::from_millis(0, 3000).visible_ticks(), 0);
    }
}
