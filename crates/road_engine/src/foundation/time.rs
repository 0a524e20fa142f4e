//! Time management utilities
//!
//! Game logic works on [`Duration`]s measured from engine start rather than
//! on `Instant`s, so timers can be driven deterministically in tests.

use std::time::{Duration, Instant};

/// Wall-clock frame timer
pub struct Timer {
    started: Instant,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            frame_count: 0,
        }
    }

    /// Count a frame (should be called once per frame)
    pub fn update(&mut self) {
        self.frame_count += 1;
    }

    /// Time elapsed since the timer was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        let total = self.elapsed().as_secs_f32();
        if total > 0.0 {
            self.frame_count as f32 / total
        } else {
            0.0
        }
    }
}

/// Fixed-length timer started at a point on the engine clock
///
/// Used for the round clock, the crash window and the pre-race countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    duration: Duration,
    started_at: Duration,
}

impl Countdown {
    /// Start a countdown of `duration` at engine time `started_at`
    pub const fn new(duration: Duration, started_at: Duration) -> Self {
        Self { duration, started_at }
    }

    /// Total length of the countdown
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Engine time at which the countdown started
    pub const fn started_at(&self) -> Duration {
        self.started_at
    }

    /// Time elapsed since start (zero if `now` precedes the start)
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    /// Whether the full duration has elapsed
    pub fn is_finished(&self, now: Duration) -> bool {
        self.elapsed(now) >= self.duration
    }

    /// Time left before the countdown finishes
    pub fn remaining(&self, now: Duration) -> Duration {
        self.duration.saturating_sub(self.elapsed(now))
    }

    /// Whole seconds left, rounded up; zero once finished
    pub fn remaining_secs(&self, now: Duration) -> u64 {
        let remaining = self.remaining(now);
        let whole = remaining.as_secs();
        if remaining.subsec_nanos() > 0 {
            whole.saturating_add(1)
        } else {
            whole
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_finishes_exactly_at_duration() {
        let countdown = Countdown::new(Duration::from_secs(1), Duration::from_millis(500));

        assert!(!countdown.is_finished(Duration::from_millis(500)));
        assert!(!countdown.is_finished(Duration::from_millis(1499)));
        assert!(countdown.is_finished(Duration::from_millis(1500)));
        assert!(countdown.is_finished(Duration::from_secs(10)));
    }

    #[test]
    fn test_countdown_before_start_has_full_time() {
        let countdown = Countdown::new(Duration::from_secs(3), Duration::from_secs(5));
        assert_eq!(countdown.remaining(Duration::from_secs(1)), Duration::from_secs(3));
    }

    #[test]
    fn test_remaining_secs_rounds_up() {
        let countdown = Countdown::new(Duration::from_secs(30), Duration::ZERO);

        assert_eq!(countdown.remaining_secs(Duration::ZERO), 30);
        assert_eq!(countdown.remaining_secs(Duration::from_millis(500)), 30);
        assert_eq!(countdown.remaining_secs(Duration::from_millis(29_001)), 1);
        assert_eq!(countdown.remaining_secs(Duration::from_secs(30)), 0);
        assert_eq!(countdown.remaining_secs(Duration::from_secs(45)), 0);
    }

    #[test]
    fn test_unbounded_countdown_never_finishes() {
        let countdown = Countdown::new(Duration::MAX, Duration::ZERO);
        assert!(!countdown.is_finished(Duration::from_secs(3600)));
        assert_eq!(countdown.remaining_secs(Duration::from_millis(10)), u64::MAX);
    }
}
