//! Per-round countdown clock

use serde::{Deserialize, Serialize};

/// Outcome of advancing the countdown.
///
/// `Stopped` marks ticks after expiry, which change nothing. It is kept apart
/// from `Running` so a paused clock with time left is never mistaken for a
/// finished one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerStatus {
    /// Time remains (or the clock is paused)
    Running,
    /// Reached zero on this tick. Reported once per countdown.
    Expired,
    /// Already expired; waiting for `reset`
    Stopped,
}

/// Decrementing clock with pause/resume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountdownTimer {
    time_left: f32,
    paused: bool,
    expired: bool,
}

impl CountdownTimer {
    pub fn new(seconds: f32) -> Self {
        let mut timer = Self {
            time_left: 0.0,
            paused: false,
            expired: false,
        };
        timer.reset(seconds);
        timer
    }

    /// Restart the countdown. Keeps the pause flag.
    pub fn reset(&mut self, seconds: f32) {
        self.time_left = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        self.expired = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    /// Advance by `dt` seconds. Negative or non-finite steps count as zero.
    pub fn tick(&mut self, dt: f32) -> TimerStatus {
        if self.expired {
            return TimerStatus::Stopped;
        }
        if self.paused {
            return TimerStatus::Running;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time_left = (self.time_left - dt).max(0.0);

        if self.time_left <= 0.0 {
            self.expired = true;
            TimerStatus::Expired
        } else {
            TimerStatus::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_and_clamps() {
        let mut timer = CountdownTimer::new(1.0);
        assert_eq!(timer.tick(0.25), TimerStatus::Running);
        assert!((timer.time_left() - 0.75).abs() < 1e-6);
        assert_eq!(timer.tick(5.0), TimerStatus::Expired);
        assert_eq!(timer.time_left(), 0.0);
    }

    #[test]
    fn test_expires_exactly_once() {
        let mut timer = CountdownTimer::new(0.5);
        assert_eq!(timer.tick(0.5), TimerStatus::Expired);
        assert_eq!(timer.tick(0.1), TimerStatus::Stopped);
        assert_eq!(timer.tick(0.1), TimerStatus::Stopped);
        assert!(timer.is_expired());

        timer.reset(2.0);
        assert!(!timer.is_expired());
        assert_eq!(timer.tick(0.1), TimerStatus::Running);
    }

    #[test]
    fn test_pause_freezes_time() {
        let mut timer = CountdownTimer::new(3.0);
        timer.tick(1.0);
        timer.pause();
        for _ in 0..100 {
            assert_eq!(timer.tick(1.0), TimerStatus::Running);
        }
        assert_eq!(timer.time_left(), 2.0);
        timer.resume();
        assert_eq!(timer.time_left(), 2.0);
        timer.tick(0.5);
        assert_eq!(timer.time_left(), 1.5);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut timer = CountdownTimer::new(1.0);
        timer.tick(-3.0);
        timer.tick(f32::NAN);
        timer.tick(f32::INFINITY);
        assert_eq!(timer.time_left(), 1.0);
    }

    #[test]
    fn test_zero_length_expires_on_first_tick() {
        let mut timer = CountdownTimer::new(0.0);
        assert_eq!(timer.tick(0.0), TimerStatus::Expired);
    }
}
