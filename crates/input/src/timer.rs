//! Periodic fall timer.
//!
//! Delivers at most one tick per poll; the deadline then advances by a full
//! period from the old deadline, or from `now` if the loop fell behind by more
//! than one period.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FallTimer {
    interval: Duration,
    next_due: Instant,
}

impl FallTimer {
    pub fn new(interval_ms: u32, now: Instant) -> Self {
        let interval = Self::clamp(interval_ms);
        Self {
            interval,
            next_due: now + interval,
        }
    }

    fn clamp(interval_ms: u32) -> Duration {
        Duration::from_millis(interval_ms.max(1) as u64)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Reprogram the period and restart it from `now`
    pub fn set_interval_ms(&mut self, interval_ms: u32, now: Instant) {
        self.interval = Self::clamp(interval_ms);
        self.restart(now);
    }

    /// Start a fresh period at `now`, dropping any tick that was due
    pub fn restart(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }

    /// Returns true if a tick is due at `now`
    pub fn poll_due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }

    /// Time left until the next tick
    pub fn until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
