#![forbid(unsafe_code)]

//! Countdown timers advanced by the host's frame ticks.
//!
//! ```rust
//! use sparsegrid_core::timer::Countdown;
//! use std::time::Duration;
//!
//! let mut dwell = Countdown::new(Duration::from_millis(200));
//! dwell.start();
//! assert!(!dwell.tick(Duration::from_millis(150)));
//! assert!(dwell.tick(Duration::from_millis(60)));
//! assert!(!dwell.is_running());
//! ```

use std::time::Duration;

/// A one-shot countdown. Fires once when it reaches zero, then stops.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: Duration,
    remaining: Duration,
    running: bool,
}

impl Countdown {
    /// Creates a new countdown with the given duration, initially stopped.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    /// Returns the configured duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the remaining time.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Returns whether the countdown is armed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Arms the countdown from its full duration, restarting it if armed.
    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.running = true;
    }

    /// Disarms without firing.
    pub fn cancel(&mut self) {
        self.running = false;
        self.remaining = self.duration;
    }

    /// Subtracts `delta` if armed. Returns `true` exactly once, on the tick
    /// that reaches zero.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(delta);
        if self.remaining.is_zero() {
            self.running = false;
            true
        } else {
            false
        }
    }
}
