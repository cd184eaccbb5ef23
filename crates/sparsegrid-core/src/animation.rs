#![forbid(unsafe_code)]

//! Tick-driven animation primitives.
//!
//! Nothing here reads a clock. The host advances every animation with
//! [`Animation::tick`] from its frame callback, which keeps tests
//! deterministic.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f64;

    /// Reset the animation to its initial state.
    fn reset(&mut self);

    /// Time elapsed past completion.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

fn non_zero(duration: Duration) -> Duration {
    if duration.is_zero() {
        Duration::from_nanos(1)
    } else {
        duration
    }
}

// ---------------------------------------------------------------------------
// Slide
// ---------------------------------------------------------------------------

/// Interpolates an `f64` between `from` and `to` over a duration.
///
/// [`Animation::value`] returns the normalized eased progress; use
/// [`Slide::position`] for the interpolated value.
#[derive(Debug, Clone, Copy)]
pub struct Slide {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Slide {
    /// Create a new slide from `from` to `to` over `duration` (ease-out).
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: non_zero(duration),
            easing: ease_out,
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Current interpolated position.
    pub fn position(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        let t = (self.easing)(self.progress());
        self.from + (self.to - self.from) * t
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }
}

impl Animation for Slide {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        (self.easing)(self.progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

/// Repeating linear sweep with a start delay. Never completes.
///
/// `value()` stays at 0.0 during the delay, then runs 0.0 to 1.0 once per
/// period and wraps.
#[derive(Debug, Clone, Copy)]
pub struct Sweep {
    period: Duration,
    delay: Duration,
    elapsed: Duration,
}

impl Sweep {
    pub fn new(period: Duration, delay: Duration) -> Self {
        Self {
            period: non_zero(period),
            delay,
            elapsed: Duration::ZERO,
        }
    }

    /// Whether the start delay has passed.
    pub fn is_running(&self) -> bool {
        self.elapsed >= self.delay
    }
}

impl Animation for Sweep {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        false
    }

    fn value(&self) -> f64 {
        let Some(running) = self.elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        let period = self.period.as_secs_f64();
        (running.as_secs_f64() % period) / period
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
