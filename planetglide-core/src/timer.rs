//! Auto-resetting countdown used for cloud drift and dispersal cooldowns.

/// Fraction of the duration treated as "already there" when checking for
/// completion, so accumulated `f32` steps finish on the same tick as one
/// exact step would.
pub(crate) const COMPLETION_TOLERANCE: f32 = 1e-5;

/// A countdown that wraps back to zero each time it reaches its duration.
///
/// `elapsed` always stays in `[0, duration)`; every crossing of the
/// duration is reported exactly once by [`Timer::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    duration: f32,
    elapsed: f32,
}

impl Timer {
    /// Create a timer with the given duration in seconds.
    ///
    /// Durations are validated by the config layer; a non-positive value
    /// completes on every call to `advance`.
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    /// Add `dt` to the elapsed time.
    ///
    /// Returns `true` when the duration was reached, in which case the timer
    /// has already been reset to zero.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;

        if self.elapsed >= self.duration * (1.0 - COMPLETION_TOLERANCE) {
            self.elapsed = 0.0;
            return true;
        }

        false
    }

    /// Elapsed time as a fraction of the duration, in `[0, 1)`.
    pub fn progress(&self) -> f32 {
        self.elapsed / self.duration
    }

    /// Restart the countdown from zero.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
