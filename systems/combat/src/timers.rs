use std::time::Duration;

/// Countdown that gates a repeatable action.
///
/// A default cooldown is elapsed, so an entity that never started one may act
/// immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cooldown {
    remaining: Duration,
}

impl Cooldown {
    /// Creates an elapsed cooldown.
    #[must_use]
    pub const fn elapsed() -> Self {
        Self {
            remaining: Duration::ZERO,
        }
    }

    /// Creates a cooldown that elapses after `duration`.
    #[must_use]
    pub const fn running(duration: Duration) -> Self {
        Self {
            remaining: duration,
        }
    }

    /// Reports whether the gated action may fire.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Time left before the cooldown elapses.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Restarts the countdown.
    pub fn start(&mut self, duration: Duration) {
        self.remaining = duration;
    }

    /// Consumes simulated time.
    pub fn advance(&mut self, dt: Duration) {
        self.remaining = self.remaining.saturating_sub(dt);
    }
}
