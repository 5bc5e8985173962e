use std::time::Duration;

use daily_dungeon_core::Element;

/// Damage dealt by one burn tick.
pub const BURN_TICK_DAMAGE: u32 = 8;

/// Interval between burn ticks.
pub const BURN_TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Total lifetime of a burn.
pub const BURN_DURATION: Duration = Duration::from_millis(3_000);

/// Lifetime of a freeze.
pub const FREEZE_DURATION: Duration = Duration::from_millis(2_500);

/// Factor applied to movement speed while frozen.
pub const FREEZE_SPEED_FACTOR: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Burn {
    remaining: Duration,
    until_tick: Duration,
}

impl Burn {
    const fn fresh() -> Self {
        Self {
            remaining: BURN_DURATION,
            until_tick: BURN_TICK_INTERVAL,
        }
    }

    /// Returns the number of ticks that fired. Ticks land every interval
    /// after application, the last one exactly when the burn runs out.
    fn advance(&mut self, dt: Duration) -> u32 {
        let mut left = dt.min(self.remaining);
        let mut ticks = 0;
        while !self.until_tick.is_zero() && left >= self.until_tick {
            left -= self.until_tick;
            self.remaining = self.remaining.saturating_sub(self.until_tick);
            self.until_tick = BURN_TICK_INTERVAL;
            ticks += 1;
        }
        self.until_tick -= left;
        self.remaining = self.remaining.saturating_sub(left);
        ticks
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Freeze {
    remaining: Duration,
    original_speed: f32,
}

/// Outcome of advancing status timers by one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// Burn damage accumulated during the step.
    pub burn_damage: u32,
    /// Whether a burn ran out during the step.
    pub burn_ended: bool,
    /// Whether a freeze ran out and speed was restored.
    pub freeze_ended: bool,
}

/// The single burn and single freeze record an entity may carry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusEffects {
    burn: Option<Burn>,
    freeze: Option<Freeze>,
}

impl StatusEffects {
    /// Applies the status effect associated with `element`.
    pub fn apply(&mut self, element: Element, speed: &mut f32) {
        match element {
            Element::Fire => self.apply_burn(),
            Element::Ice => self.apply_freeze(speed),
        }
    }

    /// Starts a burn. An active burn is reset rather than stacked.
    pub fn apply_burn(&mut self) {
        self.burn = Some(Burn::fresh());
    }

    /// Slows `speed` for the freeze duration.
    ///
    /// An active freeze first restores its recorded baseline so repeated
    /// freezes never compound the slow.
    pub fn apply_freeze(&mut self, speed: &mut f32) {
        if let Some(active) = self.freeze.take() {
            *speed = active.original_speed;
        }
        self.freeze = Some(Freeze {
            remaining: FREEZE_DURATION,
            original_speed: *speed,
        });
        *speed *= FREEZE_SPEED_FACTOR;
    }

    /// Advances both timers, restoring `speed` when a freeze ends.
    pub fn advance(&mut self, dt: Duration, speed: &mut f32) -> StatusTick {
        let mut tick = StatusTick::default();

        if let Some(burn) = self.burn.as_mut() {
            tick.burn_damage = burn.advance(dt) * BURN_TICK_DAMAGE;
            if burn.remaining.is_zero() {
                self.burn = None;
                tick.burn_ended = true;
            }
        }

        if let Some(freeze) = self.freeze.as_mut() {
            freeze.remaining = freeze.remaining.saturating_sub(dt);
            if freeze.remaining.is_zero() {
                *speed = freeze.original_speed;
                self.freeze = None;
                tick.freeze_ended = true;
            }
        }

        tick
    }

    /// Reports whether a burn is active.
    #[must_use]
    pub fn is_burning(&self) -> bool {
        self.burn.is_some()
    }

    /// Reports whether a freeze is active.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.freeze.is_some()
    }

    /// Remaining burn time, zero when not burning.
    #[must_use]
    pub fn burn_remaining(&self) -> Duration {
        self.burn.map_or(Duration::ZERO, |burn| burn.remaining)
    }
}
