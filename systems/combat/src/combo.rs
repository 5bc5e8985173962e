use std::time::Duration;

/// Window after a kill within which the next kill extends the combo.
pub const COMBO_WINDOW: Duration = Duration::from_millis(3_000);

/// Highest combo multiplier applied to kill score.
pub const COMBO_SCORE_CAP: u32 = 5;

/// Score base of a regular kill.
pub const KILL_SCORE: u64 = 100;

/// Score base of a boss kill.
pub const BOSS_KILL_SCORE: u64 = 500;

/// Kill streak counter with a rolling window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComboTracker {
    count: u32,
    window: Duration,
}

impl ComboTracker {
    /// Records a kill and returns the updated counter.
    pub fn register_kill(&mut self) -> u32 {
        self.count = if self.window.is_zero() {
            1
        } else {
            self.count.saturating_add(1)
        };
        self.window = COMBO_WINDOW;
        self.count
    }

    /// Consumes simulated time. The counter drops to zero once the window
    /// lapses without a kill.
    pub fn advance(&mut self, dt: Duration) {
        if self.window.is_zero() {
            return;
        }
        self.window = self.window.saturating_sub(dt);
        if self.window.is_zero() {
            self.count = 0;
        }
    }

    /// Current streak.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }
}

/// Score awarded for a kill at the given wave and combo.
#[must_use]
pub fn kill_score(is_boss: bool, wave: u32, combo: u32) -> u64 {
    let base = if is_boss { BOSS_KILL_SCORE } else { KILL_SCORE };
    base * u64::from(wave) * u64::from(combo.min(COMBO_SCORE_CAP))
}
