use std::time::Duration;

use daily_dungeon_core::{EquipmentItem, Modifier, PlayerClass};
use serde::{Deserialize, Serialize};

const DEFAULT_TICK_MILLIS: u64 = 16;
const DEFAULT_FINAL_WAVE: u32 = 20;
const DEFAULT_MONSTER: &str = "Goblin";

/// Everything needed to build, and later rebuild, a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 100-symbol layout string.
    pub layout: String,
    /// Selected class.
    pub class: PlayerClass,
    /// Daily modifier.
    #[serde(default)]
    pub modifier: Modifier,
    /// Daily monster label, carried for presentation.
    #[serde(default = "default_monster")]
    pub monster: String,
    /// Seed every random stream derives from.
    #[serde(default)]
    pub seed: u64,
    /// Simulated milliseconds per tick.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Wave whose clearing wins the run.
    #[serde(default = "default_final_wave")]
    pub final_wave: u32,
    /// Items equipped before the first wave.
    #[serde(default)]
    pub equipment: Vec<EquipmentItem>,
}

impl SessionConfig {
    /// Creates a configuration for `class` on `layout` with default settings.
    #[must_use]
    pub fn new(layout: impl Into<String>, class: PlayerClass) -> Self {
        Self {
            layout: layout.into(),
            class,
            modifier: Modifier::Normal,
            monster: default_monster(),
            seed: 0,
            tick_millis: DEFAULT_TICK_MILLIS,
            final_wave: DEFAULT_FINAL_WAVE,
            equipment: Vec::new(),
        }
    }

    /// Replaces the daily modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    /// Replaces the daily monster label.
    #[must_use]
    pub fn with_monster(mut self, monster: impl Into<String>) -> Self {
        self.monster = monster.into();
        self
    }

    /// Replaces the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the tick length in milliseconds.
    #[must_use]
    pub fn with_tick_millis(mut self, tick_millis: u64) -> Self {
        self.tick_millis = tick_millis;
        self
    }

    /// Replaces the final wave.
    #[must_use]
    pub fn with_final_wave(mut self, final_wave: u32) -> Self {
        self.final_wave = final_wave;
        self
    }

    /// Replaces the starting equipment.
    #[must_use]
    pub fn with_equipment(mut self, items: impl IntoIterator<Item = EquipmentItem>) -> Self {
        self.equipment = items.into_iter().collect();
        self
    }

    /// Simulated time advanced by each tick, never zero.
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}

fn default_monster() -> String {
    DEFAULT_MONSTER.to_owned()
}

const fn default_tick_millis() -> u64 {
    DEFAULT_TICK_MILLIS
}

const fn default_final_wave() -> u32 {
    DEFAULT_FINAL_WAVE
}
