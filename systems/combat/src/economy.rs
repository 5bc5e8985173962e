use std::time::Duration;

use daily_dungeon_core::PlayerClass;

/// Extra behaviour attached to a class' dash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashSpecial {
    /// Plain dash.
    None,
    /// Relocates behind the nearest enemy and strikes it shortly after.
    ShadowStep,
    /// Sets enemies around the landing point on fire.
    Scorch,
}

/// Per-class combat economy: heals, avoidance and attack shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassEconomy {
    /// Share of dealt damage healed back on every hit.
    pub heal_on_hit: f32,
    /// Share of maximum health healed on every kill.
    pub heal_on_kill: f32,
    /// Chance to dodge an incoming hit.
    pub dodge_chance: f64,
    /// Strikes per melee swing.
    pub melee_strikes: u32,
    /// Radius of the area burst.
    pub area_radius: f32,
    /// Damage multiplier of the area burst.
    pub area_multiplier: f32,
    /// Distance hostiles are pushed by the area burst.
    pub area_knockback: f32,
    /// Invulnerability granted by the area burst.
    pub area_invulnerability: Duration,
    /// Distance covered by a dash.
    pub dash_distance: f32,
    /// Invulnerability granted by a dash.
    pub dash_invulnerability: Duration,
    /// Dash special behaviour.
    pub dash_special: DashSpecial,
}

impl ClassEconomy {
    /// Health restored after dealing `damage`.
    #[must_use]
    pub fn heal_for_hit(&self, damage: u32) -> u32 {
        (damage as f32 * self.heal_on_hit).floor() as u32
    }

    /// Health restored after a kill, given the player's maximum health.
    #[must_use]
    pub fn heal_for_kill(&self, max_hp: u32) -> u32 {
        (max_hp as f32 * self.heal_on_kill).floor() as u32
    }
}

const WARRIOR: ClassEconomy = ClassEconomy {
    heal_on_hit: 0.0,
    heal_on_kill: 0.05,
    dodge_chance: 0.0,
    melee_strikes: 1,
    area_radius: 200.0,
    area_multiplier: 1.5,
    area_knockback: 50.0,
    area_invulnerability: Duration::from_millis(600),
    dash_distance: 150.0,
    dash_invulnerability: Duration::from_millis(350),
    dash_special: DashSpecial::None,
};

const ROGUE: ClassEconomy = ClassEconomy {
    heal_on_hit: 0.0,
    heal_on_kill: 0.0,
    dodge_chance: 0.15,
    melee_strikes: 2,
    area_radius: 140.0,
    area_multiplier: 2.0,
    area_knockback: 35.0,
    area_invulnerability: Duration::ZERO,
    dash_distance: 150.0,
    dash_invulnerability: Duration::from_millis(500),
    dash_special: DashSpecial::ShadowStep,
};

const DARK_KNIGHT: ClassEconomy = ClassEconomy {
    heal_on_hit: 0.1,
    heal_on_kill: 0.0,
    dodge_chance: 0.0,
    melee_strikes: 1,
    area_radius: 160.0,
    area_multiplier: 1.5,
    area_knockback: 35.0,
    area_invulnerability: Duration::ZERO,
    dash_distance: 150.0,
    dash_invulnerability: Duration::from_millis(350),
    dash_special: DashSpecial::Scorch,
};

/// Economy row for `class`.
#[must_use]
pub const fn economy(class: PlayerClass) -> ClassEconomy {
    match class {
        PlayerClass::Warrior => WARRIOR,
        PlayerClass::Rogue => ROGUE,
        PlayerClass::DarkKnight => DARK_KNIGHT,
    }
}
