#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Combat resolution rules shared by the world and its tests.
//!
//! Everything in this crate is pure: damage arithmetic, status effect timers,
//! combo bookkeeping, the per-class economy table, the incoming-damage guard
//! and loot rolls. The world owns the entities and calls into these rules
//! when it mutates them, which keeps every rule testable without a session.

mod combo;
mod damage;
mod economy;
mod loadout;
mod loot;
mod status;
mod timers;

pub use combo::{kill_score, ComboTracker, BOSS_KILL_SCORE, COMBO_SCORE_CAP, COMBO_WINDOW, KILL_SCORE};
pub use damage::{final_damage, screen_incoming, Defenses, ARMOR_REDUCTION};
pub use economy::{economy, ClassEconomy, DashSpecial};
pub use loadout::{
    Loadout, BASE_PICKUP_RADIUS, MAGNET_PICKUP_RADIUS, MULTI_SHOT_STRIKES,
};
pub use loot::{
    roll_chest, roll_drops, roll_power_up, CHEST_DROP_CHANCE, HEALTH_DROP_CHANCE,
    HEALTH_PICKUP_HEAL, POWER_UP_DROP_CHANCE,
};
pub use status::{
    StatusEffects, StatusTick, BURN_DURATION, BURN_TICK_DAMAGE, BURN_TICK_INTERVAL,
    FREEZE_DURATION, FREEZE_SPEED_FACTOR,
};
pub use timers::Cooldown;
