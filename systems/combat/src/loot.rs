use daily_dungeon_core::{EquipmentItem, PickupKind, PowerUpKind, Rarity, POWER_UP_WEIGHT_TOTAL};
use rand::seq::SliceRandom;
use rand::Rng;

/// Chance that a regular kill drops a health pickup.
pub const HEALTH_DROP_CHANCE: f64 = 0.15;

/// Chance that a regular kill drops a power-up.
pub const POWER_UP_DROP_CHANCE: f64 = 0.10;

/// Chance that a regular kill drops a chest.
pub const CHEST_DROP_CHANCE: f64 = 0.08;

/// Health restored by a health pickup.
pub const HEALTH_PICKUP_HEAL: u32 = 25;

/// Rolls the drops of a kill. Bosses always drop a chest and a power-up.
pub fn roll_drops<R>(rng: &mut R, is_boss: bool) -> Vec<PickupKind>
where
    R: Rng + ?Sized,
{
    if is_boss {
        return vec![PickupKind::Chest, PickupKind::PowerUp(roll_power_up(rng))];
    }

    let mut drops = Vec::new();
    if rng.gen_bool(HEALTH_DROP_CHANCE) {
        drops.push(PickupKind::Health);
    }
    if rng.gen_bool(POWER_UP_DROP_CHANCE) {
        drops.push(PickupKind::PowerUp(roll_power_up(rng)));
    }
    if rng.gen_bool(CHEST_DROP_CHANCE) {
        drops.push(PickupKind::Chest);
    }
    drops
}

/// Picks a power-up by weight.
pub fn roll_power_up<R>(rng: &mut R) -> PowerUpKind
where
    R: Rng + ?Sized,
{
    PowerUpKind::from_weighted_roll(rng.gen_range(0..POWER_UP_WEIGHT_TOTAL))
}

/// Opens a chest: rolls a rarity, then an item of that rarity.
pub fn roll_chest<R>(rng: &mut R) -> EquipmentItem
where
    R: Rng + ?Sized,
{
    let rarity = Rarity::from_roll(rng.gen_range(0..100));
    let items: Vec<EquipmentItem> = EquipmentItem::of_rarity(rarity).collect();
    items
        .choose(rng)
        .copied()
        .unwrap_or(EquipmentItem::IronSword)
}
