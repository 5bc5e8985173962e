use std::collections::BTreeMap;
use std::time::Duration;

use daily_dungeon_core::{Element, EquipmentItem, EquipmentSlot, PowerUpKind};

/// Melee strikes and projectiles per shot while Multi Shot is active.
pub const MULTI_SHOT_STRIKES: u32 = 3;

/// Pickup radius without Magnet.
pub const BASE_PICKUP_RADIUS: f32 = 30.0;

/// Pickup radius with Magnet.
pub const MAGNET_PICKUP_RADIUS: f32 = 150.0;

const SPEED_POWER_UP_BONUS: f32 = 100.0;
const DAMAGE_POWER_UP_MULTIPLIER: f32 = 2.0;
const ATTACK_SPEED_COOLDOWN_FACTOR: f32 = 0.5;
const LIFE_STEAL_SHARE: f32 = 0.4;

/// Equipment and timed power-ups carried by the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    equipment: BTreeMap<EquipmentSlot, EquipmentItem>,
    power_ups: BTreeMap<PowerUpKind, Duration>,
}

impl Loadout {
    /// Equips `item`, returning whatever previously occupied its slot.
    pub fn equip(&mut self, item: EquipmentItem) -> Option<EquipmentItem> {
        self.equipment.insert(item.slot(), item)
    }

    /// Bonus granted by the item in `slot`, zero when empty.
    #[must_use]
    pub fn bonus(&self, slot: EquipmentSlot) -> u32 {
        self.equipment.get(&slot).map_or(0, |item| item.bonus())
    }

    /// Equipped items in slot order.
    #[must_use]
    pub fn items(&self) -> Vec<EquipmentItem> {
        self.equipment.values().copied().collect()
    }

    /// Activates `kind` or refreshes its duration, returning the new duration.
    pub fn activate(&mut self, kind: PowerUpKind) -> Duration {
        let duration = kind.duration();
        let _ = self.power_ups.insert(kind, duration);
        duration
    }

    /// Reports whether `kind` is active.
    #[must_use]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.power_ups.contains_key(&kind)
    }

    /// Active power-ups with their remaining durations.
    #[must_use]
    pub fn power_ups(&self) -> Vec<(PowerUpKind, Duration)> {
        self.power_ups
            .iter()
            .map(|(kind, remaining)| (*kind, *remaining))
            .collect()
    }

    /// Consumes simulated time and removes expired power-ups, appending them
    /// to `expired`.
    pub fn advance(&mut self, dt: Duration, expired: &mut Vec<PowerUpKind>) {
        for (kind, remaining) in self.power_ups.iter_mut() {
            *remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                expired.push(*kind);
            }
        }
        self.power_ups.retain(|_, remaining| !remaining.is_zero());
    }

    /// Multiplier applied in the damage pipeline.
    #[must_use]
    pub fn damage_multiplier(&self) -> f32 {
        if self.is_active(PowerUpKind::Damage) {
            DAMAGE_POWER_UP_MULTIPLIER
        } else {
            1.0
        }
    }

    /// Factor applied to the attack cooldown.
    #[must_use]
    pub fn attack_cooldown_factor(&self) -> f32 {
        if self.is_active(PowerUpKind::AttackSpeed) {
            ATTACK_SPEED_COOLDOWN_FACTOR
        } else {
            1.0
        }
    }

    /// Speed added by equipment and power-ups.
    #[must_use]
    pub fn speed_bonus(&self) -> f32 {
        let power_up = if self.is_active(PowerUpKind::Speed) {
            SPEED_POWER_UP_BONUS
        } else {
            0.0
        };
        self.bonus(EquipmentSlot::Accessory) as f32 + power_up
    }

    /// Share of dealt damage healed back by Life Steal.
    #[must_use]
    pub fn life_steal(&self) -> f32 {
        if self.is_active(PowerUpKind::LifeSteal) {
            LIFE_STEAL_SHARE
        } else {
            0.0
        }
    }

    /// Strikes per swing given the class default.
    #[must_use]
    pub fn strikes(&self, class_strikes: u32) -> u32 {
        if self.is_active(PowerUpKind::MultiShot) {
            class_strikes.max(MULTI_SHOT_STRIKES)
        } else {
            class_strikes
        }
    }

    /// Projectiles per ranged shot.
    #[must_use]
    pub fn projectiles(&self) -> u32 {
        if self.is_active(PowerUpKind::MultiShot) {
            MULTI_SHOT_STRIKES
        } else {
            1
        }
    }

    /// Element carried by melee strikes given the class element.
    #[must_use]
    pub fn melee_element(&self, class_element: Option<Element>) -> Option<Element> {
        if self.is_active(PowerUpKind::Freeze) {
            Some(Element::Ice)
        } else {
            class_element
        }
    }

    /// Radius within which pickups are collected.
    #[must_use]
    pub fn pickup_radius(&self) -> f32 {
        if self.is_active(PowerUpKind::Magnet) {
            MAGNET_PICKUP_RADIUS
        } else {
            BASE_PICKUP_RADIUS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipping_replaces_the_slot() {
        let mut loadout = Loadout::default();
        assert_eq!(loadout.equip(EquipmentItem::IronSword), None);
        assert_eq!(loadout.equip(EquipmentItem::ChainMail), None);
        assert_eq!(
            loadout.equip(EquipmentItem::InfernoEdge),
            Some(EquipmentItem::IronSword)
        );
        assert_eq!(loadout.bonus(EquipmentSlot::Weapon), 10);
        assert_eq!(
            loadout.items(),
            vec![EquipmentItem::InfernoEdge, EquipmentItem::ChainMail]
        );
    }

    #[test]
    fn power_ups_refresh_and_expire() {
        let mut loadout = Loadout::default();
        let _ = loadout.activate(PowerUpKind::Shield);
        let mut expired = Vec::new();
        loadout.advance(Duration::from_millis(5_000), &mut expired);
        assert!(expired.is_empty());

        assert_eq!(loadout.activate(PowerUpKind::Shield), Duration::from_millis(6_000));
        loadout.advance(Duration::from_millis(5_999), &mut expired);
        assert!(loadout.is_active(PowerUpKind::Shield));
        loadout.advance(Duration::from_millis(1), &mut expired);
        assert_eq!(expired, vec![PowerUpKind::Shield]);
        assert!(loadout.power_ups().is_empty());
    }

    #[test]
    fn modifiers_follow_active_power_ups() {
        let mut loadout = Loadout::default();
        assert_eq!(loadout.damage_multiplier(), 1.0);
        assert_eq!(loadout.strikes(2), 2);
        let _ = loadout.activate(PowerUpKind::Damage);
        let _ = loadout.activate(PowerUpKind::MultiShot);
        let _ = loadout.activate(PowerUpKind::Freeze);
        let _ = loadout.activate(PowerUpKind::Magnet);
        assert_eq!(loadout.damage_multiplier(), 2.0);
        assert_eq!(loadout.strikes(2), 3);
        assert_eq!(loadout.projectiles(), 3);
        assert_eq!(loadout.melee_element(Some(Element::Fire)), Some(Element::Ice));
        assert_eq!(loadout.pickup_radius(), MAGNET_PICKUP_RADIUS);
    }
}
