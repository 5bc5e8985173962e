//! Equipment, power-up and pickup catalogs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Equipment slot. A player holds at most one item per slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentSlot {
    /// Adds damage.
    Weapon,
    /// Adds maximum health.
    Armor,
    /// Adds movement speed.
    Accessory,
}

/// Rarity tier rolled when a chest opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    /// Rolled 60% of the time.
    Common,
    /// Rolled 30% of the time.
    Rare,
    /// Rolled 10% of the time.
    Epic,
}

impl Rarity {
    /// Maps a roll on `[0, 100)` to a rarity tier.
    #[must_use]
    pub const fn from_roll(roll: u32) -> Self {
        if roll < 10 {
            Rarity::Epic
        } else if roll < 40 {
            Rarity::Rare
        } else {
            Rarity::Common
        }
    }
}

/// Every item a chest can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentItem {
    /// Common weapon.
    IronSword,
    /// Rare weapon.
    SteelBlade,
    /// Epic weapon.
    InfernoEdge,
    /// Common armor.
    LeatherVest,
    /// Rare armor.
    ChainMail,
    /// Epic armor.
    DragonScale,
    /// Common accessory.
    SwiftRing,
    /// Rare accessory.
    HasteAmulet,
    /// Epic accessory.
    PhantomCloak,
}

impl EquipmentItem {
    /// Full catalog in slot order.
    pub const ALL: [EquipmentItem; 9] = [
        EquipmentItem::IronSword,
        EquipmentItem::SteelBlade,
        EquipmentItem::InfernoEdge,
        EquipmentItem::LeatherVest,
        EquipmentItem::ChainMail,
        EquipmentItem::DragonScale,
        EquipmentItem::SwiftRing,
        EquipmentItem::HasteAmulet,
        EquipmentItem::PhantomCloak,
    ];

    /// Slot the item occupies.
    #[must_use]
    pub const fn slot(self) -> EquipmentSlot {
        match self {
            EquipmentItem::IronSword | EquipmentItem::SteelBlade | EquipmentItem::InfernoEdge => {
                EquipmentSlot::Weapon
            }
            EquipmentItem::LeatherVest | EquipmentItem::ChainMail | EquipmentItem::DragonScale => {
                EquipmentSlot::Armor
            }
            EquipmentItem::SwiftRing
            | EquipmentItem::HasteAmulet
            | EquipmentItem::PhantomCloak => EquipmentSlot::Accessory,
        }
    }

    /// Rarity tier of the item.
    #[must_use]
    pub const fn rarity(self) -> Rarity {
        match self {
            EquipmentItem::IronSword | EquipmentItem::LeatherVest | EquipmentItem::SwiftRing => {
                Rarity::Common
            }
            EquipmentItem::SteelBlade | EquipmentItem::ChainMail | EquipmentItem::HasteAmulet => {
                Rarity::Rare
            }
            EquipmentItem::InfernoEdge
            | EquipmentItem::DragonScale
            | EquipmentItem::PhantomCloak => Rarity::Epic,
        }
    }

    /// Additive bonus to the slot's stat: damage, maximum health or speed.
    #[must_use]
    pub const fn bonus(self) -> u32 {
        match self {
            EquipmentItem::IronSword => 3,
            EquipmentItem::SteelBlade => 6,
            EquipmentItem::InfernoEdge => 10,
            EquipmentItem::LeatherVest => 20,
            EquipmentItem::ChainMail => 40,
            EquipmentItem::DragonScale => 70,
            EquipmentItem::SwiftRing => 30,
            EquipmentItem::HasteAmulet => 55,
            EquipmentItem::PhantomCloak => 80,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EquipmentItem::IronSword => "Iron Sword",
            EquipmentItem::SteelBlade => "Steel Blade",
            EquipmentItem::InfernoEdge => "Inferno Edge",
            EquipmentItem::LeatherVest => "Leather Vest",
            EquipmentItem::ChainMail => "Chain Mail",
            EquipmentItem::DragonScale => "Dragon Scale",
            EquipmentItem::SwiftRing => "Swift Ring",
            EquipmentItem::HasteAmulet => "Haste Amulet",
            EquipmentItem::PhantomCloak => "Phantom Cloak",
        }
    }

    /// Items of the given rarity in catalog order.
    pub fn of_rarity(rarity: Rarity) -> impl Iterator<Item = EquipmentItem> {
        Self::ALL
            .into_iter()
            .filter(move |item| item.rarity() == rarity)
    }
}

/// Sum of every power-up pick weight.
pub const POWER_UP_WEIGHT_TOTAL: u32 = 120;

/// Timed power-ups collected from drops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// +100 movement speed.
    Speed,
    /// Blocks all incoming damage.
    Shield,
    /// Doubles outgoing damage.
    Damage,
    /// Halves the attack cooldown.
    AttackSpeed,
    /// Heals 40% of the damage dealt.
    LifeSteal,
    /// Three strikes per melee swing and three projectiles per shot.
    MultiShot,
    /// Widens the pickup radius.
    Magnet,
    /// Ice-infused melee. Collecting it freezes every live enemy.
    Freeze,
}

impl PowerUpKind {
    /// Every power-up in weight-table order.
    pub const ALL: [PowerUpKind; 8] = [
        PowerUpKind::Speed,
        PowerUpKind::Shield,
        PowerUpKind::Damage,
        PowerUpKind::AttackSpeed,
        PowerUpKind::LifeSteal,
        PowerUpKind::MultiShot,
        PowerUpKind::Magnet,
        PowerUpKind::Freeze,
    ];

    /// How long the power-up stays active after collection.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            PowerUpKind::Speed => Duration::from_millis(8_000),
            PowerUpKind::Shield => Duration::from_millis(6_000),
            PowerUpKind::Damage => Duration::from_millis(10_000),
            PowerUpKind::AttackSpeed => Duration::from_millis(8_000),
            PowerUpKind::LifeSteal => Duration::from_millis(10_000),
            PowerUpKind::MultiShot => Duration::from_millis(7_000),
            PowerUpKind::Magnet => Duration::from_millis(12_000),
            PowerUpKind::Freeze => Duration::from_millis(5_000),
        }
    }

    /// Relative pick weight out of [`POWER_UP_WEIGHT_TOTAL`].
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            PowerUpKind::Speed => 25,
            PowerUpKind::Shield => 15,
            PowerUpKind::Damage => 20,
            PowerUpKind::AttackSpeed => 18,
            PowerUpKind::LifeSteal => 10,
            PowerUpKind::MultiShot => 8,
            PowerUpKind::Magnet => 12,
            PowerUpKind::Freeze => 12,
        }
    }

    /// Picks the power-up whose weight band contains `roll`, a value on
    /// `[0, POWER_UP_WEIGHT_TOTAL)`. Out-of-range rolls land on the last entry.
    #[must_use]
    pub fn from_weighted_roll(roll: u32) -> Self {
        let mut remaining = roll;
        for kind in Self::ALL {
            if remaining < kind.weight() {
                return kind;
            }
            remaining -= kind.weight();
        }
        PowerUpKind::Freeze
    }
}

/// Item lying on the floor waiting to be collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickupKind {
    /// Restores health.
    Health,
    /// Activates a power-up.
    PowerUp(PowerUpKind),
    /// Rolls a piece of equipment.
    Chest,
}

impl PickupKind {
    /// How long the pickup stays on the floor before vanishing.
    #[must_use]
    pub const fn lifetime(self) -> Duration {
        match self {
            PickupKind::Health => Duration::from_millis(8_000),
            PickupKind::PowerUp(_) => Duration::from_millis(12_000),
            PickupKind::Chest => Duration::from_millis(20_000),
        }
    }
}
