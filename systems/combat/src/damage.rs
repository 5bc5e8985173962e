use daily_dungeon_core::Avoidance;
use rand::Rng;

/// Damage factor applied while a target is armored.
pub const ARMOR_REDUCTION: f32 = 0.5;

/// Resolves the damage one hit deals.
///
/// `base_damage` already carries the attacker's class, modifier and intent
/// scaling. The result is floored and never negative.
#[must_use]
pub fn final_damage(
    base_damage: f32,
    equipment_bonus: u32,
    power_up_multiplier: f32,
    armored: bool,
) -> u32 {
    let armor = if armored { ARMOR_REDUCTION } else { 1.0 };
    let raw = (base_damage + equipment_bonus as f32) * power_up_multiplier * armor;
    if raw.is_finite() && raw > 0.0 {
        raw.floor() as u32
    } else {
        0
    }
}

/// Defensive state consulted before any hit lands on the player.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Defenses {
    /// Inside a post-hit, dash or area invulnerability window.
    pub invulnerable: bool,
    /// Shield power-up active.
    pub shielded: bool,
    /// Chance on `[0, 1]` to dodge the hit outright.
    pub dodge_chance: f64,
}

/// Decides whether an incoming hit is ignored, checking invulnerability,
/// then the shield, then the dodge roll. Every hostile source goes through
/// this guard.
pub fn screen_incoming<R>(defenses: &Defenses, rng: &mut R) -> Option<Avoidance>
where
    R: Rng + ?Sized,
{
    if defenses.invulnerable {
        return Some(Avoidance::Invulnerable);
    }
    if defenses.shielded {
        return Some(Avoidance::Shield);
    }
    if defenses.dodge_chance > 0.0 && rng.gen_bool(defenses.dodge_chance.min(1.0)) {
        return Some(Avoidance::Dodge);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn plain_hit_keeps_base_damage() {
        assert_eq!(final_damage(22.0, 0, 1.0, false), 22);
    }

    #[test]
    fn pipeline_orders_bonus_before_multipliers() {
        assert_eq!(final_damage(10.0, 3, 2.0, false), 26);
        assert_eq!(final_damage(10.0, 3, 2.0, true), 13);
        assert_eq!(final_damage(15.0, 0, 1.0, true), 7, "floored after armor");
    }

    #[test]
    fn degenerate_inputs_deal_nothing() {
        assert_eq!(final_damage(-5.0, 0, 1.0, false), 0);
        assert_eq!(final_damage(f32::NAN, 0, 1.0, false), 0);
    }

    #[test]
    fn guard_checks_in_fixed_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let all = Defenses {
            invulnerable: true,
            shielded: true,
            dodge_chance: 1.0,
        };
        assert_eq!(screen_incoming(&all, &mut rng), Some(Avoidance::Invulnerable));

        let shielded = Defenses {
            invulnerable: false,
            ..all
        };
        assert_eq!(screen_incoming(&shielded, &mut rng), Some(Avoidance::Shield));

        let dodging = Defenses {
            shielded: false,
            ..shielded
        };
        assert_eq!(screen_incoming(&dodging, &mut rng), Some(Avoidance::Dodge));

        assert_eq!(screen_incoming(&Defenses::default(), &mut rng), None);
    }
}
