//! Straight-line projectiles fired by the player and by bosses.

use std::time::Duration;

use daily_dungeon_core::{BossAbility, Element};
use glam::Vec2;

/// Travel speed of player shots in world units per second.
pub(crate) const PLAYER_PROJECTILE_SPEED: f32 = 400.0;
/// Distance at which a projectile connects with its target.
pub(crate) const PROJECTILE_HIT_RADIUS: f32 = 28.0;

const PROJECTILE_LIFETIME: Duration = Duration::from_millis(2_000);

/// What a projectile does when it connects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Payload {
    /// Player shot striking hostiles.
    Player {
        base_damage: f32,
        element: Option<Element>,
    },
    /// Boss ability projectile striking the player.
    Hostile { damage: u32, ability: BossAbility },
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Projectile {
    pub(crate) position: Vec2,
    velocity: Vec2,
    remaining: Duration,
    pub(crate) payload: Payload,
}

impl Projectile {
    pub(crate) fn new(position: Vec2, velocity: Vec2, payload: Payload) -> Self {
        Self {
            position,
            velocity,
            remaining: PROJECTILE_LIFETIME,
            payload,
        }
    }

    /// Moves the projectile, returning `false` once its lifetime runs out.
    pub(crate) fn advance(&mut self, dt: Duration) -> bool {
        self.position += self.velocity * dt.as_secs_f32();
        self.remaining = self.remaining.saturating_sub(dt);
        !self.remaining.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projectiles_travel_then_expire() {
        let mut shot = Projectile::new(
            Vec2::ZERO,
            Vec2::new(PLAYER_PROJECTILE_SPEED, 0.0),
            Payload::Player {
                base_damage: 10.0,
                element: None,
            },
        );
        assert!(shot.advance(Duration::from_millis(500)));
        assert!((shot.position.x - 200.0).abs() < 1e-3);
        assert!(!shot.advance(Duration::from_millis(1_500)));
    }
}
