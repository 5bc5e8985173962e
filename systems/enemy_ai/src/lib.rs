#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Regular enemy behaviour: patrol, pursuit and contact attacks.

use std::{collections::BTreeMap, time::Duration};

use daily_dungeon_core::{Command, EnemyId, Event, HostileView, PlayerSnapshot};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Distance inside which pursuers stop closing in.
pub const PURSUIT_STANDOFF: f32 = 30.0;
/// Largest patrol velocity component along either axis.
pub const PATROL_SPEED: f32 = 40.0;

const PATROL_MIN_MILLIS: u64 = 1_500;
const PATROL_MAX_MILLIS: u64 = 3_500;

#[derive(Clone, Copy, Debug)]
struct Patrol {
    velocity: Vec2,
    remaining: Duration,
}

/// Pure system steering regular enemies.
#[derive(Debug)]
pub struct EnemyAi {
    rng: ChaCha8Rng,
    patrols: BTreeMap<EnemyId, Patrol>,
}

impl EnemyAi {
    /// Creates the system with the seed feeding patrol wandering.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            patrols: BTreeMap::new(),
        }
    }

    /// Emits steering and contact attack commands for every live enemy.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        hostiles: &HostileView,
        out: &mut Vec<Command>,
    ) {
        let elapsed = events
            .iter()
            .filter_map(|event| match event {
                Event::TimeAdvanced { dt } => Some(*dt),
                _ => None,
            })
            .fold(Duration::ZERO, Duration::saturating_add);
        self.patrols
            .retain(|id, _| hostiles.iter().any(|hostile| hostile.id == *id));

        for hostile in hostiles.iter().filter(|hostile| !hostile.kind.is_boss()) {
            let offset = player.position - hostile.position;
            let distance = offset.length();

            if player.alive && distance < hostile.aggro_range {
                let _ = self.patrols.remove(&hostile.id);
                if distance > PURSUIT_STANDOFF {
                    out.push(Command::SteerHostile {
                        enemy: hostile.id,
                        velocity: offset / distance * hostile.speed,
                    });
                }
                if distance < hostile.kind.contact_range() && hostile.contact_ready {
                    out.push(Command::HostileContactAttack { enemy: hostile.id });
                }
                continue;
            }

            let velocity = self.patrol(hostile.id, elapsed);
            out.push(Command::SteerHostile {
                enemy: hostile.id,
                velocity,
            });
        }
    }

    fn patrol(&mut self, enemy: EnemyId, elapsed: Duration) -> Vec2 {
        let rng = &mut self.rng;
        let patrol = self
            .patrols
            .entry(enemy)
            .or_insert_with(|| Patrol::roll(rng));
        patrol.remaining = patrol.remaining.saturating_sub(elapsed);
        if patrol.remaining.is_zero() {
            *patrol = Patrol::roll(rng);
        }
        patrol.velocity
    }
}

impl Patrol {
    fn roll(rng: &mut ChaCha8Rng) -> Self {
        let velocity = Vec2::new(
            rng.gen_range(-PATROL_SPEED..=PATROL_SPEED),
            rng.gen_range(-PATROL_SPEED..=PATROL_SPEED),
        );
        let remaining = Duration::from_millis(rng.gen_range(PATROL_MIN_MILLIS..=PATROL_MAX_MILLIS));
        Self {
            velocity,
            remaining,
        }
    }
}
