#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Boss behaviour: phase transitions, pursuit, contact strikes and ability
//! selection.

use daily_dungeon_core::{BossPhase, Command, HostileKind, HostileView, PlayerSnapshot};
use glam::Vec2;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pure system steering every live boss.
#[derive(Debug)]
pub struct BossAi {
    rng: ChaCha8Rng,
}

impl BossAi {
    /// Creates the system with the seed feeding ability selection.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Emits the commands each boss wants to perform this tick.
    ///
    /// Phase changes are proposed before anything else so that the world
    /// applies them ahead of the boss's other actions. Abilities are drawn
    /// from the pool of the phase the boss is in when the view was taken.
    pub fn handle(
        &mut self,
        player: &PlayerSnapshot,
        hostiles: &HostileView,
        out: &mut Vec<Command>,
    ) {
        for hostile in hostiles.iter() {
            let (HostileKind::Boss(kind), Some(boss)) = (hostile.kind, hostile.boss) else {
                continue;
            };

            if boss.phase == BossPhase::One && hostile.hp.saturating_mul(2) <= hostile.max_hp {
                out.push(Command::EnterBossPhase {
                    boss: hostile.id,
                    phase: BossPhase::Two,
                });
            }
            if !player.alive {
                continue;
            }

            let offset = player.position - hostile.position;
            let reach = hostile.kind.contact_range();
            if offset.length() > reach {
                let heading = offset.try_normalize().unwrap_or(Vec2::ZERO);
                out.push(Command::SteerHostile {
                    enemy: hostile.id,
                    velocity: heading * hostile.speed,
                });
            } else if hostile.contact_ready {
                out.push(Command::HostileContactAttack { enemy: hostile.id });
            }

            if boss.ability_ready {
                if let Some(ability) = kind.abilities(boss.phase).choose(&mut self.rng) {
                    out.push(Command::UseBossAbility {
                        boss: hostile.id,
                        ability: *ability,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daily_dungeon_core::{
        BossKind, BossSnapshot, EnemyId, EnemyKind, HostileSnapshot, PlayerClass,
    };

    fn player_at(position: Vec2) -> PlayerSnapshot {
        PlayerSnapshot {
            position,
            facing: Vec2::X,
            hp: 100,
            max_hp: 100,
            speed: 200.0,
            class: PlayerClass::Warrior,
            attack_ready: true,
            dash_ready: true,
            area_ready: true,
            alive: true,
        }
    }

    fn boss(hp: u32, phase: BossPhase, ability_ready: bool) -> HostileSnapshot {
        HostileSnapshot {
            id: EnemyId::new(1),
            kind: HostileKind::Boss(BossKind::VampireLord),
            position: Vec2::ZERO,
            hp,
            max_hp: 400,
            speed: 130.0,
            aggro_range: 10_000.0,
            contact_ready: true,
            armored: false,
            burning: false,
            frozen: false,
            boss: Some(BossSnapshot {
                kind: BossKind::VampireLord,
                phase,
                enraged: false,
                ability_ready,
            }),
        }
    }

    #[test]
    fn half_health_proposes_phase_two_once_per_phase() {
        let mut ai = BossAi::new(1);
        let mut out = Vec::new();
        let view = HostileView::from_snapshots(vec![boss(200, BossPhase::One, false)]);
        ai.handle(&player_at(Vec2::new(500.0, 0.0)), &view, &mut out);
        assert_eq!(
            out[0],
            Command::EnterBossPhase {
                boss: EnemyId::new(1),
                phase: BossPhase::Two
            }
        );

        out.clear();
        let view = HostileView::from_snapshots(vec![boss(201, BossPhase::One, false)]);
        ai.handle(&player_at(Vec2::new(500.0, 0.0)), &view, &mut out);
        assert!(!out
            .iter()
            .any(|command| matches!(command, Command::EnterBossPhase { .. })));

        out.clear();
        let view = HostileView::from_snapshots(vec![boss(10, BossPhase::Two, false)]);
        ai.handle(&player_at(Vec2::new(500.0, 0.0)), &view, &mut out);
        assert!(!out
            .iter()
            .any(|command| matches!(command, Command::EnterBossPhase { .. })));
    }

    #[test]
    fn distant_players_are_pursued_and_close_ones_struck() {
        let mut ai = BossAi::new(1);
        let mut out = Vec::new();
        let view = HostileView::from_snapshots(vec![boss(400, BossPhase::One, false)]);

        ai.handle(&player_at(Vec2::new(300.0, 0.0)), &view, &mut out);
        assert_eq!(
            out,
            vec![Command::SteerHostile {
                enemy: EnemyId::new(1),
                velocity: Vec2::new(130.0, 0.0),
            }]
        );

        out.clear();
        ai.handle(&player_at(Vec2::new(40.0, 0.0)), &view, &mut out);
        assert_eq!(
            out,
            vec![Command::HostileContactAttack {
                enemy: EnemyId::new(1)
            }]
        );
    }

    #[test]
    fn abilities_come_from_the_current_phase_pool() {
        let mut ai = BossAi::new(99);
        for phase in [BossPhase::One, BossPhase::Two] {
            let view = HostileView::from_snapshots(vec![boss(400, phase, true)]);
            for _ in 0..50 {
                let mut out = Vec::new();
                ai.handle(&player_at(Vec2::new(300.0, 0.0)), &view, &mut out);
                let ability = out
                    .iter()
                    .find_map(|command| match command {
                        Command::UseBossAbility { ability, .. } => Some(*ability),
                        _ => None,
                    })
                    .expect("ready boss casts");
                assert!(BossKind::VampireLord.abilities(phase).contains(&ability));
            }
        }
    }

    #[test]
    fn regular_enemies_are_ignored() {
        let mut ai = BossAi::new(1);
        let mut orc = boss(10, BossPhase::One, true);
        orc.kind = HostileKind::Enemy(EnemyKind::Orc);
        orc.boss = None;
        let mut out = Vec::new();
        ai.handle(
            &player_at(Vec2::new(300.0, 0.0)),
            &HostileView::from_snapshots(vec![orc]),
            &mut out,
        );
        assert!(out.is_empty());
    }
}
