//! Boss phase transitions and ability resolution.

use std::f32::consts::TAU;
use std::time::Duration;

use daily_dungeon_core::{BossAbility, BossPhase, DamageSource, EnemyId, Event};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, info};

use crate::combat::damage_player;
use crate::projectiles::{Payload, Projectile};
use crate::timeline::Deferred;
use crate::World;

const PHASE_TWO_ARMOR: Duration = Duration::from_millis(3_000);
const CHARGE_REACH: f32 = 220.0;
const CHARGE_STANDOFF: f32 = 30.0;
const AXE_SPEED: f32 = 300.0;
const BONE_SPEED: f32 = 280.0;
const BARRAGE_SPREAD: f32 = 0.25;
const SUMMON_OFFSET: f32 = 40.0;

/// Moves a boss into phase two once it has fallen to half health or below.
pub(crate) fn enter_phase(world: &mut World, boss: EnemyId, phase: BossPhase, out: &mut Vec<Event>) {
    if phase != BossPhase::Two {
        return;
    }
    let Some(index) = world.hostile_index(boss) else {
        return;
    };
    let hostile = &mut world.hostiles[index];
    if !hostile.alive || hostile.hp.saturating_mul(2) > hostile.max_hp {
        return;
    }
    let Some(state) = hostile.boss.as_mut() else {
        return;
    };
    if state.phase == BossPhase::Two {
        return;
    }

    state.phase = BossPhase::Two;
    let interval = BossPhase::Two.ability_interval(state.enraged);
    if state.ability_timer.remaining() > interval {
        state.ability_timer.start(interval);
    }
    let kind = state.kind;
    hostile.armored.start(PHASE_TWO_ARMOR);

    info!(boss = boss.get(), kind = kind.title(), hp = hostile.hp, "boss entered phase two");
    out.push(Event::BossPhaseChanged { boss, phase });
    out.push(Event::CameraShake {
        intensity: 0.02,
        duration: Duration::from_millis(400),
    });
}

/// Casts a boss ability if the boss is ready and the ability belongs to its
/// current phase pool.
pub(crate) fn cast(world: &mut World, boss: EnemyId, ability: BossAbility, out: &mut Vec<Event>) {
    let Some(index) = world.hostile_index(boss) else {
        return;
    };
    let hostile = &mut world.hostiles[index];
    if !hostile.alive {
        return;
    }
    let Some(state) = hostile.boss.as_mut() else {
        return;
    };
    if !state.ability_timer.is_ready() || !state.kind.abilities(state.phase).contains(&ability) {
        return;
    }
    state
        .ability_timer
        .start(state.phase.ability_interval(state.enraged));
    let minion = state.kind.template().minion;

    debug!(boss = boss.get(), ?ability, "boss ability");
    out.push(Event::BossAbilityUsed { boss, ability });

    let spec = ability.spec();
    let damage = hostile.outgoing(spec.damage);
    let origin = hostile.position;
    let toward = (world.player.position - origin)
        .try_normalize()
        .unwrap_or(Vec2::X);

    match ability {
        BossAbility::Charge => {
            let gap = (world.player.position.distance(origin) - CHARGE_STANDOFF).max(0.0);
            let landed = world.arena.slide(origin, toward * gap.min(CHARGE_REACH));
            world.hostiles[index].position = landed;
            schedule_strike(world, boss, ability, damage);
        }
        BossAbility::GroundSlam | BossAbility::CrimsonSlam => {
            schedule_strike(world, boss, ability, damage);
            out.push(Event::CameraShake {
                intensity: 0.015,
                duration: spec.wind_up,
            });
        }
        BossAbility::AxeThrow => {
            fire(world, origin, &[toward], AXE_SPEED, damage, ability);
        }
        BossAbility::BoneBarrage => {
            let count = spec.projectiles.max(1);
            let centre = (count - 1) as f32 / 2.0;
            let directions: Vec<Vec2> = (0..count)
                .map(|shot| Vec2::from_angle((shot as f32 - centre) * BARRAGE_SPREAD).rotate(toward))
                .collect();
            fire(world, origin, &directions, BONE_SPEED, damage, ability);
        }
        BossAbility::BoneStorm => {
            let count = spec.projectiles.max(1);
            let directions: Vec<Vec2> = (0..count)
                .map(|shot| Vec2::from_angle(shot as f32 * TAU / count as f32))
                .collect();
            fire(world, origin, &directions, BONE_SPEED, damage, ability);
        }
        BossAbility::IronHide => {
            world.hostiles[index].armored.start(spec.duration);
        }
        BossAbility::RaiseDead => {
            let stats = minion.scaled_stats(world.wave);
            for summon in 0..spec.summons {
                let side = if summon % 2 == 0 { -1.0 } else { 1.0 };
                let spot = world
                    .arena
                    .slide(origin, Vec2::new(side * SUMMON_OFFSET, 0.0));
                world.spawn_enemy_at(minion, spot, stats, out);
            }
        }
        BossAbility::Blink => {
            if !world.sites.enemy_tiles.is_empty() {
                let pick = world.rng.gen_range(0..world.sites.enemy_tiles.len());
                world.hostiles[index].position = world.sites.enemy_tiles[pick].center();
            }
        }
        BossAbility::Repel => {
            if world.player.position.distance(origin) <= spec.radius {
                let _ = damage_player(world, damage, DamageSource::Ability(ability), out);
                world.player.position = world
                    .arena
                    .slide(world.player.position, toward * spec.push);
            }
        }
        BossAbility::BloodPact => {
            for ally in world.hostiles.iter_mut().filter(|ally| ally.alive) {
                ally.empowered.start(spec.duration);
            }
        }
        BossAbility::LifeDrain => {
            if world.player.position.distance(origin) <= spec.radius {
                let drained = damage_player(world, damage, DamageSource::Ability(ability), out);
                world.hostiles[index].heal(drained);
            }
        }
    }
}

/// Lands a wound-up boss strike if the boss survived the wind-up.
pub(crate) fn resolve_strike(
    world: &mut World,
    boss: EnemyId,
    ability: BossAbility,
    radius: f32,
    damage: u32,
    out: &mut Vec<Event>,
) {
    let Some(index) = world.hostile_index(boss) else {
        return;
    };
    let hostile = &world.hostiles[index];
    if !hostile.alive || hostile.hp == 0 {
        return;
    }
    if hostile.position.distance(world.player.position) <= radius {
        let _ = damage_player(world, damage, DamageSource::Ability(ability), out);
    }
}

fn schedule_strike(world: &mut World, boss: EnemyId, ability: BossAbility, damage: u32) {
    let spec = ability.spec();
    world.timeline.schedule(
        spec.wind_up,
        Deferred::BossStrike {
            boss,
            ability,
            radius: spec.radius,
            damage,
        },
    );
}

fn fire(
    world: &mut World,
    origin: Vec2,
    directions: &[Vec2],
    speed: f32,
    damage: u32,
    ability: BossAbility,
) {
    for direction in directions {
        world.projectiles.push(Projectile::new(
            origin,
            *direction * speed,
            Payload::Hostile { damage, ability },
        ));
    }
}
