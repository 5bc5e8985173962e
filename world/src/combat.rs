//! Player actions, contact attacks and projectile resolution.

use std::time::Duration;

use daily_dungeon_core::{
    CellCoord, DamageSource, Element, EnemyId, EquipmentSlot, Event, Target,
};
use daily_dungeon_system_combat::{final_damage, screen_incoming, DashSpecial};
use glam::Vec2;

use crate::entities::POST_HIT_INVULNERABILITY;
use crate::projectiles::{Payload, Projectile, PLAYER_PROJECTILE_SPEED, PROJECTILE_HIT_RADIUS};
use crate::timeline::Deferred;
use crate::World;

const MELEE_REACH: f32 = 80.0;
const MELEE_KNOCKBACK: f32 = 25.0;
const MELEE_HIT_STOP: Duration = Duration::from_millis(25);
const RANGED_COOLDOWN_FACTOR: f32 = 0.8;
const SHOT_SPREAD: f32 = 0.2;
const SHADOW_STEP_RANGE: f32 = 300.0;
const SHADOW_STEP_OFFSET: f32 = 40.0;
const SHADOW_STRIKE_DELAY: Duration = Duration::from_millis(50);
const SHADOW_STRIKE_MULTIPLIER: f32 = 1.5;
const SCORCH_RADIUS: f32 = 80.0;
const TELEPORT_COOLDOWN: Duration = Duration::from_millis(1_000);
const AREA_SHAKE: f32 = 0.01;
const HIT_SHAKE: f32 = 0.005;

pub(crate) fn move_player(world: &mut World, heading: Vec2, out: &mut Vec<Event>) {
    if !world.player.alive || !world.hit_stop.is_ready() {
        return;
    }
    let direction = heading.normalize_or_zero();
    if direction == Vec2::ZERO {
        return;
    }
    world.player.facing = direction;

    let displacement = direction * world.player.speed() * world.tick_dt.as_secs_f32();
    let from_tile = CellCoord::containing(world.player.position);
    world.player.position = world.arena.slide(world.player.position, displacement);
    let to_tile = CellCoord::containing(world.player.position);
    if to_tile != from_tile {
        if let Some(tile) = to_tile {
            teleport(world, tile, out);
        }
    }
}

fn teleport(world: &mut World, tile: CellCoord, out: &mut Vec<Event>) {
    if !world.player.teleport.is_ready() {
        return;
    }
    let Some(exit) = world.arena.teleport_exit(tile) else {
        return;
    };
    world.player.position = exit.center();
    world.player.teleport.start(TELEPORT_COOLDOWN);
    out.push(Event::PlayerTeleported {
        from: tile,
        to: exit,
    });
}

pub(crate) fn melee(world: &mut World, out: &mut Vec<Event>) {
    if !world.player.alive || !world.player.cooldowns.attack.is_ready() {
        return;
    }
    let cooldown = world.player.attack_cooldown();
    world.player.cooldowns.attack.start(cooldown);

    let origin = world.player.position;
    let facing = world.player.facing;
    let mut targets: Vec<(f32, usize)> = world
        .hostiles
        .iter()
        .enumerate()
        .filter(|(_, hostile)| hostile.alive && hostile.hp > 0)
        .filter_map(|(index, hostile)| {
            let offset = hostile.position - origin;
            let distance = offset.length();
            let in_front = distance <= f32::EPSILON || offset.dot(facing) >= 0.0;
            (distance <= MELEE_REACH && in_front).then_some((distance, index))
        })
        .collect();
    if targets.is_empty() {
        return;
    }
    targets.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let strikes = world
        .player
        .loadout
        .strikes(world.player.economy.melee_strikes);
    let element = world.player.loadout.melee_element(world.player.stats.element);
    let base_damage = world.player.damage();
    for strike in 0..strikes as usize {
        let (_, index) = targets[strike % targets.len()];
        let _ = strike_hostile(world, index, base_damage, element, DamageSource::Melee, out);
        knock_back(world, index, origin, MELEE_KNOCKBACK);
    }

    world.hit_stop.start(MELEE_HIT_STOP);
    out.push(Event::HitStop {
        duration: MELEE_HIT_STOP,
    });
}

pub(crate) fn ranged(world: &mut World) {
    if !world.player.alive || !world.player.cooldowns.attack.is_ready() {
        return;
    }
    let cooldown = world.player.stats.attack_cooldown.mul_f32(
        RANGED_COOLDOWN_FACTOR * world.player.loadout.attack_cooldown_factor(),
    );
    world.player.cooldowns.attack.start(cooldown);

    let count = world.player.loadout.projectiles();
    let payload = Payload::Player {
        base_damage: world.player.damage(),
        element: world.player.stats.element,
    };
    let centre = (count.saturating_sub(1)) as f32 / 2.0;
    for shot in 0..count {
        let angle = (shot as f32 - centre) * SHOT_SPREAD;
        let direction = Vec2::from_angle(angle).rotate(world.player.facing);
        world.projectiles.push(Projectile::new(
            world.player.position,
            direction * PLAYER_PROJECTILE_SPEED,
            payload,
        ));
    }
}

pub(crate) fn dash(world: &mut World, heading: Vec2, out: &mut Vec<Event>) {
    if !world.player.alive || !world.player.cooldowns.dash.is_ready() {
        return;
    }
    let dash_cooldown = world.player.stats.dash_cooldown;
    world.player.cooldowns.dash.start(dash_cooldown);
    let economy = world.player.economy;
    world
        .player
        .grant_invulnerability(economy.dash_invulnerability);

    let direction = heading.try_normalize().unwrap_or(world.player.facing);
    world.player.facing = direction;

    if economy.dash_special == DashSpecial::ShadowStep && shadow_step(world) {
        return;
    }
    let landing = world
        .arena
        .slide(world.player.position, direction * economy.dash_distance);
    world.player.position = landing;

    if economy.dash_special == DashSpecial::Scorch {
        for hostile in world
            .hostiles
            .iter_mut()
            .filter(|hostile| hostile.alive && hostile.position.distance(landing) <= SCORCH_RADIUS)
        {
            hostile.status.apply_burn();
            out.push(Event::StatusApplied {
                enemy: hostile.id,
                element: Element::Fire,
            });
        }
    }
}

/// Relocates behind the nearest hostile in range and queues a follow-up hit.
fn shadow_step(world: &mut World) -> bool {
    let origin = world.player.position;
    let Some(index) = nearest_hostile(world, origin, SHADOW_STEP_RANGE) else {
        return false;
    };
    let target = &world.hostiles[index];
    let (target_id, target_position) = (target.id, target.position);

    let behind = target_position + (target_position - origin).normalize_or_zero() * SHADOW_STEP_OFFSET;
    world.player.position = if world.arena.is_walkable(behind) {
        behind
    } else {
        world.arena.slide(origin, target_position - origin)
    };
    world.player.facing = (target_position - world.player.position)
        .try_normalize()
        .unwrap_or(world.player.facing);
    world.timeline.schedule(
        SHADOW_STRIKE_DELAY,
        Deferred::ShadowStrike {
            target: target_id,
            base_damage: world.player.damage() * SHADOW_STRIKE_MULTIPLIER,
        },
    );
    true
}

pub(crate) fn area(world: &mut World, out: &mut Vec<Event>) {
    if !world.player.alive || !world.player.cooldowns.area.is_ready() {
        return;
    }
    let area_cooldown = world.player.stats.area_cooldown;
    world.player.cooldowns.area.start(area_cooldown);
    let economy = world.player.economy;
    world
        .player
        .grant_invulnerability(economy.area_invulnerability);

    let origin = world.player.position;
    let base_damage = world.player.damage() * economy.area_multiplier;
    let element = world.player.stats.element;
    let targets: Vec<usize> = world
        .hostiles
        .iter()
        .enumerate()
        .filter(|(_, hostile)| {
            hostile.alive && hostile.hp > 0 && hostile.position.distance(origin) <= economy.area_radius
        })
        .map(|(index, _)| index)
        .collect();
    for index in targets {
        let _ = strike_hostile(world, index, base_damage, element, DamageSource::Area, out);
        knock_back(world, index, origin, economy.area_knockback);
    }
    out.push(Event::CameraShake {
        intensity: AREA_SHAKE,
        duration: Duration::from_millis(200),
    });
}

pub(crate) fn steer(world: &mut World, enemy: EnemyId, velocity: Vec2) {
    if !world.hit_stop.is_ready() {
        return;
    }
    let Some(index) = world.hostile_index(enemy) else {
        return;
    };
    let hostile = &world.hostiles[index];
    if !hostile.alive || !velocity.is_finite() {
        return;
    }
    let velocity = velocity.clamp_length_max(hostile.max_speed());
    let landed = world
        .arena
        .slide(hostile.position, velocity * world.tick_dt.as_secs_f32());
    world.hostiles[index].position = landed;
}

pub(crate) fn contact_attack(world: &mut World, enemy: EnemyId, out: &mut Vec<Event>) {
    let Some(index) = world.hostile_index(enemy) else {
        return;
    };
    let hostile = &mut world.hostiles[index];
    if !hostile.alive || !hostile.contact.is_ready() {
        return;
    }
    if hostile.position.distance(world.player.position) > hostile.kind.contact_range() {
        return;
    }
    hostile.contact.start(hostile.contact_cooldown);
    let damage = hostile.contact_damage();
    let life_steal = hostile.life_steal;

    let dealt = damage_player(world, damage, DamageSource::Contact(enemy), out);
    if dealt > 0 && life_steal > 0.0 {
        world.hostiles[index].heal((dealt as f32 * life_steal).floor() as u32);
    }
}

/// Runs a player hit against the hostile at `index` through the damage
/// pipeline, applies the element and the player's on-hit healing.
pub(crate) fn strike_hostile(
    world: &mut World,
    index: usize,
    base_damage: f32,
    element: Option<Element>,
    source: DamageSource,
    out: &mut Vec<Event>,
) -> u32 {
    let weapon_bonus = world.player.loadout.bonus(EquipmentSlot::Weapon);
    let multiplier = world.player.loadout.damage_multiplier();
    let Some(hostile) = world.hostiles.get_mut(index) else {
        return 0;
    };
    if !hostile.alive || hostile.hp == 0 {
        return 0;
    }

    let amount = final_damage(base_damage, weapon_bonus, multiplier, hostile.is_armored());
    let dealt = hostile.take_damage(amount);
    out.push(Event::DamageDealt {
        target: Target::Hostile(hostile.id),
        amount: dealt,
        source,
        remaining_hp: hostile.hp,
    });
    if let Some(element) = element {
        hostile.status.apply(element, &mut hostile.speed);
        out.push(Event::StatusApplied {
            enemy: hostile.id,
            element,
        });
    }

    let economy = world.player.economy;
    let stolen = (dealt as f32 * world.player.loadout.life_steal()).floor() as u32;
    world.heal_player(economy.heal_for_hit(dealt) + stolen, out);
    dealt
}

/// Applies incoming damage to the player unless a defense blocks it.
pub(crate) fn damage_player(
    world: &mut World,
    amount: u32,
    source: DamageSource,
    out: &mut Vec<Event>,
) -> u32 {
    if !world.player.alive || amount == 0 {
        return 0;
    }
    if let Some(avoidance) = screen_incoming(&world.player.defenses(), &mut world.rng) {
        out.push(Event::DamageAvoided { avoidance });
        return 0;
    }

    let dealt = world.player.take_damage(amount);
    world.player.grant_invulnerability(POST_HIT_INVULNERABILITY);
    out.push(Event::DamageDealt {
        target: Target::Player,
        amount: dealt,
        source,
        remaining_hp: world.player.hp,
    });
    out.push(Event::CameraShake {
        intensity: HIT_SHAKE,
        duration: Duration::from_millis(100),
    });
    dealt
}

pub(crate) fn advance_projectiles(world: &mut World, dt: Duration, out: &mut Vec<Event>) {
    let mut flying = std::mem::take(&mut world.projectiles);
    flying.retain_mut(|projectile| {
        if !projectile.advance(dt) || !world.arena.is_walkable(projectile.position) {
            return false;
        }
        match projectile.payload {
            Payload::Player {
                base_damage,
                element,
            } => {
                let hit = world.hostiles.iter().position(|hostile| {
                    hostile.alive
                        && hostile.hp > 0
                        && hostile.position.distance(projectile.position) <= PROJECTILE_HIT_RADIUS
                });
                match hit {
                    Some(index) => {
                        let _ = strike_hostile(
                            world,
                            index,
                            base_damage,
                            element,
                            DamageSource::Ranged,
                            out,
                        );
                        false
                    }
                    None => true,
                }
            }
            Payload::Hostile { damage, ability } => {
                let reached = world.player.alive
                    && world.player.position.distance(projectile.position) <= PROJECTILE_HIT_RADIUS;
                if reached {
                    let _ = damage_player(world, damage, DamageSource::Ability(ability), out);
                }
                !reached
            }
        }
    });
    flying.append(&mut world.projectiles);
    world.projectiles = flying;
}

fn knock_back(world: &mut World, index: usize, origin: Vec2, distance: f32) {
    let Some(position) = world.hostiles.get(index).map(|hostile| hostile.position) else {
        return;
    };
    let direction = (position - origin)
        .try_normalize()
        .unwrap_or(world.player.facing);
    let landed = world.arena.slide(position, direction * distance);
    if let Some(hostile) = world.hostiles.get_mut(index) {
        hostile.position = landed;
    }
}

/// Closest damageable hostile within `range`, ties broken by spawn order.
fn nearest_hostile(world: &World, origin: Vec2, range: f32) -> Option<usize> {
    world
        .hostiles
        .iter()
        .enumerate()
        .filter(|(_, hostile)| hostile.alive && hostile.hp > 0)
        .map(|(index, hostile)| (hostile.position.distance(origin), index))
        .filter(|(distance, _)| *distance <= range)
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, index)| index)
}
