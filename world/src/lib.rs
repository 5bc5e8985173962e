#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for a Daily Dungeon run.
//!
//! The world owns every entity and is mutated exclusively through
//! [`apply`]. Systems observe it through the read-only [`query`] module and
//! answer with [`Command`]s; the world reports what happened as [`Event`]s.

mod abilities;
mod arena;
mod combat;
mod entities;
mod projectiles;
mod timeline;

use std::collections::BTreeSet;
use std::time::Duration;

use daily_dungeon_core::{
    Achievement, BossKind, CellCoord, CombatStats, Command, DamageSource, Element, EnemyId,
    EnemyKind, EquipmentItem, Event, HostileKind, Modifier, PickupKind, PlayerClass, PowerUpKind,
    SpawnSites, Target, TileGrid,
};
use daily_dungeon_system_combat::{
    kill_score, roll_chest, roll_drops, ComboTracker, Cooldown, HEALTH_PICKUP_HEAL,
};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::arena::Arena;
use crate::entities::{Hostile, Pickup, Player};
use crate::projectiles::Projectile;
use crate::timeline::{Deferred, Timeline};

const WAVE_CLEAR_HEAL: u32 = 30;
const COMBO_ACHIEVEMENT: u32 = 5;
const SCORE_ACHIEVEMENT: u64 = 10_000;
const WAVE_ACHIEVEMENTS: [(u32, Achievement); 3] = [
    (5, Achievement::Wave5),
    (10, Achievement::Wave10),
    (20, Achievement::Wave20),
];

/// Everything needed to populate a fresh world.
#[derive(Clone, Debug)]
pub struct WorldSetup {
    grid: TileGrid,
    player_start: CellCoord,
    sites: SpawnSites,
    class: PlayerClass,
    modifier: Modifier,
    seed: u64,
    equipment: Vec<EquipmentItem>,
}

impl WorldSetup {
    /// Creates a setup for `class` starting on `player_start`, with the
    /// normal modifier and a zero seed.
    #[must_use]
    pub fn new(
        grid: TileGrid,
        player_start: CellCoord,
        sites: SpawnSites,
        class: PlayerClass,
    ) -> Self {
        Self {
            grid,
            player_start,
            sites,
            class,
            modifier: Modifier::Normal,
            seed: 0,
            equipment: Vec::new(),
        }
    }

    /// Replaces the daily modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    /// Replaces the seed feeding dodge and loot rolls.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Equips `items` before the run starts. Later items replace earlier ones
    /// in the same slot.
    #[must_use]
    pub fn with_equipment(mut self, items: impl IntoIterator<Item = EquipmentItem>) -> Self {
        self.equipment = items.into_iter().collect();
        self
    }
}

/// Represents the authoritative Daily Dungeon world state.
#[derive(Debug)]
pub struct World {
    arena: Arena,
    player_start: CellCoord,
    sites: SpawnSites,
    modifier: Modifier,
    player: Player,
    hostiles: Vec<Hostile>,
    projectiles: Vec<Projectile>,
    pickups: Vec<Pickup>,
    timeline: Timeline,
    combo: ComboTracker,
    rng: ChaCha8Rng,
    wave: u32,
    kill_score: u64,
    elapsed: Duration,
    tick_dt: Duration,
    hit_stop: Cooldown,
    next_enemy_id: u32,
    achievements: BTreeSet<Achievement>,
}

impl World {
    /// Creates a world with the player standing on the start tile and no
    /// hostiles. The first wave is announced by the scheduler.
    #[must_use]
    pub fn new(setup: WorldSetup) -> Self {
        let mut player = Player::new(setup.class, setup.modifier, setup.player_start.center());
        for item in setup.equipment {
            let _ = player.loadout.equip(item);
        }
        player.hp = player.max_hp();
        Self {
            arena: Arena::new(setup.grid),
            player_start: setup.player_start,
            sites: setup.sites,
            modifier: setup.modifier,
            player,
            hostiles: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            timeline: Timeline::default(),
            combo: ComboTracker::default(),
            rng: ChaCha8Rng::seed_from_u64(setup.seed),
            wave: 1,
            kill_score: 0,
            elapsed: Duration::ZERO,
            tick_dt: Duration::ZERO,
            hit_stop: Cooldown::elapsed(),
            next_enemy_id: 0,
            achievements: BTreeSet::new(),
        }
    }

    fn hostile_index(&self, id: EnemyId) -> Option<usize> {
        self.hostiles.iter().position(|hostile| hostile.id == id)
    }

    fn score(&self) -> u64 {
        let survival = u64::try_from(self.elapsed.as_millis() / 100).unwrap_or(u64::MAX);
        survival.saturating_add(self.kill_score)
    }

    fn heal_player(&mut self, amount: u32, out: &mut Vec<Event>) {
        if amount == 0 {
            return;
        }
        let healed = self.player.heal(amount);
        if healed > 0 {
            out.push(Event::PlayerHealed {
                amount: healed,
                hp: self.player.hp,
            });
        }
    }

    fn unlock(&mut self, achievement: Achievement, out: &mut Vec<Event>) {
        if self.achievements.insert(achievement) {
            info!(code = achievement.code(), "achievement unlocked");
            out.push(Event::AchievementUnlocked { achievement });
        }
    }

    fn tick(&mut self, dt: Duration, out: &mut Vec<Event>) {
        out.push(Event::TimeAdvanced { dt });
        self.elapsed += dt;
        self.tick_dt = dt;
        self.hit_stop.advance(dt);
        self.combo.advance(dt);

        let regenerated = self.player.advance(dt);
        if regenerated > 0 {
            out.push(Event::PlayerHealed {
                amount: regenerated,
                hp: self.player.hp,
            });
        }
        let mut expired = Vec::new();
        self.player.loadout.advance(dt, &mut expired);
        out.extend(
            expired
                .into_iter()
                .map(|kind| Event::PowerUpExpired { kind }),
        );

        for hostile in self.hostiles.iter_mut().filter(|hostile| hostile.alive) {
            let status = hostile.advance(dt);
            if status.burn_damage > 0 && hostile.hp > 0 {
                let dealt = hostile.take_damage(status.burn_damage);
                out.push(Event::DamageDealt {
                    target: Target::Hostile(hostile.id),
                    amount: dealt,
                    source: DamageSource::Burn,
                    remaining_hp: hostile.hp,
                });
            }
        }

        let mut due = Vec::new();
        self.timeline.advance(dt, &mut due);
        for effect in due {
            self.resolve_deferred(effect, out);
        }

        combat::advance_projectiles(self, dt, out);
        self.advance_pickups(dt, out);
    }

    fn resolve_deferred(&mut self, effect: Deferred, out: &mut Vec<Event>) {
        match effect {
            Deferred::ShadowStrike {
                target,
                base_damage,
            } => {
                if let Some(index) = self.hostile_index(target) {
                    let _ = combat::strike_hostile(
                        self,
                        index,
                        base_damage,
                        None,
                        DamageSource::ShadowStrike,
                        out,
                    );
                }
            }
            Deferred::BossStrike {
                boss,
                ability,
                radius,
                damage,
            } => abilities::resolve_strike(self, boss, ability, radius, damage, out),
        }
    }

    fn advance_pickups(&mut self, dt: Duration, out: &mut Vec<Event>) {
        for pickup in &mut self.pickups {
            pickup.remaining = pickup.remaining.saturating_sub(dt);
        }
        self.pickups.retain(|pickup| !pickup.remaining.is_zero());
        if !self.player.alive {
            return;
        }

        let reach = self.player.loadout.pickup_radius();
        let position = self.player.position;
        let mut collected = Vec::new();
        self.pickups.retain(|pickup| {
            if pickup.position.distance(position) <= reach {
                collected.push(pickup.kind);
                false
            } else {
                true
            }
        });
        for kind in collected {
            self.collect(kind, out);
        }
    }

    fn collect(&mut self, kind: PickupKind, out: &mut Vec<Event>) {
        out.push(Event::PickupCollected { pickup: kind });
        match kind {
            PickupKind::Health => self.heal_player(HEALTH_PICKUP_HEAL, out),
            PickupKind::PowerUp(power_up) => {
                let duration = self.player.loadout.activate(power_up);
                out.push(Event::PowerUpActivated {
                    kind: power_up,
                    duration,
                });
                if power_up == PowerUpKind::Freeze {
                    for hostile in self.hostiles.iter_mut().filter(|hostile| hostile.alive) {
                        hostile.status.apply_freeze(&mut hostile.speed);
                        out.push(Event::StatusApplied {
                            enemy: hostile.id,
                            element: Element::Ice,
                        });
                    }
                }
            }
            PickupKind::Chest => {
                let item = roll_chest(&mut self.rng);
                let replaced = self.player.loadout.equip(item);
                self.player.clamp_hp();
                debug!(item = item.name(), "equipment found");
                out.push(Event::EquipmentEquipped { item, replaced });
            }
        }
    }

    fn advance_wave(
        &mut self,
        cleared: u32,
        cleared_boss_wave: bool,
        next: u32,
        next_boss_wave: bool,
        out: &mut Vec<Event>,
    ) {
        self.wave = next;
        self.player.grow_max_hp();
        out.push(Event::WaveCleared {
            wave: cleared,
            next_wave: next,
        });
        let heal = if cleared_boss_wave {
            self.player.max_hp()
        } else {
            WAVE_CLEAR_HEAL
        };
        self.heal_player(heal, out);
        info!(cleared, next, score = self.score(), "wave cleared");

        for (threshold, achievement) in WAVE_ACHIEVEMENTS {
            if next >= threshold {
                self.unlock(achievement, out);
            }
        }
        if next_boss_wave {
            out.push(Event::BossIntroStarted { wave: next });
        }
    }

    fn allocate_id(&mut self) -> EnemyId {
        self.next_enemy_id += 1;
        EnemyId::new(self.next_enemy_id)
    }

    fn spawn_enemy_at(
        &mut self,
        kind: EnemyKind,
        position: Vec2,
        stats: CombatStats,
        out: &mut Vec<Event>,
    ) {
        let id = self.allocate_id();
        self.hostiles.push(Hostile::enemy(id, kind, position, stats));
        debug!(enemy = id.get(), ?kind, hp = stats.max_hp, "enemy spawned");
        out.push(Event::HostileSpawned {
            enemy: id,
            kind: HostileKind::Enemy(kind),
            position,
            enraged: false,
        });
    }

    fn spawn_boss_at(
        &mut self,
        kind: BossKind,
        position: Vec2,
        enraged: bool,
        stats: CombatStats,
        out: &mut Vec<Event>,
    ) {
        let id = self.allocate_id();
        self.hostiles
            .push(Hostile::boss(id, kind, position, enraged, stats));
        info!(boss = kind.title(), enraged, hp = stats.max_hp, "boss spawned");
        out.push(Event::HostileSpawned {
            enemy: id,
            kind: HostileKind::Boss(kind),
            position,
            enraged,
        });
    }

    /// Resolves deaths queued during the tick, exactly once per hostile.
    fn settle(&mut self, out: &mut Vec<Event>) {
        let wave = self.wave;
        for index in 0..self.hostiles.len() {
            let (id, kind, position) = {
                let hostile = &mut self.hostiles[index];
                if !hostile.alive || hostile.hp > 0 {
                    continue;
                }
                hostile.alive = false;
                (hostile.id, hostile.kind, hostile.position)
            };

            let combo = self.combo.register_kill();
            let awarded = kill_score(kind.is_boss(), wave, combo);
            self.kill_score += awarded;
            let on_kill = self.player.economy.heal_for_kill(self.player.max_hp());
            self.heal_player(on_kill, out);
            debug!(enemy = id.get(), combo, awarded, "hostile died");
            out.push(Event::HostileDied {
                enemy: id,
                kind,
                position,
                score_awarded: awarded,
                combo,
            });

            for pickup in roll_drops(&mut self.rng, kind.is_boss()) {
                self.pickups.push(Pickup::new(pickup, position));
                out.push(Event::LootDropped { pickup, position });
            }
        }
        self.hostiles.retain(|hostile| hostile.alive);

        if self.combo.count() >= COMBO_ACHIEVEMENT {
            self.unlock(Achievement::Combo5, out);
        }
        if self.score() >= SCORE_ACHIEVEMENT {
            self.unlock(Achievement::Score10k, out);
        }

        if self.player.alive && self.player.hp == 0 {
            self.player.alive = false;
            let score = self.score();
            let tile = CellCoord::containing(self.player.position).unwrap_or(self.player_start);
            info!(score, wave = self.wave, "player defeated");
            out.push(Event::PlayerDefeated { score, tile });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::MovePlayer { heading } => combat::move_player(world, heading, out_events),
        Command::PlayerMelee => combat::melee(world, out_events),
        Command::PlayerRanged => combat::ranged(world),
        Command::PlayerDash { heading } => combat::dash(world, heading, out_events),
        Command::PlayerArea => combat::area(world, out_events),
        Command::SteerHostile { enemy, velocity } => combat::steer(world, enemy, velocity),
        Command::HostileContactAttack { enemy } => {
            combat::contact_attack(world, enemy, out_events);
        }
        Command::EnterBossPhase { boss, phase } => {
            abilities::enter_phase(world, boss, phase, out_events);
        }
        Command::UseBossAbility { boss, ability } => {
            abilities::cast(world, boss, ability, out_events);
        }
        Command::AdvanceWave {
            cleared,
            cleared_boss_wave,
            next,
            next_boss_wave,
        } => world.advance_wave(cleared, cleared_boss_wave, next, next_boss_wave, out_events),
        Command::StartWave { wave, boss_wave } => {
            world.wave = wave;
            info!(wave, boss_wave, "wave started");
            out_events.push(Event::WaveStarted { wave, boss_wave });
        }
        Command::SpawnEnemy { kind, cell, stats } => {
            world.spawn_enemy_at(kind, cell.center(), stats, out_events);
        }
        Command::SpawnBoss {
            kind,
            cell,
            enraged,
            stats,
        } => world.spawn_boss_at(kind, cell.center(), enraged, stats, out_events),
        Command::SettleTick => world.settle(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use daily_dungeon_core::{
        EnemyId, EquipmentItem, GameState, HostileSnapshot, HostileView, HudSnapshot, Modifier,
        PickupKind, PlayerSnapshot, PowerUpKind, SpawnSites, TileGrid,
    };
    use glam::Vec2;

    use super::World;

    /// Provides read-only access to the dungeon layout.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        world.arena.grid()
    }

    /// Daily modifier the run was started with.
    #[must_use]
    pub fn modifier(world: &World) -> Modifier {
        world.modifier
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Reports whether the player has been defeated.
    #[must_use]
    pub fn is_player_defeated(world: &World) -> bool {
        !world.player.alive
    }

    /// Captures every live hostile ordered by identifier.
    #[must_use]
    pub fn hostiles(world: &World) -> HostileView {
        HostileView::from_snapshots(
            world
                .hostiles
                .iter()
                .filter(|hostile| hostile.alive)
                .map(|hostile| hostile.snapshot())
                .collect(),
        )
    }

    /// Captures a single live hostile.
    #[must_use]
    pub fn hostile(world: &World, id: EnemyId) -> Option<HostileSnapshot> {
        world
            .hostiles
            .iter()
            .find(|hostile| hostile.alive && hostile.id == id)
            .map(|hostile| hostile.snapshot())
    }

    /// Number of hostiles that have not died yet.
    #[must_use]
    pub fn live_hostile_count(world: &World) -> usize {
        world.hostiles.iter().filter(|hostile| hostile.alive).count()
    }

    /// Tiles where the scheduler may place spawns.
    #[must_use]
    pub fn spawn_sites(world: &World) -> &SpawnSites {
        &world.sites
    }

    /// Wave currently being fought or announced.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.wave
    }

    /// Survival points plus kill points.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score()
    }

    /// Current kill chain.
    #[must_use]
    pub fn combo(world: &World) -> u32 {
        world.combo.count()
    }

    /// Simulated time since the run started.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Items currently equipped, in slot order.
    #[must_use]
    pub fn equipment(world: &World) -> Vec<EquipmentItem> {
        world.player.loadout.items()
    }

    /// Active power-ups with their remaining time.
    #[must_use]
    pub fn power_ups(world: &World) -> Vec<(PowerUpKind, Duration)> {
        world.player.loadout.power_ups()
    }

    /// Pickups lying on the floor.
    #[must_use]
    pub fn pickups(world: &World) -> Vec<(PickupKind, Vec2)> {
        world
            .pickups
            .iter()
            .map(|pickup| (pickup.kind, pickup.position))
            .collect()
    }

    /// Number of projectiles in flight.
    #[must_use]
    pub fn projectile_count(world: &World) -> usize {
        world.projectiles.len()
    }

    /// Assembles the heads-up display for the given lifecycle state.
    #[must_use]
    pub fn hud(world: &World, state: GameState) -> HudSnapshot {
        HudSnapshot {
            state,
            hp: world.player.hp,
            max_hp: world.player.max_hp(),
            wave: world.wave,
            enemies_alive: live_hostile_count(world),
            combo: world.combo.count(),
            score: world.score(),
            equipment: equipment(world),
            power_ups: power_ups(world),
            elapsed: world.elapsed,
        }
    }
}
