//! Player, hostile and pickup records.

use std::time::Duration;

use daily_dungeon_core::{
    BossKind, BossPhase, BossSnapshot, ClassStats, CombatStats, EnemyId, EnemyKind, EquipmentSlot,
    HostileKind, HostileSnapshot, Modifier, PickupKind, PlayerClass, PlayerSnapshot, PowerUpKind,
};
use daily_dungeon_system_combat::{
    economy, ClassEconomy, Cooldown, Defenses, Loadout, StatusEffects, StatusTick,
};
use glam::Vec2;

/// Grace period after the player takes a hit.
pub(crate) const POST_HIT_INVULNERABILITY: Duration = Duration::from_millis(500);

const REGEN_INTERVAL: Duration = Duration::from_millis(333);
const MAX_HP_GROWTH_PER_WAVE: u32 = 15;
const EMPOWERED_DAMAGE_FACTOR: f32 = 1.5;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PlayerCooldowns {
    pub(crate) attack: Cooldown,
    pub(crate) dash: Cooldown,
    pub(crate) area: Cooldown,
}

/// The single player character.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) class: PlayerClass,
    pub(crate) stats: ClassStats,
    pub(crate) economy: ClassEconomy,
    pub(crate) position: Vec2,
    pub(crate) facing: Vec2,
    pub(crate) hp: u32,
    base_max_hp: u32,
    base_damage: f32,
    base_speed: f32,
    pub(crate) cooldowns: PlayerCooldowns,
    pub(crate) invulnerability: Cooldown,
    pub(crate) teleport: Cooldown,
    regenerates: bool,
    regen_progress: Duration,
    pub(crate) loadout: Loadout,
    pub(crate) alive: bool,
}

impl Player {
    /// Creates a player with class stats adjusted by the daily modifier.
    pub(crate) fn new(class: PlayerClass, modifier: Modifier, position: Vec2) -> Self {
        let stats = class.stats();
        let base_max_hp = ((stats.max_hp as f32) * modifier.max_hp_multiplier()).floor() as u32;
        Self {
            class,
            stats,
            economy: economy(class),
            position,
            facing: Vec2::X,
            hp: base_max_hp,
            base_max_hp,
            base_damage: stats.damage as f32 * modifier.damage_multiplier(),
            base_speed: stats.speed + modifier.speed_bonus(),
            cooldowns: PlayerCooldowns::default(),
            invulnerability: Cooldown::elapsed(),
            teleport: Cooldown::elapsed(),
            regenerates: modifier.regenerates(),
            regen_progress: Duration::ZERO,
            loadout: Loadout::default(),
            alive: true,
        }
    }

    pub(crate) fn max_hp(&self) -> u32 {
        self.base_max_hp + self.loadout.bonus(EquipmentSlot::Armor)
    }

    /// Base damage before equipment, power-ups and armor.
    pub(crate) fn damage(&self) -> f32 {
        self.base_damage
    }

    pub(crate) fn speed(&self) -> f32 {
        (self.base_speed + self.loadout.speed_bonus()).max(0.0)
    }

    pub(crate) fn attack_cooldown(&self) -> Duration {
        self.stats
            .attack_cooldown
            .mul_f32(self.loadout.attack_cooldown_factor())
    }

    pub(crate) fn defenses(&self) -> Defenses {
        Defenses {
            invulnerable: !self.invulnerability.is_ready(),
            shielded: self.loadout.is_active(PowerUpKind::Shield),
            dodge_chance: self.economy.dodge_chance,
        }
    }

    /// Extends invulnerability to at least `duration` from now.
    pub(crate) fn grant_invulnerability(&mut self, duration: Duration) {
        if duration > self.invulnerability.remaining() {
            self.invulnerability.start(duration);
        }
    }

    /// Restores up to `amount` hit points, returning the amount restored.
    /// A player already at zero stays down.
    pub(crate) fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive || self.hp == 0 {
            return 0;
        }
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp()).max(before);
        self.hp - before
    }

    /// Removes hit points, returning how many were actually lost.
    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    pub(crate) fn grow_max_hp(&mut self) {
        self.base_max_hp += MAX_HP_GROWTH_PER_WAVE;
    }

    /// Caps hit points after the maximum shrinks.
    pub(crate) fn clamp_hp(&mut self) {
        self.hp = self.hp.min(self.max_hp());
    }

    /// Advances timers and regeneration, returning hit points regenerated.
    pub(crate) fn advance(&mut self, dt: Duration) -> u32 {
        self.cooldowns.attack.advance(dt);
        self.cooldowns.dash.advance(dt);
        self.cooldowns.area.advance(dt);
        self.invulnerability.advance(dt);
        self.teleport.advance(dt);

        if !self.regenerates || !self.alive {
            return 0;
        }
        self.regen_progress += dt;
        let mut regenerated = 0;
        while self.regen_progress >= REGEN_INTERVAL {
            self.regen_progress -= REGEN_INTERVAL;
            regenerated += self.heal(1);
        }
        regenerated
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            facing: self.facing,
            hp: self.hp,
            max_hp: self.max_hp(),
            speed: self.speed(),
            class: self.class,
            attack_ready: self.cooldowns.attack.is_ready(),
            dash_ready: self.cooldowns.dash.is_ready(),
            area_ready: self.cooldowns.area.is_ready(),
            alive: self.alive,
        }
    }
}

/// Boss-only bookkeeping attached to a hostile.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BossState {
    pub(crate) kind: BossKind,
    pub(crate) phase: BossPhase,
    pub(crate) enraged: bool,
    pub(crate) ability_timer: Cooldown,
}

/// An enemy or boss occupying the dungeon.
#[derive(Clone, Debug)]
pub(crate) struct Hostile {
    pub(crate) id: EnemyId,
    pub(crate) kind: HostileKind,
    pub(crate) position: Vec2,
    pub(crate) hp: u32,
    pub(crate) max_hp: u32,
    damage: u32,
    pub(crate) speed: f32,
    aggro_range: f32,
    pub(crate) contact: Cooldown,
    pub(crate) contact_cooldown: Duration,
    pub(crate) life_steal: f32,
    pub(crate) status: StatusEffects,
    pub(crate) armored: Cooldown,
    pub(crate) empowered: Cooldown,
    pub(crate) alive: bool,
    pub(crate) boss: Option<BossState>,
}

impl Hostile {
    pub(crate) fn enemy(
        id: EnemyId,
        kind: EnemyKind,
        position: Vec2,
        stats: CombatStats,
    ) -> Self {
        let mut hostile = Self::from_stats(id, HostileKind::Enemy(kind), position, stats);
        hostile.life_steal = kind.template().life_steal;
        hostile
    }

    pub(crate) fn boss(
        id: EnemyId,
        kind: BossKind,
        position: Vec2,
        enraged: bool,
        stats: CombatStats,
    ) -> Self {
        let mut hostile = Self::from_stats(id, HostileKind::Boss(kind), position, stats);
        hostile.boss = Some(BossState {
            kind,
            phase: BossPhase::One,
            enraged,
            ability_timer: Cooldown::running(BossPhase::One.ability_interval(enraged)),
        });
        hostile
    }

    fn from_stats(id: EnemyId, kind: HostileKind, position: Vec2, stats: CombatStats) -> Self {
        Self {
            id,
            kind,
            position,
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            damage: stats.damage,
            speed: stats.speed,
            aggro_range: stats.aggro_range,
            contact: Cooldown::elapsed(),
            contact_cooldown: stats.contact_cooldown,
            life_steal: 0.0,
            status: StatusEffects::default(),
            armored: Cooldown::elapsed(),
            empowered: Cooldown::elapsed(),
            alive: true,
            boss: None,
        }
    }

    pub(crate) fn is_armored(&self) -> bool {
        !self.armored.is_ready()
    }

    /// Fastest the hostile may move this tick.
    pub(crate) fn max_speed(&self) -> f32 {
        let factor = self.boss.map_or(1.0, |state| state.phase.speed_factor());
        self.speed * factor
    }

    /// Scales outgoing damage by any active empowerment.
    pub(crate) fn outgoing(&self, amount: u32) -> u32 {
        if self.empowered.is_ready() {
            amount
        } else {
            (amount as f32 * EMPOWERED_DAMAGE_FACTOR).floor() as u32
        }
    }

    pub(crate) fn contact_damage(&self) -> u32 {
        self.outgoing(self.damage)
    }

    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    pub(crate) fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub(crate) fn advance(&mut self, dt: Duration) -> StatusTick {
        self.contact.advance(dt);
        self.armored.advance(dt);
        self.empowered.advance(dt);
        if let Some(state) = self.boss.as_mut() {
            state.ability_timer.advance(dt);
        }
        self.status.advance(dt, &mut self.speed)
    }

    pub(crate) fn snapshot(&self) -> HostileSnapshot {
        HostileSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            hp: self.hp,
            max_hp: self.max_hp,
            speed: self.max_speed(),
            aggro_range: self.aggro_range,
            contact_ready: self.contact.is_ready(),
            armored: self.is_armored(),
            burning: self.status.is_burning(),
            frozen: self.status.is_frozen(),
            boss: self.boss.map(|state| BossSnapshot {
                kind: state.kind,
                phase: state.phase,
                enraged: state.enraged,
                ability_ready: state.ability_timer.is_ready(),
            }),
        }
    }
}

/// Loot waiting on the floor.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Pickup {
    pub(crate) kind: PickupKind,
    pub(crate) position: Vec2,
    pub(crate) remaining: Duration,
}

impl Pickup {
    pub(crate) fn new(kind: PickupKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            remaining: kind.lifetime(),
        }
    }
}
