//! Closed kind sets and the per-kind data rows the simulation reads.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::CombatStats;

/// Contact attack cooldown shared by every boss.
pub const BOSS_CONTACT_COOLDOWN: Duration = Duration::from_millis(1_200);

const BOSS_AGGRO_RANGE: f32 = 10_000.0;
const DAMAGE_SCALE_CAP_TENTHS: u32 = 20;

/// Wave multiplier `1 + (wave - 1) * 0.10`, expressed in tenths so scaling
/// stays exact.
#[must_use]
pub const fn wave_multiplier_tenths(wave: u32) -> u32 {
    10 + wave.saturating_sub(1)
}

const fn scale_hp(base: u32, wave: u32) -> u32 {
    base * wave_multiplier_tenths(wave) / 10
}

const fn scale_damage(base: u32, wave: u32) -> u32 {
    let tenths = wave_multiplier_tenths(wave);
    let capped = if tenths > DAMAGE_SCALE_CAP_TENTHS {
        DAMAGE_SCALE_CAP_TENTHS
    } else {
        tenths
    };
    base * capped / 10
}

/// Elemental tag carried by an attack and applied as a status effect on hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Element {
    /// Sets the burn damage-over-time effect.
    Fire,
    /// Sets the freeze slow effect.
    Ice,
}

/// Playable class selected before a session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerClass {
    /// Durable melee fighter with a wide area sweep.
    Warrior,
    /// Fast dual-wielder with shadow step and dodge.
    Rogue,
    /// Fire-infused knight that heals from the damage it deals.
    DarkKnight,
}

/// Fixed base stats of a player class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassStats {
    /// Maximum hit points before equipment and modifiers.
    pub max_hp: u32,
    /// Base damage of a single strike.
    pub damage: u32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Cooldown between melee swings. Ranged shots use 80% of it.
    pub attack_cooldown: Duration,
    /// Cooldown between dashes.
    pub dash_cooldown: Duration,
    /// Cooldown between area bursts.
    pub area_cooldown: Duration,
    /// Element applied by the class' attacks, if any.
    pub element: Option<Element>,
}

impl PlayerClass {
    /// Every class in selection order.
    pub const ALL: [PlayerClass; 3] = [
        PlayerClass::Warrior,
        PlayerClass::Rogue,
        PlayerClass::DarkKnight,
    ];

    /// Base stat row for the class.
    #[must_use]
    pub const fn stats(self) -> ClassStats {
        match self {
            PlayerClass::Warrior => ClassStats {
                max_hp: 160,
                damage: 10,
                speed: 180.0,
                attack_cooldown: Duration::from_millis(500),
                dash_cooldown: Duration::from_millis(3_000),
                area_cooldown: Duration::from_millis(5_000),
                element: None,
            },
            PlayerClass::Rogue => ClassStats {
                max_hp: 95,
                damage: 20,
                speed: 310.0,
                attack_cooldown: Duration::from_millis(200),
                dash_cooldown: Duration::from_millis(1_000),
                area_cooldown: Duration::from_millis(3_500),
                element: None,
            },
            PlayerClass::DarkKnight => ClassStats {
                max_hp: 125,
                damage: 16,
                speed: 230.0,
                attack_cooldown: Duration::from_millis(350),
                dash_cooldown: Duration::from_millis(2_000),
                area_cooldown: Duration::from_millis(4_000),
                element: Some(Element::Fire),
            },
        }
    }

    /// Stable lowercase identifier used by configuration files.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PlayerClass::Warrior => "warrior",
            PlayerClass::Rogue => "rogue",
            PlayerClass::DarkKnight => "dark-knight",
        }
    }

    /// Resolves a class from its identifier, ignoring case and separators.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = normalize_label(label);
        Self::ALL
            .into_iter()
            .find(|class| class.label() == normalized)
    }
}

/// Combat role of a regular enemy kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyRole {
    /// Slow and durable.
    Tank,
    /// Fast and fragile with high damage.
    GlassCannon,
    /// Heals from the damage it deals.
    Sustain,
}

/// Regular enemy kinds that populate non-boss waves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnemyKind {
    /// Tank-role enemy.
    Orc,
    /// Glass-cannon enemy.
    Skeleton,
    /// Sustain enemy that drains health.
    Vampire,
}

/// Unscaled stat row for a regular enemy kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyTemplate {
    /// Hit points at wave 1.
    pub max_hp: u32,
    /// Contact damage at wave 1.
    pub damage: u32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Distance within which the enemy notices and pursues the player.
    pub aggro_range: f32,
    /// Minimum time between two contact attacks.
    pub contact_cooldown: Duration,
    /// Fraction of dealt damage the enemy heals back.
    pub life_steal: f32,
}

impl EnemyKind {
    /// Every enemy kind in wave-1 onboarding order.
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Orc, EnemyKind::Skeleton, EnemyKind::Vampire];

    /// Role the kind plays in a wave composition.
    #[must_use]
    pub const fn role(self) -> EnemyRole {
        match self {
            EnemyKind::Orc => EnemyRole::Tank,
            EnemyKind::Skeleton => EnemyRole::GlassCannon,
            EnemyKind::Vampire => EnemyRole::Sustain,
        }
    }

    /// Unscaled stats for the kind.
    #[must_use]
    pub const fn template(self) -> EnemyTemplate {
        match self {
            EnemyKind::Orc => EnemyTemplate {
                max_hp: 45,
                damage: 10,
                speed: 100.0,
                aggro_range: 200.0,
                contact_cooldown: Duration::from_millis(1_000),
                life_steal: 0.0,
            },
            EnemyKind::Skeleton => EnemyTemplate {
                max_hp: 25,
                damage: 16,
                speed: 160.0,
                aggro_range: 180.0,
                contact_cooldown: Duration::from_millis(800),
                life_steal: 0.0,
            },
            EnemyKind::Vampire => EnemyTemplate {
                max_hp: 50,
                damage: 9,
                speed: 140.0,
                aggro_range: 220.0,
                contact_cooldown: Duration::from_millis(600),
                life_steal: 0.3,
            },
        }
    }

    /// Stats of the kind when spawned on `wave`. Health scales with the wave
    /// multiplier and damage with the multiplier capped at 2.0.
    #[must_use]
    pub const fn scaled_stats(self, wave: u32) -> CombatStats {
        let template = self.template();
        CombatStats {
            max_hp: scale_hp(template.max_hp, wave),
            damage: scale_damage(template.damage, wave),
            speed: template.speed,
            aggro_range: template.aggro_range,
            contact_cooldown: template.contact_cooldown,
        }
    }
}

/// Boss kinds scheduled on every third wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BossKind {
    /// Charging brute with a ground slam.
    OrcWarlord,
    /// Ranged caster that summons and blinks.
    SkeletonLich,
    /// Melee drainer that empowers its allies.
    VampireLord,
}

/// Unscaled stat row for a boss kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossTemplate {
    /// Hit points at wave multiplier 1, before enrage.
    pub max_hp: u32,
    /// Contact and ability base damage at wave multiplier 1.
    pub damage: u32,
    /// Pursuit speed in world units per second during phase one.
    pub speed: f32,
    /// Regular enemy kind the boss summons.
    pub minion: EnemyKind,
}

/// Boss behaviour phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossPhase {
    /// Above half health.
    One,
    /// At or below half health. Entered once, never left.
    Two,
}

impl BossPhase {
    /// Factor applied to pursuit speed.
    #[must_use]
    pub const fn speed_factor(self) -> f32 {
        match self {
            BossPhase::One => 1.0,
            BossPhase::Two => 1.3,
        }
    }

    /// Time between two ability casts. Enraged bosses cast 25% more often.
    #[must_use]
    pub const fn ability_interval(self, enraged: bool) -> Duration {
        let millis = match self {
            BossPhase::One => 4_000,
            BossPhase::Two => 2_500,
        };
        if enraged {
            Duration::from_millis(millis * 4 / 5)
        } else {
            Duration::from_millis(millis)
        }
    }
}

const ORC_WARLORD_PHASE_ONE: [BossAbility; 3] = [
    BossAbility::Charge,
    BossAbility::AxeThrow,
    BossAbility::GroundSlam,
];
const ORC_WARLORD_PHASE_TWO: [BossAbility; 4] = [
    BossAbility::Charge,
    BossAbility::AxeThrow,
    BossAbility::GroundSlam,
    BossAbility::IronHide,
];
const SKELETON_LICH_PHASE_ONE: [BossAbility; 3] = [
    BossAbility::BoneBarrage,
    BossAbility::RaiseDead,
    BossAbility::Blink,
];
const SKELETON_LICH_PHASE_TWO: [BossAbility; 4] = [
    BossAbility::BoneBarrage,
    BossAbility::RaiseDead,
    BossAbility::Blink,
    BossAbility::BoneStorm,
];
const VAMPIRE_LORD_PHASE_ONE: [BossAbility; 3] = [
    BossAbility::CrimsonSlam,
    BossAbility::Repel,
    BossAbility::BloodPact,
];
const VAMPIRE_LORD_PHASE_TWO: [BossAbility; 4] = [
    BossAbility::CrimsonSlam,
    BossAbility::Repel,
    BossAbility::BloodPact,
    BossAbility::LifeDrain,
];

impl BossKind {
    /// Every boss kind in schedule cycling order.
    pub const ALL: [BossKind; 3] = [
        BossKind::OrcWarlord,
        BossKind::SkeletonLich,
        BossKind::VampireLord,
    ];

    /// Unscaled stats for the kind.
    #[must_use]
    pub const fn template(self) -> BossTemplate {
        match self {
            BossKind::OrcWarlord => BossTemplate {
                max_hp: 405,
                damage: 18,
                speed: 100.0,
                minion: EnemyKind::Orc,
            },
            BossKind::SkeletonLich => BossTemplate {
                max_hp: 225,
                damage: 28,
                speed: 150.0,
                minion: EnemyKind::Skeleton,
            },
            BossKind::VampireLord => BossTemplate {
                max_hp: 450,
                damage: 16,
                speed: 130.0,
                minion: EnemyKind::Vampire,
            },
        }
    }

    /// Ability pool the boss draws from while in `phase`.
    #[must_use]
    pub fn abilities(self, phase: BossPhase) -> &'static [BossAbility] {
        match (self, phase) {
            (BossKind::OrcWarlord, BossPhase::One) => &ORC_WARLORD_PHASE_ONE,
            (BossKind::OrcWarlord, BossPhase::Two) => &ORC_WARLORD_PHASE_TWO,
            (BossKind::SkeletonLich, BossPhase::One) => &SKELETON_LICH_PHASE_ONE,
            (BossKind::SkeletonLich, BossPhase::Two) => &SKELETON_LICH_PHASE_TWO,
            (BossKind::VampireLord, BossPhase::One) => &VAMPIRE_LORD_PHASE_ONE,
            (BossKind::VampireLord, BossPhase::Two) => &VAMPIRE_LORD_PHASE_TWO,
        }
    }

    /// Stats of the boss when spawned on `wave`. Enraged bosses carry 1.5×
    /// health on top of the wave scaling.
    #[must_use]
    pub const fn scaled_stats(self, wave: u32, enraged: bool) -> CombatStats {
        let template = self.template();
        let hp = scale_hp(template.max_hp, wave);
        CombatStats {
            max_hp: if enraged { hp * 3 / 2 } else { hp },
            damage: scale_damage(template.damage, wave),
            speed: template.speed,
            aggro_range: BOSS_AGGRO_RANGE,
            contact_cooldown: BOSS_CONTACT_COOLDOWN,
        }
    }

    /// Display title announced when the boss enters.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            BossKind::OrcWarlord => "Orc Warlord",
            BossKind::SkeletonLich => "Skeleton Lich",
            BossKind::VampireLord => "Vampire Lord",
        }
    }
}

/// Abilities bosses select from their phase pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossAbility {
    /// Rushes the player and strikes on landing.
    Charge,
    /// Throws a single heavy projectile at the player.
    AxeThrow,
    /// Telegraphed ground slam around the boss.
    GroundSlam,
    /// Raises the armored flag.
    IronHide,
    /// Fan of projectiles aimed at the player.
    BoneBarrage,
    /// Summons minions next to the boss.
    RaiseDead,
    /// Teleports to a random reachable tile.
    Blink,
    /// Ring of projectiles in every direction.
    BoneStorm,
    /// Telegraphed slam around the boss.
    CrimsonSlam,
    /// Damages and pushes the player away.
    Repel,
    /// Temporarily boosts the damage of the boss and its allies.
    BloodPact,
    /// Drains health from a nearby player.
    LifeDrain,
}

/// Fixed data describing what an ability does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbilitySpec {
    /// Damage dealt to the player per hit.
    pub damage: u32,
    /// Effect radius in world units. Zero for untargeted effects.
    pub radius: f32,
    /// Lifetime of a lingering effect such as armor or a buff.
    pub duration: Duration,
    /// Delay between the cast and the damage landing.
    pub wind_up: Duration,
    /// Number of projectiles released.
    pub projectiles: u32,
    /// Number of minions summoned.
    pub summons: u32,
    /// Distance the player is pushed on hit.
    pub push: f32,
}

impl AbilitySpec {
    const EMPTY: AbilitySpec = AbilitySpec {
        damage: 0,
        radius: 0.0,
        duration: Duration::ZERO,
        wind_up: Duration::ZERO,
        projectiles: 0,
        summons: 0,
        push: 0.0,
    };
}

impl BossAbility {
    /// Data row for the ability.
    #[must_use]
    pub const fn spec(self) -> AbilitySpec {
        match self {
            BossAbility::Charge => AbilitySpec {
                damage: 25,
                radius: 70.0,
                wind_up: Duration::from_millis(400),
                ..AbilitySpec::EMPTY
            },
            BossAbility::AxeThrow => AbilitySpec {
                damage: 18,
                projectiles: 1,
                ..AbilitySpec::EMPTY
            },
            BossAbility::GroundSlam => AbilitySpec {
                damage: 30,
                radius: 140.0,
                wind_up: Duration::from_millis(600),
                ..AbilitySpec::EMPTY
            },
            BossAbility::IronHide => AbilitySpec {
                duration: Duration::from_millis(4_000),
                ..AbilitySpec::EMPTY
            },
            BossAbility::BoneBarrage => AbilitySpec {
                damage: 12,
                projectiles: 3,
                ..AbilitySpec::EMPTY
            },
            BossAbility::RaiseDead => AbilitySpec {
                summons: 2,
                ..AbilitySpec::EMPTY
            },
            BossAbility::Blink => AbilitySpec::EMPTY,
            BossAbility::BoneStorm => AbilitySpec {
                damage: 10,
                projectiles: 8,
                ..AbilitySpec::EMPTY
            },
            BossAbility::CrimsonSlam => AbilitySpec {
                damage: 28,
                radius: 100.0,
                wind_up: Duration::from_millis(600),
                ..AbilitySpec::EMPTY
            },
            BossAbility::Repel => AbilitySpec {
                damage: 10,
                radius: 160.0,
                push: 150.0,
                ..AbilitySpec::EMPTY
            },
            BossAbility::BloodPact => AbilitySpec {
                duration: Duration::from_millis(5_000),
                ..AbilitySpec::EMPTY
            },
            BossAbility::LifeDrain => AbilitySpec {
                damage: 20,
                radius: 200.0,
                ..AbilitySpec::EMPTY
            },
        }
    }
}

/// Daily rule modifier applied to the whole session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modifier {
    /// No rule changes.
    #[default]
    Normal,
    /// Player moves faster.
    SpeedBoost,
    /// Player deals double damage.
    DoubleDamage,
    /// Player has double health but moves slower.
    TankMode,
    /// Player has half health and triple damage.
    GlassCannon,
    /// Player slowly regenerates health.
    Regeneration,
    /// Presentation-only darkness.
    Darkness,
}

impl Modifier {
    /// Every modifier.
    pub const ALL: [Modifier; 7] = [
        Modifier::Normal,
        Modifier::SpeedBoost,
        Modifier::DoubleDamage,
        Modifier::TankMode,
        Modifier::GlassCannon,
        Modifier::Regeneration,
        Modifier::Darkness,
    ];

    /// Human readable label used by daily content.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Modifier::Normal => "Normal",
            Modifier::SpeedBoost => "Speed Boost",
            Modifier::DoubleDamage => "Double Damage",
            Modifier::TankMode => "Tank Mode",
            Modifier::GlassCannon => "Glass Cannon",
            Modifier::Regeneration => "Regeneration",
            Modifier::Darkness => "Darkness",
        }
    }

    /// Resolves a modifier from a label such as `"Speed Boost"` or `"speed-boost"`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = normalize_label(label);
        Self::ALL
            .into_iter()
            .find(|modifier| normalize_label(modifier.label()) == normalized)
    }

    /// Multiplier applied to the player's base maximum health.
    #[must_use]
    pub const fn max_hp_multiplier(self) -> f32 {
        match self {
            Modifier::TankMode => 2.0,
            Modifier::GlassCannon => 0.5,
            _ => 1.0,
        }
    }

    /// Multiplier applied to the player's base damage.
    #[must_use]
    pub const fn damage_multiplier(self) -> f32 {
        match self {
            Modifier::DoubleDamage => 2.0,
            Modifier::GlassCannon => 3.0,
            _ => 1.0,
        }
    }

    /// Flat bonus added to the player's base speed.
    #[must_use]
    pub const fn speed_bonus(self) -> f32 {
        match self {
            Modifier::SpeedBoost => 80.0,
            Modifier::TankMode => -50.0,
            _ => 0.0,
        }
    }

    /// Reports whether the player regenerates health over time.
    #[must_use]
    pub const fn regenerates(self) -> bool {
        matches!(self, Modifier::Regeneration)
    }
}

fn normalize_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|ch| match ch {
            ' ' | '_' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
