#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave progression, enemy composition and the recurring boss schedule.
//!
//! The scheduler is a pure system: it reads elapsed time from world events
//! and the live hostile count, and answers with wave and spawn commands.

use std::time::Duration;

use daily_dungeon_core::{
    BossKind, CellCoord, Command, EnemyKind, EnemyRole, Event, SpawnSites, FINAL_WAVE,
};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Pause between a cleared wave and the next one, and the length of a boss
/// introduction.
pub const TRANSITION_DELAY: Duration = Duration::from_millis(2_000);

/// Largest number of regular enemies a wave can hold.
pub const MAX_ENEMIES_PER_WAVE: u32 = 8;

const RNG_STREAM_WAVE: &str = "wave-composition";
const ROLE_ROLL_RANGE: u32 = 100;
const TANK_WEIGHT: u32 = 40;
const GLASS_CANNON_WEIGHT: u32 = 30;

/// Number of regular enemies spawned on `wave`.
#[must_use]
pub fn enemies_per_wave(wave: u32) -> u32 {
    (3 + wave / 2).min(MAX_ENEMIES_PER_WAVE)
}

/// Every third wave is a boss wave.
#[must_use]
pub const fn is_boss_wave(wave: u32) -> bool {
    wave != 0 && wave % 3 == 0
}

const BOSS_TABLE: [(u32, BossKind, bool); 6] = [
    (3, BossKind::OrcWarlord, false),
    (6, BossKind::SkeletonLich, false),
    (9, BossKind::VampireLord, false),
    (12, BossKind::OrcWarlord, true),
    (15, BossKind::SkeletonLich, true),
    (18, BossKind::VampireLord, true),
];

/// Boss fought on `wave` and whether it is enraged, or `None` for regular
/// waves. Boss waves past the table cycle kinds by `(wave / 3) % 3`, enraged.
#[must_use]
pub fn boss_for_wave(wave: u32) -> Option<(BossKind, bool)> {
    if !is_boss_wave(wave) {
        return None;
    }
    let listed = BOSS_TABLE
        .iter()
        .find(|(scheduled, _, _)| *scheduled == wave)
        .map(|&(_, kind, enraged)| (kind, enraged));
    // Cycles on the boss-wave ordinal rather than `wave % 3`, which is always
    // zero here and would only ever pick the first kind.
    Some(listed.unwrap_or_else(|| (BossKind::ALL[((wave / 3) % 3) as usize], true)))
}

/// Observable phase of the wave state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// Hostiles are alive and fighting.
    WaveActive,
    /// A regular wave was cleared and the next one is pending.
    WaveClear,
    /// A boss wave is being announced.
    BossIntro,
    /// The player fell; no further waves start.
    GameOver,
    /// The final wave was cleared.
    Victory,
}

impl WavePhase {
    /// Reports whether the scheduler has stopped for good.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, WavePhase::GameOver | WavePhase::Victory)
    }
}

/// Bookkeeping for the wave being fought or announced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveState {
    /// One-based wave number.
    pub wave: u32,
    /// Regular enemies this wave spawns.
    pub enemies_per_wave: u32,
    /// Whether this wave is a boss wave.
    pub is_boss_wave: bool,
    /// Whether the boss for this wave has already been spawned.
    pub boss_spawned: bool,
}

impl WaveState {
    /// State for a wave that has not spawned yet.
    #[must_use]
    pub fn for_wave(wave: u32) -> Self {
        Self {
            wave,
            enemies_per_wave: enemies_per_wave(wave),
            is_boss_wave: is_boss_wave(wave),
            boss_spawned: false,
        }
    }
}

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    seed: u64,
    final_wave: u32,
}

impl Config {
    /// Creates a configuration with the given composition seed and the
    /// standard twenty-wave run.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            seed,
            final_wave: FINAL_WAVE,
        }
    }

    /// Overrides the wave whose clearing wins the run.
    #[must_use]
    pub const fn with_final_wave(mut self, final_wave: u32) -> Self {
        self.final_wave = final_wave;
        self
    }
}

/// Pure system driving wave progression.
#[derive(Debug)]
pub struct WaveScheduler {
    config: Config,
    phase: WavePhase,
    state: WaveState,
    delay: Duration,
}

impl WaveScheduler {
    /// Creates a scheduler whose first wave starts on the next tick.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            phase: WavePhase::WaveClear,
            state: WaveState::for_wave(1),
            delay: Duration::ZERO,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Current wave bookkeeping.
    #[must_use]
    pub const fn state(&self) -> WaveState {
        self.state
    }

    /// Stops all progression after the player's defeat.
    pub fn halt(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = WavePhase::GameOver;
        }
    }

    /// Consumes world events and the live hostile count to emit wave and
    /// spawn commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        live_hostiles: usize,
        sites: &SpawnSites,
        out: &mut Vec<Command>,
    ) {
        let elapsed = events
            .iter()
            .filter_map(|event| match event {
                Event::TimeAdvanced { dt } => Some(*dt),
                _ => None,
            })
            .fold(Duration::ZERO, Duration::saturating_add);

        match self.phase {
            WavePhase::GameOver | WavePhase::Victory => {}
            WavePhase::WaveActive => {
                if live_hostiles == 0 {
                    self.clear_wave(out);
                }
            }
            WavePhase::WaveClear | WavePhase::BossIntro => {
                self.delay = self.delay.saturating_sub(elapsed);
                if self.delay.is_zero() {
                    self.start_wave(sites, out);
                }
            }
        }
    }

    fn clear_wave(&mut self, out: &mut Vec<Command>) {
        let cleared = self.state;
        let next = cleared.wave + 1;
        if next > self.config.final_wave {
            self.phase = WavePhase::Victory;
            return;
        }

        let upcoming = WaveState::for_wave(next);
        out.push(Command::AdvanceWave {
            cleared: cleared.wave,
            cleared_boss_wave: cleared.is_boss_wave,
            next,
            next_boss_wave: upcoming.is_boss_wave,
        });
        self.state = upcoming;
        self.delay = TRANSITION_DELAY;
        self.phase = if upcoming.is_boss_wave {
            WavePhase::BossIntro
        } else {
            WavePhase::WaveClear
        };
    }

    fn start_wave(&mut self, sites: &SpawnSites, out: &mut Vec<Command>) {
        let wave = self.state.wave;
        out.push(Command::StartWave {
            wave,
            boss_wave: self.state.is_boss_wave,
        });
        self.phase = WavePhase::WaveActive;

        if let Some((kind, enraged)) = boss_for_wave(wave) {
            if self.state.boss_spawned {
                return;
            }
            let Some(cell) = sites.boss_tile.or_else(|| sites.enemy_tiles.first().copied())
            else {
                return;
            };
            out.push(Command::SpawnBoss {
                kind,
                cell,
                enraged,
                stats: kind.scaled_stats(wave, enraged),
            });
            self.state.boss_spawned = true;
            return;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(derive_wave_seed(self.config.seed, wave));
        let kinds = composition(wave, self.state.enemies_per_wave, &mut rng);
        let tiles = scatter(&sites.enemy_tiles, kinds.len(), &mut rng);
        for (kind, cell) in kinds.into_iter().zip(tiles) {
            out.push(Command::SpawnEnemy {
                kind,
                cell,
                stats: kind.scaled_stats(wave),
            });
        }
    }
}

/// Enemy kinds for a regular wave. Wave 1 introduces each kind once.
fn composition<R: Rng + ?Sized>(wave: u32, count: u32, rng: &mut R) -> Vec<EnemyKind> {
    if wave <= 1 {
        return EnemyKind::ALL.to_vec();
    }
    (0..count)
        .map(|_| {
            let roll = rng.gen_range(0..ROLE_ROLL_RANGE);
            let role = if roll < TANK_WEIGHT {
                EnemyRole::Tank
            } else if roll < TANK_WEIGHT + GLASS_CANNON_WEIGHT {
                EnemyRole::GlassCannon
            } else {
                EnemyRole::Sustain
            };
            EnemyKind::ALL
                .into_iter()
                .find(|kind| kind.role() == role)
                .unwrap_or(EnemyKind::Orc)
        })
        .collect()
}

/// Spawn tiles for `count` enemies, distinct while the pool lasts.
fn scatter<R: Rng + ?Sized>(pool: &[CellCoord], count: usize, rng: &mut R) -> Vec<CellCoord> {
    if pool.is_empty() {
        return Vec::new();
    }
    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.iter().copied().cycle().take(count).collect()
}

fn derive_wave_seed(base: u64, wave: u32) -> u64 {
    derive_seed(base, &[RNG_STREAM_WAVE.as_bytes(), &wave.to_le_bytes()])
}

/// Derives an independent random stream seed from `base` and the labelling
/// `parts`, hashed in order.
#[must_use]
pub fn derive_seed(base: u64, parts: &[&[u8]]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
