#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the daily dungeon combat simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems and presentation layers to react to deterministically. Systems
//! consume event streams, query immutable snapshots, and respond exclusively
//! with new command batches.

mod kinds;
mod loot;

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use kinds::{
    wave_multiplier_tenths, AbilitySpec, BossAbility, BossKind, BossPhase, BossTemplate,
    ClassStats, Element, EnemyKind, EnemyRole, EnemyTemplate, Modifier, PlayerClass,
    BOSS_CONTACT_COOLDOWN,
};
pub use loot::{
    EquipmentItem, EquipmentSlot, PickupKind, PowerUpKind, Rarity, POWER_UP_WEIGHT_TOTAL,
};

/// Number of tiles along each edge of the square map.
pub const GRID_SIDE: u32 = 10;

/// Number of tiles in a layout.
pub const GRID_CELLS: usize = (GRID_SIDE * GRID_SIDE) as usize;

/// Edge length of one tile in world units.
pub const TILE_LENGTH: f32 = 64.0;

/// Edge length of the whole map in world units.
pub const MAP_LENGTH: f32 = TILE_LENGTH * GRID_SIDE as f32;

/// Wave whose clearance wins the session.
pub const FINAL_WAVE: u32 = 20;

/// Location of a single tile expressed as zero-based column and row indices.
///
/// Ordering is row-major, which matches the scan order of every layout search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate at the provided column and row.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Row-major index into a layout, or `None` when outside the map.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        if self.column >= GRID_SIDE || self.row >= GRID_SIDE {
            return None;
        }
        Some((self.row * GRID_SIDE + self.column) as usize)
    }

    /// Inverse of [`CellCoord::index`].
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= GRID_CELLS {
            return None;
        }
        let side = GRID_SIDE as usize;
        Some(Self::new((index % side) as u32, (index / side) as u32))
    }

    /// Tile containing the provided world position, if it lies on the map.
    #[must_use]
    pub fn containing(position: Vec2) -> Option<Self> {
        if !(position.x >= 0.0 && position.y >= 0.0) {
            return None;
        }
        let column = (position.x / TILE_LENGTH).floor();
        let row = (position.y / TILE_LENGTH).floor();
        if column >= GRID_SIDE as f32 || row >= GRID_SIDE as f32 {
            return None;
        }
        Some(Self::new(column as u32, row as u32))
    }

    /// World position of the tile's centre.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.column as f32 + 0.5) * TILE_LENGTH,
            (self.row as f32 + 0.5) * TILE_LENGTH,
        )
    }
}

/// Kind of a single tile in the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Impassable.
    Wall,
    /// Walkable.
    Floor,
    /// Walkable and linked to a paired teleport tile.
    Teleport,
}

impl TileKind {
    /// Resolves a layout symbol. Teleport symbols are case-insensitive.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '0' => Some(TileKind::Wall),
            '1' => Some(TileKind::Floor),
            'T' | 't' => Some(TileKind::Teleport),
            _ => None,
        }
    }

    /// Reports whether actors may stand on the tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Teleport)
    }
}

/// Immutable 10×10 map of tile kinds stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileGrid {
    cells: Vec<TileKind>,
}

impl TileGrid {
    /// Wraps a row-major cell list, rejecting any list that is not exactly
    /// [`GRID_CELLS`] long.
    pub fn from_cells(cells: Vec<TileKind>) -> Result<Self, LayoutError> {
        if cells.len() != GRID_CELLS {
            return Err(LayoutError::InvalidLength {
                length: cells.len(),
            });
        }
        Ok(Self { cells })
    }

    /// Kind of the tile at `cell`. Cells outside the map read as walls.
    #[must_use]
    pub fn kind(&self, cell: CellCoord) -> TileKind {
        cell.index()
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(TileKind::Wall)
    }

    /// Reports whether the tile at `cell` can be walked on.
    #[must_use]
    pub fn is_walkable(&self, cell: CellCoord) -> bool {
        self.kind(cell).is_walkable()
    }

    /// Iterator over every tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, TileKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, kind)| CellCoord::from_index(index).map(|cell| (cell, *kind)))
    }

    /// Walkable tiles in row-major order.
    #[must_use]
    pub fn floor_cells(&self) -> Vec<CellCoord> {
        self.iter()
            .filter(|(_, kind)| kind.is_walkable())
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Number of walkable tiles, teleports included.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|kind| kind.is_walkable()).count()
    }

    /// Teleport tiles in row-major order.
    #[must_use]
    pub fn teleport_cells(&self) -> Vec<CellCoord> {
        self.iter()
            .filter(|(_, kind)| *kind == TileKind::Teleport)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Teleport tiles paired in row-major order: first with second, third with
    /// fourth. A trailing unpaired tile is ignored.
    #[must_use]
    pub fn teleport_pairs(&self) -> Vec<(CellCoord, CellCoord)> {
        self.teleport_cells()
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }
}

/// Reasons a layout is rejected at intake. The display strings are shown
/// verbatim to submission reviewers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout does not contain exactly 100 symbols.
    #[error("Layout must be exactly 100 characters (got {length})")]
    InvalidLength {
        /// Number of symbols supplied.
        length: usize,
    },
    /// The layout contains a symbol outside `0`, `1`, `T` and `t`.
    #[error("Layout may only contain 0, 1, T characters")]
    IllegalCharacter {
        /// Zero-based position of the first offending symbol.
        index: usize,
        /// The offending symbol.
        found: char,
    },
    /// Fewer than 20 walkable tiles.
    #[error("Too few walkable tiles ({count}). Need at least 20.")]
    TooFewFloors {
        /// Walkable tiles found.
        count: usize,
    },
    /// More than 80 walkable tiles.
    #[error("Too many walkable tiles ({count}). Max 80.")]
    TooManyFloors {
        /// Walkable tiles found.
        count: usize,
    },
    /// The layout contains no walkable tile at all.
    #[error("No walkable tiles found.")]
    NoWalkableTiles,
    /// The largest connected area covers less than 80% of the floor.
    #[error(
        "Map is too fragmented. Largest connected area covers only {coverage_percent}% of floor tiles (need ≥80%)."
    )]
    UnreachableMap {
        /// Coverage of the largest component, rounded to whole percent.
        coverage_percent: u32,
    },
    /// No fully reachable 3×3 block exists for boss fights.
    #[error("Map needs at least one 3×3 open area for boss fights.")]
    InsufficientOpenArea,
    /// More than four teleport tiles.
    #[error("Too many teleport tiles ({count}). Max 4.")]
    TooManyTeleports {
        /// Teleport tiles found.
        count: usize,
    },
    /// An odd number of teleport tiles.
    #[error("Teleport tiles must come in pairs (got {count}).")]
    UnpairedTeleports {
        /// Teleport tiles found.
        count: usize,
    },
}

impl LayoutError {
    /// Reports whether the layout was malformed rather than merely unsuitable.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(
            self,
            LayoutError::InvalidLength { .. } | LayoutError::IllegalCharacter { .. }
        )
    }
}

/// Unique identifier assigned to every hostile spawned into a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kind identity of a hostile actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostileKind {
    /// A regular wave enemy.
    Enemy(EnemyKind),
    /// A boss.
    Boss(BossKind),
}

impl HostileKind {
    /// Reports whether the hostile is a boss.
    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(self, HostileKind::Boss(_))
    }

    /// Distance within which the hostile's contact attack connects.
    #[must_use]
    pub const fn contact_range(self) -> f32 {
        match self {
            HostileKind::Enemy(_) => 50.0,
            HostileKind::Boss(_) => 60.0,
        }
    }
}

/// Scaled combat stats assigned to a hostile when it spawns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombatStats {
    /// Maximum and starting hit points.
    pub max_hp: u32,
    /// Contact damage.
    pub damage: u32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Distance within which the hostile pursues the player.
    pub aggro_range: f32,
    /// Minimum time between two contact attacks.
    pub contact_cooldown: Duration,
}

/// Recipient of a damage instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// The player.
    Player,
    /// A hostile.
    Hostile(EnemyId),
}

/// What produced a damage instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageSource {
    /// A melee swing.
    Melee,
    /// A player projectile.
    Ranged,
    /// An area burst.
    Area,
    /// The rogue's delayed shadow-step strike.
    ShadowStrike,
    /// A burn tick.
    Burn,
    /// A hostile's contact attack.
    Contact(EnemyId),
    /// A boss ability, whether direct or delivered by projectile.
    Ability(BossAbility),
}

/// Why an incoming hit on the player was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Avoidance {
    /// The player was inside an invulnerability window.
    Invulnerable,
    /// The shield power-up absorbed the hit.
    Shield,
    /// The class dodge roll succeeded.
    Dodge,
}

/// One-shot milestones unlocked during a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Achievement {
    /// Reached wave 5.
    Wave5,
    /// Reached wave 10.
    Wave10,
    /// Reached wave 20.
    Wave20,
    /// Reached a combo of 5.
    Combo5,
    /// Reached 10 000 points.
    Score10k,
}

impl Achievement {
    /// Short identifier used by persistence layers.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Achievement::Wave5 => "w5",
            Achievement::Wave10 => "w10",
            Achievement::Wave20 => "w20",
            Achievement::Combo5 => "c5",
            Achievement::Score10k => "s10k",
        }
    }
}

/// Overall lifecycle state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for the player to start.
    Intro,
    /// Ticks are processed.
    Playing,
    /// Ticks are ignored and every timer holds its value.
    Paused,
    /// The player died. Terminal.
    GameOver,
    /// The final wave was cleared. Terminal.
    Victory,
}

impl GameState {
    /// Reports whether only a restart can leave the state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameState::GameOver | GameState::Victory)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances every timer, status effect, projectile and pickup.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Moves the player along the provided heading for the current tick.
    MovePlayer {
        /// Desired direction. Zero keeps the player still.
        heading: Vec2,
    },
    /// Requests a melee swing in the facing direction.
    PlayerMelee,
    /// Requests a projectile in the facing direction.
    PlayerRanged,
    /// Requests a dash along the provided heading.
    PlayerDash {
        /// Direction of the dash. Falls back to the facing direction when zero.
        heading: Vec2,
    },
    /// Requests the class area burst.
    PlayerArea,
    /// Sets a hostile's velocity for the current tick.
    SteerHostile {
        /// Hostile being moved.
        enemy: EnemyId,
        /// Velocity in world units per second.
        velocity: Vec2,
    },
    /// Requests a contact attack from a hostile against the player.
    HostileContactAttack {
        /// Attacking hostile.
        enemy: EnemyId,
    },
    /// Moves a boss into a new phase.
    EnterBossPhase {
        /// Boss changing phase.
        boss: EnemyId,
        /// Phase to enter.
        phase: BossPhase,
    },
    /// Casts a boss ability.
    UseBossAbility {
        /// Casting boss.
        boss: EnemyId,
        /// Ability to cast.
        ability: BossAbility,
    },
    /// Applies wave-clear rewards and records the next wave number.
    AdvanceWave {
        /// Wave that was cleared.
        cleared: u32,
        /// Whether the cleared wave was a boss wave.
        cleared_boss_wave: bool,
        /// Wave that follows.
        next: u32,
        /// Whether the following wave is a boss wave.
        next_boss_wave: bool,
    },
    /// Announces that a wave begins spawning.
    StartWave {
        /// Wave number.
        wave: u32,
        /// Whether the wave is a boss wave.
        boss_wave: bool,
    },
    /// Spawns a regular enemy at the centre of a tile.
    SpawnEnemy {
        /// Kind of enemy.
        kind: EnemyKind,
        /// Spawn tile.
        cell: CellCoord,
        /// Wave-scaled stats.
        stats: CombatStats,
    },
    /// Spawns a boss at the centre of a tile.
    SpawnBoss {
        /// Kind of boss.
        kind: BossKind,
        /// Spawn tile.
        cell: CellCoord,
        /// Whether the boss is enraged.
        enraged: bool,
        /// Wave-scaled stats.
        stats: CombatStats,
    },
    /// Resolves every death caused during the tick.
    SettleTick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// A wave began.
    WaveStarted {
        /// Wave number.
        wave: u32,
        /// Whether the wave is a boss wave.
        boss_wave: bool,
    },
    /// A wave was cleared and its rewards applied.
    WaveCleared {
        /// Cleared wave.
        wave: u32,
        /// Following wave.
        next_wave: u32,
    },
    /// A boss wave is about to start.
    BossIntroStarted {
        /// Boss wave number.
        wave: u32,
    },
    /// A hostile entered the map.
    HostileSpawned {
        /// Identifier assigned to the hostile.
        enemy: EnemyId,
        /// Kind of hostile.
        kind: HostileKind,
        /// Spawn position.
        position: Vec2,
        /// Whether a boss spawned enraged.
        enraged: bool,
    },
    /// Damage landed on a target.
    DamageDealt {
        /// Recipient.
        target: Target,
        /// Hit points removed.
        amount: u32,
        /// Producer of the damage.
        source: DamageSource,
        /// Hit points left on the target.
        remaining_hp: u32,
    },
    /// An incoming hit on the player was ignored.
    DamageAvoided {
        /// Why it was ignored.
        avoidance: Avoidance,
    },
    /// The player regained health.
    PlayerHealed {
        /// Hit points restored.
        amount: u32,
        /// Hit points after healing.
        hp: u32,
    },
    /// An element was applied to a hostile as a status effect.
    StatusApplied {
        /// Affected hostile.
        enemy: EnemyId,
        /// Applied element.
        element: Element,
    },
    /// A hostile died. Emitted exactly once per hostile.
    HostileDied {
        /// Identifier of the hostile.
        enemy: EnemyId,
        /// Kind of hostile.
        kind: HostileKind,
        /// Position at death.
        position: Vec2,
        /// Score awarded for the kill.
        score_awarded: u64,
        /// Combo counter after the kill.
        combo: u32,
    },
    /// A pickup was dropped onto the floor.
    LootDropped {
        /// Dropped pickup.
        pickup: PickupKind,
        /// Position of the pickup.
        position: Vec2,
    },
    /// The player collected a pickup.
    PickupCollected {
        /// Collected pickup.
        pickup: PickupKind,
    },
    /// A chest item was equipped.
    EquipmentEquipped {
        /// Newly equipped item.
        item: EquipmentItem,
        /// Item previously held in the same slot.
        replaced: Option<EquipmentItem>,
    },
    /// A power-up became active or had its duration refreshed.
    PowerUpActivated {
        /// Activated power-up.
        kind: PowerUpKind,
        /// Remaining duration.
        duration: Duration,
    },
    /// A power-up ran out.
    PowerUpExpired {
        /// Expired power-up.
        kind: PowerUpKind,
    },
    /// A boss changed phase.
    BossPhaseChanged {
        /// Boss.
        boss: EnemyId,
        /// Phase entered.
        phase: BossPhase,
    },
    /// A boss cast an ability.
    BossAbilityUsed {
        /// Boss.
        boss: EnemyId,
        /// Cast ability.
        ability: BossAbility,
    },
    /// The player stepped through a teleport.
    PlayerTeleported {
        /// Entered teleport tile.
        from: CellCoord,
        /// Exit teleport tile.
        to: CellCoord,
    },
    /// The player's health reached zero.
    PlayerDefeated {
        /// Final score.
        score: u64,
        /// Tile the player died on.
        tile: CellCoord,
    },
    /// A milestone was reached.
    AchievementUnlocked {
        /// Unlocked achievement.
        achievement: Achievement,
    },
    /// Presentation cue: shake the camera.
    CameraShake {
        /// Relative strength.
        intensity: f32,
        /// Length of the shake.
        duration: Duration,
    },
    /// Presentation cue: movement is briefly suspended after a hit.
    HitStop {
        /// Length of the suspension.
        duration: Duration,
    },
    /// The session changed lifecycle state.
    GameStateChanged {
        /// New state.
        state: GameState,
    },
    /// The session ended with the player's death.
    GameOver {
        /// Final score.
        score: u64,
        /// Tile the player died on.
        tile: CellCoord,
    },
    /// The session ended with the final wave cleared.
    Victory {
        /// Final score.
        score: u64,
    },
}

/// Read-only snapshot of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// World position.
    pub position: Vec2,
    /// Unit vector of the last non-zero movement direction.
    pub facing: Vec2,
    /// Current hit points.
    pub hp: u32,
    /// Maximum hit points including equipment.
    pub max_hp: u32,
    /// Effective movement speed.
    pub speed: f32,
    /// Selected class.
    pub class: PlayerClass,
    /// Whether the melee and ranged cooldown has elapsed.
    pub attack_ready: bool,
    /// Whether the dash cooldown has elapsed.
    pub dash_ready: bool,
    /// Whether the area cooldown has elapsed.
    pub area_ready: bool,
    /// Whether the player is alive.
    pub alive: bool,
}

/// Boss-only part of a hostile snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossSnapshot {
    /// Boss kind.
    pub kind: BossKind,
    /// Current phase.
    pub phase: BossPhase,
    /// Whether the boss is enraged.
    pub enraged: bool,
    /// Whether the ability timer has elapsed.
    pub ability_ready: bool,
}

/// Read-only snapshot of one live hostile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostileSnapshot {
    /// Identifier of the hostile.
    pub id: EnemyId,
    /// Kind of hostile.
    pub kind: HostileKind,
    /// World position.
    pub position: Vec2,
    /// Current hit points.
    pub hp: u32,
    /// Maximum hit points.
    pub max_hp: u32,
    /// Effective movement speed, freeze included.
    pub speed: f32,
    /// Pursuit range.
    pub aggro_range: f32,
    /// Whether the contact attack cooldown has elapsed.
    pub contact_ready: bool,
    /// Whether the armored flag is active.
    pub armored: bool,
    /// Whether a burn is active.
    pub burning: bool,
    /// Whether a freeze is active.
    pub frozen: bool,
    /// Boss state, present only for bosses.
    pub boss: Option<BossSnapshot>,
}

/// Read-only snapshot describing all live hostiles.
#[derive(Clone, Debug, Default)]
pub struct HostileView {
    snapshots: Vec<HostileSnapshot>,
}

impl HostileView {
    /// Creates a new hostile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<HostileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &HostileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of live hostiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no hostile is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Tiles available for spawning, derived once from the reachable set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnSites {
    /// Reachable tiles other than the player's start tile, in row-major order.
    pub enemy_tiles: Vec<CellCoord>,
    /// Tile where bosses enter.
    pub boss_tile: Option<CellCoord>,
}

/// Per-tick summary consumed by HUD renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct HudSnapshot {
    /// Lifecycle state.
    pub state: GameState,
    /// Current hit points.
    pub hp: u32,
    /// Maximum hit points including equipment.
    pub max_hp: u32,
    /// Current wave number.
    pub wave: u32,
    /// Live hostiles.
    pub enemies_alive: usize,
    /// Current combo counter.
    pub combo: u32,
    /// Current score.
    pub score: u64,
    /// Equipped items in slot order.
    pub equipment: Vec<EquipmentItem>,
    /// Active power-ups with their remaining durations.
    pub power_ups: Vec<(PowerUpKind, Duration)>,
    /// Simulated time played.
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_order_is_row_major() {
        let mut cells = vec![
            CellCoord::new(5, 1),
            CellCoord::new(0, 2),
            CellCoord::new(9, 0),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(9, 0),
                CellCoord::new(5, 1),
                CellCoord::new(0, 2)
            ]
        );
    }

    #[test]
    fn cell_index_round_trips_and_rejects_outside() {
        let cell = CellCoord::new(3, 7);
        assert_eq!(cell.index(), Some(73));
        assert_eq!(CellCoord::from_index(73), Some(cell));
        assert_eq!(CellCoord::new(10, 0).index(), None);
        assert_eq!(CellCoord::from_index(100), None);
    }

    #[test]
    fn containing_maps_world_positions_to_tiles() {
        assert_eq!(
            CellCoord::containing(Vec2::new(70.0, 130.0)),
            Some(CellCoord::new(1, 2))
        );
        assert_eq!(CellCoord::containing(Vec2::new(-1.0, 5.0)), None);
        assert_eq!(CellCoord::containing(Vec2::new(640.0, 5.0)), None);
        assert_eq!(
            CellCoord::containing(CellCoord::new(4, 4).center()),
            Some(CellCoord::new(4, 4))
        );
    }

    #[test]
    fn grid_rejects_wrong_length() {
        let error = TileGrid::from_cells(vec![TileKind::Floor; 99]).expect_err("short grid");
        assert_eq!(error, LayoutError::InvalidLength { length: 99 });
        assert!(error.is_malformed());
    }

    #[test]
    fn teleports_pair_in_row_major_order() {
        let mut cells = vec![TileKind::Floor; GRID_CELLS];
        cells[3] = TileKind::Teleport;
        cells[40] = TileKind::Teleport;
        cells[41] = TileKind::Teleport;
        let grid = TileGrid::from_cells(cells).expect("valid grid");
        assert_eq!(
            grid.teleport_pairs(),
            vec![(CellCoord::new(3, 0), CellCoord::new(0, 4))]
        );
    }

    #[test]
    fn layout_reason_strings_are_stable() {
        assert_eq!(
            LayoutError::UnreachableMap {
                coverage_percent: 75
            }
            .to_string(),
            "Map is too fragmented. Largest connected area covers only 75% of floor tiles (need ≥80%)."
        );
        assert_eq!(
            LayoutError::UnpairedTeleports { count: 3 }.to_string(),
            "Teleport tiles must come in pairs (got 3)."
        );
    }

    #[test]
    fn grid_survives_bincode_round_trip() {
        let mut cells = vec![TileKind::Wall; GRID_CELLS];
        cells[11] = TileKind::Floor;
        cells[12] = TileKind::Teleport;
        let grid = TileGrid::from_cells(cells).expect("valid grid");
        let bytes = bincode::serialize(&grid).expect("serialize grid");
        let decoded: TileGrid = bincode::deserialize(&bytes).expect("deserialize grid");
        assert_eq!(decoded, grid);
    }
}
