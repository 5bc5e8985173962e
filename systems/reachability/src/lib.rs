#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tile grid parsing, connectivity analysis and layout validation.
//!
//! The same analysis backs two callers: the offline validator that reviews
//! submitted layouts and the session bootstrap that derives spawn sites. The
//! validator is strict and reports the first failing rule; spawn placement
//! degrades gracefully instead.

use std::collections::{BTreeSet, VecDeque};

use daily_dungeon_core::{
    CellCoord, LayoutError, SpawnSites, TileGrid, TileKind, GRID_CELLS, GRID_SIDE,
};
use serde::Serialize;

/// Smallest number of walkable tiles a valid layout may contain.
pub const MIN_FLOORS: usize = 20;

/// Largest number of walkable tiles a valid layout may contain.
pub const MAX_FLOORS: usize = 80;

/// Share of the floor the largest component must cover.
pub const MIN_COVERAGE: f64 = 0.8;

/// Largest number of teleport tiles a valid layout may contain.
pub const MAX_TELEPORTS: usize = 4;

const ARENA_SIZES: [u32; 3] = [5, 4, 3];

/// Parses a 100-symbol layout string into a tile grid.
///
/// `0` is a wall, `1` a floor and `T`/`t` a teleport.
pub fn parse(layout: &str) -> Result<TileGrid, LayoutError> {
    let length = layout.chars().count();
    if length != GRID_CELLS {
        return Err(LayoutError::InvalidLength { length });
    }

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for (index, symbol) in layout.chars().enumerate() {
        let Some(kind) = TileKind::from_symbol(symbol) else {
            return Err(LayoutError::IllegalCharacter {
                index,
                found: symbol,
            });
        };
        cells.push(kind);
    }

    TileGrid::from_cells(cells)
}

/// Largest connected component of walkable tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReachableSet {
    cells: BTreeSet<CellCoord>,
}

impl ReachableSet {
    /// Reports whether `cell` belongs to the component.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of tiles in the component.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the component is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().copied()
    }

    /// Tile halfway through the row-major ordering.
    #[must_use]
    pub fn midpoint(&self) -> Option<CellCoord> {
        self.cells.iter().nth(self.cells.len() / 2).copied()
    }
}

/// Result of analysing a tile grid.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutAnalysis {
    reachable: ReachableSet,
    arena_anchor: Option<CellCoord>,
    floor_count: usize,
    component_count: usize,
    coverage: f64,
}

impl LayoutAnalysis {
    /// Largest connected component.
    #[must_use]
    pub fn reachable(&self) -> &ReachableSet {
        &self.reachable
    }

    /// Centre of the largest fully reachable square block, if any.
    #[must_use]
    pub fn arena_anchor(&self) -> Option<CellCoord> {
        self.arena_anchor
    }

    /// Number of walkable tiles in the whole grid.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    /// Number of disconnected walkable components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Share of walkable tiles covered by the reachable set, on `[0, 1]`.
    #[must_use]
    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    /// Coverage rounded to whole percent.
    #[must_use]
    pub fn coverage_percent(&self) -> u32 {
        (self.coverage * 100.0).round() as u32
    }
}

/// Partitions the walkable tiles into components and locates the boss arena.
#[must_use]
pub fn analyze(grid: &TileGrid) -> LayoutAnalysis {
    let floor_count = grid.floor_count();
    let components = connected_components(grid);
    let component_count = components.len();

    let mut largest: Option<Vec<CellCoord>> = None;
    for component in components {
        let replaces = largest
            .as_ref()
            .map_or(true, |current| component.len() > current.len());
        if replaces {
            largest = Some(component);
        }
    }

    let reachable = ReachableSet {
        cells: largest.unwrap_or_default().into_iter().collect(),
    };
    let coverage = if floor_count == 0 {
        0.0
    } else {
        reachable.len() as f64 / floor_count as f64
    };
    let arena_anchor = find_arena(&reachable);

    LayoutAnalysis {
        reachable,
        arena_anchor,
        floor_count,
        component_count,
        coverage,
    }
}

/// Applies the submission rules in order and returns the analysis of a
/// layout that passes all of them.
pub fn validate(grid: &TileGrid) -> Result<LayoutAnalysis, LayoutError> {
    let analysis = analyze(grid);
    let count = analysis.floor_count;

    if count < MIN_FLOORS {
        return Err(LayoutError::TooFewFloors { count });
    }
    if count > MAX_FLOORS {
        return Err(LayoutError::TooManyFloors { count });
    }
    if analysis.component_count == 0 {
        return Err(LayoutError::NoWalkableTiles);
    }
    if analysis.coverage < MIN_COVERAGE {
        return Err(LayoutError::UnreachableMap {
            coverage_percent: analysis.coverage_percent(),
        });
    }
    if analysis.arena_anchor.is_none() {
        return Err(LayoutError::InsufficientOpenArea);
    }

    let teleports = grid.teleport_cells().len();
    if teleports > MAX_TELEPORTS {
        return Err(LayoutError::TooManyTeleports { count: teleports });
    }
    if teleports % 2 != 0 {
        return Err(LayoutError::UnpairedTeleports { count: teleports });
    }

    Ok(analysis)
}

/// Outcome of the offline validator, shaped for review tooling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Whether the layout passed every rule.
    pub valid: bool,
    /// Failure reason, present only when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Size of the reachable set, present only when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reachable_tile_count: Option<usize>,
    /// Boss arena anchor, present only when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boss_arena_anchor: Option<CellCoord>,
}

/// Parses and validates a raw layout string.
#[must_use]
pub fn validate_layout(layout: &str) -> ValidationReport {
    match parse(layout).and_then(|grid| validate(&grid)) {
        Ok(analysis) => ValidationReport {
            valid: true,
            reason: None,
            reachable_tile_count: Some(analysis.reachable.len()),
            boss_arena_anchor: analysis.arena_anchor,
        },
        Err(error) => ValidationReport {
            valid: false,
            reason: Some(error.to_string()),
            reachable_tile_count: None,
            boss_arena_anchor: None,
        },
    }
}

/// Where the player starts and where hostiles may appear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnPlan {
    /// Tile the player starts on.
    pub player_start: CellCoord,
    /// Tiles hostiles spawn on.
    pub sites: SpawnSites,
}

/// Derives spawn placement for a session.
///
/// Prefers the reachable set and falls back to the raw floor list when it is
/// empty. Bosses enter at the arena anchor, or at the midpoint of the
/// reachable set when the layout has no arena. Returns `None` when the grid
/// has no walkable tile at all.
#[must_use]
pub fn spawn_plan(grid: &TileGrid, analysis: &LayoutAnalysis) -> Option<SpawnPlan> {
    let pool: Vec<CellCoord> = if analysis.reachable.is_empty() {
        grid.floor_cells()
    } else {
        analysis.reachable.iter().collect()
    };

    let (&player_start, rest) = pool.split_first()?;
    let boss_tile = analysis
        .arena_anchor
        .or_else(|| analysis.reachable.midpoint())
        .or(Some(player_start));

    Some(SpawnPlan {
        player_start,
        sites: SpawnSites {
            enemy_tiles: rest.to_vec(),
            boss_tile,
        },
    })
}

fn connected_components(grid: &TileGrid) -> Vec<Vec<CellCoord>> {
    let mut visited = [false; GRID_CELLS];
    let mut components = Vec::new();

    for (cell, kind) in grid.iter() {
        if !kind.is_walkable() {
            continue;
        }
        let Some(start) = cell.index() else {
            continue;
        };
        if visited[start] {
            continue;
        }

        visited[start] = true;
        let mut component = vec![cell];
        let mut queue = VecDeque::from([cell]);

        while let Some(current) = queue.pop_front() {
            for neighbor in neighbors(current) {
                if !grid.is_walkable(neighbor) {
                    continue;
                }
                let Some(index) = neighbor.index() else {
                    continue;
                };
                if visited[index] {
                    continue;
                }
                visited[index] = true;
                component.push(neighbor);
                queue.push_back(neighbor);
            }
        }

        components.push(component);
    }

    components
}

fn find_arena(reachable: &ReachableSet) -> Option<CellCoord> {
    for size in ARENA_SIZES {
        for row in 0..=GRID_SIDE - size {
            for column in 0..=GRID_SIDE - size {
                let open = (0..size).all(|dr| {
                    (0..size).all(|dc| reachable.contains(CellCoord::new(column + dc, row + dr)))
                });
                if open {
                    let center = size / 2;
                    return Some(CellCoord::new(column + center, row + center));
                }
            }
        }
    }
    None
}

fn neighbors(cell: CellCoord) -> impl Iterator<Item = CellCoord> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(row) = cell.row().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(cell.column(), row));
        count += 1;
    }

    if cell.column() + 1 < GRID_SIDE {
        candidates[count] = Some(CellCoord::new(cell.column() + 1, cell.row()));
        count += 1;
    }

    if cell.row() + 1 < GRID_SIDE {
        candidates[count] = Some(CellCoord::new(cell.column(), cell.row() + 1));
        count += 1;
    }

    if let Some(column) = cell.column().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(column, cell.row()));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_stay_inside_the_grid() {
        let corner: Vec<_> = neighbors(CellCoord::new(0, 0)).collect();
        assert_eq!(corner, vec![CellCoord::new(1, 0), CellCoord::new(0, 1)]);

        let far: Vec<_> = neighbors(CellCoord::new(9, 9)).collect();
        assert_eq!(far, vec![CellCoord::new(9, 8), CellCoord::new(8, 9)]);

        assert_eq!(neighbors(CellCoord::new(4, 4)).count(), 4);
    }

    #[test]
    fn ties_between_components_keep_the_first_found() {
        let mut layout = String::from("1100000011");
        layout.push_str(&"0".repeat(90));
        let grid = parse(&layout).expect("layout parses");
        let analysis = analyze(&grid);
        assert_eq!(analysis.component_count(), 2);
        assert!(analysis.reachable().contains(CellCoord::new(0, 0)));
        assert!(!analysis.reachable().contains(CellCoord::new(9, 0)));
    }

    #[test]
    fn arena_prefers_the_largest_block() {
        let layout = "1".repeat(100);
        let grid = parse(&layout).expect("layout parses");
        assert_eq!(analyze(&grid).arena_anchor(), Some(CellCoord::new(2, 2)));
    }

    #[test]
    fn spawn_plan_falls_back_to_reachable_midpoint_without_arena() {
        let mut layout = String::from("1111111111");
        layout.push_str(&"0".repeat(90));
        let grid = parse(&layout).expect("layout parses");
        let analysis = analyze(&grid);
        assert_eq!(analysis.arena_anchor(), None);

        let plan = spawn_plan(&grid, &analysis).expect("floor exists");
        assert_eq!(plan.player_start, CellCoord::new(0, 0));
        assert_eq!(plan.sites.enemy_tiles.len(), 9);
        assert_eq!(plan.sites.boss_tile, Some(CellCoord::new(5, 0)));
        assert_eq!(analysis.reachable().midpoint(), plan.sites.boss_tile);
    }

    #[test]
    fn spawn_plan_is_absent_without_floor() {
        let grid = parse(&"0".repeat(100)).expect("layout parses");
        assert_eq!(spawn_plan(&grid, &analyze(&grid)), None);
    }
}
