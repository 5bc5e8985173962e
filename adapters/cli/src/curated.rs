//! Hand-made daily maps and their rotated and mirrored variants.

use daily_dungeon_core::{Modifier, GRID_SIDE};

const MONSTERS: [&str; 3] = ["Goblin", "Skeleton", "Vampire"];
const MODIFIERS: [Modifier; 6] = [
    Modifier::Normal,
    Modifier::Normal,
    Modifier::Normal,
    Modifier::SpeedBoost,
    Modifier::Darkness,
    Modifier::Normal,
];

struct BaseLayout {
    name: &'static str,
    rows: [&'static str; 10],
    monster: &'static str,
    modifier: Modifier,
}

const BASE_LAYOUTS: [BaseLayout; 10] = [
    BaseLayout {
        name: "The Arena",
        rows: [
            "0000000000",
            "0111111110",
            "0111111110",
            "0111111110",
            "0111111110",
            "0111111110",
            "0111111110",
            "0111111110",
            "0111111110",
            "0000000000",
        ],
        monster: "Goblin",
        modifier: Modifier::Normal,
    },
    BaseLayout {
        name: "The Crossroads",
        rows: [
            "0000110000",
            "0001111000",
            "0001111000",
            "0111111110",
            "1111111111",
            "1111111111",
            "0111111110",
            "0001111000",
            "0001111000",
            "0000110000",
        ],
        monster: "Skeleton",
        modifier: Modifier::Normal,
    },
    BaseLayout {
        name: "Four Chambers",
        rows: [
            "1111011110",
            "1111011110",
            "1111011110",
            "0000111000",
            "0111111110",
            "0111111110",
            "0001110000",
            "0111011110",
            "0111011110",
            "0111011110",
        ],
        monster: "Vampire",
        modifier: Modifier::Normal,
    },
    BaseLayout {
        name: "The Labyrinth",
        rows: [
            "1111110000",
            "0000110000",
            "0000111110",
            "0000000010",
            "0111111110",
            "0100000000",
            "0111111100",
            "0000000100",
            "0011111100",
            "0010000000",
        ],
        monster: "Skeleton",
        modifier: Modifier::SpeedBoost,
    },
    BaseLayout {
        name: "The Ring",
        rows: [
            "0001111000",
            "0011111100",
            "0111001110",
            "1110000111",
            "1100000011",
            "1100000011",
            "1110000111",
            "0111001110",
            "0011111100",
            "0001111000",
        ],
        monster: "Goblin",
        modifier: Modifier::Normal,
    },
    BaseLayout {
        name: "The Castle",
        rows: [
            "1010010101",
            "1111111111",
            "0111111110",
            "0111001110",
            "0111001110",
            "0111111110",
            "0111111110",
            "0011111100",
            "0001111000",
            "0000110000",
        ],
        monster: "Vampire",
        modifier: Modifier::Normal,
    },
    BaseLayout {
        name: "The Crypt",
        rows: [
            "1110011100",
            "0010010100",
            "0011111100",
            "0010010100",
            "0011011100",
            "0010010000",
            "1111011110",
            "0000010010",
            "0011111110",
            "0010000010",
        ],
        monster: "Skeleton",
        modifier: Modifier::Darkness,
    },
    BaseLayout {
        name: "The Cavern",
        rows: [
            "0011111100",
            "0111111110",
            "1111011111",
            "1110000111",
            "1111111111",
            "1111111111",
            "1110000111",
            "1111011111",
            "0111111110",
            "0011111100",
        ],
        monster: "Goblin",
        modifier: Modifier::Normal,
    },
    BaseLayout {
        name: "Throne Room",
        rows: [
            "0111111110",
            "0100000010",
            "0111111110",
            "0010000100",
            "0011111100",
            "0111111110",
            "1111111111",
            "1111111111",
            "0111111110",
            "0011111100",
        ],
        monster: "Vampire",
        modifier: Modifier::Normal,
    },
    BaseLayout {
        name: "The Garden",
        rows: [
            "1111111111",
            "1100110011",
            "1111111111",
            "1011110110",
            "1111111111",
            "1111111111",
            "0110111101",
            "1111111111",
            "1100110011",
            "1111111111",
        ],
        monster: "Goblin",
        modifier: Modifier::Normal,
    },
];

/// One entry of the daily rotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DailyMap {
    pub(crate) name: String,
    pub(crate) layout: String,
    pub(crate) monster: &'static str,
    pub(crate) modifier: Modifier,
}

/// Every curated map in rotation order: the base layouts, one mirrored
/// variant of each, then one rotated variant of each.
pub(crate) fn curated_maps() -> Vec<DailyMap> {
    let mut maps: Vec<DailyMap> = BASE_LAYOUTS
        .iter()
        .map(|base| DailyMap {
            name: base.name.to_owned(),
            layout: base.rows.concat(),
            monster: base.monster,
            modifier: base.modifier,
        })
        .collect();

    for base in &BASE_LAYOUTS {
        let original = base.rows.concat();
        let (suffix, layout) = mirrored_variant(&original);
        let id = maps.len() + 1;
        maps.push(DailyMap {
            name: format!("{} ({suffix})", base.name),
            layout,
            monster: MONSTERS[(id + 2) % MONSTERS.len()],
            modifier: MODIFIERS[(id + 1) % MODIFIERS.len()],
        });
    }

    for base in &BASE_LAYOUTS {
        let id = maps.len() + 1;
        maps.push(DailyMap {
            name: format!("{} (Twisted)", base.name),
            layout: rotate_clockwise(&base.rows.concat()),
            monster: MONSTERS[id % MONSTERS.len()],
            modifier: MODIFIERS[(id + 3) % MODIFIERS.len()],
        });
    }

    maps
}

/// Map of the given day, cycling through the rotation.
pub(crate) fn map_for_day(day: u64) -> DailyMap {
    let mut maps = curated_maps();
    let index = (day % maps.len() as u64) as usize;
    maps.swap_remove(index)
}

/// Horizontal mirror, or the vertical one for horizontally symmetric maps, or
/// a rotation when both mirrors reproduce the original.
fn mirrored_variant(layout: &str) -> (&'static str, String) {
    let horizontal = remap(layout, |row, column| (row, GRID_SIDE - 1 - column));
    if horizontal != layout {
        return ("Mirrored", horizontal);
    }
    let vertical = remap(layout, |row, column| (GRID_SIDE - 1 - row, column));
    if vertical != layout {
        return ("Flipped", vertical);
    }
    ("Rotated", rotate_clockwise(layout))
}

fn rotate_clockwise(layout: &str) -> String {
    remap(layout, |row, column| (column, GRID_SIDE - 1 - row))
}

/// Moves the symbol at `(row, column)` to the position `target` returns.
fn remap(layout: &str, target: impl Fn(u32, u32) -> (u32, u32)) -> String {
    let side = GRID_SIDE as usize;
    let mut out = vec![b'0'; side * side];
    for (index, symbol) in layout.bytes().enumerate().take(side * side) {
        let (row, column) = ((index / side) as u32, (index % side) as u32);
        let (to_row, to_column) = target(row, column);
        out[to_row as usize * side + to_column as usize] = symbol;
    }
    String::from_utf8_lossy(&out).into_owned()
}
