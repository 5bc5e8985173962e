#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Translates discrete player input into world commands.

use daily_dungeon_core::{Command, PlayerSnapshot};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Input sampled from the front end for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Desired movement direction. Zero stands still.
    pub movement: Vec2,
    /// Melee trigger.
    pub melee: bool,
    /// Ranged trigger.
    pub ranged: bool,
    /// Dash trigger.
    pub dash: bool,
    /// Area burst trigger.
    pub area: bool,
}

impl PlayerInput {
    /// Input that moves along `movement` without triggering anything.
    #[must_use]
    pub fn moving(movement: Vec2) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }
}

/// Emits the commands that `input` requests and the player can currently
/// perform.
///
/// Melee takes precedence over ranged when both are held, since the two share
/// the attack cooldown.
pub fn handle(input: &PlayerInput, player: &PlayerSnapshot, out: &mut Vec<Command>) {
    if !player.alive {
        return;
    }
    if input.movement != Vec2::ZERO {
        out.push(Command::MovePlayer {
            heading: input.movement,
        });
    }
    if input.dash && player.dash_ready {
        out.push(Command::PlayerDash {
            heading: input.movement,
        });
    }
    if player.attack_ready {
        if input.melee {
            out.push(Command::PlayerMelee);
        } else if input.ranged {
            out.push(Command::PlayerRanged);
        }
    }
    if input.area && player.area_ready {
        out.push(Command::PlayerArea);
    }
}
