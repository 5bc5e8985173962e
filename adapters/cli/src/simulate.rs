//! Headless sessions driven by a simple autopilot.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use daily_dungeon_core::{GameState, PlayerClass};
use daily_dungeon_session::{PlayerInput, Session, SessionConfig};
use daily_dungeon_world::query;
use glam::Vec2;
use serde::Serialize;
use tracing::info;

const MELEE_REACH: f32 = 80.0;
const DASH_DISTANCE: f32 = 200.0;

/// Outcome of a simulated run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct SimulationSummary {
    pub(crate) state: GameState,
    pub(crate) wave: u32,
    pub(crate) score: u64,
    pub(crate) elapsed_ms: u128,
    pub(crate) ticks: u32,
    pub(crate) class: PlayerClass,
    pub(crate) monster: String,
}

/// Reads a session configuration from a TOML file.
pub(crate) fn load_config(path: &Path) -> Result<SessionConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

/// Plays `config` for at most `ticks` ticks or until the run ends.
pub(crate) fn run(config: SessionConfig, ticks: u32) -> Result<SimulationSummary> {
    let mut session = Session::new(config).context("failed to build session")?;
    let _ = session.start();

    let mut played = 0;
    while played < ticks && !session.state().is_terminal() {
        let input = autopilot(&session);
        let _ = session.tick(&input);
        played += 1;
    }

    let hud = session.hud();
    info!(state = ?hud.state, wave = hud.wave, score = hud.score, "simulation finished");
    Ok(SimulationSummary {
        state: hud.state,
        wave: hud.wave,
        score: hud.score,
        elapsed_ms: hud.elapsed.as_millis(),
        ticks: played,
        class: session.config().class,
        monster: session.monster().to_owned(),
    })
}

/// Chases the nearest hostile, swinging when it is in reach and shooting or
/// dashing when it is not.
fn autopilot(session: &Session) -> PlayerInput {
    let world = session.world();
    let player = query::player(world);
    let nearest = query::hostiles(world)
        .iter()
        .map(|hostile| hostile.position)
        .min_by(|a, b| {
            a.distance(player.position)
                .total_cmp(&b.distance(player.position))
        });

    let Some(target) = nearest else {
        return PlayerInput::default();
    };
    let offset = target - player.position;
    let distance = offset.length();
    PlayerInput {
        movement: offset.try_normalize().unwrap_or(Vec2::ZERO),
        melee: distance <= MELEE_REACH,
        ranged: distance > MELEE_REACH,
        dash: distance > DASH_DISTANCE,
        area: distance <= MELEE_REACH,
    }
}
