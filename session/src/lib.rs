#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session controller tying the world and its systems into a fixed-tick loop.

mod config;

pub use config::SessionConfig;
pub use daily_dungeon_system_player_actions::PlayerInput;

use daily_dungeon_core::{Command, Event, GameState, HudSnapshot, LayoutError};
use daily_dungeon_system_boss_ai::BossAi;
use daily_dungeon_system_enemy_ai::EnemyAi;
use daily_dungeon_system_player_actions as player_actions;
use daily_dungeon_system_reachability as reachability;
use daily_dungeon_system_wave_scheduler::{
    derive_seed, Config as SchedulerConfig, WavePhase, WaveScheduler,
};
use daily_dungeon_world::{apply, query, World, WorldSetup};
use thiserror::Error;
use tracing::info;

const STREAM_WORLD: &str = "world";
const STREAM_WAVES: &str = "wave-scheduler";
const STREAM_ENEMY_AI: &str = "enemy-ai";
const STREAM_BOSS_AI: &str = "boss-ai";

/// Reasons a session cannot be built from its configuration.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The layout string could not be parsed.
    #[error("invalid layout: {0}")]
    InvalidLayout(#[from] LayoutError),
    /// The layout has no tile to place the player on.
    #[error("layout has no walkable tile to spawn on")]
    DegenerateSpawn,
}

/// A single run of the game, from intro to game over or victory.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    state: GameState,
    world: World,
    scheduler: WaveScheduler,
    enemy_ai: EnemyAi,
    boss_ai: BossAi,
    events: Vec<Event>,
}

impl Session {
    /// Builds a session waiting in the intro state.
    ///
    /// Only malformed layouts and layouts without any floor are rejected.
    /// Gameplay suitability is the offline validator's concern, so a
    /// fragmented layout still plays on the tiles it has.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let grid = reachability::parse(&config.layout)?;
        let analysis = reachability::analyze(&grid);
        let plan =
            reachability::spawn_plan(&grid, &analysis).ok_or(SessionError::DegenerateSpawn)?;

        let setup = WorldSetup::new(grid, plan.player_start, plan.sites, config.class)
            .with_modifier(config.modifier)
            .with_equipment(config.equipment.iter().copied())
            .with_seed(stream_seed(config.seed, STREAM_WORLD));
        let scheduler = WaveScheduler::new(
            SchedulerConfig::new(stream_seed(config.seed, STREAM_WAVES))
                .with_final_wave(config.final_wave),
        );

        info!(
            class = config.class.label(),
            modifier = config.modifier.label(),
            monster = %config.monster,
            seed = config.seed,
            "session created"
        );

        Ok(Self {
            world: World::new(setup),
            scheduler,
            enemy_ai: EnemyAi::new(stream_seed(config.seed, STREAM_ENEMY_AI)),
            boss_ai: BossAi::new(stream_seed(config.seed, STREAM_BOSS_AI)),
            state: GameState::Intro,
            events: Vec::new(),
            config,
        })
    }

    /// Leaves the intro and begins play.
    pub fn start(&mut self) -> &[Event] {
        self.transition(GameState::Intro, GameState::Playing)
    }

    /// Suspends play. Every timer holds its value until [`Session::resume`].
    pub fn pause(&mut self) -> &[Event] {
        self.transition(GameState::Playing, GameState::Paused)
    }

    /// Continues a paused session exactly where it stopped.
    pub fn resume(&mut self) -> &[Event] {
        self.transition(GameState::Paused, GameState::Playing)
    }

    /// Rebuilds the whole session from its configuration and returns to the
    /// intro.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        info!("session restarted");
        *self = Self::new(self.config.clone())?;
        Ok(())
    }

    /// Advances the simulation by one tick of the configured length.
    ///
    /// Ticks outside [`GameState::Playing`] are ignored and report no events.
    pub fn tick(&mut self, input: &PlayerInput) -> &[Event] {
        self.events.clear();
        if self.state != GameState::Playing {
            return &self.events;
        }

        let mut commands = Vec::new();
        self.submit(Command::Tick {
            dt: self.config.tick(),
        });
        let clock: Vec<Event> = self
            .events
            .iter()
            .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
            .cloned()
            .collect();

        player_actions::handle(input, &query::player(&self.world), &mut commands);
        self.submit_all(&mut commands);

        self.enemy_ai.handle(
            &clock,
            &query::player(&self.world),
            &query::hostiles(&self.world),
            &mut commands,
        );
        self.submit_all(&mut commands);

        let hostiles = query::hostiles(&self.world);
        if hostiles.iter().any(|hostile| hostile.kind.is_boss()) {
            self.boss_ai
                .handle(&query::player(&self.world), &hostiles, &mut commands);
            self.submit_all(&mut commands);
        }

        self.submit(Command::SettleTick);

        self.scheduler.handle(
            &clock,
            query::live_hostile_count(&self.world),
            query::spawn_sites(&self.world),
            &mut commands,
        );
        self.submit_all(&mut commands);

        self.conclude();
        &self.events
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Configuration the session was built from.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Daily monster label.
    #[must_use]
    pub fn monster(&self) -> &str {
        &self.config.monster
    }

    /// Current wave scheduler phase.
    #[must_use]
    pub fn wave_phase(&self) -> WavePhase {
        self.scheduler.phase()
    }

    /// Read access to the world for presentation and autopilots.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Per-tick summary for the HUD.
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        query::hud(&self.world, self.state)
    }

    fn transition(&mut self, from: GameState, to: GameState) -> &[Event] {
        self.events.clear();
        if self.state == from {
            self.state = to;
            info!(state = ?to, "session state changed");
            self.events.push(Event::GameStateChanged { state: to });
        }
        &self.events
    }

    fn submit(&mut self, command: Command) {
        apply(&mut self.world, command, &mut self.events);
    }

    fn submit_all(&mut self, commands: &mut Vec<Command>) {
        for command in commands.drain(..) {
            apply(&mut self.world, command, &mut self.events);
        }
    }

    /// Death takes precedence over a victory reached on the same tick.
    fn conclude(&mut self) {
        let defeat = self.events.iter().find_map(|event| match event {
            Event::PlayerDefeated { score, tile } => Some((*score, *tile)),
            _ => None,
        });

        if let Some((score, tile)) = defeat {
            self.scheduler.halt();
            self.state = GameState::GameOver;
            info!(score, wave = query::wave(&self.world), "game over");
            self.events.push(Event::GameOver { score, tile });
        } else if self.scheduler.phase() == WavePhase::Victory {
            let score = query::score(&self.world);
            self.state = GameState::Victory;
            info!(score, "victory");
            self.events.push(Event::Victory { score });
        } else {
            return;
        }
        self.events.push(Event::GameStateChanged { state: self.state });
    }
}

fn stream_seed(seed: u64, stream: &str) -> u64 {
    derive_seed(seed, &[stream.as_bytes()])
}
