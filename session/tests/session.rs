use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use daily_dungeon_core::{Event, GameState, Modifier, PlayerClass};
use daily_dungeon_session::{PlayerInput, Session, SessionConfig, SessionError};
use daily_dungeon_world::query;
use glam::Vec2;

/// Builds a layout with the interior block `columns × rows` open, starting at
/// cell (1, 1), and walls everywhere else.
fn block_layout(columns: u32, rows: u32) -> String {
    (0..10)
        .flat_map(|row| {
            (0..10).map(move |column| {
                if (1..=columns).contains(&column) && (1..=rows).contains(&row) {
                    '1'
                } else {
                    '0'
                }
            })
        })
        .collect()
}

fn started(config: SessionConfig) -> Session {
    let mut session = Session::new(config).expect("valid layout");
    let _ = session.start();
    session
}

/// Walks toward the nearest hostile and attacks with everything available.
fn brawler(session: &Session) -> PlayerInput {
    let world = session.world();
    let player = query::player(world);
    let nearest = query::hostiles(world)
        .iter()
        .map(|hostile| hostile.position)
        .min_by(|a, b| {
            a.distance(player.position)
                .total_cmp(&b.distance(player.position))
        });
    let movement = nearest
        .map(|target| (target - player.position).normalize_or_zero())
        .unwrap_or(Vec2::ZERO);
    PlayerInput {
        movement,
        melee: true,
        area: true,
        ..PlayerInput::default()
    }
}

fn fingerprint(seed: u64) -> u64 {
    let mut session = started(
        SessionConfig::new(block_layout(8, 8), PlayerClass::Warrior).with_seed(seed),
    );
    let mut hasher = DefaultHasher::new();
    for _ in 0..1_500 {
        let input = brawler(&session);
        for event in session.tick(&input) {
            format!("{event:?}").hash(&mut hasher);
        }
    }
    hasher.finish()
}

#[test]
fn first_tick_spawns_one_enemy_of_each_kind() {
    let mut session = started(SessionConfig::new(block_layout(8, 8), PlayerClass::Warrior));
    let events = session.tick(&PlayerInput::default()).to_vec();

    assert!(events.contains(&Event::WaveStarted {
        wave: 1,
        boss_wave: false
    }));
    let spawned = events
        .iter()
        .filter(|event| matches!(event, Event::HostileSpawned { .. }))
        .count();
    assert_eq!(spawned, 3);

    let hud = session.hud();
    assert_eq!(hud.state, GameState::Playing);
    assert_eq!(hud.wave, 1);
    assert_eq!(hud.enemies_alive, 3);
    assert_eq!(hud.hp, 160);
    assert_eq!(hud.max_hp, 160);
}

#[test]
fn ticks_wait_for_start_and_hold_while_paused() {
    let mut session =
        Session::new(SessionConfig::new(block_layout(8, 8), PlayerClass::Rogue)).expect("valid");
    assert_eq!(session.state(), GameState::Intro);
    assert!(session.tick(&PlayerInput::default()).is_empty());

    assert_eq!(
        session.start(),
        [Event::GameStateChanged {
            state: GameState::Playing
        }]
    );
    for _ in 0..10 {
        let _ = session.tick(&PlayerInput::default());
    }
    let before = session.hud();

    assert_eq!(
        session.pause(),
        [Event::GameStateChanged {
            state: GameState::Paused
        }]
    );
    for _ in 0..50 {
        assert!(session.tick(&PlayerInput::moving(Vec2::X)).is_empty());
    }
    let mut paused = session.hud();
    paused.state = GameState::Playing;
    assert_eq!(paused, before, "nothing moves while paused");

    let _ = session.resume();
    let _ = session.tick(&PlayerInput::default());
    assert_eq!(session.hud().elapsed, before.elapsed + session.config().tick());
}

#[test]
fn lifecycle_requests_out_of_order_are_ignored() {
    let mut session =
        Session::new(SessionConfig::new(block_layout(8, 8), PlayerClass::Rogue)).expect("valid");
    assert!(session.pause().is_empty());
    assert!(session.resume().is_empty());
    let _ = session.start();
    assert!(session.start().is_empty());
}

#[test]
fn idle_players_fall_and_the_game_ends() {
    let config = SessionConfig::new(block_layout(3, 3), PlayerClass::Rogue)
        .with_modifier(Modifier::GlassCannon)
        .with_seed(3);
    let mut session = started(config);

    let mut ending = Vec::new();
    for _ in 0..20_000 {
        let events = session.tick(&PlayerInput::default());
        if events
            .iter()
            .any(|event| matches!(event, Event::GameOver { .. }))
        {
            ending = events.to_vec();
            break;
        }
    }

    assert_eq!(session.state(), GameState::GameOver);
    assert!(ending.contains(&Event::GameStateChanged {
        state: GameState::GameOver
    }));
    let Some(Event::GameOver { score, .. }) = ending
        .iter()
        .find(|event| matches!(event, Event::GameOver { .. }))
    else {
        panic!("game over reported");
    };
    assert_eq!(*score, session.hud().score);

    let frozen = session.hud();
    assert!(session.tick(&PlayerInput::default()).is_empty());
    assert_eq!(session.hud(), frozen, "game over is terminal");
    assert!(session.resume().is_empty());

    session.restart().expect("config is still valid");
    assert_eq!(session.state(), GameState::Intro);
    assert_eq!(session.hud().hp, session.hud().max_hp);
    assert_eq!(session.hud().enemies_alive, 0);
}

#[test]
fn clearing_the_final_wave_is_victory() {
    let config = SessionConfig::new(block_layout(6, 6), PlayerClass::DarkKnight)
        .with_modifier(Modifier::DoubleDamage)
        .with_final_wave(1)
        .with_seed(8);
    let mut session = started(config);

    for _ in 0..20_000 {
        let input = brawler(&session);
        let _ = session.tick(&input);
        if session.state().is_terminal() {
            break;
        }
    }

    assert_eq!(session.state(), GameState::Victory);
    assert_eq!(session.hud().wave, 1);
    assert!(session.tick(&PlayerInput::default()).is_empty());
}

#[test]
fn identical_seeds_replay_identically() {
    assert_eq!(fingerprint(21), fingerprint(21));
    assert_ne!(fingerprint(21), fingerprint(22));
}

#[test]
fn malformed_layouts_are_rejected() {
    let short = Session::new(SessionConfig::new("0101", PlayerClass::Warrior));
    assert!(matches!(short, Err(SessionError::InvalidLayout(_))));

    let walls = Session::new(SessionConfig::new("0".repeat(100), PlayerClass::Warrior));
    assert!(matches!(walls, Err(SessionError::DegenerateSpawn)));
}
