use std::time::Duration;

use daily_dungeon_core::{
    BossKind, CellCoord, Command, EnemyKind, Event, PlayerClass, SpawnSites, TileGrid, TileKind,
    GRID_CELLS,
};
use daily_dungeon_system_wave_scheduler::{
    Config, WavePhase, WaveScheduler, TRANSITION_DELAY,
};
use daily_dungeon_world::{apply, query, World, WorldSetup};

fn sites() -> SpawnSites {
    SpawnSites {
        enemy_tiles: (1..9)
            .flat_map(|row| (1..9).map(move |column| CellCoord::new(column, row)))
            .filter(|cell| *cell != CellCoord::new(1, 1))
            .collect(),
        boss_tile: Some(CellCoord::new(3, 3)),
    }
}

fn tick(dt: Duration) -> Vec<Event> {
    vec![Event::TimeAdvanced { dt }]
}

/// Drives the scheduler with an always-empty arena until it settles on `wave`
/// being active, returning every command it produced.
fn run_until_active(scheduler: &mut WaveScheduler, wave: u32) -> Vec<Command> {
    let sites = sites();
    let mut commands = Vec::new();
    for _ in 0..200 {
        if scheduler.phase() == WavePhase::WaveActive && scheduler.state().wave == wave {
            break;
        }
        scheduler.handle(&tick(TRANSITION_DELAY), 0, &sites, &mut commands);
    }
    commands
}

#[test]
fn first_wave_introduces_each_enemy_kind_once() {
    let mut scheduler = WaveScheduler::new(Config::new(5));
    let mut commands = Vec::new();
    scheduler.handle(&tick(Duration::from_millis(16)), 0, &sites(), &mut commands);

    assert_eq!(
        commands[0],
        Command::StartWave {
            wave: 1,
            boss_wave: false
        }
    );
    let mut kinds: Vec<EnemyKind> = commands
        .iter()
        .filter_map(|command| match command {
            Command::SpawnEnemy { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect();
    kinds.sort();
    assert_eq!(kinds, EnemyKind::ALL.to_vec());
    assert_eq!(scheduler.phase(), WavePhase::WaveActive);
}

#[test]
fn waves_wait_for_the_arena_to_empty() {
    let mut scheduler = WaveScheduler::new(Config::new(5));
    let mut commands = Vec::new();
    scheduler.handle(&tick(Duration::from_millis(16)), 0, &sites(), &mut commands);
    commands.clear();

    scheduler.handle(&tick(Duration::from_secs(30)), 2, &sites(), &mut commands);
    assert!(commands.is_empty());
    assert_eq!(scheduler.state().wave, 1);

    scheduler.handle(&tick(Duration::from_millis(16)), 0, &sites(), &mut commands);
    assert_eq!(
        commands,
        vec![Command::AdvanceWave {
            cleared: 1,
            cleared_boss_wave: false,
            next: 2,
            next_boss_wave: false,
        }]
    );
    assert_eq!(scheduler.phase(), WavePhase::WaveClear);

    commands.clear();
    scheduler.handle(&tick(Duration::from_millis(1_999)), 0, &sites(), &mut commands);
    assert!(commands.is_empty(), "wave clear holds for two seconds");
    scheduler.handle(&tick(Duration::from_millis(1)), 0, &sites(), &mut commands);
    let spawned = commands
        .iter()
        .filter(|command| matches!(command, Command::SpawnEnemy { .. }))
        .count();
    assert_eq!(spawned, 4);
}

#[test]
fn boss_waves_spawn_only_the_boss_at_the_anchor() {
    let mut scheduler = WaveScheduler::new(Config::new(5));
    let commands = run_until_active(&mut scheduler, 3);

    let advance_to_three = commands.iter().any(|command| {
        matches!(
            command,
            Command::AdvanceWave {
                next: 3,
                next_boss_wave: true,
                ..
            }
        )
    });
    assert!(advance_to_three);
    let start = commands
        .iter()
        .position(|command| {
            matches!(
                command,
                Command::StartWave {
                    wave: 3,
                    boss_wave: true
                }
            )
        })
        .expect("wave 3 started");
    let wave_three: Vec<_> = commands[start + 1..].to_vec();
    assert_eq!(wave_three.len(), 1);
    assert!(matches!(
        wave_three[0],
        Command::SpawnBoss {
            kind: BossKind::OrcWarlord,
            cell,
            enraged: false,
            ..
        } if cell == CellCoord::new(3, 3)
    ));
    assert!(scheduler.state().boss_spawned);
}

#[test]
fn clearing_wave_nineteen_advances_instead_of_winning() {
    let mut scheduler = WaveScheduler::new(Config::new(5));
    let _ = run_until_active(&mut scheduler, 19);

    let mut commands = Vec::new();
    scheduler.handle(&tick(Duration::from_millis(16)), 0, &sites(), &mut commands);

    assert_eq!(scheduler.phase(), WavePhase::WaveClear);
    assert_eq!(
        commands,
        vec![Command::AdvanceWave {
            cleared: 19,
            cleared_boss_wave: false,
            next: 20,
            next_boss_wave: false,
        }]
    );
}

#[test]
fn a_shorter_run_wins_on_its_own_final_wave() {
    let mut scheduler = WaveScheduler::new(Config::new(5).with_final_wave(2));
    let _ = run_until_active(&mut scheduler, 2);

    let mut commands = Vec::new();
    scheduler.handle(&tick(Duration::from_millis(16)), 0, &sites(), &mut commands);
    assert_eq!(scheduler.phase(), WavePhase::Victory);
    assert!(commands.is_empty());
}

#[test]
fn clearing_the_final_wave_is_victory() {
    let mut scheduler = WaveScheduler::new(Config::new(5));
    let _ = run_until_active(&mut scheduler, 19);

    let mut commands = Vec::new();
    scheduler.handle(&tick(Duration::from_millis(16)), 0, &sites(), &mut commands);
    assert_ne!(scheduler.phase(), WavePhase::Victory, "wave 19 is not final");
    assert_eq!(scheduler.state().wave, 20);

    let _ = run_until_active(&mut scheduler, 20);
    commands.clear();
    scheduler.handle(&tick(Duration::from_millis(16)), 0, &sites(), &mut commands);
    assert_eq!(scheduler.phase(), WavePhase::Victory);
    assert!(commands.is_empty());

    scheduler.handle(&tick(TRANSITION_DELAY), 0, &sites(), &mut commands);
    assert!(commands.is_empty(), "victory is terminal");
}

#[test]
fn halted_schedulers_stop_spawning() {
    let mut scheduler = WaveScheduler::new(Config::new(5));
    scheduler.halt();
    let mut commands = Vec::new();
    scheduler.handle(&tick(TRANSITION_DELAY), 0, &sites(), &mut commands);
    assert!(commands.is_empty());
    assert_eq!(scheduler.phase(), WavePhase::GameOver);
}

#[test]
fn composition_replays_for_the_same_seed() {
    let first = run_until_active(&mut WaveScheduler::new(Config::new(42)), 8);
    let second = run_until_active(&mut WaveScheduler::new(Config::new(42)), 8);
    let other = run_until_active(&mut WaveScheduler::new(Config::new(43)), 8);
    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn scheduled_spawns_populate_the_world() {
    let mut cells = vec![TileKind::Wall; GRID_CELLS];
    for row in 1..9 {
        for column in 1..9 {
            let index = CellCoord::new(column, row).index().expect("inside grid");
            cells[index] = TileKind::Floor;
        }
    }
    let grid = TileGrid::from_cells(cells).expect("well formed grid");
    let mut world = World::new(WorldSetup::new(
        grid,
        CellCoord::new(1, 1),
        sites(),
        PlayerClass::Warrior,
    ));
    let mut scheduler = WaveScheduler::new(Config::new(1));

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(16),
        },
        &mut events,
    );
    let mut commands = Vec::new();
    scheduler.handle(
        &events,
        query::live_hostile_count(&world),
        query::spawn_sites(&world),
        &mut commands,
    );
    events.clear();
    for command in commands {
        apply(&mut world, command, &mut events);
    }

    assert_eq!(query::live_hostile_count(&world), 3);
    assert!(events.contains(&Event::WaveStarted {
        wave: 1,
        boss_wave: false
    }));
    let player_tile = CellCoord::new(1, 1);
    assert!(query::hostiles(&world)
        .iter()
        .all(|hostile| CellCoord::containing(hostile.position) != Some(player_tile)));
}
