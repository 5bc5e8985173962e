use std::time::Duration;

use daily_dungeon_core::{
    BossAbility, BossKind, BossPhase, CellCoord, CombatStats, Command, EnemyId, Event, Modifier,
    PlayerClass, SpawnSites, TileGrid, TileKind, GRID_CELLS,
};
use daily_dungeon_world::{apply, query, World, WorldSetup};

fn open_world(class: PlayerClass, modifier: Modifier) -> World {
    let mut cells = vec![TileKind::Wall; GRID_CELLS];
    for row in 1..9 {
        for column in 1..9 {
            let index = CellCoord::new(column, row).index().expect("inside grid");
            cells[index] = TileKind::Floor;
        }
    }
    let grid = TileGrid::from_cells(cells).expect("well formed grid");
    let sites = SpawnSites {
        enemy_tiles: vec![CellCoord::new(7, 7), CellCoord::new(7, 1)],
        boss_tile: Some(CellCoord::new(4, 4)),
    };
    World::new(
        WorldSetup::new(grid, CellCoord::new(4, 4), sites, class)
            .with_modifier(modifier)
            .with_seed(11),
    )
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, command, &mut events);
    events
}

fn spawn_boss(world: &mut World, kind: BossKind, stats: CombatStats) -> EnemyId {
    let events = run(
        world,
        Command::SpawnBoss {
            kind,
            cell: CellCoord::new(4, 4),
            enraged: false,
            stats,
        },
    );
    events
        .iter()
        .find_map(|event| match event {
            Event::HostileSpawned { enemy, .. } => Some(*enemy),
            _ => None,
        })
        .expect("boss spawned")
}

fn fragile(kind: BossKind) -> CombatStats {
    CombatStats {
        max_hp: 200,
        ..kind.scaled_stats(3, false)
    }
}

#[test]
fn phase_two_requires_half_health_and_happens_once() {
    let mut world = open_world(PlayerClass::Rogue, Modifier::GlassCannon);
    let boss = spawn_boss(&mut world, BossKind::OrcWarlord, fragile(BossKind::OrcWarlord));
    let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(16) });

    let early = run(
        &mut world,
        Command::EnterBossPhase {
            boss,
            phase: BossPhase::Two,
        },
    );
    assert!(early.is_empty(), "full health bosses stay in phase one");

    let _ = run(&mut world, Command::PlayerMelee);
    let hp = query::hostile(&world, boss).expect("boss alive").hp;
    assert_eq!(hp, 80, "two glass cannon strikes of 60");

    let entered = run(
        &mut world,
        Command::EnterBossPhase {
            boss,
            phase: BossPhase::Two,
        },
    );
    assert!(entered.contains(&Event::BossPhaseChanged {
        boss,
        phase: BossPhase::Two,
    }));
    let snapshot = query::hostile(&world, boss).expect("boss alive");
    assert!(snapshot.armored, "phase change grants armor");
    assert_eq!(snapshot.boss.map(|state| state.phase), Some(BossPhase::Two));

    let repeat = run(
        &mut world,
        Command::EnterBossPhase {
            boss,
            phase: BossPhase::Two,
        },
    );
    assert!(repeat.is_empty());
}

#[test]
fn abilities_wait_for_the_timer_and_the_phase_pool() {
    let mut world = open_world(PlayerClass::Warrior, Modifier::Normal);
    let boss = spawn_boss(
        &mut world,
        BossKind::SkeletonLich,
        BossKind::SkeletonLich.scaled_stats(6, false),
    );

    let too_soon = run(
        &mut world,
        Command::UseBossAbility {
            boss,
            ability: BossAbility::BoneBarrage,
        },
    );
    assert!(too_soon.is_empty(), "ability timer starts running");

    let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(4_000) });
    let wrong_pool = run(
        &mut world,
        Command::UseBossAbility {
            boss,
            ability: BossAbility::BoneStorm,
        },
    );
    assert!(wrong_pool.is_empty(), "bone storm is a phase two ability");

    let cast = run(
        &mut world,
        Command::UseBossAbility {
            boss,
            ability: BossAbility::BoneBarrage,
        },
    );
    assert!(cast.contains(&Event::BossAbilityUsed {
        boss,
        ability: BossAbility::BoneBarrage,
    }));
    assert_eq!(query::projectile_count(&world), 3);
    let ready = query::hostile(&world, boss)
        .and_then(|snapshot| snapshot.boss)
        .map(|state| state.ability_ready);
    assert_eq!(ready, Some(false), "casting restarts the timer");
}

#[test]
fn raise_dead_summons_minions_of_the_current_wave() {
    let mut world = open_world(PlayerClass::Warrior, Modifier::Normal);
    let boss = spawn_boss(
        &mut world,
        BossKind::SkeletonLich,
        BossKind::SkeletonLich.scaled_stats(6, false),
    );
    let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(4_000) });

    let events = run(
        &mut world,
        Command::UseBossAbility {
            boss,
            ability: BossAbility::RaiseDead,
        },
    );
    let summoned = events
        .iter()
        .filter(|event| matches!(event, Event::HostileSpawned { .. }))
        .count();
    assert_eq!(summoned, 2);
    assert_eq!(query::live_hostile_count(&world), 3);
}

#[test]
fn wound_up_strikes_land_after_the_delay() {
    let mut world = open_world(PlayerClass::Warrior, Modifier::Normal);
    let boss = spawn_boss(
        &mut world,
        BossKind::OrcWarlord,
        BossKind::OrcWarlord.scaled_stats(3, false),
    );
    let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(4_000) });
    let _ = run(
        &mut world,
        Command::UseBossAbility {
            boss,
            ability: BossAbility::GroundSlam,
        },
    );
    let hp_before = query::player(&world).hp;

    let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(300) });
    assert_eq!(query::player(&world).hp, hp_before, "still winding up");

    let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(300) });
    assert_eq!(query::player(&world).hp, hp_before - 30);
}

#[test]
fn blood_pact_empowers_contact_attacks() {
    let mut world = open_world(PlayerClass::Warrior, Modifier::Normal);
    let stats = BossKind::VampireLord.scaled_stats(9, false);
    let boss = spawn_boss(&mut world, BossKind::VampireLord, stats);
    let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(4_000) });

    let cast = run(
        &mut world,
        Command::UseBossAbility {
            boss,
            ability: BossAbility::BloodPact,
        },
    );
    assert!(!cast.is_empty());

    let hp_before = query::player(&world).hp;
    let _ = run(&mut world, Command::HostileContactAttack { enemy: boss });
    let expected = (stats.damage as f32 * 1.5).floor() as u32;
    assert_eq!(query::player(&world).hp, hp_before - expected);
}
