use std::time::Duration;

use daily_dungeon_core::{
    CellCoord, Command, DamageSource, EnemyId, EnemyKind, EquipmentItem, Event, Modifier,
    PlayerClass, SpawnSites, Target, TileGrid, TileKind, GRID_CELLS,
};
use daily_dungeon_world::{apply, query, World, WorldSetup};
use glam::Vec2;

const TICK: Duration = Duration::from_millis(16);

fn bordered_grid(teleports: &[CellCoord]) -> TileGrid {
    let mut cells = vec![TileKind::Wall; GRID_CELLS];
    for row in 1..9 {
        for column in 1..9 {
            let cell = CellCoord::new(column, row);
            let index = cell.index().expect("inside grid");
            cells[index] = if teleports.contains(&cell) {
                TileKind::Teleport
            } else {
                TileKind::Floor
            };
        }
    }
    TileGrid::from_cells(cells).expect("well formed grid")
}

fn world_for(class: PlayerClass, modifier: Modifier) -> World {
    let setup = WorldSetup::new(
        bordered_grid(&[]),
        CellCoord::new(2, 2),
        SpawnSites {
            enemy_tiles: vec![CellCoord::new(6, 6)],
            boss_tile: Some(CellCoord::new(4, 4)),
        },
        class,
    )
    .with_modifier(modifier)
    .with_seed(7);
    World::new(setup)
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, command, &mut events);
    events
}

fn spawn_orc_on_player(world: &mut World) -> EnemyId {
    let events = run(
        world,
        Command::SpawnEnemy {
            kind: EnemyKind::Orc,
            cell: CellCoord::new(2, 2),
            stats: EnemyKind::Orc.scaled_stats(1),
        },
    );
    match events.as_slice() {
        [Event::HostileSpawned { enemy, .. }] => *enemy,
        other => panic!("unexpected spawn events: {other:?}"),
    }
}

#[test]
fn melee_runs_the_damage_pipeline() {
    let mut world = world_for(PlayerClass::Warrior, Modifier::DoubleDamage);
    let orc = spawn_orc_on_player(&mut world);
    let _ = run(&mut world, Command::Tick { dt: TICK });

    let events = run(&mut world, Command::PlayerMelee);
    assert!(events.contains(&Event::DamageDealt {
        target: Target::Hostile(orc),
        amount: 20,
        source: DamageSource::Melee,
        remaining_hp: 25,
    }));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::HitStop { .. })));
    assert!(!query::player(&world).attack_ready);

    let again = run(&mut world, Command::PlayerMelee);
    assert!(again.is_empty(), "attack cooldown gates the next swing");
}

#[test]
fn base_twenty_two_strike_leaves_a_fresh_orc_at_twenty_three() {
    let setup = WorldSetup::new(
        bordered_grid(&[]),
        CellCoord::new(2, 2),
        SpawnSites::default(),
        PlayerClass::DarkKnight,
    )
    .with_equipment([EquipmentItem::SteelBlade])
    .with_seed(7);
    let mut world = World::new(setup);
    assert_eq!(query::equipment(&world), vec![EquipmentItem::SteelBlade]);

    let orc = spawn_orc_on_player(&mut world);
    let _ = run(&mut world, Command::Tick { dt: TICK });
    let events = run(&mut world, Command::PlayerMelee);

    assert!(events.contains(&Event::DamageDealt {
        target: Target::Hostile(orc),
        amount: 22,
        source: DamageSource::Melee,
        remaining_hp: 23,
    }));
    let hp = query::hostiles(&world)
        .iter()
        .find(|hostile| hostile.id == orc)
        .map(|hostile| hostile.hp);
    assert_eq!(hp, Some(23));
}

#[test]
fn starting_armor_raises_the_opening_health() {
    let setup = WorldSetup::new(
        bordered_grid(&[]),
        CellCoord::new(2, 2),
        SpawnSites::default(),
        PlayerClass::Warrior,
    )
    .with_equipment([EquipmentItem::LeatherVest, EquipmentItem::ChainMail]);
    let world = World::new(setup);

    let player = query::player(&world);
    assert_eq!(player.max_hp, 200);
    assert_eq!(player.hp, 200);
    assert_eq!(query::equipment(&world), vec![EquipmentItem::ChainMail]);
}

#[test]
fn deaths_are_awarded_exactly_once() {
    let mut world = world_for(PlayerClass::Rogue, Modifier::DoubleDamage);
    let orc = spawn_orc_on_player(&mut world);
    let _ = run(&mut world, Command::Tick { dt: TICK });

    let strikes = run(&mut world, Command::PlayerMelee);
    let hits = strikes
        .iter()
        .filter(|event| matches!(event, Event::DamageDealt { target: Target::Hostile(id), .. } if *id == orc))
        .count();
    assert_eq!(hits, 2, "rogue swings strike twice");
    assert_eq!(query::hostile(&world, orc).map(|hostile| hostile.hp), Some(0));

    let settled = run(&mut world, Command::SettleTick);
    let deaths: Vec<_> = settled
        .iter()
        .filter_map(|event| match event {
            Event::HostileDied {
                enemy,
                score_awarded,
                combo,
                ..
            } => Some((*enemy, *score_awarded, *combo)),
            _ => None,
        })
        .collect();
    assert_eq!(deaths, vec![(orc, 100, 1)]);
    assert_eq!(query::live_hostile_count(&world), 0);
    assert_eq!(query::combo(&world), 1);

    let resettled = run(&mut world, Command::SettleTick);
    assert!(!resettled
        .iter()
        .any(|event| matches!(event, Event::HostileDied { .. })));
}

#[test]
fn contact_attacks_respect_cooldown_and_grace_period() {
    let mut world = world_for(PlayerClass::Warrior, Modifier::Normal);
    let orc = spawn_orc_on_player(&mut world);
    let _ = run(&mut world, Command::Tick { dt: TICK });

    let first = run(&mut world, Command::HostileContactAttack { enemy: orc });
    assert!(first.contains(&Event::DamageDealt {
        target: Target::Player,
        amount: 10,
        source: DamageSource::Contact(orc),
        remaining_hp: 150,
    }));

    let second = run(&mut world, Command::HostileContactAttack { enemy: orc });
    assert!(second.is_empty(), "contact cooldown still running");
    assert_eq!(query::player(&world).hp, 150);
}

#[test]
fn wave_clears_grow_and_heal_the_player() {
    let mut world = world_for(PlayerClass::Warrior, Modifier::Normal);
    let orc = spawn_orc_on_player(&mut world);
    let _ = run(&mut world, Command::Tick { dt: TICK });
    let _ = run(&mut world, Command::HostileContactAttack { enemy: orc });
    assert_eq!(query::player(&world).hp, 150);

    let cleared = run(
        &mut world,
        Command::AdvanceWave {
            cleared: 2,
            cleared_boss_wave: false,
            next: 3,
            next_boss_wave: true,
        },
    );
    let player = query::player(&world);
    assert_eq!(player.max_hp, 175);
    assert_eq!(player.hp, 175, "heal of 30 capped at the new maximum");
    assert!(cleared.contains(&Event::BossIntroStarted { wave: 3 }));
    assert_eq!(query::wave(&world), 3);

    for _ in 0..10 {
        let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(100) });
        let _ = run(&mut world, Command::HostileContactAttack { enemy: orc });
    }
    let wounded = query::player(&world).hp;
    assert!(wounded < 175);

    let _ = run(
        &mut world,
        Command::AdvanceWave {
            cleared: 3,
            cleared_boss_wave: true,
            next: 4,
            next_boss_wave: false,
        },
    );
    let player = query::player(&world);
    assert_eq!(player.max_hp, 190);
    assert_eq!(player.hp, 190, "boss clears restore fully");
}

#[test]
fn wave_achievements_unlock_once() {
    let mut world = world_for(PlayerClass::Warrior, Modifier::Normal);
    let advance = Command::AdvanceWave {
        cleared: 4,
        cleared_boss_wave: false,
        next: 5,
        next_boss_wave: false,
    };
    let first = run(&mut world, advance.clone());
    assert_eq!(
        first
            .iter()
            .filter(|event| matches!(event, Event::AchievementUnlocked { .. }))
            .count(),
        1
    );
    let repeat = run(&mut world, advance);
    assert!(!repeat
        .iter()
        .any(|event| matches!(event, Event::AchievementUnlocked { .. })));
}

#[test]
fn player_death_is_reported_at_settle() {
    let mut world = world_for(PlayerClass::Rogue, Modifier::GlassCannon);
    let orc = spawn_orc_on_player(&mut world);
    let mut defeated = None;
    for _ in 0..400 {
        let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(100) });
        let _ = run(&mut world, Command::HostileContactAttack { enemy: orc });
        let settled = run(&mut world, Command::SettleTick);
        defeated = settled.into_iter().find_map(|event| match event {
            Event::PlayerDefeated { score, tile } => Some((score, tile)),
            _ => None,
        });
        if defeated.is_some() {
            break;
        }
    }

    let (score, tile) = defeated.expect("player eventually falls");
    assert_eq!(tile, CellCoord::new(2, 2));
    assert_eq!(score, query::score(&world));
    assert!(query::is_player_defeated(&world));

    let after = run(&mut world, Command::SettleTick);
    assert!(after.is_empty(), "defeat is reported once");
}

#[test]
fn stepping_onto_a_teleport_moves_the_player_to_its_partner() {
    let teleports = [CellCoord::new(3, 2), CellCoord::new(7, 7)];
    let setup = WorldSetup::new(
        bordered_grid(&teleports),
        CellCoord::new(2, 2),
        SpawnSites::default(),
        PlayerClass::Warrior,
    );
    let mut world = World::new(setup);
    let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(250) });

    let events = run(&mut world, Command::MovePlayer { heading: Vec2::X });
    assert!(events.contains(&Event::PlayerTeleported {
        from: CellCoord::new(3, 2),
        to: CellCoord::new(7, 7),
    }));
    assert_eq!(query::player(&world).position, CellCoord::new(7, 7).center());
}

#[test]
fn walls_stop_the_player() {
    let mut world = world_for(PlayerClass::Rogue, Modifier::Normal);
    for _ in 0..20 {
        let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(100) });
        let _ = run(&mut world, Command::MovePlayer { heading: Vec2::NEG_Y });
    }
    let position = query::player(&world).position;
    assert_eq!(CellCoord::containing(position), Some(CellCoord::new(2, 1)));
}

#[test]
fn queries_describe_a_fresh_run() {
    let mut world = world_for(PlayerClass::DarkKnight, Modifier::Regeneration);
    assert_eq!(query::tile_grid(&world), &bordered_grid(&[]));
    assert_eq!(query::modifier(&world), Modifier::Regeneration);
    assert!(query::pickups(&world).is_empty());
    assert!(query::equipment(&world).is_empty());
    assert!(query::power_ups(&world).is_empty());

    for _ in 0..5 {
        let _ = run(&mut world, Command::Tick { dt: Duration::from_millis(200) });
    }
    assert_eq!(query::elapsed(&world), Duration::from_secs(1));
    assert_eq!(query::score(&world), 10, "one survival point per 100 ms");
    assert_eq!(query::wave(&world), 1);
}
