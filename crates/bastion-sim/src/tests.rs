//! Tests for the simulation engine, wave spawning, targeting, combat
//! resolution, and the command boundary.

use hecs::World;

use bastion_core::commands::{PlayerCommand, UpgradeKind};
use bastion_core::components::{Enemy, EnemyAgent, Health, Projectile};
use bastion_core::events::GameEvent;
use bastion_core::map::GameMap;
use bastion_core::state::GamePhase;
use bastion_core::types::Position;

use crate::engine::{SimConfig, SimulationEngine};
use crate::systems::wave_spawner::WaveState;
use crate::systems::{combat, movement};
use crate::world_setup;

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::ForceNextWave);
    engine_b.queue_command(PlayerCommand::ForceNextWave);

    for _ in 0..200 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    // Spawn positions are the first RNG consumers, so the runs can
    // only diverge once a batch has spawned (tick 60 onward).
    let mut diverged = false;
    for _ in 0..120 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Tick timing and wave cadence ----

#[test]
fn test_first_wave_spawns_on_interval() {
    let mut engine = SimulationEngine::default();

    for _ in 0..59 {
        let snap = engine.tick();
        assert!(
            !snap
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::WaveSpawned { .. })),
            "No batch may spawn before the interval elapses"
        );
        assert!(snap.enemies.is_empty());
    }

    let snap = engine.tick();
    assert_eq!(snap.time.tick, 60);
    assert!((snap.time.elapsed_secs - 60.0).abs() < 1e-9);
    assert!(snap
        .events
        .contains(&GameEvent::WaveSpawned { wave: 1, count: 2 }));
    assert_eq!(snap.enemies.len(), 2);
    assert_eq!(snap.wave.spawn_timer, 0, "Timer resets after spawning");
}

#[test]
fn test_batch_size_scales_with_wave() {
    let mut waves = WaveState::default();
    assert_eq!(waves.batch_size(), 2);

    waves.current_wave = 2;
    assert_eq!(waves.batch_size(), 4);

    waves.current_wave = 5;
    assert_eq!(waves.batch_size(), 10);

    waves.current_wave = 10;
    assert_eq!(waves.batch_size(), 19);
}

#[test]
fn test_force_next_wave_spawns_immediately() {
    let mut engine = SimulationEngine::default();
    engine.queue_command(PlayerCommand::ForceNextWave);

    let snap = engine.tick();
    assert_eq!(snap.wave.current_wave, 2);
    assert!(snap
        .events
        .contains(&GameEvent::WaveSpawned { wave: 2, count: 4 }));
    assert_eq!(snap.enemies.len(), 4);
}

#[test]
fn test_waves_escalate_as_they_are_cleared() {
    let mut engine = SimulationEngine::default();

    // No commands: wave 1 spawns on the timer, its enemies are shot
    // or breach, and clearing them must hand over to wave 2.
    let mut max_wave = 0;
    for _ in 0..600 {
        let snap = engine.tick();
        max_wave = max_wave.max(snap.wave.current_wave);
        if snap.phase == GamePhase::GameOver {
            break;
        }
    }
    assert!(max_wave > 1, "wave never escalated: stuck at {max_wave}");
}

#[test]
fn test_difficulty_scaling_per_wave() {
    let mut world = World::new();
    let target = Position::new(50, 50);

    let early = world_setup::spawn_enemy(&mut world, Position::new(0, 0), target, 1, 1.1);
    let late = world_setup::spawn_enemy(&mut world, Position::new(0, 0), target, 10, 1.1);

    let early_hp = world.get::<&Health>(early).unwrap().hp;
    let early_speed = world.get::<&EnemyAgent>(early).unwrap().speed;
    assert_eq!(early_hp, 10);
    assert!((early_speed - 1.1).abs() < 1e-12);

    let late_hp = world.get::<&Health>(late).unwrap().hp;
    let late_speed = world.get::<&EnemyAgent>(late).unwrap().speed;
    assert_eq!(late_hp, 23, "floor(10 * 1.1^9)");
    assert!((late_speed - 2.0).abs() < 1e-12);
}

// ---- Targeting ----

#[test]
fn test_targeting_picks_closest() {
    let mut world = World::new();
    let near = world.spawn((Enemy, Position::new(3, 0), Health::new(10)));
    world.spawn((Enemy, Position::new(5, 0), Health::new(10)));

    let found = combat::find_closest_enemy(&world, Position::new(0, 0), 10);
    assert_eq!(found, Some((near, Position::new(3, 0))));
}

#[test]
fn test_targeting_tie_breaks_by_entity_order() {
    let mut world = World::new();
    let first = world.spawn((Enemy, Position::new(4, 0), Health::new(10)));
    world.spawn((Enemy, Position::new(0, 4), Health::new(10)));

    let found = combat::find_closest_enemy(&world, Position::new(0, 0), 10);
    assert_eq!(found, Some((first, Position::new(4, 0))));
}

#[test]
fn test_targeting_out_of_range_is_none() {
    let mut world = World::new();
    world.spawn((Enemy, Position::new(10, 0), Health::new(10)));

    assert_eq!(combat::find_closest_enemy(&world, Position::new(0, 0), 5), None);
}

#[test]
fn test_targeting_ignores_dead_enemies() {
    let mut world = World::new();
    world.spawn((Enemy, Position::new(1, 0), Health { hp: 0, max_hp: 10 }));
    let alive = world.spawn((Enemy, Position::new(3, 0), Health::new(10)));

    let found = combat::find_closest_enemy(&world, Position::new(0, 0), 10);
    assert_eq!(found, Some((alive, Position::new(3, 0))));
}

// ---- Firing cadence ----

#[test]
fn test_fire_rate_one_fires_every_other_tick() {
    let mut engine = SimulationEngine::default();
    // Stationary target inside range that the shots overshoot, so the
    // tower keeps a live target across ticks.
    engine.spawn_enemy_at(Position::new(52, 50), 100, 0.0);

    let mut fired_ticks = Vec::new();
    for tick in 1..=6u64 {
        let snap = engine.tick();
        if snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::ShotFired { .. }))
        {
            fired_ticks.push(tick);
        }
    }

    // One-second ticks against a one-second reload: the check for
    // readiness precedes the reload advance, so the cadence settles at
    // every other tick.
    assert_eq!(fired_ticks, vec![1, 3, 5]);
}

// ---- Movement ----

#[test]
fn test_movement_sub_half_cell_step_stalls() {
    let mut world = World::new();
    world.spawn((
        Enemy,
        Position::new(10, 5),
        EnemyAgent {
            target: Position::new(5, 5),
            speed: 0.4,
            value: 5,
        },
    ));

    for _ in 0..10 {
        movement::run(&mut world, 1.0);
    }

    let pos = *world.query::<&Position>().iter().next().unwrap().1;
    assert_eq!(pos, Position::new(10, 5), "0.4-cell steps round to zero");
}

#[test]
fn test_movement_advances_and_snaps_on_arrival() {
    let mut world = World::new();
    world.spawn((
        Enemy,
        Position::new(10, 5),
        EnemyAgent {
            target: Position::new(5, 5),
            speed: 0.6,
            value: 5,
        },
    ));

    movement::run(&mut world, 1.0);
    let pos = *world.query::<&Position>().iter().next().unwrap().1;
    assert_eq!(pos, Position::new(9, 5));

    // Within one speed unit of the target the enemy snaps exactly.
    let mut world = World::new();
    world.spawn((
        Enemy,
        Position::new(6, 5),
        EnemyAgent {
            target: Position::new(5, 5),
            speed: 1.5,
            value: 5,
        },
    ));
    movement::run(&mut world, 1.0);
    let pos = *world.query::<&Position>().iter().next().unwrap().1;
    assert_eq!(pos, Position::new(5, 5));
}

// ---- Projectile resolution ----

#[test]
fn test_projectile_out_of_bounds_culled_without_damage() {
    let mut world = World::new();
    let map = GameMap::default();
    // Enemy sits off the flight line; the path runs along y=50 and
    // exits the map at x=100.
    let enemy = world.spawn((Enemy, Position::new(99, 52), Health::new(10)));
    world_setup::spawn_projectile(&mut world, Position::new(97, 50), Position::new(99, 50), 3);

    let mut events = Vec::new();
    let mut despawn = Vec::new();
    combat::run(&mut world, &map, 0.0, 1.0, &mut events, &mut despawn);

    assert_eq!(world.query::<&Projectile>().iter().count(), 0);
    assert_eq!(world.get::<&Health>(enemy).unwrap().hp, 10);
}

#[test]
fn test_projectile_hits_one_enemy_on_shared_cell() {
    let mut world = World::new();
    let map = GameMap::default();
    let first = world.spawn((Enemy, Position::new(5, 5), Health::new(10)));
    let second = world.spawn((Enemy, Position::new(5, 5), Health::new(10)));
    world_setup::spawn_projectile(&mut world, Position::new(4, 5), Position::new(5, 5), 1);

    let mut events = Vec::new();
    let mut despawn = Vec::new();
    // dt 0.2 turns the 5 cells/s velocity into exactly one cell.
    combat::run(&mut world, &map, 0.0, 0.2, &mut events, &mut despawn);

    assert_eq!(world.get::<&Health>(first).unwrap().hp, 9);
    assert_eq!(world.get::<&Health>(second).unwrap().hp, 10);
    assert_eq!(world.query::<&Projectile>().iter().count(), 0);
}

#[test]
fn test_projectile_resolves_mid_path_at_large_dt() {
    let mut world = World::new();
    let map = GameMap::default();
    let enemy = world.spawn((Enemy, Position::new(52, 50), Health::new(10)));
    world_setup::spawn_projectile(&mut world, Position::new(50, 50), Position::new(53, 50), 1);

    let mut events = Vec::new();
    let mut despawn = Vec::new();
    // One tick of 5 cells of travel; the enemy sits two cells along
    // the path, well short of the endpoint.
    combat::run(&mut world, &map, 0.0, 1.0, &mut events, &mut despawn);

    assert_eq!(world.get::<&Health>(enemy).unwrap().hp, 9);
    assert_eq!(world.query::<&Projectile>().iter().count(), 0);
}

// ---- End to end ----

#[test]
fn test_kill_pays_bounty_and_clears_world() {
    let mut engine = SimulationEngine::default();
    // One frail enemy three cells east, too slow to ever leave its
    // cell under grid rounding.
    engine.spawn_enemy_at(Position::new(53, 50), 1, 0.3);

    let snap = engine.tick();
    assert!(snap.events.contains(&GameEvent::ShotFired {
        target: Position::new(53, 50)
    }));

    // The shot resolves on the next default tick: the projectile's
    // per-cell path crosses the enemy at (53, 50).
    let snap = engine.tick();
    assert!(snap.events.contains(&GameEvent::EnemyKilled {
        position: Position::new(53, 50),
        value: 5
    }));
    assert_eq!(snap.score.points, 55);
    assert_eq!(snap.score.enemies_killed, 1);
    assert!(snap.enemies.is_empty());
    assert!(snap.wave.all_defeated);
}

#[test]
fn test_breach_damages_tower_and_removes_enemy() {
    let mut engine = SimulationEngine::default();
    engine.spawn_enemy_at(Position::new(50, 52), 5, 2.5);

    let snap = engine.tick();
    assert!(snap.events.contains(&GameEvent::EnemyReachedTower {
        position: Position::new(50, 50),
        damage: 1
    }));
    assert_eq!(snap.towers[0].hp, 9);
    assert_eq!(snap.score.enemies_breached, 1);
    assert!(snap.enemies.is_empty());
}

#[test]
fn test_tower_destruction_ends_the_run() {
    let mut engine = SimulationEngine::default();
    for _ in 0..10 {
        engine.spawn_enemy_at(Position::new(50, 50), 100, 1.0);
    }

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.towers[0].hp, 0);
    assert!(snap
        .events
        .contains(&GameEvent::GameOver { wave: 1, score: 50 }));

    // The world is frozen after game over.
    let frozen = engine.tick();
    assert_eq!(frozen.time.tick, 1);
    assert!(frozen.events.is_empty());
}

// ---- Commands ----

#[test]
fn test_upgrades_deduct_score_and_reject_when_broke() {
    let mut engine = SimulationEngine::default();
    engine.queue_commands([
        PlayerCommand::Upgrade {
            kind: UpgradeKind::Damage,
        },
        PlayerCommand::Upgrade {
            kind: UpgradeKind::FireRate,
        },
        PlayerCommand::Upgrade {
            kind: UpgradeKind::FireRate,
        },
    ]);

    let snap = engine.tick();
    assert_eq!(
        snap.events,
        vec![
            GameEvent::UpgradeApplied {
                kind: UpgradeKind::Damage
            },
            GameEvent::UpgradeApplied {
                kind: UpgradeKind::FireRate
            },
            GameEvent::UpgradeRejected {
                kind: UpgradeKind::FireRate
            },
        ]
    );
    assert_eq!(snap.score.points, 15);
    assert_eq!(snap.towers[0].damage, 2);
    assert!((snap.towers[0].fire_rate - 1.2).abs() < 1e-12);
}

#[test]
fn test_tower_hp_upgrade_raises_max_and_heals() {
    let mut engine = SimulationEngine::default();
    engine.queue_command(PlayerCommand::Upgrade {
        kind: UpgradeKind::TowerHp,
    });

    let snap = engine.tick();
    assert_eq!(snap.towers[0].hp, 15);
    assert_eq!(snap.towers[0].max_hp, 15);
    assert_eq!(snap.score.points, 30);
}

#[test]
fn test_move_tower_clamps_and_keeps_enemy_targets() {
    let mut engine = SimulationEngine::default();
    let enemy = engine.spawn_enemy_at(Position::new(20, 50), 10, 0.0);
    engine.queue_command(PlayerCommand::MoveTower { dx: -100, dy: 0 });

    let snap = engine.tick();
    assert_eq!(snap.towers[0].position, Position::new(0, 50));

    // The target was captured at spawn and does not follow the tower.
    let target = engine.world().get::<&EnemyAgent>(enemy).unwrap().target;
    assert_eq!(target, Position::new(50, 50));
}
