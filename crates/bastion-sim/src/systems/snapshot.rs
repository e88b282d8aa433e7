//! Snapshot system: queries the ECS world and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::World;

use bastion_core::components::{
    Enemy, Health, Projectile, ReloadState, Tower, TowerStats,
};
use bastion_core::events::GameEvent;
use bastion_core::map::GameMap;
use bastion_core::state::*;
use bastion_core::types::{Position, SimTime};

use crate::score::ScoreState;
use crate::systems::wave_spawner::{self, WaveState};

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    map: &GameMap,
    waves: &WaveState,
    score: &ScoreState,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        map: *map,
        towers: build_towers(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        wave: build_wave(world, waves),
        score: ScoreView {
            points: score.points,
            enemies_killed: score.enemies_killed,
            enemies_breached: score.enemies_breached,
        },
        events,
    }
}

/// Build TowerView list from all tower entities.
fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<(u64, TowerView)> = world
        .query::<(&Tower, &Position, &Health, &TowerStats, &ReloadState)>()
        .iter()
        .map(|(entity, (_marker, pos, health, stats, reload))| {
            (
                entity.to_bits().get(),
                TowerView {
                    position: *pos,
                    hp: health.hp,
                    max_hp: health.max_hp,
                    range: stats.range,
                    damage: stats.damage,
                    fire_rate: stats.fire_rate,
                    reload_progress: reload.progress,
                },
            )
        })
        .collect();

    towers.sort_by_key(|(bits, _)| *bits);
    towers.into_iter().map(|(_, view)| view).collect()
}

/// Build EnemyView list from all enemy entities.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<(u64, EnemyView)> = world
        .query::<(&Enemy, &Position, &Health)>()
        .iter()
        .map(|(entity, (_marker, pos, health))| {
            (
                entity.to_bits().get(),
                EnemyView {
                    position: *pos,
                    hp: health.hp,
                },
            )
        })
        .collect();

    enemies.sort_by_key(|(bits, _)| *bits);
    enemies.into_iter().map(|(_, view)| view).collect()
}

/// Build ProjectileView list from all projectiles in flight.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u64, ProjectileView)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(entity, (_marker, pos))| (entity.to_bits().get(), ProjectileView { position: *pos }))
        .collect();

    projectiles.sort_by_key(|(bits, _)| *bits);
    projectiles.into_iter().map(|(_, view)| view).collect()
}

/// Build the wave scheduler view.
fn build_wave(world: &World, waves: &WaveState) -> WaveView {
    WaveView {
        current_wave: waves.current_wave,
        spawn_timer: waves.spawn_timer,
        spawn_interval: waves.spawn_interval,
        enemies_remaining: wave_spawner::enemies_remaining(world),
        all_defeated: wave_spawner::all_enemies_defeated(world),
    }
}
