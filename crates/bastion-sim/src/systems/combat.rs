//! Combat system: projectile ballistics, then tower targeting and
//! firing.
//!
//! The order inside one tick is a contract: existing projectiles
//! advance and resolve before any tower fires, so a shot fired this
//! tick can never also resolve this tick.

use glam::DVec2;
use hecs::{Entity, World};

use bastion_core::components::{
    Enemy, Health, Projectile, ProjectileState, ReloadState, Tower, TowerStats,
};
use bastion_core::events::GameEvent;
use bastion_core::map::GameMap;
use bastion_core::types::Position;

use crate::world_setup;

/// Run the combat system for one tick.
pub fn run(
    world: &mut World,
    map: &GameMap,
    now_secs: f64,
    dt: f64,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    advance_projectiles(world, map, dt, despawn_buffer);
    fire_towers(world, now_secs, events);
}

/// Integrate every projectile by velocity * dt and resolve the travel
/// cell by cell: the first enemy cell crossed takes the damage, and a
/// path leaving the map culls the projectile with no damage. A fast
/// projectile can never cross an enemy cell without resolving there.
fn advance_projectiles(world: &mut World, map: &GameMap, dt: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let mut projectiles: Vec<(Entity, Position, DVec2, i32)> = world
        .query::<(&Projectile, &Position, &ProjectileState)>()
        .iter()
        .map(|(entity, (_marker, pos, state))| (entity, *pos, state.velocity, state.damage))
        .collect();
    projectiles.sort_by_key(|(entity, ..)| entity.to_bits());

    // Enemy cells are stable for the rest of this tick: movement has
    // already run, and firing happens after resolution.
    let mut enemies: Vec<(Entity, Position)> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(entity, (_marker, pos))| (entity, *pos))
        .collect();
    enemies.sort_by_key(|(entity, _)| entity.to_bits());

    for (entity, pos, velocity, damage) in projectiles {
        let start = pos.as_dvec2();
        let travel = velocity * dt;
        // One substep per cell of travel, so no cell along the path
        // is skipped.
        let substeps = travel.length().ceil().max(1.0) as u32;

        let mut removed = false;
        let mut landed = pos;
        'path: for step in 1..=substeps {
            let cell =
                Position::from_dvec2(start + travel * f64::from(step) / f64::from(substeps));

            // Out of bounds: removed, no damage.
            if !map.contains(cell) {
                despawn_buffer.push(entity);
                removed = true;
                break;
            }

            // Exact-cell collision against currently-alive enemies,
            // first match wins; the projectile never damages more
            // than one.
            for &(enemy_entity, enemy_pos) in &enemies {
                if enemy_pos != cell {
                    continue;
                }
                if let Ok(mut health) = world.get::<&mut Health>(enemy_entity) {
                    if health.is_alive() {
                        health.hp -= damage;
                        despawn_buffer.push(entity);
                        removed = true;
                        break 'path;
                    }
                }
            }

            landed = cell;
        }

        if !removed {
            if let Ok(mut stored) = world.get::<&mut Position>(entity) {
                *stored = landed;
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Each tower independently: fire at the closest in-range enemy if
/// reloaded, otherwise advance the reload clock.
fn fire_towers(world: &mut World, now_secs: f64, events: &mut Vec<GameEvent>) {
    let mut towers: Vec<(Entity, Position, TowerStats)> = world
        .query::<(&Tower, &Position, &TowerStats)>()
        .iter()
        .map(|(entity, (_marker, pos, stats))| (entity, *pos, *stats))
        .collect();
    towers.sort_by_key(|(entity, ..)| entity.to_bits());

    for (tower_entity, tower_pos, stats) in towers {
        let ready = world
            .get::<&ReloadState>(tower_entity)
            .map(|reload| reload.can_shoot())
            .unwrap_or(false);

        if ready {
            // An empty or out-of-range enemy set is not an error: the
            // tower simply holds fire and stays ready.
            if let Some((_enemy, target)) = find_closest_enemy(world, tower_pos, stats.range) {
                world_setup::spawn_projectile(world, tower_pos, target, stats.damage);
                if let Ok(mut reload) = world.get::<&mut ReloadState>(tower_entity) {
                    reload.mark_fired(now_secs);
                }
                events.push(GameEvent::ShotFired { target });
            }
        } else if let Ok(mut reload) = world.get::<&mut ReloadState>(tower_entity) {
            reload.advance(now_secs, stats.reload_interval());
        }
    }
}

/// Find the alive enemy minimizing Euclidean distance from `from`
/// among those within `range`. Exact ties break toward the lowest
/// entity id, which is stable within a run. Range 0 only matches an
/// enemy on the same cell.
pub fn find_closest_enemy(world: &World, from: Position, range: i32) -> Option<(Entity, Position)> {
    let mut enemies: Vec<(Entity, Position)> = world
        .query::<(&Enemy, &Position, &Health)>()
        .iter()
        .filter(|(_, (_marker, _pos, health))| health.is_alive())
        .map(|(entity, (_marker, pos, _health))| (entity, *pos))
        .collect();
    enemies.sort_by_key(|(entity, _)| entity.to_bits());

    let mut best: Option<(f64, Entity, Position)> = None;
    for (entity, pos) in enemies {
        let dist = from.distance_to(&pos);
        if dist > range as f64 {
            continue;
        }
        // Strict improvement only, so the first minimum in entity-id
        // order wins ties.
        if best.map_or(true, |(best_dist, ..)| dist < best_dist) {
            best = Some((dist, entity, pos));
        }
    }
    best.map(|(_, entity, pos)| (entity, pos))
}
