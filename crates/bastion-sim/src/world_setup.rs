//! Entity spawn factories for setting up the simulation world.

use hecs::World;

use bastion_core::components::{
    Enemy, EnemyAgent, Health, Projectile, ProjectileState, ReloadState, Tower, TowerStats,
};
use bastion_core::constants::*;
use bastion_core::types::Position;

/// Spawn the player's tower with baseline stats, ready to fire.
pub fn spawn_tower(world: &mut World, position: Position) -> hecs::Entity {
    world.spawn((
        Tower,
        position,
        Health::new(TOWER_BASE_HP),
        TowerStats::default(),
        ReloadState::default(),
    ))
}

/// Spawn a single enemy with wave-scaled stats, targeting `target`.
///
/// Difficulty scaling: hp = floor(base * multiplier^(wave-1)),
/// speed = base + per_wave * wave.
pub fn spawn_enemy(
    world: &mut World,
    position: Position,
    target: Position,
    wave: u32,
    difficulty_multiplier: f64,
) -> hecs::Entity {
    let hp = (ENEMY_BASE_HP * difficulty_multiplier.powi(wave as i32 - 1)).floor() as i32;
    let speed = ENEMY_BASE_SPEED + ENEMY_SPEED_PER_WAVE * wave as f64;

    world.spawn((
        Enemy,
        position,
        Health::new(hp),
        EnemyAgent {
            target,
            speed,
            value: ENEMY_VALUE,
        },
    ))
}

/// Spawn a projectile from `origin` aimed at the target cell.
pub fn spawn_projectile(
    world: &mut World,
    origin: Position,
    target: Position,
    damage: i32,
) -> hecs::Entity {
    world.spawn((
        Projectile,
        origin,
        ProjectileState::aimed(origin, target, damage),
    ))
}
