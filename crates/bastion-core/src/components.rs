//! ECS components for hecs entities.
//!
//! Each entity kind is a marker component plus payload components.
//! Shared capabilities (position, hit points) are shared components;
//! kind-specific state lives in the per-kind payload.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::commands::UpgradeKind;
use crate::constants::*;
use crate::error::UpgradeError;
use crate::types::Position;

/// Marks an entity as the player's tower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tower;

/// Marks an entity as an enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Marks an entity as a projectile in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// Hit points shared by towers and enemies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
}

impl Health {
    pub fn new(hp: i32) -> Self {
        Self { hp, max_hp: hp }
    }

    /// Alive iff hit points are positive. Entities are never resurrected.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Tower combat statistics, mutated only by the upgrade boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TowerStats {
    /// Targeting radius in cells.
    pub range: i32,
    /// Damage per shot, copied onto projectiles at fire time.
    pub damage: i32,
    /// Shots per second. Invariant: strictly positive.
    pub fire_rate: f64,
}

impl Default for TowerStats {
    fn default() -> Self {
        Self {
            range: TOWER_BASE_RANGE,
            damage: TOWER_BASE_DAMAGE,
            fire_rate: TOWER_BASE_FIRE_RATE,
        }
    }
}

impl TowerStats {
    /// Seconds between shots.
    pub fn reload_interval(&self) -> f64 {
        1.0 / self.fire_rate
    }

    /// Apply one upgrade step, rejecting any result that would leave
    /// the stats invalid (non-positive damage, range, or fire rate).
    /// `TowerHp` is applied to `Health`, not here.
    pub fn apply_upgrade(&mut self, kind: UpgradeKind) -> Result<(), UpgradeError> {
        match kind {
            UpgradeKind::Damage => {
                let next = self.damage + UPGRADE_DAMAGE_STEP;
                if next <= 0 {
                    return Err(UpgradeError::InvalidStats { kind });
                }
                self.damage = next;
            }
            UpgradeKind::Range => {
                let next = self.range + UPGRADE_RANGE_STEP;
                if next <= 0 {
                    return Err(UpgradeError::InvalidStats { kind });
                }
                self.range = next;
            }
            UpgradeKind::FireRate => {
                let next = self.fire_rate + UPGRADE_FIRE_RATE_STEP;
                if next <= 0.0 {
                    return Err(UpgradeError::InvalidStats { kind });
                }
                self.fire_rate = next;
            }
            UpgradeKind::TowerHp => return Err(UpgradeError::Unapplicable { kind }),
        }
        Ok(())
    }
}

/// Tower reload clock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReloadState {
    /// Readiness fraction, always clamped to [0, 1].
    pub progress: f64,
    /// Simulation time of the last shot (seconds).
    pub last_shot_secs: f64,
}

impl Default for ReloadState {
    fn default() -> Self {
        // A fresh tower starts ready to fire.
        Self {
            progress: 1.0,
            last_shot_secs: 0.0,
        }
    }
}

impl ReloadState {
    /// A tower may fire only when fully reloaded.
    pub fn can_shoot(&self) -> bool {
        self.progress >= 1.0
    }

    /// Stamp a shot: record the time and reset progress to exactly 0.
    pub fn mark_fired(&mut self, now_secs: f64) {
        self.last_shot_secs = now_secs;
        self.progress = 0.0;
    }

    /// Advance the reload clock from elapsed time since the last shot.
    pub fn advance(&mut self, now_secs: f64, reload_interval: f64) {
        self.progress = ((now_secs - self.last_shot_secs) / reload_interval).clamp(0.0, 1.0);
    }
}

/// Enemy behavior state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyAgent {
    /// The tower cell this enemy walks toward, captured at spawn.
    /// Never re-aimed, even if the tower relocates afterward.
    pub target: Position,
    /// Movement speed in cells per second.
    pub speed: f64,
    /// Score awarded on death.
    pub value: u32,
}

impl EnemyAgent {
    /// Exact integer equality with the captured target cell.
    pub fn has_reached(&self, pos: Position) -> bool {
        pos == self.target
    }
}

/// Projectile flight state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectileState {
    /// Aim cell captured at fire time; the projectile does not home.
    pub target: Position,
    /// Damage applied on first collision.
    pub damage: i32,
    /// Velocity in cells per second, fixed at creation.
    pub velocity: DVec2,
}

impl ProjectileState {
    /// Build flight state aimed from `origin` at `target`: normalized
    /// direction scaled by the projectile speed. A zero-length aim
    /// yields a zero velocity.
    pub fn aimed(origin: Position, target: Position, damage: i32) -> Self {
        let delta = target.as_dvec2() - origin.as_dvec2();
        let dist = delta.length();
        let velocity = if dist > 0.0 {
            delta / dist * PROJECTILE_SPEED
        } else {
            DVec2::ZERO
        };
        Self {
            target,
            damage,
            velocity,
        }
    }
}
