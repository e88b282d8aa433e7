//! Game state snapshot: the complete visible state sent to the
//! frontend each tick.
//!
//! Views are read-only projections: no formatting, color, or layout
//! concern crosses this boundary.

use serde::{Deserialize, Serialize};

use crate::events::GameEvent;
use crate::map::GameMap;
use crate::types::{Position, SimTime};

/// Run phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation ticking normally.
    #[default]
    Running,
    /// Tower destroyed; systems no longer run.
    GameOver,
}

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub map: GameMap,
    pub towers: Vec<TowerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub wave: WaveView,
    pub score: ScoreView,
    pub events: Vec<GameEvent>,
}

/// Tower status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TowerView {
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub range: i32,
    pub damage: i32,
    pub fire_rate: f64,
    /// Readiness fraction in [0, 1] for the reload bar.
    pub reload_progress: f64,
}

/// Enemy status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Position,
    pub hp: i32,
}

/// Projectile status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
}

/// Wave scheduler status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub current_wave: u32,
    /// Frames accumulated toward the next spawn batch.
    pub spawn_timer: u32,
    pub spawn_interval: u32,
    /// Enemies currently in the world.
    pub enemies_remaining: u32,
    pub all_defeated: bool,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub points: u32,
    pub enemies_killed: u32,
    pub enemies_breached: u32,
}
