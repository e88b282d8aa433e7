//! Events emitted by the simulation for frontend feedback.
//!
//! Drained into each snapshot; the frontend turns them into message
//! lines or sound cues, and tests use them as the observation channel.

use serde::{Deserialize, Serialize};

use crate::commands::UpgradeKind;
use crate::types::Position;

/// One notable thing that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A spawn batch entered the world.
    WaveSpawned { wave: u32, count: u32 },
    /// A tower fired a projectile at an enemy cell.
    ShotFired { target: Position },
    /// An enemy died; its value was added to the score.
    EnemyKilled { position: Position, value: u32 },
    /// An enemy reached the tower and dealt contact damage.
    EnemyReachedTower { position: Position, damage: i32 },
    /// An upgrade was purchased and applied.
    UpgradeApplied { kind: UpgradeKind },
    /// An upgrade was refused (unaffordable or invalid result).
    UpgradeRejected { kind: UpgradeKind },
    /// The tower fell.
    GameOver { wave: u32, score: u32 },
}
