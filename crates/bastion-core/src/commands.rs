//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. The
//! engine's command handler is the cost gate: it checks affordability,
//! deducts score, and applies the mutation. The component-level
//! upgrade operations themselves know nothing about cost.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Buy one upgrade step for the tower.
    Upgrade { kind: UpgradeKind },
    /// Advance the wave counter and force the next update to spawn
    /// immediately, bypassing the normal timer wait.
    ForceNextWave,
    /// Relocate the tower by a cell offset, clamped to map bounds.
    MoveTower { dx: i32, dy: i32 },
}

/// The purchasable upgrade steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Damage per shot +1.
    Damage,
    /// Targeting radius +1.
    Range,
    /// Shots per second +0.2.
    FireRate,
    /// Tower max hit points +5 (heals the same amount).
    TowerHp,
}

impl UpgradeKind {
    /// Score cost of one step, deducted by the command handler.
    pub fn cost(&self) -> u32 {
        match self {
            UpgradeKind::Damage => UPGRADE_DAMAGE_COST,
            UpgradeKind::Range => UPGRADE_RANGE_COST,
            UpgradeKind::FireRate => UPGRADE_FIRE_RATE_COST,
            UpgradeKind::TowerHp => UPGRADE_TOWER_HP_COST,
        }
    }
}
