//! Running score state tracked by the engine.
//!
//! Kept outside the ECS world: it belongs to the run, not to any
//! entity. The command handler spends points from it; cleanup pays
//! bounties into it.

use serde::{Deserialize, Serialize};

use bastion_core::constants::STARTING_SCORE;

/// Score and kill accounting for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreState {
    /// Spendable score points.
    pub points: u32,
    /// Enemies killed by projectiles.
    pub enemies_killed: u32,
    /// Enemies that reached the tower.
    pub enemies_breached: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            points: STARTING_SCORE,
            enemies_killed: 0,
            enemies_breached: 0,
        }
    }
}
