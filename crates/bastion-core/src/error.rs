//! Error types for the simulation core.

use thiserror::Error;

use crate::commands::UpgradeKind;

/// A rejected upgrade. Upgrades are validated at the boundary so an
/// invalid configuration (for example a non-positive fire rate) can
/// never reach the reload-interval division later in the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UpgradeError {
    /// Applying the step would leave the tower stats invalid.
    #[error("upgrade {kind:?} would leave tower stats invalid")]
    InvalidStats { kind: UpgradeKind },
    /// The kind does not apply to this stat block (TowerHp targets
    /// `Health`, not `TowerStats`).
    #[error("upgrade {kind:?} does not apply to tower stats")]
    Unapplicable { kind: UpgradeKind },
}
