//! Enemy movement system.
//!
//! Each enemy advances along the straight line toward its captured
//! target cell. When the remaining distance is within one speed unit
//! it snaps exactly onto the target; otherwise it moves by
//! unit_direction * speed * dt and the result is rounded back onto
//! the grid. The rounding quantizes per-tick displacement to whole
//! cells: a step under half a cell rounds to zero net movement.

use hecs::World;

use bastion_core::components::{Enemy, EnemyAgent};
use bastion_core::types::Position;

/// Advance all enemies toward their targets for one tick.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (_enemy, agent, pos)) in
        world.query_mut::<(&Enemy, &EnemyAgent, &mut Position)>()
    {
        let delta = agent.target.as_dvec2() - pos.as_dvec2();
        let dist = delta.length();
        if dist <= agent.speed {
            // Arrival: snap exactly onto the target cell.
            *pos = agent.target;
        } else {
            let step = delta / dist * agent.speed * dt;
            *pos = Position::from_dvec2(pos.as_dvec2() + step);
        }
    }
}
