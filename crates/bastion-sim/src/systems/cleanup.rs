//! Cleanup system: the single enemy-removal path.
//!
//! Dead enemies pay their bounty into the score; enemies that reached
//! their target deal contact damage to the tower. Both leave the world
//! here and nowhere else, so the active set can never diverge from any
//! separate spawn bookkeeping.

use hecs::{Entity, World};

use bastion_core::components::{Enemy, EnemyAgent, Health, Tower};
use bastion_core::constants::ENEMY_CONTACT_DAMAGE;
use bastion_core::events::GameEvent;
use bastion_core::types::Position;

use crate::score::ScoreState;

/// Reap dead and arrived enemies for one tick.
pub fn run(
    world: &mut World,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut contact_damage = 0;
    for (entity, (_marker, health, agent, pos)) in world
        .query::<(&Enemy, &Health, &EnemyAgent, &Position)>()
        .iter()
    {
        if !health.is_alive() {
            // Killed. An enemy that dies on the tower cell still
            // counts as a kill, not a breach.
            score.points += agent.value;
            score.enemies_killed += 1;
            events.push(GameEvent::EnemyKilled {
                position: *pos,
                value: agent.value,
            });
            despawn_buffer.push(entity);
        } else if agent.has_reached(*pos) {
            contact_damage += ENEMY_CONTACT_DAMAGE;
            score.enemies_breached += 1;
            events.push(GameEvent::EnemyReachedTower {
                position: *pos,
                damage: ENEMY_CONTACT_DAMAGE,
            });
            despawn_buffer.push(entity);
        }
    }

    if contact_damage > 0 {
        for (_entity, (_tower, health)) in world.query_mut::<(&Tower, &mut Health)>() {
            health.hp -= contact_damage;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
