//! Wave spawning system: emits escalating enemy batches on a
//! frame-counted timer.
//!
//! Two states: waiting (timer below the interval) and spawning (timer
//! reached the interval, a batch is emitted, timer resets). The timer
//! counts update calls, not elapsed seconds, so spawn cadence is
//! independent of delta-time.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use bastion_core::components::Enemy;
use bastion_core::constants::*;
use bastion_core::events::GameEvent;
use bastion_core::map::GameMap;
use bastion_core::types::Position;

use crate::world_setup;

/// Spawn scheduler state for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveState {
    /// Current escalation level, starting at 1.
    pub current_wave: u32,
    /// Frames accumulated toward the next batch.
    pub spawn_timer: u32,
    /// Frames between batches.
    pub spawn_interval: u32,
    /// Baseline batch size before wave scaling.
    pub enemies_per_wave: u32,
    /// Per-wave hit point multiplier.
    pub difficulty_multiplier: f64,
    /// Whether the current wave has emitted at least one batch.
    pub batch_spawned: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            current_wave: 1,
            spawn_timer: 0,
            spawn_interval: SPAWN_INTERVAL_TICKS,
            enemies_per_wave: ENEMIES_PER_WAVE,
            difficulty_multiplier: DIFFICULTY_MULTIPLIER,
            batch_spawned: false,
        }
    }
}

impl WaveState {
    /// Batch size for the current wave:
    /// floor(enemies_per_wave * wave * 0.6) + 1. Always >= 1 and
    /// non-decreasing in the wave number.
    pub fn batch_size(&self) -> u32 {
        (self.enemies_per_wave as f64 * self.current_wave as f64 * WAVE_SIZE_FACTOR) as u32 + 1
    }

    /// Advance to the next wave and force-set the timer to the
    /// interval so the very next update spawns immediately.
    pub fn next_wave(&mut self) {
        self.current_wave += 1;
        self.spawn_timer = self.spawn_interval;
        self.batch_spawned = false;
    }
}

/// Run the spawn scheduler for one tick. Returns the number of
/// enemies spawned (zero while waiting).
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut WaveState,
    map: &GameMap,
    events: &mut Vec<GameEvent>,
) -> u32 {
    state.spawn_timer += 1;
    if state.spawn_timer < state.spawn_interval {
        return 0;
    }
    state.spawn_timer = 0;

    // Enemies walk toward the tower's position as of spawn time.
    let target = match tower_position(world) {
        Some(pos) => pos,
        None => return 0,
    };

    let count = state.batch_size();
    for _ in 0..count {
        let position = edge_spawn_position(rng, map);
        world_setup::spawn_enemy(
            world,
            position,
            target,
            state.current_wave,
            state.difficulty_multiplier,
        );
    }

    state.batch_spawned = true;
    events.push(GameEvent::WaveSpawned {
        wave: state.current_wave,
        count,
    });
    count
}

/// True iff no enemy entities remain in the world.
///
/// The world is the single authoritative collection: every removal
/// goes through the cleanup system, so there is no separate spawned
/// set that could drift out of sync.
pub fn all_enemies_defeated(world: &World) -> bool {
    world.query::<&Enemy>().iter().next().is_none()
}

/// Count of enemies currently in the world.
pub fn enemies_remaining(world: &World) -> u32 {
    world.query::<&Enemy>().iter().count() as u32
}

/// Pick a uniform random cell on one of the four map edges.
fn edge_spawn_position(rng: &mut ChaCha8Rng, map: &GameMap) -> Position {
    match rng.gen_range(0..4) {
        0 => Position::new(rng.gen_range(0..map.width), 0),
        1 => Position::new(rng.gen_range(0..map.width), map.height - 1),
        2 => Position::new(0, rng.gen_range(0..map.height)),
        _ => Position::new(map.width - 1, rng.gen_range(0..map.height)),
    }
}

/// Position of the tower, if one exists.
fn tower_position(world: &World) -> Option<Position> {
    world
        .query::<(&bastion_core::components::Tower, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)
}
