//! Core simulation engine.
//!
//! Owns the hecs world and all run-scoped state, processes queued
//! player commands at the tick boundary, runs the systems in a fixed
//! order, and emits one GameStateSnapshot per tick.

use std::mem;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bastion_core::commands::{PlayerCommand, UpgradeKind};
use bastion_core::components::{Health, Tower, TowerStats};
use bastion_core::constants::{DEFAULT_DT, UPGRADE_TOWER_HP_STEP};
use bastion_core::events::GameEvent;
use bastion_core::map::GameMap;
use bastion_core::state::{GamePhase, GameStateSnapshot};
use bastion_core::types::{Position, SimTime};

use crate::score::ScoreState;
use crate::systems::wave_spawner::WaveState;
use crate::systems::{cleanup, combat, movement, snapshot, wave_spawner};
use crate::world_setup;

/// Configuration for a new simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed; the same seed and command sequence replay identically.
    pub seed: u64,
    pub map: GameMap,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            map: GameMap::default(),
        }
    }
}

/// The headless simulation engine.
pub struct SimulationEngine {
    world: World,
    map: GameMap,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    command_queue: Vec<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    waves: WaveState,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a fresh run: tower at the map center, wave 1 pending,
    /// starting score on the books.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        world_setup::spawn_tower(&mut world, config.map.center());

        Self {
            world,
            map: config.map,
            time: SimTime::default(),
            phase: GamePhase::Running,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            waves: WaveState::default(),
            score: ScoreState::default(),
        }
    }

    /// Queue a player command for the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push(command);
    }

    /// Queue several commands, preserving order.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick at the default delta-time.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.tick_with_dt(DEFAULT_DT)
    }

    /// Advance the simulation by one tick of `dt` seconds.
    ///
    /// Order within the tick: queued commands, then spawning, movement,
    /// combat, cleanup, then the game-over check. After game over the
    /// world is frozen; ticks keep producing snapshots of the final
    /// state but run nothing.
    pub fn tick_with_dt(&mut self, dt: f64) -> GameStateSnapshot {
        if self.phase == GamePhase::Running {
            self.process_commands();
            self.run_systems(dt);
            self.time.advance(dt);
            self.check_game_over();
        } else {
            self.command_queue.clear();
        }

        snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.map,
            &self.waves,
            &self.score,
            mem::take(&mut self.events),
        )
    }

    fn process_commands(&mut self) {
        let commands = mem::take(&mut self.command_queue);
        for command in commands {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Upgrade { kind } => self.purchase_upgrade(kind),
            PlayerCommand::ForceNextWave => self.waves.next_wave(),
            PlayerCommand::MoveTower { dx, dy } => self.move_tower(dx, dy),
        }
    }

    /// The cost gate for upgrades: check affordability, apply the
    /// mutation, and only deduct on success.
    fn purchase_upgrade(&mut self, kind: UpgradeKind) {
        let cost = kind.cost();
        if self.score.points < cost {
            self.events.push(GameEvent::UpgradeRejected { kind });
            return;
        }

        let tower = match self.tower_entity() {
            Some(entity) => entity,
            None => {
                self.events.push(GameEvent::UpgradeRejected { kind });
                return;
            }
        };

        let applied = match kind {
            UpgradeKind::TowerHp => {
                if let Ok(mut health) = self.world.get::<&mut Health>(tower) {
                    health.max_hp += UPGRADE_TOWER_HP_STEP;
                    health.hp += UPGRADE_TOWER_HP_STEP;
                    true
                } else {
                    false
                }
            }
            _ => self
                .world
                .get::<&mut TowerStats>(tower)
                .map(|mut stats| stats.apply_upgrade(kind).is_ok())
                .unwrap_or(false),
        };

        if applied {
            self.score.points -= cost;
            self.events.push(GameEvent::UpgradeApplied { kind });
        } else {
            self.events.push(GameEvent::UpgradeRejected { kind });
        }
    }

    /// Relocate the tower by a cell offset, clamped to map bounds.
    /// Enemies already in flight keep their captured target.
    fn move_tower(&mut self, dx: i32, dy: i32) {
        let map = self.map;
        for (_entity, (_tower, pos)) in self.world.query_mut::<(&Tower, &mut Position)>() {
            *pos = map.clamp(Position::new(pos.x + dx, pos.y + dy));
        }
    }

    fn run_systems(&mut self, dt: f64) {
        wave_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.waves,
            &self.map,
            &mut self.events,
        );
        movement::run(&mut self.world, dt);
        combat::run(
            &mut self.world,
            &self.map,
            self.time.elapsed_secs,
            dt,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        cleanup::run(
            &mut self.world,
            &mut self.score,
            &mut self.events,
            &mut self.despawn_buffer,
        );

        // Clearing a wave hands over to the next one: the timer is
        // forced to the interval, so the following tick spawns the
        // escalated batch immediately.
        if self.waves.batch_spawned && wave_spawner::all_enemies_defeated(&self.world) {
            self.waves.next_wave();
        }
    }

    /// The run ends when the tower's hit points are exhausted.
    fn check_game_over(&mut self) {
        let tower_alive = self
            .world
            .query::<(&Tower, &Health)>()
            .iter()
            .any(|(_, (_, health))| health.is_alive());

        if !tower_alive {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                wave: self.waves.current_wave,
                score: self.score.points,
            });
        }
    }

    fn tower_entity(&self) -> Option<Entity> {
        self.world
            .query::<&Tower>()
            .iter()
            .next()
            .map(|(entity, _)| entity)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub(crate) fn waves(&self) -> &WaveState {
        &self.waves
    }

    #[cfg(test)]
    pub(crate) fn score(&self) -> &ScoreState {
        &self.score
    }

    #[cfg(test)]
    pub(crate) fn tower_position(&self) -> Position {
        self.world
            .query::<(&Tower, &Position)>()
            .iter()
            .next()
            .map(|(_, (_, pos))| *pos)
            .unwrap()
    }

    #[cfg(test)]
    pub(crate) fn spawn_enemy_at(&mut self, position: Position, hp: i32, speed: f64) -> Entity {
        use bastion_core::components::{Enemy, EnemyAgent};
        use bastion_core::constants::ENEMY_VALUE;

        let target = self.tower_position();
        self.world.spawn((
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
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
