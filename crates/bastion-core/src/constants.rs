//! Simulation constants and tuning parameters.

/// Default seconds advanced per tick. Entity speeds are tuned in
/// cells per second with one-second ticks; the driver may pass a
/// different delta-time per frame.
pub const DEFAULT_DT: f64 = 1.0;

// --- World ---

/// World grid width in cells.
pub const WORLD_WIDTH: i32 = 100;

/// World grid height in cells.
pub const WORLD_HEIGHT: i32 = 100;

// --- Tower baseline ---

/// Starting tower hit points.
pub const TOWER_BASE_HP: i32 = 10;

/// Starting tower range (radius, cells).
pub const TOWER_BASE_RANGE: i32 = 5;

/// Starting tower damage per shot.
pub const TOWER_BASE_DAMAGE: i32 = 1;

/// Starting tower fire rate (shots per second).
pub const TOWER_BASE_FIRE_RATE: f64 = 1.0;

// --- Projectiles ---

/// Projectile speed (cells per second).
pub const PROJECTILE_SPEED: f64 = 5.0;

// --- Waves ---

/// Ticks between spawn batches. The spawn timer counts frames, not
/// seconds: cadence is independent of delta-time.
pub const SPAWN_INTERVAL_TICKS: u32 = 60;

/// Baseline enemies per wave before scaling.
pub const ENEMIES_PER_WAVE: u32 = 3;

/// Batch size scaling factor: floor(per_wave * wave * factor) + 1.
pub const WAVE_SIZE_FACTOR: f64 = 0.6;

/// Per-wave enemy hit point multiplier.
pub const DIFFICULTY_MULTIPLIER: f64 = 1.1;

// --- Enemies ---

/// Base enemy hit points at wave 1 before difficulty scaling.
pub const ENEMY_BASE_HP: f64 = 10.0;

/// Base enemy speed (cells per second).
pub const ENEMY_BASE_SPEED: f64 = 1.0;

/// Additional enemy speed per wave number.
pub const ENEMY_SPEED_PER_WAVE: f64 = 0.1;

/// Score awarded per enemy killed.
pub const ENEMY_VALUE: u32 = 5;

/// Damage dealt to the tower when an enemy reaches it.
pub const ENEMY_CONTACT_DAMAGE: i32 = 1;

// --- Score and upgrades ---

/// Starting score.
pub const STARTING_SCORE: u32 = 50;

/// Upgrade step sizes.
pub const UPGRADE_DAMAGE_STEP: i32 = 1;
pub const UPGRADE_RANGE_STEP: i32 = 1;
pub const UPGRADE_FIRE_RATE_STEP: f64 = 0.2;
pub const UPGRADE_TOWER_HP_STEP: i32 = 5;

/// Upgrade costs (score units, deducted by the command handler).
pub const UPGRADE_DAMAGE_COST: u32 = 10;
pub const UPGRADE_RANGE_COST: u32 = 15;
pub const UPGRADE_FIRE_RATE_COST: u32 = 25;
pub const UPGRADE_TOWER_HP_COST: u32 = 20;
