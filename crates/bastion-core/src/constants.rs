//! Simulation constants and tuning parameters.

use crate::types::WorldBounds;

// --- Timing ---

/// Largest frame delta the simulation will integrate in one tick (seconds).
/// Longer frames are truncated to this value; collision results depend on it.
pub const MAX_TICK_DELTA: f64 = 0.033;

/// Duration of the between-wave cutscene (seconds).
pub const CUTSCENE_DURATION_SECS: f64 = 3.15;

// --- World bounds ---

/// Playfield extents in world units.
pub const WORLD: WorldBounds = WorldBounds {
    left: -620.0,
    right: 620.0,
    bottom: -310.0,
    top: 365.0,
};

/// Height above `WORLD.bottom` at which cities and bases sit.
pub const STRUCTURE_ALTITUDE: f64 = 20.0;

/// Height above `WORLD.bottom` for ground-fallback enemy targets.
pub const GROUND_TARGET_ALTITUDE: f64 = 16.0;

// --- Defenses ---

/// Horizontal positions of the six cities.
pub const CITY_POSITIONS: [f64; 6] = [-560.0, -340.0, -170.0, 170.0, 340.0, 560.0];

/// Horizontal positions of the three launch bases.
pub const BASE_POSITIONS: [f64; 3] = [-420.0, 0.0, 420.0];

/// Interceptors held by a fully armed base.
pub const MAX_BASE_AMMO: u32 = 10;

/// Vertical offset of the interceptor launch point above its base.
pub const LAUNCH_HEIGHT_OFFSET: f64 = 6.0;

// --- Aim clamping (inset from WORLD) ---

pub const AIM_INSET_SIDE: f64 = 20.0;
pub const AIM_INSET_BOTTOM: f64 = 20.0;
pub const AIM_INSET_TOP: f64 = 10.0;

// --- Player missiles ---

pub const PLAYER_MISSILE_BASE_SPEED: f64 = 440.0;
pub const PLAYER_MISSILE_SPEED_PER_WAVE: f64 = 16.0;

// --- Enemy missiles ---

pub const ENEMY_SPEED_MIN: f64 = 62.0;
pub const ENEMY_SPEED_MAX: f64 = 86.0;
pub const ENEMY_SPEED_PER_WAVE: f64 = 5.5;

/// Horizontal inset from the world edges for enemy launch points.
pub const ENEMY_SPAWN_SIDE_INSET: f64 = 10.0;
/// Enemy launch altitude band above `WORLD.top`.
pub const ENEMY_SPAWN_ALTITUDE_MIN: f64 = 10.0;
pub const ENEMY_SPAWN_ALTITUDE_MAX: f64 = 120.0;

/// Horizontal inset from the world edges for ground-fallback targets.
pub const GROUND_TARGET_SIDE_INSET: f64 = 50.0;

/// Start/end separation at or below which a spawn is discarded.
pub const MIN_FLIGHT_DISTANCE: f64 = 1.0;

// --- Splitting ---

/// First wave in which enemy missiles may split.
pub const SPLIT_FIRST_WAVE: u32 = 4;
pub const SPLIT_CHANCE_BASE: f64 = 0.07;
pub const SPLIT_CHANCE_PER_WAVE: f64 = 0.03;
pub const SPLIT_CHANCE_MAX: f64 = 0.35;
pub const SPLIT_AT_MIN: f64 = 0.35;
pub const SPLIT_AT_MAX: f64 = 0.68;
/// Fragments produced by one split.
pub const SPLIT_FRAGMENTS: usize = 2;

// --- Cities vs bases weighting in target selection ---

pub const CITY_TARGET_WEIGHT: usize = 2;
pub const BASE_TARGET_WEIGHT: usize = 1;

// --- Wave pacing ---

pub const WAVE_BASE_ENEMIES: u32 = 10;
pub const WAVE_ENEMIES_PER_LEVEL: u32 = 4;
pub const WAVE_BASE_SPAWN_RATE: f64 = 0.96;
pub const WAVE_SPAWN_RATE_STEP: f64 = 0.065;
pub const WAVE_MIN_SPAWN_RATE: f64 = 0.23;
/// Delay before the first enemy of a wave (seconds).
pub const WAVE_FIRST_SPAWN_DELAY: f64 = 0.6;
/// Spawn interval jitter band as fractions of the spawn rate.
pub const SPAWN_JITTER_MIN: f64 = 0.65;
pub const SPAWN_JITTER_MAX: f64 = 1.35;

// --- Explosions ---

pub const EXPLOSION_INITIAL_RADIUS: f64 = 0.5;
pub const DEFENSE_MAX_RADIUS_MIN: f64 = 50.0;
pub const DEFENSE_MAX_RADIUS_MAX: f64 = 72.0;
pub const WARHEAD_MAX_RADIUS_MIN: f64 = 36.0;
pub const WARHEAD_MAX_RADIUS_MAX: f64 = 58.0;
pub const DEFENSE_GROWTH: f64 = 220.0;
pub const WARHEAD_GROWTH: f64 = 170.0;
/// Shrink speed as a fraction of growth speed.
pub const EXPLOSION_DECAY_FACTOR: f64 = 0.72;

/// Ground damage radius is `max(GROUND_DAMAGE_MIN_RADIUS, radius * GROUND_DAMAGE_RATIO)`.
pub const GROUND_DAMAGE_MIN_RADIUS: f64 = 12.0;
pub const GROUND_DAMAGE_RATIO: f64 = 0.65;

// --- Scoring ---

/// Points for an enemy caught by a player's defense blast.
pub const INTERCEPT_POINTS: u32 = 30;
/// Points for an enemy caught by another warhead's blast.
pub const CHAIN_POINTS: u32 = 18;
pub const AMMO_BONUS_PER_ROUND: u32 = 5;
pub const CITY_BONUS: u32 = 100;
