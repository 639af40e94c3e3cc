//! Mission state: wave number, phase, spawn pacing, and the status line.

use bastion_core::constants::*;
use bastion_core::enums::WavePhase;

/// Status line shown before any mission has started.
pub const IDLE_STATUS: &str = "Start a mission, then defend the cities.";

pub const NO_AMMO_STATUS: &str = "No interceptor missiles available in active bases.";

/// Difficulty parameters derived from the wave number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub enemy_to_spawn: u32,
    /// Mean seconds between spawns.
    pub spawn_rate: f64,
}

impl WaveParams {
    pub fn for_wave(wave: u32) -> Self {
        let step = wave.max(1) - 1;
        Self {
            enemy_to_spawn: WAVE_BASE_ENEMIES + step * WAVE_ENEMIES_PER_LEVEL,
            spawn_rate: (WAVE_BASE_SPAWN_RATE - step as f64 * WAVE_SPAWN_RATE_STEP)
                .max(WAVE_MIN_SPAWN_RATE),
        }
    }
}

/// Probability that a fresh enemy missile is flagged to fragment.
pub fn split_chance(wave: u32) -> f64 {
    if wave < SPLIT_FIRST_WAVE {
        return 0.0;
    }
    (SPLIT_CHANCE_BASE + wave as f64 * SPLIT_CHANCE_PER_WAVE).min(SPLIT_CHANCE_MAX)
}

/// Enemy spawning progress within the current wave.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnState {
    pub spawned: u32,
    pub to_spawn: u32,
    /// Seconds until the next spawn attempt.
    pub timer: f64,
    pub rate: f64,
}

impl SpawnState {
    pub fn for_wave(wave: u32) -> Self {
        let params = WaveParams::for_wave(wave);
        Self {
            spawned: 0,
            to_spawn: params.enemy_to_spawn,
            timer: WAVE_FIRST_SPAWN_DELAY,
            rate: params.spawn_rate,
        }
    }

    pub fn exhausted(&self) -> bool {
        self.spawned >= self.to_spawn
    }
}

/// Everything the wave state machine owns.
#[derive(Debug, Clone)]
pub struct MissionState {
    pub phase: WavePhase,
    /// 0 until the first wave begins.
    pub wave: u32,
    pub spawn: SpawnState,
    /// Seconds left in the between-wave cutscene.
    pub transition_remaining: f64,
    pub last_bonus: u32,
    pub status: String,
}

impl Default for MissionState {
    fn default() -> Self {
        Self {
            phase: WavePhase::Idle,
            wave: 0,
            spawn: SpawnState::default(),
            transition_remaining: 0.0,
            last_bonus: 0,
            status: IDLE_STATUS.to_string(),
        }
    }
}

impl MissionState {
    /// Scoring is off once the mission has failed.
    pub fn scoring_enabled(&self) -> bool {
        matches!(self.phase, WavePhase::Active | WavePhase::Transition)
    }

    /// Wave number for display; never shows 0.
    pub fn display_wave(&self) -> u32 {
        self.wave.max(1)
    }
}

/// Group digits in threes for status messages: 12345 -> "12,345".
pub fn format_points(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
