//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the entity registry, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use bastion_core::bridges::{AudioBridge, NullBridge, RenderBridge, ScoreStore};
use bastion_core::commands::PlayerCommand;
use bastion_core::constants::{CUTSCENE_DURATION_SECS, MAX_TICK_DELTA};
use bastion_core::enums::WavePhase;
use bastion_core::events::AudioCue;
use bastion_core::state::GameStateSnapshot;
use bastion_core::types::{clamp, SimTime};

use crate::mission::{MissionState, NO_AMMO_STATUS};
use crate::random::RandomSource;
use crate::registry::EntityRegistry;
use crate::score::ScoreKeeper;
use crate::systems;
use crate::systems::fire_control::{LaunchError, LaunchReport};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Upper bound on a single tick's delta, in seconds.
    pub max_delta: f64,
    /// Length of the between-wave cutscene, in seconds.
    pub cutscene_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_delta: MAX_TICK_DELTA,
            cutscene_secs: CUTSCENE_DURATION_SECS,
        }
    }
}

/// External collaborators. Defaults to no-op bridges for headless runs.
pub struct Bridges {
    pub render: Box<dyn RenderBridge + Send>,
    pub audio: Box<dyn AudioBridge + Send>,
    pub scores: Box<dyn ScoreStore + Send>,
}

impl Default for Bridges {
    fn default() -> Self {
        Self {
            render: Box::new(NullBridge),
            audio: Box::new(NullBridge),
            scores: Box::new(NullBridge),
        }
    }
}

/// The simulation engine. Owns the entities and all mission state.
pub struct SimulationEngine<R = ChaCha8Rng> {
    registry: EntityRegistry,
    mission: MissionState,
    score: ScoreKeeper,
    time: SimTime,
    rng: R,
    config: SimConfig,
    command_queue: VecDeque<PlayerCommand>,
    audio_cues: Vec<AudioCue>,
    audio: Box<dyn AudioBridge + Send>,
}

impl SimulationEngine<ChaCha8Rng> {
    /// Create a headless engine seeded from the config.
    pub fn new(config: SimConfig) -> Self {
        Self::with_bridges(config, Bridges::default())
    }

    pub fn with_bridges(config: SimConfig, bridges: Bridges) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_source(config, bridges, rng)
    }
}

impl<R: RandomSource> SimulationEngine<R> {
    /// Create an engine drawing randomness from `rng`. The layout is in place
    /// immediately; nothing moves until a mission starts.
    pub fn with_source(config: SimConfig, bridges: Bridges, rng: R) -> Self {
        let mut registry = EntityRegistry::new(bridges.render);
        world_setup::setup_mission(&mut registry);
        Self {
            registry,
            mission: MissionState::default(),
            score: ScoreKeeper::new(bridges.scores),
            time: SimTime::default(),
            rng,
            config,
            command_queue: VecDeque::new(),
            audio_cues: Vec::new(),
            audio: bridges.audio,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by `delta` seconds and return the resulting
    /// snapshot. The delta is clamped to `[0, max_delta]`.
    pub fn tick(&mut self, delta: f64) -> GameStateSnapshot {
        self.process_commands();

        let dt = if delta.is_finite() {
            clamp(delta, 0.0, self.config.max_delta)
        } else {
            0.0
        };

        if self.mission.phase != WavePhase::Idle {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let audio_cues = std::mem::take(&mut self.audio_cues);
        for &cue in &audio_cues {
            if let Err(e) = self.audio.play(cue) {
                log::warn!("audio bridge failed to play {cue:?}: {e}");
            }
        }
        systems::snapshot::build_snapshot(
            &self.registry,
            &self.time,
            &self.mission,
            &self.score,
            self.config.cutscene_secs,
            audio_cues,
        )
    }

    /// Reset everything and begin wave 1. Valid from any phase.
    pub fn start_mission(&mut self) {
        world_setup::setup_mission(&mut self.registry);
        self.score.reset_for_mission();
        self.mission = MissionState::default();
        self.time = SimTime::default();
        log::info!(
            "mission started, high score to beat {}",
            self.score.high_score_at_mission_start()
        );
        self.audio_cues.push(AudioCue::NewMission);
        systems::wave_state::begin_next_wave(
            &mut self.mission,
            &mut self.registry,
            &mut self.audio_cues,
        );
    }

    /// Fire an interceptor at `(x, y)`, optionally from a specific base.
    /// Only accepted while a wave is in progress.
    pub fn launch(
        &mut self,
        x: f64,
        y: f64,
        base: Option<usize>,
    ) -> Result<LaunchReport, LaunchError> {
        if self.mission.phase != WavePhase::Active {
            return Err(LaunchError::MissionInactive);
        }
        let result = systems::fire_control::launch(
            &mut self.registry,
            self.mission.wave,
            x,
            y,
            base,
            &mut self.audio_cues,
        );
        if let Err(LaunchError::NoAmmoAvailable) = result {
            self.mission.status = NO_AMMO_STATUS.to_string();
        }
        result
    }

    /// Get the current wave phase.
    pub fn phase(&self) -> WavePhase {
        self.mission.phase
    }

    pub fn wave(&self) -> u32 {
        self.mission.wave
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn high_score(&self) -> u32 {
        self.score.high_score()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Read-only view of the entities.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn mission(&self) -> &MissionState {
        &self.mission
    }

    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    #[cfg(test)]
    pub(crate) fn mission_mut(&mut self) -> &mut MissionState {
        &mut self.mission
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMission => self.start_mission(),
            PlayerCommand::Launch { x, y, base } => {
                if let Err(e) = self.launch(x, y, base) {
                    log::debug!("launch at ({x:.1}, {y:.1}) refused: {e}");
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Cutscene countdown; may begin the next wave
        systems::wave_state::update_transition(
            &mut self.mission,
            &mut self.registry,
            dt,
            &mut self.audio_cues,
        );
        // 2. Enemy spawning
        if self.mission.phase == WavePhase::Active {
            systems::wave_spawner::run(
                &mut self.registry,
                &mut self.rng,
                &mut self.mission.spawn,
                self.mission.wave,
                dt,
                &mut self.audio_cues,
            );
        }
        // 3. Missile kinematics, splits (not after game over) and impacts
        systems::movement::run_enemy_missiles(
            &mut self.registry,
            &mut self.rng,
            self.mission.wave,
            dt,
            self.mission.scoring_enabled(),
            &mut self.audio_cues,
        );
        systems::movement::run_player_missiles(&mut self.registry, &mut self.rng, dt);
        // 4. Explosions and their collisions
        let score = if self.mission.scoring_enabled() {
            Some(&mut self.score)
        } else {
            None
        };
        systems::detonation::run(
            &mut self.registry,
            &mut self.rng,
            dt,
            &mut self.audio_cues,
            score,
        );
        // 5. Game over takes precedence over wave completion
        let failed = systems::wave_state::check_game_over(
            &mut self.mission,
            &self.registry,
            &self.score,
            &mut self.audio_cues,
        );
        // 6. Wave completion
        if !failed
            && self.mission.phase == WavePhase::Active
            && systems::wave_state::wave_resolved(&self.mission, &self.registry)
        {
            systems::wave_state::complete_wave(
                &mut self.mission,
                &self.registry,
                &mut self.score,
                self.config.cutscene_secs,
                &mut self.audio_cues,
            );
        }
    }
}
