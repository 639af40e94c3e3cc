//! Game loop thread. Runs the simulation engine at a fixed frame rate.
//!
//! The engine is created inside the thread so it is owned by exactly one
//! thread. Commands arrive via an `mpsc` channel and are applied at the next
//! tick boundary. The latest snapshot is stored in shared state for polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use thiserror::Error;

use bastion_core::commands::PlayerCommand;
use bastion_core::events::AudioCue;
use bastion_core::state::GameStateSnapshot;
use bastion_sim::{Bridges, SimConfig, SimulationEngine};

use crate::autofire::Autofire;
use crate::state::{GameLoopCommand, LatestSnapshot};

/// Frames per second of wall-clock time.
pub const FRAME_RATE: u32 = 60;

/// Simulated seconds handed to the engine each frame.
pub const FRAME_DELTA: f64 = 1.0 / FRAME_RATE as f64;

/// Nominal wall-clock duration of one frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

#[derive(Debug, Error)]
pub enum GameLoopError {
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("game loop has stopped")]
    Disconnected,
    #[error("game loop thread panicked")]
    Panicked,
}

/// How the loop should run.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub sim: SimConfig,
    /// Stop on its own after this many ticks.
    pub max_ticks: Option<u64>,
    /// Sleep to hold `FRAME_RATE`. When false, ticks run back to back.
    pub paced: bool,
    /// Drive the defense with [`Autofire`].
    pub autofire: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            max_ticks: None,
            paced: true,
            autofire: false,
        }
    }
}

/// What happened over the lifetime of a loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks: u64,
    pub missions: u32,
    pub best_wave: u32,
    pub final_score: u32,
    pub high_score: u32,
}

impl LoopSummary {
    fn record(&mut self, snapshot: &GameStateSnapshot) {
        self.ticks += 1;
        self.missions += snapshot
            .audio_cues
            .iter()
            .filter(|c| matches!(c, AudioCue::NewMission))
            .count() as u32;
        self.best_wave = self.best_wave.max(snapshot.hud.wave);
        self.final_score = snapshot.hud.score;
        self.high_score = snapshot.hud.high_score;
    }
}

/// Handle to a running game loop thread.
pub struct GameLoopHandle {
    commands: mpsc::Sender<GameLoopCommand>,
    latest: LatestSnapshot,
    thread: JoinHandle<LoopSummary>,
}

impl GameLoopHandle {
    /// Forward a player command to the engine.
    pub fn send(&self, command: PlayerCommand) -> Result<(), GameLoopError> {
        self.commands
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| GameLoopError::Disconnected)
    }

    pub fn latest_snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest.get()
    }

    /// Ask the loop to stop and wait for it.
    pub fn shutdown(self) -> Result<LoopSummary, GameLoopError> {
        // The loop may already have stopped on its own.
        let _ = self.commands.send(GameLoopCommand::Shutdown);
        self.join()
    }

    /// Wait for the loop to stop on its own.
    pub fn join(self) -> Result<LoopSummary, GameLoopError> {
        self.thread.join().map_err(|_| GameLoopError::Panicked)
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    options: LoopOptions,
    bridges: Bridges,
) -> Result<GameLoopHandle, GameLoopError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest = LatestSnapshot::new();
    let shared = latest.clone();

    let thread = std::thread::Builder::new()
        .name("bastion-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::with_bridges(options.sim, bridges);
            run_game_loop(engine, cmd_rx, &shared, &options)
        })?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        latest,
        thread,
    })
}

/// The game loop. Runs until Shutdown, channel disconnect or `max_ticks`.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest: &LatestSnapshot,
    options: &LoopOptions,
) -> LoopSummary {
    let mut summary = LoopSummary::default();
    let mut autofire = options.autofire.then(Autofire::default);
    let mut next_tick_time = Instant::now();
    log::info!(
        "game loop started (seed {}, paced {}, autofire {})",
        options.sim.seed,
        options.paced,
        options.autofire
    );

    loop {
        if options.max_ticks.is_some_and(|max| summary.ticks >= max) {
            break;
        }

        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    log::info!("game loop shutting down after {} ticks", summary.ticks);
                    return summary;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                // Detached handles are fine while a tick budget remains.
                Err(mpsc::TryRecvError::Disconnected) if options.max_ticks.is_some() => break,
                Err(mpsc::TryRecvError::Disconnected) => return summary,
            }
        }

        // 2. Advance one frame
        let snapshot = engine.tick(FRAME_DELTA);
        summary.record(&snapshot);

        // 3. Let the driver react; its commands land on the next tick
        if let Some(driver) = autofire.as_mut() {
            if let Some(cmd) = driver.next_command(&snapshot, FRAME_DELTA) {
                engine.queue_command(cmd);
            }
        }

        // 4. Store latest snapshot for synchronous polling
        latest.store(snapshot);

        // 5. Sleep until next frame
        if options.paced {
            next_tick_time += FRAME_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > FRAME_DURATION * 2 {
                // Too far behind; reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    }

    log::info!(
        "game loop finished: {} ticks, {} missions, best wave {}",
        summary.ticks,
        summary.missions,
        summary.best_wave
    );
    summary
}
