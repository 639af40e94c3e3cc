use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bastion_app::audio_log::LogAudio;
use bastion_app::config::load_sim_config;
use bastion_app::game_loop::{spawn_game_loop, LoopOptions};
use bastion_app::highscore::FileScoreStore;
use bastion_core::bridges::{NullBridge, ScoreStore};
use bastion_core::commands::PlayerCommand;
use bastion_sim::{Bridges, SimConfig};

/// Headless BASTION missile defense simulation.
#[derive(Debug, Parser)]
#[command(name = "bastion", version, about)]
struct Cli {
    /// RNG seed; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,

    /// JSON file with simulation settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let the built-in driver fire interceptors and restart lost missions.
    #[arg(long)]
    autofire: bool,

    /// High score file. Defaults to the user's local data directory.
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Run at wall-clock speed instead of as fast as possible.
    #[arg(long)]
    paced: bool,
}

fn score_store(path: Option<PathBuf>) -> Box<dyn ScoreStore + Send> {
    match path {
        Some(path) => Box::new(FileScoreStore::new(path)),
        None => match FileScoreStore::open_default() {
            Ok(store) => {
                log::info!("high score file: {}", store.path().display());
                Box::new(store)
            }
            Err(e) => {
                log::warn!("{e}; high score will not be kept");
                Box::new(NullBridge)
            }
        },
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut sim = match &cli.config {
        Some(path) => load_sim_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        sim.seed = seed;
    }

    let bridges = Bridges {
        audio: Box::new(LogAudio::new()),
        scores: score_store(cli.score_file),
        ..Default::default()
    };
    let options = LoopOptions {
        sim,
        max_ticks: Some(cli.ticks),
        paced: cli.paced,
        autofire: cli.autofire,
    };

    log::info!("BASTION starting, {} frames", cli.ticks);
    let handle = spawn_game_loop(options, bridges).context("starting game loop")?;
    handle
        .send(PlayerCommand::StartMission)
        .context("sending start command")?;
    let summary = handle.join().context("waiting for game loop")?;

    println!(
        "ticks {}  missions {}  best wave {}  score {}  high score {}",
        summary.ticks, summary.missions, summary.best_wave, summary.final_score, summary.high_score
    );
    Ok(())
}
