//! High score persistence.
//!
//! The best score is kept in a small JSON file, by default in the user's
//! local data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bastion_core::bridges::{BridgeError, ScoreStore};

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("could not determine a data directory for the high score file")]
    NoDataDir,
    #[error("high score file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<HighScoreError> for BridgeError {
    fn from(e: HighScoreError) -> Self {
        match e {
            HighScoreError::NoDataDir => BridgeError::Unavailable("no data directory".into()),
            HighScoreError::Io(io) => BridgeError::Io(io),
            HighScoreError::Parse(parse) => BridgeError::Malformed(parse.to_string()),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// `ScoreStore` backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform's default location.
    pub fn open_default() -> Result<Self, HighScoreError> {
        Self::default_path().map(Self::new).ok_or(HighScoreError::NoDataDir)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("bastion").join("highscore.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score. A missing file is a fresh start, not an error.
    pub fn read(&self) -> Result<u32, HighScoreError> {
        if !self.path.exists() {
            log::info!("no high score file at {:?}, starting fresh", self.path);
            return Ok(0);
        }
        let contents = fs::read_to_string(&self.path)?;
        let file: HighScoreFile = serde_json::from_str(&contents)?;
        Ok(file.high_score)
    }

    pub fn write(&self, high_score: u32) -> Result<(), HighScoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&HighScoreFile { high_score })?;
        fs::write(&self.path, json)?;
        log::debug!("saved high score {high_score} to {:?}", self.path);
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn load_high_score(&mut self) -> Result<u32, BridgeError> {
        Ok(self.read()?)
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), BridgeError> {
        Ok(self.write(score)?)
    }
}
