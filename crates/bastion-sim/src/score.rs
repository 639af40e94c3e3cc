//! Score keeping and high-score persistence.

use bastion_core::bridges::ScoreStore;

pub struct ScoreKeeper {
    score: u32,
    high_score: u32,
    high_score_at_mission_start: u32,
    store: Box<dyn ScoreStore + Send>,
}

impl ScoreKeeper {
    /// Load the persisted high score once. A failed load counts as 0.
    pub fn new(mut store: Box<dyn ScoreStore + Send>) -> Self {
        let high_score = match store.load_high_score() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("could not load high score, starting from 0: {e}");
                0
            }
        };
        Self {
            score: 0,
            high_score,
            high_score_at_mission_start: high_score,
            store,
        }
    }

    /// Add points. A new high score is saved immediately; a failed save is
    /// logged and play continues. Returns true when the high score moved.
    pub fn add(&mut self, amount: u32) -> bool {
        self.score = self.score.saturating_add(amount);
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        if let Err(e) = self.store.save_high_score(self.high_score) {
            log::warn!("could not save high score {}: {e}", self.high_score);
        }
        true
    }

    pub fn reset_for_mission(&mut self) {
        self.score = 0;
        self.high_score_at_mission_start = self.high_score;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// High score as it stood when the current mission began.
    pub fn high_score_at_mission_start(&self) -> u32 {
        self.high_score_at_mission_start
    }
}
