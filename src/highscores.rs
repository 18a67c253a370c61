//! Best score across sessions
//!
//! Persisted under `"high-score"` as a bare JSON number.

use crate::persistence::{Persisted, Storage};

#[derive(Debug, Clone)]
pub struct HighScore {
    slot: Persisted<u64>,
}

impl HighScore {
    const STORAGE_KEY: &'static str = "high-score";

    /// Load the stored best, or 0 if none / unreadable
    pub fn load(storage: &dyn Storage) -> Self {
        let slot = Persisted::load(storage, Self::STORAGE_KEY, 0);
        log::info!("High score: {}", slot.get());
        Self { slot }
    }

    pub fn best(&self) -> u64 {
        *self.slot.get()
    }

    /// Check if a score beats the stored best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best()
    }

    /// Record `score` if it beats the best. Returns true when it did.
    pub fn record(&mut self, storage: &mut dyn Storage, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.slot.set(storage, score);
        log::info!("New high score: {}", score);
        true
    }
}
