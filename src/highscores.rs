//! Best-score persistence
//!
//! A single decimal integer stored under one key.

use crate::platform::KeyValueStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Read the stored value; absent or unparseable entries count as 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let best = store
            .get(Self::STORAGE_KEY)
            .and_then(|s| parse_score(&s))
            .unwrap_or(0);
        log::info!("High score: {}", best);
        Self { best }
    }

    /// Record a finished run. Writes only when `score` beats the stored best.
    /// Returns true on a new record.
    pub fn submit(&mut self, store: &mut dyn KeyValueStore, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if !store.set(Self::STORAGE_KEY, &score.to_string()) {
            log::warn!("New high score {} could not be persisted", score);
        }
        log::info!("New high score: {}", score);
        true
    }
}

/// Leading-integer parse: "150" and "150abc" both read as 150
fn parse_score(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
