//! High score persistence
//!
//! One integer, read once at startup and written back whenever the score
//! exceeds the stored value. Storage failures never block gameplay.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persistence;

/// On-disk shape of the save file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct Saved {
    best: u32,
}

/// The persisted high score and where it lives
#[derive(Debug, Clone)]
pub struct HighScore {
    best: u32,
    path: PathBuf,
}

impl HighScore {
    /// Load from the default save location
    pub fn load() -> Self {
        Self::load_from(persistence::default_path())
    }

    /// Load from an explicit path; unreadable or corrupt files fall back to 0
    pub fn load_from(path: PathBuf) -> Self {
        let best = persistence::read(&path)
            .and_then(|json| serde_json::from_str::<Saved>(&json).ok())
            .map(|saved| saved.best)
            .unwrap_or(0);
        if best > 0 {
            log::info!("loaded high score {}", best);
        } else {
            log::info!("no high score found, starting fresh");
        }
        Self { best, path }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a new score. Writes only when it beats the stored value;
    /// returns whether it did.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.save();
        true
    }

    /// Explicit reset back to zero
    pub fn reset(&mut self) {
        self.best = 0;
        self.save();
        log::info!("high score reset");
    }

    fn save(&self) {
        match serde_json::to_string(&Saved { best: self.best }) {
            Ok(json) => persistence::write(&self.path, &json),
            Err(e) => log::warn!("failed to serialize high score: {}", e),
        }
    }
}
