//! High score leaderboard
//!
//! Tracks the top 10 completed runs. Persisted through a `Storage` backend.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    pub score: u64,
    pub coins: u32,
    /// Level reached
    pub level: u32,
    /// Seconds of play
    pub completion_time: f64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    const STORAGE_KEY: &'static str = "pixel_jumper_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add an entry if it qualifies.
    /// Returns the rank achieved (1-indexed). Ties rank below earlier entries.
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard, starting fresh on any failure
    pub fn load(storage: &impl Storage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<HighScores>(&json) {
                Ok(mut scores) => {
                    scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                    scores.entries.truncate(MAX_HIGH_SCORES);
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
                Err(e) => log::warn!("Discarding corrupt high scores: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read high scores: {}", e),
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save the leaderboard (best effort)
    pub fn save(&self, storage: &mut impl Storage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
                Err(e) => log::warn!("Could not save high scores: {}", e),
            },
            Err(e) => log::warn!("Could not serialize high scores: {}", e),
        }
    }
}
