//! Run progress: score, lives, coins, level and play time
//!
//! Lives outside the simulation. The host feeds it the engine's events and
//! saves it once per frame; save/load failures never reach the game loop.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;
use crate::sim::GameEvent;

/// Score for grabbing a power-up
pub const POWERUP_SCORE: u64 = 50;
/// Score for stomping an enemy
pub const STOMP_SCORE: u64 = 100;

/// The persisted progress record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameProgress {
    pub score: u64,
    pub lives: u8,
    pub coins: u32,
    pub level: u32,
    /// Seconds played this run
    pub game_time: f64,
    #[serde(skip, default = "default_starting_lives")]
    starting_lives: u8,
}

fn default_starting_lives() -> u8 {
    3
}

impl Default for GameProgress {
    fn default() -> Self {
        Self::new(default_starting_lives())
    }
}

impl GameProgress {
    /// Storage key
    const STORAGE_KEY: &'static str = "pixel_jumper_save";

    pub fn new(starting_lives: u8) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            coins: 0,
            level: 1,
            game_time: 0.0,
            starting_lives,
        }
    }

    /// Update counters in response to a simulation event
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::CoinCollected { value } => {
                self.coins += 1;
                self.score += u64::from(*value);
            }
            GameEvent::EnemyHit => {
                self.lives = self.lives.saturating_sub(1);
            }
            GameEvent::EnemyDefeated => self.score += STOMP_SCORE,
            GameEvent::PowerUpCollected { .. } => self.score += POWERUP_SCORE,
            GameEvent::LevelComplete => {}
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.game_time += f64::from(dt);
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    pub fn next_level(&mut self) {
        self.level += 1;
    }

    /// Start a fresh run, keeping the current level number
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.starting_lives;
        self.coins = 0;
        self.game_time = 0.0;
    }

    /// Load saved progress. Missing, unreadable or corrupt saves yield `None`.
    pub fn load(storage: &impl Storage) -> Option<Self> {
        let json = match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read saved progress: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<GameProgress>(&json) {
            Ok(progress) => {
                log::info!(
                    "Loaded progress: level {}, score {}, lives {}",
                    progress.level,
                    progress.score,
                    progress.lives
                );
                Some(progress)
            }
            Err(e) => {
                log::warn!("Discarding corrupt save: {}", e);
                None
            }
        }
    }

    /// Save progress (best effort)
    pub fn save(&self, storage: &mut impl Storage) {
        let result = serde_json::to_string(self)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                storage
                    .set(Self::STORAGE_KEY, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            log::warn!("Could not save progress: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStorage, StorageError};
    use crate::sim::PowerUpKind;

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_events_update_counters() {
        let mut progress = GameProgress::default();
        progress.apply(&GameEvent::CoinCollected { value: 10 });
        progress.apply(&GameEvent::CoinCollected { value: 10 });
        progress.apply(&GameEvent::PowerUpCollected {
            kind: PowerUpKind::Jump,
        });
        progress.apply(&GameEvent::EnemyDefeated);
        progress.apply(&GameEvent::EnemyHit);
        progress.apply(&GameEvent::LevelComplete);

        assert_eq!(progress.coins, 2);
        assert_eq!(progress.score, 20 + POWERUP_SCORE + STOMP_SCORE);
        assert_eq!(progress.lives, 2);
    }

    #[test]
    fn test_lives_saturate() {
        let mut progress = GameProgress::new(1);
        progress.apply(&GameEvent::EnemyHit);
        progress.apply(&GameEvent::EnemyHit);
        assert_eq!(progress.lives, 0);
        assert!(progress.is_game_over());

        progress.reset();
        assert_eq!(progress.lives, 1);
    }

    #[test]
    fn test_record_shape() {
        let mut progress = GameProgress::default();
        progress.advance(1.5);
        let value: serde_json::Value = serde_json::to_value(&progress).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "score": 0,
                "lives": 3,
                "coins": 0,
                "level": 1,
                "gameTime": 1.5
            })
        );
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        assert!(GameProgress::load(&storage).is_none());

        let mut progress = GameProgress::default();
        progress.apply(&GameEvent::CoinCollected { value: 10 });
        progress.next_level();
        progress.save(&mut storage);

        assert_eq!(GameProgress::load(&storage), Some(progress));
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut broken = BrokenStorage;
        GameProgress::default().save(&mut broken);
        assert!(GameProgress::load(&broken).is_none());

        let mut storage = MemoryStorage::new();
        storage.set(GameProgress::STORAGE_KEY, "[1, 2").unwrap();
        assert!(GameProgress::load(&storage).is_none());
    }
}
