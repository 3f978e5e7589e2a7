//! Notifications the engine raises for the host during an update

use serde::{Deserialize, Serialize};

use super::player::PowerUpKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { value: u32 },
    /// The player took damage from an enemy
    EnemyHit,
    /// The player stomped an enemy
    EnemyDefeated,
    PowerUpCollected { kind: PowerUpKind },
    LevelComplete,
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::CoinCollected { .. } => "coin",
            GameEvent::EnemyHit => "enemyHit",
            GameEvent::EnemyDefeated => "enemyDefeat",
            GameEvent::PowerUpCollected { .. } => "powerup",
            GameEvent::LevelComplete => "levelComplete",
        }
    }
}

/// Receives events synchronously while `Engine::update` runs
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}
