//! Game settings and preferences
//!
//! Persisted separately from progress saves.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;
use crate::persistence::Storage;
pub use crate::sim::FrictionMode;

/// Simulation and presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ground friction scaling
    pub friction: FrictionMode,
    /// Longest frame delta simulated in one update (seconds)
    pub max_frame_dt: f32,
    /// Camera lerp factor per update (1.0 = locked to the player)
    pub camera_smoothing: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Lives at the start of a run
    pub starting_lives: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            friction: FrictionMode::PerTick,
            max_frame_dt: MAX_FRAME_DT,
            camera_smoothing: 0.1,
            viewport_width: 800.0,
            viewport_height: 600.0,
            starting_lives: 3,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "pixel_jumper_settings";

    /// Load settings, falling back to defaults on any storage or parse failure
    pub fn load(storage: &impl Storage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Discarding corrupt settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings (best effort)
    pub fn save(&self, storage: &mut impl Storage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {}", e),
            },
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_round_trip() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            friction: FrictionMode::FrameRateIndependent,
            camera_smoothing: 0.25,
            ..Default::default()
        };
        settings.save(&mut storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_missing_or_corrupt_gives_defaults() {
        let mut storage = MemoryStorage::new();
        assert_eq!(Settings::load(&storage), Settings::default());

        storage.set(Settings::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .set(Settings::STORAGE_KEY, r#"{"friction":"FrameRateIndependent"}"#)
            .unwrap();
        let settings = Settings::load(&storage);
        assert_eq!(settings.friction, FrictionMode::FrameRateIndependent);
        assert_eq!(settings.max_frame_dt, MAX_FRAME_DT);
    }
}
