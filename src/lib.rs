//! Pixel Jumper - A side-scrolling 2D platformer
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, collisions, player state, engine loop)
//! - `progress`: Score/lives/coins counters that react to simulation events
//! - `highscores`: Local leaderboard
//! - `persistence`: Key-value storage backends for saves
//! - `settings`: Player-tunable simulation and camera settings
//! - `input`: Keyboard/touch intent mapping
//! - `platform`: Browser host bindings (wasm32 only)

pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use progress::GameProgress;
pub use settings::{FrictionMode, Settings};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1000.0;
    /// Maximum fall speed (pixels/s)
    pub const TERMINAL_VELOCITY: f32 = 600.0;
    /// Ground friction multiplier applied per update while grounded
    pub const FRICTION: f32 = 0.8;
    /// Horizontal speed below which a grounded body stops outright
    pub const STOP_EPSILON: f32 = 5.0;
    /// Reference rate for frame-rate independent friction
    pub const FRICTION_REFERENCE_HZ: f32 = 60.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const BASE_MOVE_SPEED: f32 = 200.0;
    pub const BASE_JUMP_FORCE: f32 = 400.0;
    pub const BOOSTED_MOVE_SPEED: f32 = 300.0; // 1.5x base
    pub const BOOSTED_JUMP_FORCE: f32 = 550.0;
    /// Upward velocity on stomp, as a fraction of jump force
    pub const BOUNCE_FACTOR: f32 = 0.7;
    pub const KNOCKBACK_UP: f32 = 200.0;
    pub const KNOCKBACK_SIDE: f32 = 150.0;
    /// Seconds of invulnerability after a hit
    pub const INVULNERABILITY_DURATION: f32 = 1.0;
    /// Seconds a power-up boost lasts
    pub const BOOST_DURATION: f32 = 5.0;

    /// Ground sensor geometry (inset per side, height)
    pub const GROUND_SENSOR_INSET: f32 = 2.0;
    pub const GROUND_SENSOR_HEIGHT: f32 = 2.0;

    /// Entity sizes
    pub const ENEMY_SIZE: f32 = 32.0;
    pub const COIN_SIZE: f32 = 16.0;
    pub const COIN_VALUE: u32 = 10;
    pub const POWERUP_SIZE: f32 = 24.0;

    /// Enemy ledge look-ahead margin beyond half its width
    pub const LEDGE_LOOKAHEAD_MARGIN: f32 = 5.0;
    /// How far below its feet an enemy still counts a platform as ground
    pub const LEDGE_TOLERANCE: f32 = 10.0;

    /// Level defaults
    pub const LEVEL_WIDTH: f32 = 2000.0;
    pub const LEVEL_HEIGHT: f32 = 600.0;
    pub const GROUND_THICKNESS: f32 = 48.0;

    /// Largest frame delta the engine will simulate in one update
    pub const MAX_FRAME_DT: f32 = 0.05;
}
