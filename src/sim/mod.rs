//! Platformer simulation module
//!
//! All gameplay logic lives here. Single-threaded and run-to-completion:
//! - The host supplies dt, an input snapshot and an event sink per update
//! - No rendering, audio or platform dependencies
//! - Stable iteration order (level data order)

pub mod body;
pub mod camera;
pub mod collision;
pub mod enemy;
pub mod engine;
pub mod events;
pub mod level;
pub mod physics;
pub mod pickup;
pub mod player;

pub use body::{Body, Rect};
pub use camera::Camera;
pub use collision::{Resolution, foot_sensor, is_grounded, overlaps, resolve};
pub use enemy::Enemy;
pub use engine::Engine;
pub use events::{EventSink, GameEvent};
pub use level::{EnemySpawn, Level, LevelCatalog, LevelData, Point, PowerUpSpawn};
pub use physics::{FrictionMode, integrate};
pub use pickup::{Coin, PowerUp};
pub use player::{Facing, Locomotion, Player, PlayerInput, PlayerState, PowerUpKind};
