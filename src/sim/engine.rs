//! Per-frame simulation loop
//!
//! The host calls `update(dt, input, events)` once per display frame. Order
//! within an update is fixed: ground check, input, gravity/friction, position,
//! platform resolution, coins, enemies, power-ups, goal, camera.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::Rect;
use super::camera::Camera;
use super::collision::{is_grounded, overlaps, resolve};
use super::enemy::Enemy;
use super::events::{EventSink, GameEvent};
use super::level::{Level, LevelCatalog, LevelData};
use super::physics::{self, FrictionMode};
use super::pickup::{Coin, PowerUp};
use super::player::{Player, PlayerInput};
use crate::settings::Settings;

/// Owns every entity of the loaded level and advances them together
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: LevelCatalog,
    level: Level,
    player: Player,
    platforms: Vec<Rect>,
    coins: Vec<Coin>,
    enemies: Vec<Enemy>,
    power_ups: Vec<PowerUp>,
    goal: Rect,
    camera: Camera,
    friction: FrictionMode,
    max_frame_dt: f32,
    /// Whether the player overlapped the goal last update
    touching_goal: bool,
}

impl Engine {
    /// Engine with the built-in levels, starting on level 1
    pub fn new(settings: &Settings) -> Self {
        Self::with_catalog(LevelCatalog::builtin(), settings)
    }

    pub fn with_catalog(catalog: LevelCatalog, settings: &Settings) -> Self {
        let level = catalog.get(1);
        let start = level.data.player_start;
        let mut engine = Self {
            catalog,
            level: level.clone(),
            player: Player::new(start.x, start.y),
            platforms: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            goal: level.data.goal,
            camera: Camera::new(
                settings.viewport_width,
                settings.viewport_height,
                settings.camera_smoothing,
            ),
            friction: settings.friction,
            max_frame_dt: settings.max_frame_dt,
            touching_goal: false,
        };
        engine.install(level);
        engine
    }

    /// Load level `number` (unknown numbers load level 1)
    pub fn load_level(&mut self, number: u32) {
        let level = self.catalog.get(number);
        self.install(level);
    }

    /// Register an externally authored level under `number` and load it
    pub fn load_level_data(&mut self, number: u32, data: LevelData) {
        self.catalog.insert(number, data);
        self.load_level(number);
    }

    /// Rebuild the current level from its layout and respawn the player
    pub fn reset_level(&mut self) {
        self.install(self.level.clone());
    }

    fn install(&mut self, level: Level) {
        let start = level.data.player_start;
        let mut rng = Pcg32::seed_from_u64(u64::from(level.number));

        self.platforms = level.platforms();
        self.coins = level
            .data
            .coins
            .iter()
            .map(|c| Coin::new(c.x, c.y, &mut rng))
            .collect();
        self.enemies = level
            .data
            .enemies
            .iter()
            .map(|e| Enemy::new(e.x, e.y, e.speed, e.patrol_distance))
            .collect();
        self.power_ups = level
            .data
            .power_ups
            .iter()
            .map(|p| PowerUp::new(p.x, p.y, p.kind))
            .collect();
        self.goal = level.data.goal;
        self.touching_goal = false;

        self.player.reset(start.x, start.y);
        self.camera
            .snap_to(self.player.rect(), Vec2::new(level.width, level.height));

        log::info!(
            "Loaded level {} ({} platforms, {} coins, {} enemies, {} power-ups)",
            level.number,
            self.platforms.len(),
            self.coins.len(),
            self.enemies.len(),
            self.power_ups.len()
        );
        self.level = level;
    }

    /// Apply intent immediately, outside the update cycle (touch controls)
    pub fn handle_input(&mut self, input: &PlayerInput) {
        self.player.handle_input(input);
    }

    /// Advance the simulation by one frame
    pub fn update(&mut self, dt: f32, input: &PlayerInput, events: &mut impl EventSink) {
        let dt = self.clamp_dt(dt);

        // Ground check from the sensor only; last update's flag is ignored
        let grounded = is_grounded(self.player.rect(), &self.platforms);
        if grounded != self.player.grounded() {
            log::debug!("Grounded: {}", grounded);
        }
        self.player.body.grounded = grounded;

        self.player.handle_input(input);
        // Re-read after input: a jump clears the flag so gravity applies this update
        let grounded = self.player.body.grounded;
        physics::integrate(&mut self.player.body, grounded, dt, self.friction);

        let previous = *self.player.rect();
        self.player.update(dt);

        // Each resolution moves the player before the next platform is tested
        for platform in &self.platforms {
            if overlaps(&self.player.body.rect, platform) {
                resolve(&mut self.player.body, &previous, platform);
            }
        }
        self.keep_in_bounds();

        self.collect_coins(dt, events);
        self.update_enemies(dt, events);
        self.collect_power_ups(dt, events);

        let touching = overlaps(self.player.rect(), &self.goal);
        if touching && !self.touching_goal {
            log::debug!("Goal reached on level {}", self.level.number);
            events.emit(GameEvent::LevelComplete);
        }
        self.touching_goal = touching;

        self.camera.follow(self.player.rect(), self.level_size());
    }

    fn clamp_dt(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Ignoring invalid frame delta {}", dt);
            return 0.0;
        }
        if dt > self.max_frame_dt {
            log::warn!("Clamping frame delta {:.3}s to {:.3}s", dt, self.max_frame_dt);
            return self.max_frame_dt;
        }
        dt
    }

    fn keep_in_bounds(&mut self) {
        let body = &mut self.player.body;
        let max_x = self.level.width - body.rect.width;
        if body.rect.x < 0.0 {
            body.rect.x = 0.0;
            body.vel.x = 0.0;
        } else if body.rect.x > max_x {
            body.rect.x = max_x;
            body.vel.x = 0.0;
        }
    }

    fn collect_coins(&mut self, dt: f32, events: &mut impl EventSink) {
        let player = *self.player.rect();
        self.coins.retain_mut(|coin| {
            coin.update(dt);
            if overlaps(&player, &coin.rect) {
                log::debug!("Coin collected at ({}, {})", coin.rect.x, coin.rect.y);
                events.emit(GameEvent::CoinCollected { value: coin.value });
                false
            } else {
                true
            }
        });
    }

    fn update_enemies(&mut self, dt: f32, events: &mut impl EventSink) {
        for enemy in &mut self.enemies {
            enemy.update(dt, &self.platforms);
            if enemy.defeated || !overlaps(self.player.rect(), &enemy.rect) {
                continue;
            }

            if is_stomp(&self.player, &enemy.rect) {
                log::debug!("Stomped enemy at ({}, {})", enemy.rect.x, enemy.rect.y);
                enemy.defeat();
                self.player.bounce();
                events.emit(GameEvent::EnemyDefeated);
            } else if self.player.take_damage() {
                log::debug!("Player hit by enemy at ({}, {})", enemy.rect.x, enemy.rect.y);
                events.emit(GameEvent::EnemyHit);
            }
        }
        self.enemies.retain(|e| !e.defeated);
    }

    fn collect_power_ups(&mut self, dt: f32, events: &mut impl EventSink) {
        let player = &mut self.player;
        self.power_ups.retain_mut(|power_up| {
            power_up.update(dt);
            if overlaps(player.rect(), &power_up.rect) {
                log::debug!("Power-up collected: {:?}", power_up.kind);
                player.apply_power_up(power_up.kind);
                events.emit(GameEvent::PowerUpCollected {
                    kind: power_up.kind,
                });
                false
            } else {
                true
            }
        });
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn is_player_grounded(&self) -> bool {
        self.player.grounded()
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn goal(&self) -> &Rect {
        &self.goal
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn level_number(&self) -> u32 {
        self.level.number
    }

    pub fn level_size(&self) -> Vec2 {
        Vec2::new(self.level.width, self.level.height)
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }
}

/// A falling player whose feet are still in the enemy's top half stomps it
fn is_stomp(player: &Player, enemy: &Rect) -> bool {
    player.vel().y > 0.0 && player.rect().bottom() < enemy.top() + enemy.height / 2.0
}
