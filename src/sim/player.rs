//! The player-controlled body and its locomotion/damage/boost state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Rect};
use crate::consts::*;

/// Intent flags for one update, from keyboard or touch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Velocity-derived movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locomotion {
    Idle,
    Running,
    Jumping,
    Falling,
}

/// What the host should draw: locomotion, or `Damaged` while invulnerable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Idle,
    Running,
    Jumping,
    Falling,
    Damaged,
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    Speed,
    Jump,
}

/// Slack for float accumulation when a window reaches its duration
const TIMER_EPSILON: f32 = 1e-4;

/// Seconds per player animation frame
const FRAME_DURATION: f32 = 0.1;
const FRAME_COUNT: u8 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    /// Current horizontal speed (boosted while a Speed power-up is active)
    pub move_speed: f32,
    /// Current jump impulse (boosted while a Jump power-up is active)
    pub jump_force: f32,
    pub invulnerable: bool,
    pub invulnerability_elapsed: f32,
    pub active_boost: Option<PowerUpKind>,
    pub boost_elapsed: f32,
    /// Animation frame index (0..4), render only
    pub frame: u8,
    frame_timer: f32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT)),
            facing: Facing::Right,
            move_speed: BASE_MOVE_SPEED,
            jump_force: BASE_JUMP_FORCE,
            invulnerable: false,
            invulnerability_elapsed: 0.0,
            active_boost: None,
            boost_elapsed: 0.0,
            frame: 0,
            frame_timer: 0.0,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn vel(&self) -> Vec2 {
        self.body.vel
    }

    pub fn grounded(&self) -> bool {
        self.body.grounded
    }

    /// Set horizontal velocity from held direction and start a jump if grounded.
    ///
    /// Both directions held resolves to right (last write wins).
    pub fn handle_input(&mut self, input: &PlayerInput) {
        self.body.vel.x = 0.0;
        if input.left {
            self.body.vel.x = -self.move_speed;
        }
        if input.right {
            self.body.vel.x = self.move_speed;
        }

        if input.jump && self.body.grounded {
            self.body.vel.y = -self.jump_force;
            self.body.grounded = false;
        }
    }

    /// Start the invulnerability window and knock the player back.
    /// Returns false (and does nothing) if already invulnerable.
    pub fn take_damage(&mut self) -> bool {
        if self.invulnerable {
            return false;
        }
        self.invulnerable = true;
        self.invulnerability_elapsed = 0.0;
        self.body.vel.y = -KNOCKBACK_UP;
        self.body.vel.x = -self.facing.sign() * KNOCKBACK_SIDE;
        true
    }

    /// Upward bounce after stomping an enemy
    pub fn bounce(&mut self) {
        self.body.vel.y = -self.jump_force * BOUNCE_FACTOR;
    }

    /// Replace any active boost with `kind` and restart its timer
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        self.move_speed = BASE_MOVE_SPEED;
        self.jump_force = BASE_JUMP_FORCE;
        match kind {
            PowerUpKind::Speed => self.move_speed = BOOSTED_MOVE_SPEED,
            PowerUpKind::Jump => self.jump_force = BOOSTED_JUMP_FORCE,
        }
        self.active_boost = Some(kind);
        self.boost_elapsed = 0.0;
    }

    /// Advance position, timers, facing and animation by `dt`
    pub fn update(&mut self, dt: f32) {
        self.body.integrate_position(dt);
        self.advance_timers(dt);

        if self.body.vel.x > 0.0 {
            self.facing = Facing::Right;
        } else if self.body.vel.x < 0.0 {
            self.facing = Facing::Left;
        }

        self.frame_timer += dt;
        if self.frame_timer >= FRAME_DURATION {
            self.frame_timer = 0.0;
            self.frame = (self.frame + 1) % FRAME_COUNT;
        }
    }

    /// Tick the invulnerability and boost windows, reverting stats on expiry
    pub fn advance_timers(&mut self, dt: f32) {
        if self.invulnerable {
            self.invulnerability_elapsed += dt;
            if self.invulnerability_elapsed >= INVULNERABILITY_DURATION - TIMER_EPSILON {
                self.invulnerable = false;
                self.invulnerability_elapsed = 0.0;
            }
        }

        if self.active_boost.is_some() {
            self.boost_elapsed += dt;
            if self.boost_elapsed >= BOOST_DURATION - TIMER_EPSILON {
                self.clear_boost();
            }
        }
    }

    fn clear_boost(&mut self) {
        self.active_boost = None;
        self.boost_elapsed = 0.0;
        self.move_speed = BASE_MOVE_SPEED;
        self.jump_force = BASE_JUMP_FORCE;
    }

    /// Locomotion derived from velocity alone
    pub fn locomotion(&self) -> Locomotion {
        let vel = self.body.vel;
        if vel.y < 0.0 {
            Locomotion::Jumping
        } else if vel.y > 0.0 {
            Locomotion::Falling
        } else if vel.x.abs() > 0.0 {
            Locomotion::Running
        } else {
            Locomotion::Idle
        }
    }

    /// Display state: `Damaged` overlays locomotion for the whole invulnerability window
    pub fn state(&self) -> PlayerState {
        if self.invulnerable {
            return PlayerState::Damaged;
        }
        match self.locomotion() {
            Locomotion::Idle => PlayerState::Idle,
            Locomotion::Running => PlayerState::Running,
            Locomotion::Jumping => PlayerState::Jumping,
            Locomotion::Falling => PlayerState::Falling,
        }
    }

    /// Blink phase for the invulnerability effect (true = draw dimmed)
    pub fn blink_dimmed(&self) -> bool {
        self.invulnerable && ((self.invulnerability_elapsed * 10.0).floor() as i32) % 2 == 0
    }

    /// Reposition at (x, y) with a clean slate: no velocity, invulnerability or boost
    pub fn reset(&mut self, x: f32, y: f32) {
        self.body.place(x, y);
        self.body.vel = Vec2::ZERO;
        self.body.grounded = false;
        self.invulnerable = false;
        self.invulnerability_elapsed = 0.0;
        self.clear_boost();
        self.frame = 0;
        self.frame_timer = 0.0;
    }
}
