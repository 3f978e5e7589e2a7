//! Gravity and ground friction
//!
//! Velocity-only integration. Position is advanced separately, once per
//! update, and only for the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::*;

/// How ground friction scales with frame time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrictionMode {
    /// `vx *= FRICTION` once per update regardless of dt
    #[default]
    PerTick,
    /// `vx *= FRICTION^(dt * 60)`, same deceleration at any frame rate
    FrameRateIndependent,
}

impl FrictionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrictionMode::PerTick => "per-tick",
            FrictionMode::FrameRateIndependent => "frame-rate-independent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "per-tick" | "tick" => Some(FrictionMode::PerTick),
            "frame-rate-independent" | "independent" | "dt" => {
                Some(FrictionMode::FrameRateIndependent)
            }
            _ => None,
        }
    }

    fn factor(&self, dt: f32) -> f32 {
        match self {
            FrictionMode::PerTick => FRICTION,
            FrictionMode::FrameRateIndependent => FRICTION.powf(dt * FRICTION_REFERENCE_HZ),
        }
    }
}

/// Apply gravity (airborne) or friction (grounded) to a body's velocity
pub fn integrate(body: &mut Body, grounded: bool, dt: f32, friction: FrictionMode) {
    if !body.vel.is_finite() {
        log::warn!("Non-finite velocity {:?}, zeroing", body.vel);
        body.vel = Vec2::ZERO;
    }

    if grounded {
        body.vel.x *= friction.factor(dt);
        if body.vel.x.abs() < STOP_EPSILON {
            body.vel.x = 0.0;
        }
    } else {
        body.vel.y = (body.vel.y + GRAVITY * dt).min(TERMINAL_VELOCITY);
    }
}
