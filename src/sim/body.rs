//! Axis-aligned boxes and kinematic bodies
//!
//! Screen-space convention: top-left origin, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box. Also the persisted shape for platforms and goals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// True if `other` lies entirely within this box (edges inclusive)
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// A moving box: position/size plus velocity (pixels/second)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
    pub vel: Vec2,
    pub grounded: bool,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            vel: Vec2::ZERO,
            grounded: false,
        }
    }

    /// Advance position by velocity
    pub fn integrate_position(&mut self, dt: f32) {
        self.rect.x += self.vel.x * dt;
        self.rect.y += self.vel.y * dt;
    }

    /// Move to (x, y), keeping size
    pub fn place(&mut self, x: f32, y: f32) {
        self.rect.x = x;
        self.rect.y = y;
    }
}
