//! Patrolling enemies

use serde::{Deserialize, Serialize};

use super::body::Rect;
use crate::consts::*;

/// Seconds per enemy animation frame
const FRAME_DURATION: f32 = 0.15;
const FRAME_COUNT: u8 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub patrol_speed: f32,
    /// -1 = left, +1 = right
    pub patrol_direction: f32,
    pub patrol_origin_x: f32,
    pub patrol_range: f32,
    pub defeated: bool,
    /// Animation frame index (0..4), render only
    pub frame: u8,
    frame_timer: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, speed: f32, patrol_range: f32) -> Self {
        Self {
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            patrol_speed: speed,
            patrol_direction: 1.0,
            patrol_origin_x: x,
            patrol_range,
            defeated: false,
            frame: 0,
            frame_timer: 0.0,
        }
    }

    /// Walk the patrol, turning at range limits and at ledges
    pub fn update(&mut self, dt: f32, platforms: &[Rect]) {
        if self.defeated {
            return;
        }

        self.frame_timer += dt;
        if self.frame_timer >= FRAME_DURATION {
            self.frame_timer = 0.0;
            self.frame = (self.frame + 1) % FRAME_COUNT;
        }

        self.rect.x += self.patrol_direction * self.patrol_speed * dt;

        if self.patrol_direction > 0.0 && self.rect.x > self.patrol_origin_x + self.patrol_range {
            self.patrol_direction = -1.0;
        } else if self.patrol_direction < 0.0 && self.rect.x < self.patrol_origin_x {
            self.patrol_direction = 1.0;
        }

        if !self.has_ground_ahead(platforms) {
            self.patrol_direction = -self.patrol_direction;
        }
    }

    /// Is there a platform under the look-ahead point in the direction of travel?
    pub fn has_ground_ahead(&self, platforms: &[Rect]) -> bool {
        let look_ahead_x =
            self.rect.x + self.patrol_direction * (self.rect.width / 2.0 + LEDGE_LOOKAHEAD_MARGIN);
        let feet_y = self.rect.bottom();

        platforms.iter().any(|p| {
            look_ahead_x >= p.left()
                && look_ahead_x <= p.right()
                && feet_y <= p.top()
                && feet_y + LEDGE_TOLERANCE >= p.top()
        })
    }

    pub fn defeat(&mut self) {
        self.defeated = true;
    }
}
