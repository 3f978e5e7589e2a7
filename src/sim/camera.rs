//! Side-scrolling camera that trails the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Rect;

/// Top-left corner of the visible window in world space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    pub viewport: Vec2,
    /// Fraction of the remaining distance covered per update (1.0 = instant)
    pub smoothing: f32,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32, smoothing: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            viewport: Vec2::new(viewport_width, viewport_height),
            smoothing,
        }
    }

    /// Ease toward centering `target`, then clamp inside the level
    pub fn follow(&mut self, target: &Rect, level_size: Vec2) {
        let goal = self.centered_on(target);
        self.pos += (goal - self.pos) * self.smoothing;
        self.clamp(level_size);
    }

    /// Jump straight to centering `target` (level load/reset)
    pub fn snap_to(&mut self, target: &Rect, level_size: Vec2) {
        self.pos = self.centered_on(target);
        self.clamp(level_size);
    }

    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.viewport = Vec2::new(viewport_width, viewport_height);
    }

    fn centered_on(&self, target: &Rect) -> Vec2 {
        target.center() - self.viewport / 2.0
    }

    // Levels smaller than the viewport pin to the origin
    fn clamp(&mut self, level_size: Vec2) {
        let max = level_size - self.viewport;
        self.pos = self.pos.min(max).max(Vec2::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: Vec2 = Vec2::new(2000.0, 600.0);

    #[test]
    fn test_follow_is_smoothed() {
        let mut camera = Camera::new(800.0, 600.0, 0.1);
        let target = Rect::new(1000.0, 300.0, 32.0, 48.0);
        camera.follow(&target, LEVEL);
        // goal x = 1016 - 400 = 616, 10% of the way
        assert!((camera.pos.x - 61.6).abs() < 1e-3);
        assert_eq!(camera.pos.y, 0.0);
    }

    #[test]
    fn test_clamped_to_level() {
        let mut camera = Camera::new(800.0, 600.0, 1.0);
        camera.follow(&Rect::new(1990.0, 0.0, 32.0, 48.0), LEVEL);
        assert_eq!(camera.pos.x, 1200.0);
        camera.follow(&Rect::new(-100.0, 0.0, 32.0, 48.0), LEVEL);
        assert_eq!(camera.pos.x, 0.0);
    }

    #[test]
    fn test_small_level_pins_to_origin() {
        let mut camera = Camera::new(800.0, 600.0, 1.0);
        camera.snap_to(&Rect::new(300.0, 100.0, 32.0, 48.0), Vec2::new(500.0, 400.0));
        assert_eq!(camera.pos, Vec2::ZERO);
    }

    #[test]
    fn test_snap() {
        let mut camera = Camera::new(800.0, 600.0, 0.1);
        camera.snap_to(&Rect::new(884.0, 276.0, 32.0, 48.0), LEVEL);
        assert_eq!(camera.pos, Vec2::new(500.0, 0.0));
    }
}
