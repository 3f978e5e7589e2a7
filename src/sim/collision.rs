//! Collision detection and response for axis-aligned boxes
//!
//! The tricky part of a platformer: deciding whether an overlap is a landing,
//! a side bump or a ceiling bump, then separating the boxes without letting a
//! fast-falling player slip sideways through a platform corner.

use glam::Vec2;

use super::body::{Body, Rect};
use crate::consts::*;

/// How a resolution separated the body from a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Pushed up onto the platform's top surface
    Landed,
    /// Pushed down below the platform (head bump)
    HitCeiling,
    /// Pushed out past the platform's left edge
    PushedLeft,
    /// Pushed out past the platform's right edge
    PushedRight,
}

/// Strict AABB overlap. Touching edges do not count.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Thin sensor strip directly under a box's feet
pub fn foot_sensor(rect: &Rect) -> Rect {
    Rect::new(
        rect.x + GROUND_SENSOR_INSET,
        rect.bottom(),
        rect.width - 2.0 * GROUND_SENSOR_INSET,
        GROUND_SENSOR_HEIGHT,
    )
}

/// True if the foot sensor touches any platform
pub fn is_grounded(rect: &Rect, platforms: &[Rect]) -> bool {
    let sensor = foot_sensor(rect);
    platforms.iter().any(|platform| overlaps(&sensor, platform))
}

/// Per-axis translation needed to separate two overlapping boxes
pub fn overlap_depths(a: &Rect, b: &Rect) -> Vec2 {
    Vec2::new(
        (a.right() - b.left()).min(b.right() - a.left()),
        (a.bottom() - b.top()).min(b.bottom() - a.top()),
    )
}

/// Separate `body` from `platform`. Call only when the two overlap.
///
/// `previous` is the body's box before this update's position integration.
/// A body moving down whose previous bottom was at or above the platform top
/// always lands, whatever the overlap depths say. Otherwise the body is pushed
/// out along the shallower axis, vertical winning ties.
pub fn resolve(body: &mut Body, previous: &Rect, platform: &Rect) -> Resolution {
    if !body.rect.is_finite() {
        log::warn!("Non-finite body {:?} during resolve, snapping to platform", body.rect);
        if !body.rect.x.is_finite() {
            body.rect.x = platform.x;
        }
        return land(body, platform);
    }

    if body.vel.y > 0.0 && previous.bottom() <= platform.top() {
        return land(body, platform);
    }

    // Fully embedded (teleport/reset): no meaningful nearest side
    if platform.contains(&body.rect) {
        return land(body, platform);
    }

    let depth = overlap_depths(&body.rect, platform);
    if !depth.is_finite() {
        return land(body, platform);
    }

    let a = body.rect;
    if depth.x < depth.y {
        body.vel.x = 0.0;
        if a.right() - platform.left() <= platform.right() - a.left() {
            body.rect.x = platform.left() - a.width;
            Resolution::PushedLeft
        } else {
            body.rect.x = platform.right();
            Resolution::PushedRight
        }
    } else if a.bottom() - platform.top() <= platform.bottom() - a.top() {
        land(body, platform)
    } else {
        body.rect.y = platform.bottom();
        body.vel.y = 0.0;
        Resolution::HitCeiling
    }
}

fn land(body: &mut Body, platform: &Rect) -> Resolution {
    body.rect.y = platform.top() - body.rect.height;
    body.vel.y = 0.0;
    body.grounded = true;
    Resolution::Landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player_at(x: f32, y: f32, vx: f32, vy: f32) -> Body {
        let mut body = Body::new(Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT));
        body.vel = Vec2::new(vx, vy);
        body
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(overlaps(&a, &Rect::new(9.5, 9.5, 10.0, 10.0)));
    }

    #[test]
    fn test_grounded_sensor() {
        let platform = Rect::new(0.0, 400.0, 200.0, 30.0);
        // Resting exactly on top
        let resting = Rect::new(50.0, 352.0, 32.0, 48.0);
        assert!(is_grounded(&resting, &[platform]));
        // 3px above
        let hovering = Rect::new(50.0, 349.0, 32.0, 48.0);
        assert!(!is_grounded(&hovering, &[platform]));
        // Only the 2px inset corner hangs over the edge
        let overhang = Rect::new(-30.5, 352.0, 32.0, 48.0);
        assert!(!is_grounded(&overhang, &[platform]));
    }

    #[test]
    fn test_ground_snap_idempotent() {
        let platform = Rect::new(0.0, 400.0, 200.0, 30.0);
        let mut body = player_at(50.0, 352.0, 0.0, 0.0);
        let previous = body.rect;
        let result = resolve(&mut body, &previous, &platform);
        assert_eq!(result, Resolution::Landed);
        assert_eq!(body.rect.y, 352.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_landing_priority_beats_shallow_side_overlap() {
        // Falling onto the right corner: the horizontal overlap (2px) is
        // shallower than the vertical one, but the player came from above.
        let platform = Rect::new(0.0, 400.0, 200.0, 30.0);
        let previous = Rect::new(198.0, 340.0, 32.0, 48.0);
        let mut body = player_at(198.0, 360.0, 0.0, 400.0);
        let result = resolve(&mut body, &previous, &platform);
        assert_eq!(result, Resolution::Landed);
        assert_eq!(body.rect.y, 352.0);
        assert_eq!(body.rect.x, 198.0);
        assert!(body.grounded);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_side_bump() {
        // Walking right into a wall
        let wall = Rect::new(100.0, 300.0, 50.0, 200.0);
        let previous = Rect::new(65.0, 350.0, 32.0, 48.0);
        let mut body = player_at(70.0, 350.0, 200.0, 0.0);
        let result = resolve(&mut body, &previous, &wall);
        assert_eq!(result, Resolution::PushedLeft);
        assert_eq!(body.rect.x, 68.0);
        assert_eq!(body.vel.x, 0.0);
        assert!(!body.grounded);

        // Walking left into it from the other side
        let previous = Rect::new(152.0, 350.0, 32.0, 48.0);
        let mut body = player_at(147.0, 350.0, -200.0, 0.0);
        let result = resolve(&mut body, &previous, &wall);
        assert_eq!(result, Resolution::PushedRight);
        assert_eq!(body.rect.x, 150.0);
    }

    #[test]
    fn test_ceiling_bump() {
        let platform = Rect::new(0.0, 300.0, 200.0, 30.0);
        let previous = Rect::new(50.0, 335.0, 32.0, 48.0);
        let mut body = player_at(50.0, 325.0, 0.0, -400.0);
        let result = resolve(&mut body, &previous, &platform);
        assert_eq!(result, Resolution::HitCeiling);
        assert_eq!(body.rect.y, 330.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(!body.grounded);
    }

    #[test]
    fn test_contained_body_pushed_up() {
        let platform = Rect::new(0.0, 400.0, 200.0, 100.0);
        let mut body = player_at(50.0, 420.0, 0.0, 0.0);
        let previous = body.rect;
        let result = resolve(&mut body, &previous, &platform);
        assert_eq!(result, Resolution::Landed);
        assert_eq!(body.rect.y, 352.0);
        assert!(body.rect.is_finite());
    }

    #[test]
    fn test_nan_position_does_not_propagate() {
        let platform = Rect::new(0.0, 400.0, 200.0, 30.0);
        let mut body = player_at(f32::NAN, f32::NAN, 0.0, 0.0);
        let previous = body.rect;
        resolve(&mut body, &previous, &platform);
        assert!(body.rect.is_finite());
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-500i32..500, -500i32..500, 1i32..300, 1i32..300)
            .prop_map(|(x, y, w, h)| Rect::new(x as f32, y as f32, w as f32, h as f32))
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_resolve_separates(
            platform in arb_rect(),
            (w, h) in (1i32..300, 1i32..300),
            (ox, oy) in (0i32..10_000, 0i32..10_000),
            vx in -400i32..400,
            vy in -600i32..600,
        ) {
            // Place the player somewhere it overlaps the platform
            let (px, py) = (platform.x as i32, platform.y as i32);
            let x = px - w + 1 + ox % (platform.width as i32 + w - 1);
            let y = py - h + 1 + oy % (platform.height as i32 + h - 1);
            let player = Rect::new(x as f32, y as f32, w as f32, h as f32);
            prop_assert!(overlaps(&player, &platform));

            let mut body = Body::new(player);
            body.vel = Vec2::new(vx as f32, vy as f32);
            // Previous box coincides with current: no landing shortcut
            resolve(&mut body, &player, &platform);
            prop_assert!(body.rect.is_finite());
            prop_assert!(body.vel.is_finite());
            prop_assert!(!overlaps(&body.rect, &platform));
        }
    }
}
