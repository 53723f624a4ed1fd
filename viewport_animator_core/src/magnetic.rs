// Copyright 2026 the Viewport Animator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Magnetic hover for buttons.

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Rect, Vec2};

/// Translation pulling a button toward the pointer: the pointer's offset from
/// the button's center, scaled by `damping`.
#[must_use]
pub fn magnetic_pull(pointer: Point, bounds: Rect, damping: f64) -> Vec2 {
    (pointer - bounds.center()) * damping
}

/// CSS `transform` for a 2D translation in pixels.
#[must_use]
pub fn translate(v: Vec2) -> String {
    format!("translate({}px, {}px)", v.x, v.y)
}

/// CSS `transform` for the resting position.
pub const REST: &str = "translate(0px, 0px)";

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        let d = a - b;
        d.hypot2() < 1e-18
    }

    #[test]
    fn pull_is_damped_offset_from_center() {
        let bounds = Rect::new(100.0, 100.0, 200.0, 140.0);
        // Center is (150, 120); pointer 40 right and 20 below.
        let v = magnetic_pull(Point::new(190.0, 140.0), bounds, 0.15);
        assert!(close(v, Vec2::new(6.0, 3.0)), "got {v:?}");
    }

    #[test]
    fn pointer_at_center_means_no_pull() {
        let bounds = Rect::new(0.0, 0.0, 80.0, 40.0);
        let v = magnetic_pull(Point::new(40.0, 20.0), bounds, 0.15);
        assert_eq!(v, Vec2::ZERO);
        assert_eq!(translate(v), REST);
    }

    #[test]
    fn pull_points_toward_pointer() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let v = magnetic_pull(Point::new(0.0, 0.0), bounds, 0.15);
        assert!(v.x < 0.0 && v.y < 0.0);
    }
}
