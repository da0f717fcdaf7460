//! Planar geometry helpers.
//!
//! The play field is the x/y plane.  A heading `a` (radians) points along
//! `(sin a, cos a)`, so `a = 0` faces +y and increasing `a` turns left.

use bevy::math::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Unit vector for heading `angle`.
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), angle.cos())
}

/// Unit vector perpendicular to `angle`, on the left for `side = 1.0` and on
/// the right for `side = -1.0`.
#[inline]
pub fn lateral_vector(angle: f32, side: f32) -> Vec2 {
    heading_vector(angle + FRAC_PI_2 * side)
}

/// Rotate a ship-space offset (`x` lateral, `y` forward) into world space.
#[inline]
pub fn ship_to_world(offset: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(offset.x * c + offset.y * s, -offset.x * s + offset.y * c)
}

/// Torus wrap: a coordinate past `+bounds` re-enters at `-bounds` and vice versa.
///
/// Only the crossing edge teleports; values inside the box are untouched.
#[inline]
pub fn wrap_coord(v: f32, bounds: f32) -> f32 {
    if v > bounds {
        -bounds
    } else if v < -bounds {
        bounds
    } else {
        v
    }
}

#[inline]
pub fn wrap_position(p: Vec2, bounds: f32) -> Vec2 {
    Vec2::new(wrap_coord(p.x, bounds), wrap_coord(p.y, bounds))
}

/// Cubic ease-out on `t ∈ [0, 1]`.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn zero_heading_faces_positive_y() {
        assert!(approx(heading_vector(0.0), Vec2::Y));
    }

    #[test]
    fn quarter_turn_left_faces_positive_x() {
        assert!(approx(heading_vector(FRAC_PI_2), Vec2::X));
    }

    #[test]
    fn lateral_left_and_right_are_opposite() {
        let a = 0.7;
        let l = lateral_vector(a, 1.0);
        let r = lateral_vector(a, -1.0);
        assert!(approx(l, -r));
        assert!(l.dot(heading_vector(a)).abs() < 1e-5, "lateral must be perpendicular");
    }

    #[test]
    fn ship_space_behind_maps_opposite_heading() {
        let a = 1.1;
        let behind = ship_to_world(Vec2::new(0.0, -3.5), a);
        assert!(approx(behind, -heading_vector(a) * 3.5));
    }

    #[test]
    fn wrap_teleports_only_past_edge() {
        assert_eq!(wrap_coord(120.5, 120.0), -120.0);
        assert_eq!(wrap_coord(-121.0, 120.0), 120.0);
        assert_eq!(wrap_coord(119.0, 120.0), 119.0);
        assert_eq!(wrap_coord(120.0, 120.0), 120.0);
    }

    #[test]
    fn ease_out_cubic_endpoints_and_clamp() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5, "ease-out front-loads progress");
    }
}
