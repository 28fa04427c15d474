//! Outline transforms and polar kinematics
//!
//! Outlines are closed polygons already placed in world coordinates. Every
//! transform returns a new outline; callers re-derive the outline whenever the
//! owning body moves or turns.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{cartesian_to_polar, modulo, normalize_angle, polar_to_cartesian};

/// Closed polygon in world coordinates
pub type Outline = Vec<Vec2>;

/// Rotate every point by `angle` radians about `origin`
pub fn rotate(outline: &[Vec2], angle: f32, origin: Vec2) -> Outline {
    let (sin, cos) = angle.sin_cos();
    outline
        .iter()
        .map(|&p| {
            let d = p - origin;
            Vec2::new(origin.x + d.x * cos - d.y * sin, origin.y + d.x * sin + d.y * cos)
        })
        .collect()
}

/// Uniform scale about `origin`
pub fn scale(outline: &[Vec2], factor: f32, origin: Vec2) -> Outline {
    outline.iter().map(|&p| (p - origin) * factor + origin).collect()
}

/// Offset every point by `delta`
pub fn translate(outline: &[Vec2], delta: Vec2) -> Outline {
    outline.iter().map(|&p| p + delta).collect()
}

/// Sum two angles, result in [0, 2π)
#[inline]
pub fn sum_angles(a: f32, b: f32) -> f32 {
    normalize_angle(a + b)
}

/// Velocity in polar form
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Pixels per second, never negative
    pub speed: f32,
    /// Heading in radians, [0, 2π)
    pub angle: f32,
}

impl Velocity {
    pub fn new(speed: f32, angle: f32) -> Self {
        Self {
            speed,
            angle: normalize_angle(angle),
        }
    }

    /// Cartesian form
    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        polar_to_cartesian(self.speed, self.angle)
    }

    /// Polar form of a cartesian vector
    pub fn from_vec2(v: Vec2) -> Self {
        let (speed, angle) = cartesian_to_polar(v);
        Self::new(speed, angle)
    }
}

/// Compose two velocities (e.g. ship drift plus thrust, or ship plus muzzle)
pub fn sum_velocities(v1: Velocity, v2: Velocity) -> Velocity {
    Velocity::from_vec2(v1.to_vec2() + v2.to_vec2())
}

/// The rectangular, toroidal play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_WIDTH, crate::consts::DEFAULT_HEIGHT)
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "playfield must have positive size");
        Self { width, height }
    }

    /// Wrap a point into [0, width) × [0, height), each axis independently
    #[inline]
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        Vec2::new(modulo(p.x, self.width), modulo(p.y, self.height))
    }

    /// Shortest displacement from `from` to `to` across the torus
    pub fn shortest_delta(&self, from: Vec2, to: Vec2) -> Vec2 {
        let mut d = to - from;
        if d.x > self.width / 2.0 {
            d.x -= self.width;
        } else if d.x < -self.width / 2.0 {
            d.x += self.width;
        }
        if d.y > self.height / 2.0 {
            d.y -= self.height;
        } else if d.y < -self.height / 2.0 {
            d.y += self.height;
        }
        d
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 0.001
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let out = rotate(&[Vec2::new(2.0, 1.0)], FRAC_PI_2, Vec2::new(1.0, 1.0));
        assert!(close(out[0], Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_scale_about_origin() {
        let out = scale(&[Vec2::new(2.0, 2.0)], 3.0, Vec2::new(1.0, 1.0));
        assert!(close(out[0], Vec2::new(4.0, 4.0)));
    }

    #[test]
    fn test_translate() {
        let out = translate(&[Vec2::ZERO, Vec2::ONE], Vec2::new(5.0, -1.0));
        assert!(close(out[0], Vec2::new(5.0, -1.0)));
        assert!(close(out[1], Vec2::new(6.0, 0.0)));
    }

    #[test]
    fn test_sum_angles_wraps() {
        assert!((sum_angles(PI * 1.5, PI) - PI * 0.5).abs() < 0.0001);
        assert!((sum_angles(0.0, -PI / 4.0) - PI * 1.75).abs() < 0.0001);
    }

    #[test]
    fn test_colinear_velocity_sum() {
        let ship = Velocity::new(100.0, 0.0);
        let muzzle = Velocity::new(256.0, 0.0);
        let v = sum_velocities(ship, muzzle);
        assert!((v.speed - 356.0).abs() < 0.001);
        assert!(v.angle.abs() < 0.0001);
    }

    #[test]
    fn test_opposing_velocities_cancel() {
        let v = sum_velocities(Velocity::new(50.0, 0.0), Velocity::new(50.0, PI));
        assert!(v.speed < 0.001);
    }

    #[test]
    fn test_shortest_delta_across_edge() {
        let field = Playfield::new(800.0, 600.0);
        let d = field.shortest_delta(Vec2::new(795.0, 5.0), Vec2::new(5.0, 595.0));
        assert!(close(d, Vec2::new(10.0, -10.0)));
    }

    proptest! {
        #[test]
        fn sum_angles_in_range(a in -1.0e4f32..1.0e4, b in -1.0e4f32..1.0e4) {
            let s = sum_angles(a, b);
            prop_assert!(s >= 0.0);
            prop_assert!(s < TAU);
        }

        #[test]
        fn wrap_stays_in_bounds(x in -1.0e5f32..1.0e5, y in -1.0e5f32..1.0e5) {
            let field = Playfield::new(800.0, 600.0);
            let p = field.wrap(Vec2::new(x, y));
            prop_assert!(p.x >= 0.0 && p.x < 800.0);
            prop_assert!(p.y >= 0.0 && p.y < 600.0);
        }

        #[test]
        fn velocity_sum_speed_non_negative(
            s1 in 0.0f32..1000.0, a1 in 0.0f32..TAU,
            s2 in 0.0f32..1000.0, a2 in 0.0f32..TAU,
        ) {
            let v = sum_velocities(Velocity::new(s1, a1), Velocity::new(s2, a2));
            prop_assert!(v.speed >= 0.0);
            prop_assert!(v.angle >= 0.0 && v.angle < TAU);
        }
    }
}
