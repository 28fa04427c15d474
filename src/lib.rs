//! Minor Planets - A wraparound asteroid-field arcade game
//!
//! Core modules:
//! - `sim`: Simulation (kinematics, spatial hash, collisions, game state)
//! - `game`: Frame driver wiring the simulation to its collaborators
//! - `renderer`: Drawing surface abstraction and wraparound copies
//! - `audio`: Sound effect dispatch
//! - `platform`: Clock and input adapters
//! - `settings`: Runtime configuration

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 16.0;
    /// Thrust acceleration (pixels/s²)
    pub const SHIP_ACCELERATION: f32 = 512.0;
    /// Linear drag when not thrusting (pixels/s²)
    pub const SHIP_DRAG: f32 = 512.0;
    pub const SHIP_MAX_SPEED: f32 = 512.0;
    /// Angular acceleration while spinning (radians/s²)
    pub const SHIP_ANGULAR_ACCEL: f32 = PI * 4.0;
    /// Angular drag when not spinning; infinite means the spin stops dead
    pub const SHIP_ANGULAR_DRAG: f32 = f32::INFINITY;
    pub const SHIP_MAX_ANGULAR_SPEED: f32 = PI * 2.0;
    /// Ship points up at spawn
    pub const SHIP_INITIAL_ORIENTATION: f32 = -PI / 2.0;
    /// Seconds between torpedoes
    pub const SHIP_TORPEDO_COOLDOWN: f32 = 0.2;
    pub const SHIP_MIN_FRAGMENTS: u32 = 50;
    pub const SHIP_MAX_FRAGMENTS: u32 = 60;

    /// Torpedo defaults
    pub const TORPEDO_RADIUS: f32 = 1.0;
    pub const TORPEDO_SPEED: f32 = 256.0;
    pub const TORPEDO_TIME_TO_LIVE: f32 = 1.0;

    /// Fragment defaults
    pub const FRAGMENT_RADIUS: f32 = 2.0;
    pub const FRAGMENT_SPEED: f32 = 128.0;
    pub const FRAGMENT_TIME_TO_LIVE: f32 = 2.0;

    /// Asteroid defaults
    pub const ASTEROID_BASE_QTY: u32 = 4;
    pub const ASTEROID_MAX_ANGULAR_SPEED: f32 = PI;
    pub const ASTEROID_MIN_VERTICES: u32 = 6;
    pub const ASTEROID_MAX_VERTICES: u32 = 12;
    pub const ASTEROID_MIN_FRAGMENTS: u32 = 10;
    pub const ASTEROID_MAX_FRAGMENTS: u32 = 15;

    /// Scoring and lives
    pub const STARTING_LIVES: i32 = 3;
    pub const MAX_LIVES: i32 = 12;
    /// A new life every this many points
    pub const NEW_LIFE_SCORE: u64 = 10_000;

    /// Seconds the game-over screen is held before returning to the title
    pub const GAME_OVER_DURATION: f32 = 30.0;

    /// Spatial hash cell size
    pub const SPATIAL_CELL_SIZE: f32 = SHIP_RADIUS * 4.0;

    /// Default playfield dimensions
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;
}

/// True modulo: result has the sign of `m`, unlike `%`
#[inline]
pub fn modulo(n: f32, m: f32) -> f32 {
    let r = n.rem_euclid(m);
    // rem_euclid can round up to exactly `m` for tiny negative inputs
    if r >= m { 0.0 } else { r }
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    modulo(angle, std::f32::consts::TAU)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn test_modulo_negative() {
        assert!((modulo(-10.0, 800.0) - 790.0).abs() < 0.001);
        assert!((modulo(810.0, 800.0) - 10.0).abs() < 0.001);
        assert_eq!(modulo(-1e-9, TAU), 0.0);
    }

    #[test]
    fn test_polar_round_trip() {
        let p = polar_to_cartesian(10.0, 1.0);
        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 10.0).abs() < 0.001);
        assert!((theta - 1.0).abs() < 0.001);
    }
}
