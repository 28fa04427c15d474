//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes in from the caller
//! - Seeded RNG only
//! - Stable iteration order (list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod geometry;
pub mod spatial;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, check_collisions, collided_with};
pub use entity::{Asteroid, AsteroidSize, Body, Breakup, Fragment, Ship, Sprite, Torpedo};
pub use geometry::{Outline, Playfield, Velocity, sum_angles, sum_velocities};
pub use spatial::{CellKey, SpatialHash};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
