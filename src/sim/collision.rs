//! Collision detection and resolution
//!
//! Broad phase: the asteroid list is bucketed into a [`SpatialHash`] every
//! tick, and torpedoes and the ship only test asteroids sharing a cell.
//! Narrow phase: bounding circles overlap (touching counts).

use super::entity::{Body, Breakup};
use super::geometry::Playfield;
use super::spatial::SpatialHash;
use super::state::{GameEvent, GameState};
use crate::consts::SPATIAL_CELL_SIZE;

/// Outcome of one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub asteroids_destroyed: u32,
    pub ship_destroyed: bool,
}

/// Circle-circle overlap, measured the short way round the torus
///
/// Boundary inclusive: circles exactly touching collide.
#[inline]
pub fn collided_with(a: &Body, b: &Body, field: &Playfield) -> bool {
    let d = field.shortest_delta(a.position, b.position);
    let reach = a.radius + b.radius;
    reach * reach >= d.length_squared()
}

/// Resolve torpedo and ship hits against asteroids for this tick
///
/// Each torpedo destroys at most the first asteroid it touches and is spent.
/// The ship is destroyed by the first asteroid it touches. Asteroids destroyed
/// earlier in the pass can't be hit again, and pieces split off this tick join
/// the field only after the pass.
pub fn check_collisions(state: &mut GameState) -> CollisionReport {
    let field = state.playfield;
    let hash = SpatialHash::from_bodies(
        SPATIAL_CELL_SIZE,
        field,
        state.asteroids.iter().map(|a| &a.body),
    );
    let mut destroyed = vec![false; state.asteroids.len()];
    let mut spawned = Vec::new();
    let mut report = CollisionReport::default();

    // Torpedo pass
    let torpedoes = std::mem::take(&mut state.torpedoes);
    for torpedo in torpedoes {
        let hit = hash.candidates(&torpedo.body).find(|&i| {
            !destroyed[i] && collided_with(&torpedo.body, &state.asteroids[i].body, &field)
        });
        let Some(i) = hit else {
            state.torpedoes.push(torpedo);
            continue;
        };

        destroyed[i] = true;
        report.asteroids_destroyed += 1;
        let asteroid = &state.asteroids[i];
        let position = asteroid.body.position;
        state.score += asteroid.size.score();
        match asteroid.destroy(&mut state.rng) {
            Breakup::Split(pieces) => {
                state.events.push(GameEvent::AsteroidSplit {
                    size: asteroid.size,
                    position,
                });
                spawned.extend(pieces);
            }
            Breakup::Explode(fragments) => {
                state.events.push(GameEvent::AsteroidExploded { position });
                state.fragments.extend(fragments);
            }
        }
    }

    // Ship pass
    let ship_hit = state.ship.as_ref().is_some_and(|ship| {
        hash.candidates(&ship.body)
            .any(|i| !destroyed[i] && collided_with(&ship.body, &state.asteroids[i].body, &field))
    });
    if let Some(ship) = state.ship.take_if(|_| ship_hit) {
        state.lives -= 1;
        log::debug!("Ship destroyed at {:?}, {} lives left", ship.body.position, state.lives);
        state.fragments.extend(ship.explode(&mut state.rng));
        state.events.push(GameEvent::ShipDestroyed {
            position: ship.body.position,
        });
        report.ship_destroyed = true;
    }

    // Compact, then let the new pieces in
    let mut index = 0;
    state.asteroids.retain(|_| {
        let keep = !destroyed[index];
        index += 1;
        keep
    });
    state.asteroids.extend(spawned);

    report
}
