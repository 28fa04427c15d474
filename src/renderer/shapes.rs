//! Shape generation for outline rendering

use glam::Vec2;

use crate::consts::{SHIP_INITIAL_ORIENTATION, SHIP_RADIUS};
use crate::sim::entity::SHIP_MODEL;
use crate::sim::geometry::{Outline, Playfield, rotate, scale, translate};

/// Horizontal spacing of life icons on the scoreboard
pub const LIFE_ICON_SPACING: f32 = 32.0;

/// Offsets at which a shape must be drawn so it shows on both sides of a seam
///
/// Always starts with the zero offset. A shape poking over one edge gets one
/// extra copy; over a corner it gets three, one for each neighbouring tile.
pub fn wrap_offsets(position: Vec2, radius: f32, field: &Playfield) -> Vec<Vec2> {
    let xs = axis_offsets(position.x, radius, field.width);
    let ys = axis_offsets(position.y, radius, field.height);

    let mut offsets = Vec::with_capacity(xs.len() * ys.len());
    for &dx in &xs {
        for &dy in &ys {
            offsets.push(Vec2::new(dx, dy));
        }
    }
    offsets
}

fn axis_offsets(p: f32, radius: f32, extent: f32) -> Vec<f32> {
    let mut offsets = vec![0.0];
    if p - radius < 0.0 {
        offsets.push(extent);
    }
    if p + radius > extent {
        offsets.push(-extent);
    }
    offsets
}

/// Ship silhouette, nose up, centered on the origin
pub fn life_icon() -> Outline {
    let icon = scale(&SHIP_MODEL, SHIP_RADIUS, Vec2::ZERO);
    rotate(&icon, SHIP_INITIAL_ORIENTATION, Vec2::ZERO)
}

/// One life icon per spare life, in a row along a scoreboard of `height`
pub fn life_icons(lives: i32, height: f32) -> Vec<Outline> {
    let icon = life_icon();
    (0..lives.max(0))
        .map(|i| {
            let at = Vec2::new(LIFE_ICON_SPACING * i as f32 + LIFE_ICON_SPACING / 2.0, height / 2.0);
            translate(&icon, at)
        })
        .collect()
}
