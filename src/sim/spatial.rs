//! Spatial hash for broad-phase collision queries
//!
//! Divides the playfield into square cells and buckets each entity in every
//! cell its bounding box touches. Cell coordinates are taken after wrapping, so
//! a shape hanging off the right edge also lands in the leftmost column and is
//! found by queries from the other side.

use std::collections::HashMap;

use glam::Vec2;

use super::entity::Body;
use super::geometry::Playfield;

/// Initial capacity for the cell map (number of expected non-empty cells)
const INITIAL_CELL_CAPACITY: usize = 64;

/// Initial capacity for the id list within a cell
const BUCKET_INITIAL_CAPACITY: usize = 4;

/// Grid cell key - (column, row) on the wrapped playfield
pub type CellKey = (i32, i32);

/// Uniform grid mapping cells to entity ids
///
/// Ids are whatever the caller uses to find the entity again; the collision
/// pass uses indices into the asteroid list.
#[derive(Debug, Clone)]
pub struct SpatialHash {
    inv_cell_size: f32,
    field: Playfield,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32, field: Playfield) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            inv_cell_size: 1.0 / cell_size,
            field,
            cells: HashMap::with_capacity(INITIAL_CELL_CAPACITY),
        }
    }

    /// Build a fresh index over a list of bodies, keyed by list position
    pub fn from_bodies<'a>(
        cell_size: f32,
        field: Playfield,
        bodies: impl IntoIterator<Item = &'a Body>,
    ) -> Self {
        let mut hash = Self::new(cell_size, field);
        for (id, body) in bodies.into_iter().enumerate() {
            hash.insert(id, body);
        }
        hash
    }

    /// Cell indices along one axis covered by `[min, max]` once wrapped onto `[0, extent)`
    ///
    /// The last cell on an axis is partial when `extent` isn't a multiple of the
    /// cell size, so a span crossing the seam is split into its two wrapped pieces
    /// and each piece is converted to indices on its own.
    fn axis_cells(&self, min: f32, max: f32, extent: f32) -> Vec<i32> {
        let last = ((extent * self.inv_cell_size).ceil() as i32 - 1).max(0);
        let cell = |v: f32| ((v * self.inv_cell_size).floor() as i32).clamp(0, last);

        if max - min >= extent {
            return (0..=last).collect();
        }
        let start = crate::modulo(min, extent);
        let end = start + (max - min);
        if end < extent {
            (cell(start)..=cell(end)).collect()
        } else {
            let wrapped_end = cell(end - extent);
            let mut cells: Vec<i32> = (cell(start)..=last).collect();
            cells.extend((0..=wrapped_end).filter(|c| *c < cell(start)));
            cells
        }
    }

    /// Every cell overlapped by the body's bounding box, without duplicates
    pub fn keys_for(&self, body: &Body) -> Vec<CellKey> {
        let min = body.position - Vec2::splat(body.radius);
        let max = body.position + Vec2::splat(body.radius);
        let columns = self.axis_cells(min.x, max.x, self.field.width);
        let rows = self.axis_cells(min.y, max.y, self.field.height);

        let mut keys = Vec::with_capacity(columns.len() * rows.len());
        for &x in &columns {
            for &y in &rows {
                keys.push((x, y));
            }
        }
        keys
    }

    pub fn insert(&mut self, id: usize, body: &Body) {
        for key in self.keys_for(body) {
            self.cells
                .entry(key)
                .or_insert_with(|| Vec::with_capacity(BUCKET_INITIAL_CAPACITY))
                .push(id);
        }
    }

    /// Inverse of [`insert`](Self::insert); the body must not have moved in between
    pub fn remove(&mut self, id: usize, body: &Body) {
        for key in self.keys_for(body) {
            if let Some(bucket) = self.cells.get_mut(&key) {
                bucket.retain(|&other| other != id);
                if bucket.is_empty() {
                    self.cells.remove(&key);
                }
            }
        }
    }

    /// Ids registered in one cell
    pub fn bucket(&self, key: CellKey) -> &[usize] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids sharing a cell with `body`, in key order then insertion order
    ///
    /// An id overlapping several of the query's cells is yielded once per cell.
    pub fn candidates(&self, body: &Body) -> impl Iterator<Item = usize> + '_ {
        self.keys_for(body)
            .into_iter()
            .flat_map(move |key| self.bucket(key).iter().copied())
    }

    /// Number of non-empty cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}
