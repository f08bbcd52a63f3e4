//! Uniform bucket grid for neighbor search
//!
//! Rebuilt from scratch every step. Cell side equals the interaction radius,
//! so a 3x3 block of cells is always a superset of the true neighbor radius.

use crate::math::{Real, Vector};

/// Particle indices a single cell can hold. Insertions beyond this are
/// dropped, bounding the worst case under local over-crowding.
pub const CELL_CAPACITY: usize = 9;

/// Derived grid dimensions, immutable after setup.
#[derive(Clone, Copy, Debug)]
pub struct GridInfo {
    pub x_cells: usize,
    pub y_cells: usize,
    pub half_extent: Vector,
    pub cell_side: Real,
}

impl GridInfo {
    pub fn new(half_extent: Vector, cell_side: Real) -> Self {
        let size = half_extent * 2.0;
        Self {
            x_cells: (size.x / cell_side).ceil().max(1.0) as usize,
            y_cells: (size.y / cell_side).ceil().max(1.0) as usize,
            half_extent,
            cell_side,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.x_cells * self.y_cells
    }

    /// Cell coordinate for a position, clamped into grid bounds so positions
    /// outside the domain file into the nearest edge cell.
    #[inline(always)]
    pub fn cell_of(&self, position: Vector) -> (usize, usize) {
        let gx = ((position.x + self.half_extent.x) / self.cell_side).floor() as isize;
        let gy = ((position.y + self.half_extent.y) / self.cell_side).floor() as isize;
        (
            gx.clamp(0, self.x_cells as isize - 1) as usize,
            gy.clamp(0, self.y_cells as isize - 1) as usize,
        )
    }

    /// The 3x3 block of cells around a position, clamped to grid bounds.
    /// Returned as inclusive ranges `(start_x..=end_x, start_y..=end_y)`.
    #[inline(always)]
    pub fn scan_block(&self, position: Vector) -> (usize, usize, usize, usize) {
        let (gx, gy) = self.cell_of(position);
        (
            gx.saturating_sub(1),
            (gx + 1).min(self.x_cells - 1),
            gy.saturating_sub(1),
            (gy + 1).min(self.y_cells - 1),
        )
    }
}

/// Fixed-capacity bucket grid over the simulation domain.
pub struct SpatialGrid {
    info: GridInfo,
    counts: Vec<u32>,
    entries: Vec<u32>,
}

impl SpatialGrid {
    pub fn new(info: GridInfo) -> Self {
        let cells = info.cell_count();
        Self {
            info,
            counts: vec![0; cells],
            entries: vec![0; cells * CELL_CAPACITY],
        }
    }

    #[inline(always)]
    pub fn info(&self) -> &GridInfo {
        &self.info
    }

    /// Reset every bucket's occupancy. Entry slots are left stale; only the
    /// counters matter.
    pub fn clear(&mut self) {
        self.counts.fill(0);
    }

    /// File a particle index under the cell containing `position`. Dropped
    /// silently if the bucket is full.
    #[inline]
    pub fn insert(&mut self, index: usize, position: Vector) {
        let (gx, gy) = self.info.cell_of(position);
        let cell = gy * self.info.x_cells + gx;
        let stored = self.counts[cell] as usize;
        if stored < CELL_CAPACITY {
            self.entries[cell * CELL_CAPACITY + stored] = index as u32;
            self.counts[cell] = stored as u32 + 1;
        }
    }

    /// Rebuild the whole grid from current positions. O(N).
    pub fn rebuild(&mut self, positions: &[Vector]) {
        self.clear();
        for (index, &position) in positions.iter().enumerate() {
            self.insert(index, position);
        }
    }

    /// Occupants of one cell.
    #[inline(always)]
    pub fn bucket(&self, gx: usize, gy: usize) -> &[u32] {
        let cell = gy * self.info.x_cells + gx;
        let stored = self.counts[cell] as usize;
        &self.entries[cell * CELL_CAPACITY..cell * CELL_CAPACITY + stored]
    }

    /// Visit every candidate neighbor index in the 3x3 block around
    /// `position`. Candidates are a superset of the true neighbors; callers
    /// still apply the exact radius check.
    #[inline]
    pub fn for_each_candidate<F: FnMut(usize)>(&self, position: Vector, mut f: F) {
        let (start_x, end_x, start_y, end_y) = self.info.scan_block(position);
        for gy in start_y..=end_y {
            for gx in start_x..=end_x {
                for &candidate in self.bucket(gx, gy) {
                    f(candidate as usize);
                }
            }
        }
    }
}
