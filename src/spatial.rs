//! Uniform acceleration grid for Poisson-disk sampling
//!
//! Cells are `radius / √2` wide, so a cell's diagonal equals the minimum
//! separation and no two accepted points can ever share a cell.

use glam::DVec2;

/// Half-width of the neighborhood scanned by [`SpatialGrid::fits`]
const NEIGHBORHOOD: i64 = 2;

/// Grid mapping cells to the index of the accepted point inside them
///
/// # Performance
///
/// - Construction: O(cells)
/// - `insert`: O(1)
/// - `fits`: at most 25 distance checks
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f64,
    width: usize,
    height: usize,
    cells: Vec<Option<usize>>,
}

impl SpatialGrid {
    /// Build an empty grid over `[0, range_x) x [0, range_y)`
    ///
    /// # Arguments
    ///
    /// * `range_x`, `range_y` - Rectangle extents
    /// * `radius` - Minimum separation between accepted points
    pub fn new(range_x: f64, range_y: f64, radius: f64) -> Self {
        let cell_size = radius / std::f64::consts::SQRT_2;
        let width = (range_x / cell_size).ceil().max(1.0) as usize;
        let height = (range_y / cell_size).ceil().max(1.0) as usize;

        Self {
            cell_size,
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Side length of one cell
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Grid dimensions as (columns, rows)
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Cell coordinates of a point (may lie outside the grid)
    #[inline]
    pub fn cell_of(&self, point: DVec2) -> (i64, i64) {
        (
            (point.x / self.cell_size).floor() as i64,
            (point.y / self.cell_size).floor() as i64,
        )
    }

    /// Index of the point stored in the cell containing `point`, if any
    pub fn get(&self, point: DVec2) -> Option<usize> {
        let (gx, gy) = self.cell_of(point);
        self.slot(gx, gy).and_then(|slot| self.cells[slot])
    }

    /// Record that point `index` lies at `point`
    ///
    /// The cell must be empty; the minimum-separation invariant of the
    /// sampler guarantees this. Points outside the grid are ignored.
    pub fn insert(&mut self, point: DVec2, index: usize) {
        let (gx, gy) = self.cell_of(point);
        if let Some(slot) = self.slot(gx, gy) {
            debug_assert!(self.cells[slot].is_none(), "grid cell already occupied");
            self.cells[slot] = Some(index);
        }
    }

    /// Check whether `candidate` keeps more than `radius` from every stored point
    ///
    /// Scans the 5x5 block of cells around the candidate's cell, clamped to
    /// the grid. `points` is the sequence the stored indices refer to.
    pub fn fits(&self, candidate: DVec2, radius: f64, points: &[DVec2]) -> bool {
        let (gx, gy) = self.cell_of(candidate);

        let x_range = (gx - NEIGHBORHOOD).max(0)..(gx + NEIGHBORHOOD + 1).min(self.width as i64);
        for i in x_range {
            let y_range =
                (gy - NEIGHBORHOOD).max(0)..(gy + NEIGHBORHOOD + 1).min(self.height as i64);
            for j in y_range {
                let stored = self.cells[i as usize + j as usize * self.width];
                if let Some(index) = stored {
                    if candidate.distance(points[index]) <= radius {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn slot(&self, gx: i64, gy: i64) -> Option<usize> {
        if gx < 0 || gy < 0 || gx as usize >= self.width || gy as usize >= self.height {
            return None;
        }
        Some(gx as usize + gy as usize * self.width)
    }
}
