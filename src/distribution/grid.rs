//! Lattice point distributions
//!
//! Both lattices step by the expected radius starting at the margin, so the
//! number of points follows from the rectangle rather than from `count`.

use glam::DVec2;

use super::expected_radius;

/// Lattice coordinates `start, start + step, ...` up to and including `end`
fn lattice(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    (0u64..)
        .map(move |i| start + i as f64 * step)
        .take_while(move |&v| v <= end)
}

/// Generate points on a square lattice
///
/// # Arguments
///
/// * `count` - Approximate number of points (drives the lattice step)
/// * `range_x`, `range_y` - Rectangle extents
/// * `margin` - Distance kept free along every side
///
/// # Example
///
/// ```rust
/// use delaunay_canvas::distribution::generate_grid_points;
///
/// let points = generate_grid_points(100, 110.0, 110.0, 5.0);
/// assert_eq!(points.len(), 121); // 11 x 11, both borders included
/// ```
pub fn generate_grid_points(count: usize, range_x: f64, range_y: f64, margin: f64) -> Vec<DVec2> {
    if count == 0 {
        return Vec::new();
    }

    let r = expected_radius(count, range_x, range_y, margin);

    lattice(margin, range_x - margin, r)
        .flat_map(|x| lattice(margin, range_y - margin, r).map(move |y| DVec2::new(x, y)))
        .collect()
}

/// Generate points on a brick-like lattice
///
/// Every other column is shifted by half a step along y. Shifted points that
/// would cross the far margin are dropped.
pub fn generate_shifted_grid_points(
    count: usize,
    range_x: f64,
    range_y: f64,
    margin: f64,
) -> Vec<DVec2> {
    if count == 0 {
        return Vec::new();
    }

    let r = expected_radius(count, range_x, range_y, margin);
    let y_end = range_y - margin;

    lattice(margin, range_x - margin, r)
        .enumerate()
        .flat_map(|(column, x)| {
            let shift = if column % 2 == 0 { 0.0 } else { r / 2.0 };
            lattice(margin, y_end, r)
                .map(move |y| y + shift)
                .filter(move |&y| y <= y_end)
                .map(move |y| DVec2::new(x, y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::assert_within_margin;

    #[test]
    fn test_grid_column_step_equals_expected_radius() {
        let (count, range_x, range_y, margin) = (300, 1000.0, 700.0, 10.0);
        let r = expected_radius(count, range_x, range_y, margin);
        let points = generate_grid_points(count, range_x, range_y, margin);

        let mut columns: Vec<f64> = points.iter().map(|p| p.x).collect();
        columns.dedup();
        assert!(columns.len() > 1);

        for pair in columns.windows(2) {
            assert!(
                (pair[1] - pair[0] - r).abs() < 1e-9,
                "column step {} should equal {}",
                pair[1] - pair[0],
                r
            );
        }
        assert_eq!(columns[0], margin);
    }

    #[test]
    fn test_grid_bounds() {
        let points = generate_grid_points(500, 1000.0, 1000.0, 10.0);
        assert_within_margin(&points, 1000.0, 1000.0, 10.0);
    }

    #[test]
    fn test_grid_count_is_approximate() {
        let points = generate_grid_points(500, 1000.0, 1000.0, 10.0);
        // 980 / 43.8 -> 23 columns and rows
        assert_eq!(points.len(), 23 * 23);
    }

    #[test]
    fn test_grid_empty_for_zero_count() {
        assert!(generate_grid_points(0, 100.0, 100.0, 0.0).is_empty());
        assert!(generate_shifted_grid_points(0, 100.0, 100.0, 0.0).is_empty());
    }

    #[test]
    fn test_shifted_grid_offsets_odd_columns() {
        let (count, range, margin) = (400, 500.0, 10.0);
        let r = expected_radius(count, range, range, margin);
        let points = generate_shifted_grid_points(count, range, range, margin);

        // First point of the second column starts half a step up
        let second_column_x = margin + r;
        let first_in_second = points
            .iter()
            .find(|p| (p.x - second_column_x).abs() < 1e-9)
            .unwrap();
        assert!((first_in_second.y - (margin + r / 2.0)).abs() < 1e-9);

        // Even columns are not shifted
        assert_eq!(points[0], DVec2::new(margin, margin));
    }

    #[test]
    fn test_shifted_grid_bounds() {
        for count in [10, 99, 500, 2000] {
            let points = generate_shifted_grid_points(count, 800.0, 450.0, 25.0);
            assert_within_margin(&points, 800.0, 450.0, 25.0);
        }
    }

    #[test]
    fn test_shifted_grid_drops_overflowing_points() {
        let shifted = generate_shifted_grid_points(500, 1000.0, 1000.0, 10.0);
        let plain = generate_grid_points(500, 1000.0, 1000.0, 10.0);
        assert!(shifted.len() <= plain.len());
    }
}
