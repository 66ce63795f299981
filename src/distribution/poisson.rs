//! Poisson-disk point distribution
//!
//! Bridson-style dart throwing accelerated by a [`SpatialGrid`]. Every pair of
//! accepted points is more than the expected radius apart, so the sampler
//! usually runs out of room before reaching `count`.
//!
//! # Algorithm
//!
//! 1. Seed one uniform point inside the margin; it becomes active.
//! 2. Swap-remove a random active point and throw up to `attempts`
//!    candidates at a random angle and a distance in `[r, 2r)` around it.
//! 3. Candidates inside the margin that clear the grid check are accepted
//!    immediately and become active themselves.
//! 4. Stop once `count` points are accepted or nothing is active.
//!
//! # References
//!
//! - [Fast Poisson Disk Sampling in Arbitrary Dimensions](https://www.cs.ubc.ca/~rbridson/docs/bridson-siggraph07-poissondisk.pdf)

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

use super::expected_radius;
use crate::config::MIN_POINT_COUNT;
use crate::spatial::SpatialGrid;

/// Candidate attempts per active point used by the controls
pub const DEFAULT_POISSON_ATTEMPTS: usize = 30;

/// Generate at most `count` points with pairwise distance above the expected radius
///
/// `count` is first raised to [`MIN_POINT_COUNT`]. The result may hold fewer
/// points; callers must not rely on the exact cardinality. The sequence is in
/// discovery order.
///
/// # Arguments
///
/// * `count` - Upper bound on the number of points
/// * `range_x`, `range_y` - Rectangle extents
/// * `margin` - Distance kept free along every side
/// * `attempts` - Candidates thrown around each active point
/// * `seed` - Random seed
///
/// # Example
///
/// ```rust
/// use delaunay_canvas::distribution::generate_poisson_disk_points;
///
/// let points = generate_poisson_disk_points(50, 1000.0, 1000.0, 10.0, 30, 50);
/// assert!(points.len() <= 50);
/// ```
pub fn generate_poisson_disk_points(
    count: usize,
    range_x: f64,
    range_y: f64,
    margin: f64,
    attempts: usize,
    seed: u64,
) -> Vec<DVec2> {
    let count = count.max(MIN_POINT_COUNT);
    let r = expected_radius(count, range_x, range_y, margin);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = SpatialGrid::new(range_x, range_y, r);

    let inside = |p: DVec2| {
        p.x >= margin && p.x < range_x - margin && p.y >= margin && p.y < range_y - margin
    };

    let first = DVec2::new(
        rng.gen::<f64>() * (range_x - 2.0 * margin) + margin,
        rng.gen::<f64>() * (range_y - 2.0 * margin) + margin,
    );
    let mut points = vec![first];
    let mut active = vec![first];
    grid.insert(first, 0);

    while !active.is_empty() && points.len() < count {
        let center = active.swap_remove(rng.gen_range(0..active.len()));

        for _ in 0..attempts {
            if points.len() >= count {
                break;
            }

            let distance = rng.gen_range(r..2.0 * r);
            let angle = rng.gen_range(0.0..TAU);
            let candidate = center + DVec2::from_angle(angle) * distance;

            if inside(candidate) && grid.fits(candidate, r, &points) {
                grid.insert(candidate, points.len());
                points.push(candidate);
                active.push(candidate);
            }
        }
    }

    log::trace!(
        "[poisson] accepted {} of {} points (r = {:.3}, {} still active)",
        points.len(),
        count,
        r,
        active.len()
    );

    points
}
