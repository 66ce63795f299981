//! Point distributions over a rectangle with a margin
//!
//! Four strategies share one notion of spacing, the *expected radius*: the
//! distance between neighbors if `count` points tiled the margin-reduced
//! rectangle evenly. Every sampler keeps its points inside
//! `[margin, range - margin]` on both axes.

mod grid;
mod poisson;
mod random;

pub use grid::{generate_grid_points, generate_shifted_grid_points};
pub use poisson::{generate_poisson_disk_points, DEFAULT_POISSON_ATTEMPTS};
pub use random::generate_random_points;

use glam::DVec2;
use std::time::Instant;

use crate::config::{DiagramConfig, Distribution, MIN_POINT_COUNT};

/// Spacing that tiles `count` points evenly over the margin-reduced rectangle
///
/// Returns `f64::INFINITY` for a count of zero.
///
/// # Example
///
/// ```rust
/// use delaunay_canvas::distribution::expected_radius;
///
/// // 100 points over a 100x100 square: one point every 10 units
/// let r = expected_radius(100, 110.0, 110.0, 5.0);
/// assert!((r - 10.0).abs() < 1e-9);
/// ```
pub fn expected_radius(count: usize, range_x: f64, range_y: f64, margin: f64) -> f64 {
    let inner_x = range_x - 2.0 * margin;
    let inner_y = range_y - 2.0 * margin;

    let aspect = inner_x / inner_y;
    let square_side = inner_x / aspect;
    // Points that would land in one square of side `square_side`
    let adjusted_count = count as f64 / aspect;

    square_side / adjusted_count.sqrt()
}

/// Point count the configured sampler actually targets
///
/// Poisson-disk requests are clamped to at least [`MIN_POINT_COUNT`].
fn target_count(config: &DiagramConfig) -> usize {
    match config.distribution {
        Distribution::PoissonDisk => config.point_count.max(MIN_POINT_COUNT),
        _ => config.point_count,
    }
}

/// Expected radius of the configured sampler
pub fn config_expected_radius(config: &DiagramConfig) -> f64 {
    expected_radius(target_count(config), config.width, config.height, config.margin)
}

/// Sample points for a rebuild using the configured distribution
///
/// Poisson-disk requests are clamped to at least [`MIN_POINT_COUNT`] points;
/// the random strategies use [`DiagramConfig::seed`].
pub fn sample_points(config: &DiagramConfig) -> Vec<DVec2> {
    let start = Instant::now();
    let DiagramConfig {
        point_count,
        width,
        height,
        margin,
        ..
    } = *config;

    let points = match config.distribution {
        Distribution::Grid => generate_grid_points(point_count, width, height, margin),
        Distribution::ShiftedGrid => {
            generate_shifted_grid_points(point_count, width, height, margin)
        }
        Distribution::Random => {
            generate_random_points(point_count, width, height, margin, config.seed())
        }
        Distribution::PoissonDisk => generate_poisson_disk_points(
            target_count(config),
            width,
            height,
            margin,
            config.poisson_attempts,
            config.seed(),
        ),
    };

    log::debug!(
        "[sample] {}: {} points (requested {}) in {:?}",
        config.distribution.name(),
        points.len(),
        point_count,
        start.elapsed()
    );

    points
}

#[cfg(test)]
pub(crate) fn assert_within_margin(points: &[DVec2], range_x: f64, range_y: f64, margin: f64) {
    for p in points {
        assert!(
            p.x >= margin && p.x <= range_x - margin && p.y >= margin && p.y <= range_y - margin,
            "point {:?} outside [{}, {}] x [{}, {}]",
            p,
            margin,
            range_x - margin,
            margin,
            range_y - margin
        );
    }
}
