//! Uniform random point distribution

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `count` independent uniform points inside the margin
///
/// The same `(count, range_x, range_y, margin, seed)` always produces the
/// same sequence.
pub fn generate_random_points(
    count: usize,
    range_x: f64,
    range_y: f64,
    margin: f64,
    seed: u64,
) -> Vec<DVec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let inner_x = range_x - 2.0 * margin;
    let inner_y = range_y - 2.0 * margin;

    (0..count)
        .map(|_| {
            DVec2::new(
                rng.gen::<f64>() * inner_x + margin,
                rng.gen::<f64>() * inner_y + margin,
            )
        })
        .collect()
}
