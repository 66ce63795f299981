//! Diagram configuration and builder
//!
//! Everything a rebuild needs is carried by an immutable [`DiagramConfig`];
//! nothing in the crate reads process-wide state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DiagramError, Result};

/// Smallest point count the sampling controls will step down to
pub const MIN_POINT_COUNT: usize = 3;

/// Largest canvas side produced by [`Canvas::fit`] with the default limit
pub const MAX_CANVAS_EXTENT: u32 = 1000;

/// RGBA color
pub type Rgba = [f32; 4];

/// Point distribution strategy used to seed the triangulation
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Distribution {
    /// Regular lattice with spacing equal to the expected radius
    Grid,
    /// Lattice with every other column shifted by half a step
    ShiftedGrid,
    /// Independent uniform points
    Random,
    /// Bridson dart throwing with a minimum separation
    #[default]
    PoissonDisk,
}

impl Distribution {
    /// All strategies, in the order the controls list them
    pub const ALL: [Distribution; 4] = [
        Distribution::Grid,
        Distribution::ShiftedGrid,
        Distribution::Random,
        Distribution::PoissonDisk,
    ];

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Distribution::Grid => "Grid",
            Distribution::ShiftedGrid => "Shifted grid",
            Distribution::Random => "Random",
            Distribution::PoissonDisk => "Poisson disk",
        }
    }
}

/// Lengths used to turn unbounded (ray) edges into finite segments
///
/// These are a presentation choice: the ray's far end is placed at
/// `anchor + direction * length`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayLengths {
    /// Extension for unbounded Voronoi edges
    pub voronoi: f64,
    /// Extension for unbounded Delaunay boundary stubs
    pub delaunay: f64,
}

impl Default for RayLengths {
    fn default() -> Self {
        Self {
            voronoi: 10.0,
            delaunay: 0.2,
        }
    }
}

/// Pixel size of the drawing area
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Fit an image of the given size into a canvas no larger than `max_extent`
    ///
    /// The larger side is scaled down to `max_extent` and the other side
    /// follows the aspect ratio. Images that already fit keep their size.
    pub fn fit(image_width: u32, image_height: u32, max_extent: u32) -> Self {
        let (mut width, mut height) = (image_width, image_height);

        if width >= height && width > max_extent {
            height = (height as f64 * max_extent as f64 / width as f64) as u32;
            width = max_extent;
        }
        if height > width && height > max_extent {
            width = (width as f64 * max_extent as f64 / height as f64) as u32;
            height = max_extent;
        }

        Self { width, height }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: MAX_CANVAS_EXTENT,
            height: MAX_CANVAS_EXTENT,
        }
    }
}

/// Configuration for one diagram rebuild
///
/// The same configuration always produces the same points and buffers:
/// when no explicit seed is set, the seed is derived from the point count.
///
/// # Example
///
/// ```rust
/// use delaunay_canvas::*;
///
/// let config = DiagramConfigBuilder::new()
///     .point_count(500)
///     .distribution(Distribution::PoissonDisk)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seed(), 500);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Target number of points (samplers may produce fewer or, for grids, more)
    pub point_count: usize,
    /// Width of the sampling rectangle
    pub width: f64,
    /// Height of the sampling rectangle
    pub height: f64,
    /// Distance kept free of points along every side
    pub margin: f64,
    /// Sampling strategy
    pub distribution: Distribution,
    /// Candidate attempts per active point for Poisson-disk sampling
    pub poisson_attempts: usize,
    /// Explicit random seed; `None` derives it from `point_count`
    pub seed: Option<u64>,
    /// Unbounded edge extension lengths
    pub rays: RayLengths,
}

impl DiagramConfig {
    /// Seed used by the random samplers
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(self.point_count as u64)
    }

    /// Same configuration with twice as many points
    pub fn with_doubled_points(self) -> Self {
        Self {
            point_count: self.point_count.saturating_mul(2),
            ..self
        }
    }

    /// Same configuration with half as many points, never below [`MIN_POINT_COUNT`]
    pub fn with_halved_points(self) -> Self {
        Self {
            point_count: (self.point_count / 2).max(MIN_POINT_COUNT),
            ..self
        }
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            point_count: 1000,
            width: MAX_CANVAS_EXTENT as f64,
            height: MAX_CANVAS_EXTENT as f64,
            margin: 10.0,
            distribution: Distribution::default(),
            poisson_attempts: 30,
            seed: None,
            rays: RayLengths::default(),
        }
    }
}

/// Builder for [`DiagramConfig`] with validation
///
/// # Example
///
/// ```rust
/// use delaunay_canvas::*;
///
/// let config = DiagramConfigBuilder::new()
///     .canvas(Canvas::fit(1920, 1080, MAX_CANVAS_EXTENT))
///     .margin(20.0)
///     .poisson_attempts(15)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.width, 1000.0);
/// assert_eq!(config.height, 562.0);
/// ```
#[derive(Debug, Clone)]
pub struct DiagramConfigBuilder {
    config: DiagramConfig,
}

impl DiagramConfigBuilder {
    /// Create a builder holding [`DiagramConfig::default`]
    pub fn new() -> Self {
        Self {
            config: DiagramConfig::default(),
        }
    }

    /// Set the target point count
    pub fn point_count(mut self, count: usize) -> Self {
        self.config.point_count = count;
        self
    }

    /// Set the sampling rectangle size
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Set the sampling rectangle from a pixel canvas
    pub fn canvas(self, canvas: Canvas) -> Self {
        self.size(canvas.width as f64, canvas.height as f64)
    }

    /// Set the margin kept free of points
    pub fn margin(mut self, margin: f64) -> Self {
        self.config.margin = margin;
        self
    }

    /// Set the sampling strategy
    pub fn distribution(mut self, distribution: Distribution) -> Self {
        self.config.distribution = distribution;
        self
    }

    /// Set an explicit seed instead of deriving it from the point count
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the Poisson-disk attempts per active point
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `attempts` is 0
    pub fn poisson_attempts(mut self, attempts: usize) -> Result<Self> {
        if attempts == 0 {
            return Err(DiagramError::InvalidConfig(
                "Poisson-disk attempts must be >= 1".to_string(),
            ));
        }
        self.config.poisson_attempts = attempts;
        Ok(self)
    }

    /// Set the unbounded edge extension lengths
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either length is negative or not finite
    pub fn ray_lengths(mut self, rays: RayLengths) -> Result<Self> {
        for (name, length) in [("Voronoi", rays.voronoi), ("Delaunay", rays.delaunay)] {
            if !length.is_finite() || length < 0.0 {
                return Err(DiagramError::InvalidConfig(format!(
                    "{} ray length must be finite and >= 0 (got {})",
                    name, length
                )));
            }
        }
        self.config.rays = rays;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the rectangle is empty or the margin leaves
    /// no room for points.
    pub fn build(self) -> Result<DiagramConfig> {
        let DiagramConfig {
            width,
            height,
            margin,
            ..
        } = self.config;

        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(DiagramError::InvalidConfig(format!(
                "rectangle must have positive finite size (got {}x{})",
                width, height
            )));
        }
        if !(margin >= 0.0 && margin < width.min(height) / 2.0) {
            return Err(DiagramError::InvalidConfig(format!(
                "margin must be in [0, {}) (got {})",
                width.min(height) / 2.0,
                margin
            )));
        }

        Ok(self.config)
    }
}

impl Default for DiagramConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Which layers the renderer draws, and in which colors
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub delaunay_triangles: bool,
    pub voronoi_cells: bool,
    pub delaunay_edges: bool,
    pub voronoi_edges: bool,
    pub points: bool,
    pub convex_hull: bool,
    /// Draw Delaunay edges and points in their flat color instead of the image
    pub use_external_color: bool,
    pub delaunay_line_color: Rgba,
    pub voronoi_line_color: Rgba,
    pub point_color: Rgba,
    pub hull_color: Rgba,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            delaunay_triangles: false,
            voronoi_cells: true,
            delaunay_edges: false,
            voronoi_edges: false,
            points: false,
            convex_hull: false,
            use_external_color: false,
            delaunay_line_color: [0.0, 0.0, 0.0, 1.0],
            voronoi_line_color: [0.0, 0.0, 0.0, 1.0],
            point_color: [0.0, 0.0, 0.0, 1.0],
            hull_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = DiagramConfigBuilder::new().build().unwrap();
        assert_eq!(config.point_count, 1000);
        assert_eq!(config.width, 1000.0);
        assert_eq!(config.height, 1000.0);
        assert_eq!(config.margin, 10.0);
        assert_eq!(config.distribution, Distribution::PoissonDisk);
        assert_eq!(config.poisson_attempts, 30);
        assert_eq!(config.rays, RayLengths::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_seed_derived_from_count() {
        let config = DiagramConfigBuilder::new().point_count(321).build().unwrap();
        assert_eq!(config.seed(), 321);

        let config = DiagramConfigBuilder::new()
            .point_count(321)
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(config.seed(), 7);
    }

    #[test]
    fn test_point_count_stepping() {
        let config = DiagramConfigBuilder::new().point_count(10).build().unwrap();
        assert_eq!(config.with_doubled_points().point_count, 20);
        assert_eq!(config.with_halved_points().point_count, 5);

        // Halving never goes below the minimum
        let small = config.with_halved_points().with_halved_points();
        assert_eq!(small.point_count, MIN_POINT_COUNT);
        assert_eq!(small.with_halved_points().point_count, MIN_POINT_COUNT);
    }

    #[test]
    fn test_invalid_margin() {
        let result = DiagramConfigBuilder::new().size(100.0, 40.0).margin(20.0).build();
        assert!(result.is_err());

        let result = DiagramConfigBuilder::new().margin(-1.0).build();
        assert!(result.is_err());

        let result = DiagramConfigBuilder::new().size(100.0, 40.0).margin(19.9).build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_size() {
        assert!(DiagramConfigBuilder::new().size(0.0, 100.0).build().is_err());
        assert!(DiagramConfigBuilder::new().size(100.0, -5.0).build().is_err());
        assert!(DiagramConfigBuilder::new().size(f64::NAN, 100.0).build().is_err());
    }

    #[test]
    fn test_invalid_attempts() {
        assert!(DiagramConfigBuilder::new().poisson_attempts(0).is_err());
        assert!(DiagramConfigBuilder::new().poisson_attempts(1).is_ok());
    }

    #[test]
    fn test_invalid_ray_lengths() {
        let rays = RayLengths {
            voronoi: -1.0,
            delaunay: 0.2,
        };
        assert!(DiagramConfigBuilder::new().ray_lengths(rays).is_err());

        let rays = RayLengths {
            voronoi: 10.0,
            delaunay: f64::INFINITY,
        };
        assert!(DiagramConfigBuilder::new().ray_lengths(rays).is_err());

        let rays = RayLengths {
            voronoi: 250.0,
            delaunay: 0.0,
        };
        let config = DiagramConfigBuilder::new()
            .ray_lengths(rays)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.rays.voronoi, 250.0);
    }

    #[test]
    fn test_canvas_fit_landscape() {
        let canvas = Canvas::fit(2000, 1000, MAX_CANVAS_EXTENT);
        assert_eq!(canvas, Canvas { width: 1000, height: 500 });
    }

    #[test]
    fn test_canvas_fit_portrait() {
        let canvas = Canvas::fit(800, 1600, MAX_CANVAS_EXTENT);
        assert_eq!(canvas, Canvas { width: 500, height: 1000 });
    }

    #[test]
    fn test_canvas_fit_small_image_unchanged() {
        let canvas = Canvas::fit(640, 480, MAX_CANVAS_EXTENT);
        assert_eq!(canvas, Canvas { width: 640, height: 480 });
    }

    #[test]
    fn test_distribution_names() {
        for distribution in Distribution::ALL {
            assert!(!distribution.name().is_empty());
        }
        assert_eq!(Distribution::default(), Distribution::PoissonDisk);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = DiagramConfigBuilder::new()
            .point_count(42)
            .distribution(Distribution::ShiftedGrid)
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: DiagramConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
