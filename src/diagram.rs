//! Diagram rebuild pipeline

use glam::DVec2;
use std::time::Instant;

use crate::config::DiagramConfig;
use crate::distribution::{config_expected_radius, sample_points};
use crate::error::Result;
use crate::halfedge::HalfEdgeMesh;
use crate::mesh::DiagramBuffers;
use crate::triangulation::{DelaunatorTriangulator, Triangulator};

/// A Delaunay triangulation, its Voronoi dual and their render buffers
///
/// Built in one pass from a [`DiagramConfig`]; nothing is updated in place.
/// Changing any setting means calling [`Diagram::rebuild`] again and dropping
/// the old value.
///
/// # Examples
///
/// ```
/// use delaunay_canvas::*;
///
/// let config = DiagramConfigBuilder::new()
///     .point_count(200)
///     .distribution(Distribution::PoissonDisk)
///     .build()
///     .unwrap();
///
/// let diagram = Diagram::rebuild(config).unwrap();
/// println!("{} sites", diagram.points().len());
///
/// for command in diagram.buffers().draw_list(&RenderOptions::default()) {
///     println!("{}: {} vertices", command.layer.name(), command.buffer.vertex_count());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Diagram {
    config: DiagramConfig,
    points: Vec<DVec2>,
    delaunay: HalfEdgeMesh,
    voronoi: HalfEdgeMesh,
    buffers: DiagramBuffers,
}

impl Diagram {
    /// Rebuild with the bundled `delaunator` triangulator
    ///
    /// # Errors
    ///
    /// Returns `TriangulationFailed` if a sampled point is not finite
    pub fn rebuild(config: DiagramConfig) -> Result<Self> {
        Self::rebuild_with(config, &DelaunatorTriangulator)
    }

    /// Rebuild with a custom triangulator
    ///
    /// Runs sampling, triangulation, the Voronoi dual and buffer extraction to
    /// completion; fewer than three points or a collinear set give empty
    /// buffers rather than an error.
    ///
    /// # Example
    ///
    /// ```
    /// use delaunay_canvas::*;
    ///
    /// let config = DiagramConfig::default();
    /// let diagram = Diagram::rebuild_with(config, &DelaunatorTriangulator).unwrap();
    /// assert!(diagram.delaunay().face_count() > 0);
    /// ```
    pub fn rebuild_with<T>(config: DiagramConfig, triangulator: &T) -> Result<Self>
    where
        T: Triangulator + ?Sized,
    {
        let total = Instant::now();

        let points = sample_points(&config);
        let expected_radius = config_expected_radius(&config);

        let start = Instant::now();
        let delaunay = triangulator.triangulate(&points)?;
        log::debug!(
            "[rebuild] triangulated {} points into {} faces in {:?}",
            points.len(),
            delaunay.face_count(),
            start.elapsed()
        );

        let start = Instant::now();
        let voronoi = delaunay.voronoi_dual();
        log::debug!(
            "[rebuild] Voronoi dual: {} vertices, {} cells in {:?}",
            voronoi.vertex_count(),
            voronoi.face_count(),
            start.elapsed()
        );

        let start = Instant::now();
        let buffers = DiagramBuffers::extract(&delaunay, &voronoi, &config, expected_radius);
        log::debug!(
            "[rebuild] extracted {} Delaunay and {} Voronoi triangles in {:?}",
            buffers.delaunay_triangles.primitive_count(),
            buffers.voronoi_cells.primitive_count(),
            start.elapsed()
        );

        log::debug!("[rebuild] total {:?}", total.elapsed());

        Ok(Self {
            config,
            points,
            delaunay,
            voronoi,
            buffers,
        })
    }

    /// Configuration this diagram was built from
    #[inline]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Sampled sites in sampler order
    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    #[inline]
    pub fn delaunay(&self) -> &HalfEdgeMesh {
        &self.delaunay
    }

    #[inline]
    pub fn voronoi(&self) -> &HalfEdgeMesh {
        &self.voronoi
    }

    /// Spacing the sampler targeted
    #[inline]
    pub fn expected_radius(&self) -> f64 {
        self.buffers.expected_radius
    }

    /// Render buffers of this rebuild
    #[inline]
    pub fn buffers(&self) -> &DiagramBuffers {
        &self.buffers
    }

    /// Take the render buffers, dropping the meshes
    pub fn into_buffers(self) -> DiagramBuffers {
        self.buffers
    }
}
