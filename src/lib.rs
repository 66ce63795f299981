//! Delaunay and Voronoi mosaics over a rectangle
//!
//! Samples a point set, triangulates it, derives the Voronoi dual and
//! flattens both diagrams into engine-agnostic vertex buffers. Texture
//! coordinates map the rectangle onto `[0, 1]`, so the cells can sample an
//! image and be drawn as a stained-glass mosaic.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use delaunay_canvas::*;
//!
//! let config = DiagramConfigBuilder::new()
//!     .canvas(Canvas::fit(1920, 1080, MAX_CANVAS_EXTENT))
//!     .point_count(2000)
//!     .distribution(Distribution::PoissonDisk)
//!     .build().unwrap();
//!
//! let diagram = Diagram::rebuild(config).unwrap();
//!
//! let options = RenderOptions { voronoi_edges: true, ..RenderOptions::default() };
//! for command in diagram.buffers().draw_list(&options) {
//!     println!("{}: {} primitives", command.layer.name(), command.buffer.primitive_count());
//! }
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for configuration and meshes

// Modules
pub mod error;
pub mod config;
pub mod spatial;
pub mod distribution;
pub mod halfedge;
pub mod triangulation;
pub mod mesh;
pub mod diagram;

// Re-export core types for convenience
pub use error::{DiagramError, Result};
pub use config::{
    Canvas, DiagramConfig, DiagramConfigBuilder, Distribution, RayLengths, RenderOptions, Rgba,
    MAX_CANVAS_EXTENT, MIN_POINT_COUNT,
};
pub use diagram::Diagram;
pub use halfedge::{EdgeHandle, EdgeSegment, FaceHandle, HalfEdgeMesh, Ray, VertexHandle};
pub use triangulation::{DelaunatorTriangulator, Triangulator};
pub use mesh::{DiagramBuffers, DrawCommand, GeometryBuffer, Layer, Topology};
pub use distribution::{expected_radius, sample_points};
pub use spatial::SpatialGrid;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
