//! Render layers and draw order

use super::{DiagramBuffers, GeometryBuffer};
use crate::config::{RenderOptions, Rgba};

/// One toggleable layer of the rendered diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    DelaunayTriangles,
    VoronoiCells,
    DelaunayEdges,
    Points,
    ConvexHull,
    VoronoiEdges,
}

impl Layer {
    /// Back-to-front order; fills first, outlines on top
    pub const RENDER_ORDER: [Layer; 6] = [
        Layer::DelaunayTriangles,
        Layer::VoronoiCells,
        Layer::DelaunayEdges,
        Layer::Points,
        Layer::ConvexHull,
        Layer::VoronoiEdges,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Layer::DelaunayTriangles => "Delaunay triangles",
            Layer::VoronoiCells => "Voronoi cells",
            Layer::DelaunayEdges => "Delaunay edges",
            Layer::Points => "Points",
            Layer::ConvexHull => "Convex hull",
            Layer::VoronoiEdges => "Voronoi edges",
        }
    }

    /// Whether the options switch this layer on
    pub fn is_enabled(self, options: &RenderOptions) -> bool {
        match self {
            Layer::DelaunayTriangles => options.delaunay_triangles,
            Layer::VoronoiCells => options.voronoi_cells,
            Layer::DelaunayEdges => options.delaunay_edges,
            Layer::Points => options.points,
            Layer::ConvexHull => options.convex_hull,
            Layer::VoronoiEdges => options.voronoi_edges,
        }
    }

    /// Flat color for the layer, `None` to sample the image at each uv
    ///
    /// Delaunay edges and points follow `use_external_color`; the hull and
    /// Voronoi edges are always flat.
    pub fn color(self, options: &RenderOptions) -> Option<Rgba> {
        match self {
            Layer::DelaunayTriangles | Layer::VoronoiCells => None,
            Layer::DelaunayEdges => {
                options.use_external_color.then_some(options.delaunay_line_color)
            }
            Layer::Points => options.use_external_color.then_some(options.point_color),
            Layer::ConvexHull => Some(options.hull_color),
            Layer::VoronoiEdges => Some(options.voronoi_line_color),
        }
    }
}

/// A single draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand<'a> {
    pub layer: Layer,
    pub buffer: &'a GeometryBuffer,
    pub color: Option<Rgba>,
}

impl DiagramBuffers {
    /// Draw calls for the enabled layers, in render order
    ///
    /// Empty buffers are left out.
    pub fn draw_list(&self, options: &RenderOptions) -> Vec<DrawCommand<'_>> {
        Layer::RENDER_ORDER
            .into_iter()
            .filter(|layer| layer.is_enabled(options))
            .map(|layer| DrawCommand {
                layer,
                buffer: self.buffer(layer),
                color: layer.color(options),
            })
            .filter(|command| !command.buffer.is_empty())
            .collect()
    }
}
