//! Render buffer extraction
//!
//! Turns half-edge meshes into engine-agnostic vertex data: flat position,
//! normal and texture-coordinate arrays plus an optional index array.
//! Everything lies in the z = 0 plane facing +z; texture coordinates are
//! positions divided by the rectangle size.

mod layers;

pub use layers::{DrawCommand, Layer};

use glam::DVec2;

use crate::config::DiagramConfig;
use crate::halfedge::{EdgeHandle, FaceHandle, HalfEdgeMesh};

const NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// How a buffer's vertices are assembled into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Lines,
    Points,
    LineStrip,
}

/// Vertex data for one draw call
///
/// - wgpu / glow: upload the arrays as vertex attributes directly
/// - `indices == None`: draw the vertices in order
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer {
    pub topology: Topology,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Option<Vec<u32>>,
}

impl GeometryBuffer {
    /// Empty non-indexed buffer
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: None,
        }
    }

    /// Empty indexed buffer
    pub fn indexed(topology: Topology) -> Self {
        Self {
            indices: Some(Vec::new()),
            ..Self::new(topology)
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of elements the renderer draws (indices if present, else vertices)
    pub fn element_count(&self) -> usize {
        self.indices.as_ref().map_or(self.positions.len(), Vec::len)
    }

    /// Number of triangles, lines or points assembled from the elements
    pub fn primitive_count(&self) -> usize {
        let elements = self.element_count();
        match self.topology {
            Topology::Triangles => elements / 3,
            Topology::Lines => elements / 2,
            Topology::Points => elements,
            Topology::LineStrip => elements.saturating_sub(1),
        }
    }

    /// Check if the buffer has no vertices
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn push_vertex(&mut self, position: DVec2, uv: [f32; 2]) {
        self.positions.push([position.x as f32, position.y as f32, 0.0]);
        self.normals.push(NORMAL);
        self.uvs.push(uv);
    }
}

/// Texture coordinate of a position within a `size`-sized rectangle
#[inline]
fn uv(position: DVec2, size: DVec2) -> [f32; 2] {
    let t = position / size;
    [t.x as f32, t.y as f32]
}

/// One triangle per Delaunay face
///
/// All three corners share the average of their texture coordinates, so
/// each triangle samples one flat color. Empty face slots and faces whose
/// corners cannot be resolved are skipped.
pub fn delaunay_triangles(mesh: &HalfEdgeMesh, size: DVec2) -> GeometryBuffer {
    let mut buffer = GeometryBuffer::new(Topology::Triangles);

    for face in 0..mesh.faces().len() {
        let corners: Vec<DVec2> = mesh
            .face_ring(FaceHandle(face))
            .take(3)
            .filter_map(|e| mesh.origin_position(e))
            .collect();
        let &[a, b, c] = corners.as_slice() else { continue };

        // uv is linear, so the mean of the corner uvs is the uv of the centroid
        let average = uv((a + b + c) / 3.0, size);

        for corner in [a, b, c] {
            buffer.push_vertex(corner, average);
        }
    }

    buffer
}

/// Fan-triangulated Voronoi cells
///
/// Each cell is walked from its designated edge; every edge of the ring
/// emits the triangle (first vertex, edge origin, edge end), so a cell with
/// `n` edges yields `n` triangles, the ones touching the first vertex being
/// zero-area. Unbounded ends are pushed `ray_length` along their ray. Edges
/// unbounded on both sides contribute nothing, and a cell whose first edge
/// is one of them is skipped entirely.
///
/// Every vertex of a cell carries the texture coordinate of the cell's site
/// rather than its own position; see DESIGN.md.
pub fn voronoi_cells(mesh: &HalfEdgeMesh, size: DVec2, ray_length: f64) -> GeometryBuffer {
    let mut buffer = GeometryBuffer::new(Topology::Triangles);

    for (index, slot) in mesh.faces().iter().enumerate() {
        let Some(face) = slot else { continue };
        let first_edge = face.edge;

        if mesh.is_fully_unbounded(first_edge) {
            log::trace!("[extract] skipping Voronoi cell {} with an unresolved first edge", index);
            continue;
        }
        let Some(first) = mesh.resolve_origin(first_edge, ray_length) else {
            continue;
        };

        let site = face.reference_point.unwrap_or(first);
        let cell_uv = uv(site, size);

        for edge in mesh.face_ring(FaceHandle(index)) {
            // Both ends would land on the same ray point
            if mesh.is_fully_unbounded(edge) {
                continue;
            }
            let (Some(from), Some(to)) = (
                mesh.resolve_origin(edge, ray_length),
                mesh.resolve_destination(edge, ray_length),
            ) else {
                continue;
            };

            for corner in [first, from, to] {
                buffer.push_vertex(corner, cell_uv);
            }
        }
    }

    buffer
}

/// Line list with one segment per edge pair
///
/// Works for both diagrams; pairs with no vertex on either side are skipped.
pub fn edge_lines(mesh: &HalfEdgeMesh, size: DVec2, ray_length: f64) -> GeometryBuffer {
    let mut buffer = GeometryBuffer::new(Topology::Lines);

    for segment in mesh.extract_edge_list(ray_length) {
        buffer.push_vertex(segment.start, uv(segment.start, size));
        buffer.push_vertex(segment.end, uv(segment.end, size));
    }

    buffer
}

/// One indexed point per occupied vertex slot
pub fn point_cloud(mesh: &HalfEdgeMesh, size: DVec2) -> GeometryBuffer {
    let mut buffer = GeometryBuffer::indexed(Topology::Points);

    for vertex in mesh.vertices().iter().flatten() {
        buffer.push_vertex(vertex.position, uv(vertex.position, size));
    }
    buffer.indices = Some((0..buffer.vertex_count() as u32).collect());

    buffer
}

/// Closed line strip around the convex hull
///
/// The index array repeats the first point at the end; an empty hull gives
/// an empty buffer.
pub fn convex_hull(mesh: &HalfEdgeMesh, size: DVec2) -> GeometryBuffer {
    let mut buffer = GeometryBuffer::indexed(Topology::LineStrip);

    let hull = mesh.extract_convex_hull();
    for &point in &hull {
        buffer.push_vertex(point, uv(point, size));
    }

    if !hull.is_empty() {
        let mut indices: Vec<u32> = (0..hull.len() as u32).collect();
        indices.push(0);
        buffer.indices = Some(indices);
    }

    buffer
}

/// All render buffers of one rebuild
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramBuffers {
    pub delaunay_triangles: GeometryBuffer,
    pub voronoi_cells: GeometryBuffer,
    pub delaunay_edges: GeometryBuffer,
    pub voronoi_edges: GeometryBuffer,
    pub points: GeometryBuffer,
    pub convex_hull: GeometryBuffer,
    /// Spacing the sampler targeted, in rectangle units
    pub expected_radius: f64,
    /// Rectangle size the texture coordinates are relative to
    pub size: DVec2,
}

impl DiagramBuffers {
    /// Extract every buffer from a triangulation and its Voronoi dual
    pub fn extract(
        delaunay: &HalfEdgeMesh,
        voronoi: &HalfEdgeMesh,
        config: &DiagramConfig,
        expected_radius: f64,
    ) -> Self {
        let size = DVec2::new(config.width, config.height);

        Self {
            delaunay_triangles: delaunay_triangles(delaunay, size),
            voronoi_cells: voronoi_cells(voronoi, size, config.rays.voronoi),
            delaunay_edges: edge_lines(delaunay, size, config.rays.delaunay),
            voronoi_edges: edge_lines(voronoi, size, config.rays.voronoi),
            points: point_cloud(delaunay, size),
            convex_hull: convex_hull(delaunay, size),
            expected_radius,
            size,
        }
    }

    /// Buffer drawn for a layer
    pub fn buffer(&self, layer: Layer) -> &GeometryBuffer {
        match layer {
            Layer::DelaunayTriangles => &self.delaunay_triangles,
            Layer::VoronoiCells => &self.voronoi_cells,
            Layer::DelaunayEdges => &self.delaunay_edges,
            Layer::VoronoiEdges => &self.voronoi_edges,
            Layer::Points => &self.points,
            Layer::ConvexHull => &self.convex_hull,
        }
    }

    /// Expected radius relative to the rectangle width and height
    pub fn normalized_expected_radius(&self) -> (f32, f32) {
        let r = self.expected_radius as f32;
        (r / self.size.x as f32, r / self.size.y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::halfedge::tests::unit_square;
    use crate::halfedge::{Face, HalfEdge, Ray, Vertex, VertexHandle};

    /// Closed hexagonal cell around `site` plus an empty trailing face slot
    fn hexagon_cell(site: DVec2) -> HalfEdgeMesh {
        let n = 6;
        let vertices = (0..n)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / n as f64;
                Some(Vertex {
                    position: site + DVec2::from_angle(angle) * 10.0,
                })
            })
            .collect();

        // Ring edges 0..n, outer twins n..2n
        let mut edges = Vec::new();
        for i in 0..n {
            edges.push(Some(HalfEdge {
                origin: Some(VertexHandle(i)),
                twin: EdgeHandle(n + i),
                next: Some(EdgeHandle((i + 1) % n)),
                face: Some(FaceHandle(0)),
                ray: None,
            }));
        }
        for i in 0..n {
            edges.push(Some(HalfEdge {
                origin: Some(VertexHandle((i + 1) % n)),
                twin: EdgeHandle(i),
                next: None,
                face: None,
                ray: None,
            }));
        }

        let faces = vec![
            Some(Face {
                edge: EdgeHandle(0),
                reference_point: Some(site),
            }),
            None,
        ];

        HalfEdgeMesh::from_parts(vertices, edges, faces, None)
    }

    /// Open cell: ray in to (0,0), finite edge to (10,0), ray out
    fn open_cell() -> HalfEdgeMesh {
        let vertices = vec![
            Some(Vertex {
                position: DVec2::new(0.0, 0.0),
            }),
            Some(Vertex {
                position: DVec2::new(10.0, 0.0),
            }),
        ];
        let ray_in = Ray {
            anchor: DVec2::new(0.0, 0.0),
            direction: DVec2::new(-1.0, 0.0),
        };
        let ray_out = Ray {
            anchor: DVec2::new(10.0, 0.0),
            direction: DVec2::new(1.0, 0.0),
        };
        let edges = vec![
            Some(HalfEdge {
                origin: None,
                twin: EdgeHandle(3),
                next: Some(EdgeHandle(1)),
                face: Some(FaceHandle(0)),
                ray: Some(ray_in),
            }),
            Some(HalfEdge {
                origin: Some(VertexHandle(0)),
                twin: EdgeHandle(4),
                next: Some(EdgeHandle(2)),
                face: Some(FaceHandle(0)),
                ray: None,
            }),
            Some(HalfEdge {
                origin: Some(VertexHandle(1)),
                twin: EdgeHandle(5),
                next: None,
                face: Some(FaceHandle(0)),
                ray: Some(ray_out),
            }),
            Some(HalfEdge {
                origin: Some(VertexHandle(0)),
                twin: EdgeHandle(0),
                next: None,
                face: None,
                ray: Some(ray_in),
            }),
            Some(HalfEdge {
                origin: Some(VertexHandle(1)),
                twin: EdgeHandle(1),
                next: None,
                face: None,
                ray: None,
            }),
            Some(HalfEdge {
                origin: None,
                twin: EdgeHandle(2),
                next: None,
                face: None,
                ray: Some(ray_out),
            }),
        ];
        let faces = vec![Some(Face {
            edge: EdgeHandle(0),
            reference_point: Some(DVec2::new(5.0, 5.0)),
        })];

        HalfEdgeMesh::from_parts(vertices, edges, faces, None)
    }

    #[test]
    fn test_delaunay_triangles() {
        let mesh = unit_square();
        let buffer = delaunay_triangles(&mesh, DVec2::new(2.0, 4.0));

        assert_eq!(buffer.topology, Topology::Triangles);
        assert_eq!(buffer.vertex_count(), 6);
        assert_eq!(buffer.primitive_count(), 2);
        assert!(buffer.indices.is_none());
        assert!(buffer.normals.iter().all(|&n| n == NORMAL));

        // First triangle (0,0),(1,0),(1,1): average uv = (2/3 / 2, 1/3 / 4)
        let expected = [1.0 / 3.0, 1.0 / 12.0];
        for uv in &buffer.uvs[0..3] {
            assert!((uv[0] - expected[0]).abs() < 1e-6);
            assert!((uv[1] - expected[1]).abs() < 1e-6);
        }
        assert_eq!(buffer.positions[1], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_voronoi_fan_closure() {
        let site = DVec2::new(50.0, 40.0);
        let mesh = hexagon_cell(site);
        let buffer = voronoi_cells(&mesh, DVec2::new(100.0, 80.0), 10.0);

        // n edges -> n triangles, all anchored at the first vertex
        assert_eq!(buffer.primitive_count(), 6);
        let first = buffer.positions[0];
        for triangle in buffer.positions.chunks(3) {
            assert_eq!(triangle[0], first);
        }

        // Whole cell samples its site
        assert!(buffer.uvs.iter().all(|&uv| uv == [0.5, 0.5]));
    }

    #[test]
    fn test_voronoi_open_cell_uses_rays() {
        let mesh = open_cell();
        let buffer = voronoi_cells(&mesh, DVec2::new(10.0, 10.0), 4.0);

        assert_eq!(buffer.primitive_count(), 3);
        // Incoming ray resolved 4 units out
        assert_eq!(buffer.positions[0], [-4.0, 0.0, 0.0]);
        // Last triangle ends on the outgoing ray
        assert_eq!(buffer.positions[8], [14.0, 0.0, 0.0]);
    }

    #[test]
    fn test_voronoi_skips_fully_unbounded_cell() {
        let ray = Ray {
            anchor: DVec2::ZERO,
            direction: DVec2::Y,
        };
        let unbounded = |twin: usize| {
            Some(HalfEdge {
                origin: None,
                twin: EdgeHandle(twin),
                next: None,
                face: Some(FaceHandle(0)),
                ray: Some(ray),
            })
        };
        let mesh = HalfEdgeMesh::from_parts(
            Vec::new(),
            vec![unbounded(1), unbounded(0)],
            vec![Some(Face {
                edge: EdgeHandle(0),
                reference_point: Some(DVec2::ZERO),
            })],
            None,
        );

        assert!(voronoi_cells(&mesh, DVec2::ONE, 10.0).is_empty());
        assert!(edge_lines(&mesh, DVec2::ONE, 10.0).is_empty());
    }

    #[test]
    fn test_voronoi_skips_fully_unbounded_ring_edge() {
        let ray = Ray {
            anchor: DVec2::new(10.0, 5.0),
            direction: DVec2::X,
        };
        let vertices = [(0.0, 0.0), (20.0, 0.0), (10.0, 10.0)]
            .into_iter()
            .map(|(x, y)| Some(Vertex { position: DVec2::new(x, y) }))
            .collect();
        let edge = |origin: Option<usize>, twin: usize, next: Option<usize>| {
            Some(HalfEdge {
                origin: origin.map(VertexHandle),
                twin: EdgeHandle(twin),
                next: next.map(EdgeHandle),
                face: next.map(|_| FaceHandle(0)),
                ray: origin.is_none().then_some(ray),
            })
        };
        let edges = vec![
            // Ring 0 -> 1 -> 2, edge 1 has no vertex on either side
            edge(Some(0), 3, Some(1)),
            edge(None, 4, Some(2)),
            edge(Some(2), 5, Some(0)),
            edge(Some(1), 0, None),
            edge(None, 1, None),
            edge(Some(0), 2, None),
        ];
        let faces = vec![Some(Face {
            edge: EdgeHandle(0),
            reference_point: Some(DVec2::new(10.0, 3.0)),
        })];
        let mesh = HalfEdgeMesh::from_parts(vertices, edges, faces, None);

        let buffer = voronoi_cells(&mesh, DVec2::new(20.0, 10.0), 10.0);
        assert_eq!(buffer.primitive_count(), 2);
        assert!(!buffer.positions.contains(&[20.0, 5.0, 0.0]));
        assert_eq!(buffer.positions[2], [20.0, 0.0, 0.0]);
        assert_eq!(buffer.positions[4], [10.0, 10.0, 0.0]);

        assert_eq!(edge_lines(&mesh, DVec2::new(20.0, 10.0), 10.0).primitive_count(), 2);
    }

    #[test]
    fn test_edge_lines() {
        let mesh = unit_square();
        let buffer = edge_lines(&mesh, DVec2::new(1.0, 1.0), 0.2);

        assert_eq!(buffer.topology, Topology::Lines);
        assert_eq!(buffer.vertex_count(), 10);
        assert_eq!(buffer.primitive_count(), 5);
        for (position, uv) in buffer.positions.iter().zip(&buffer.uvs) {
            assert_eq!([position[0], position[1]], *uv);
        }
    }

    #[test]
    fn test_point_cloud_skips_empty_slots() {
        let mut vertices: Vec<Option<Vertex>> = unit_square().vertices().to_vec();
        vertices.insert(1, None);
        let mesh = HalfEdgeMesh::from_parts(vertices, Vec::new(), Vec::new(), None);

        let buffer = point_cloud(&mesh, DVec2::ONE);
        assert_eq!(buffer.vertex_count(), 4);
        assert_eq!(buffer.indices, Some(vec![0, 1, 2, 3]));
        assert_eq!(buffer.primitive_count(), 4);
    }

    #[test]
    fn test_convex_hull_closes_loop() {
        let mesh = unit_square();
        let buffer = convex_hull(&mesh, DVec2::ONE);
        let indices = buffer.indices.as_ref().unwrap();

        assert_eq!(buffer.topology, Topology::LineStrip);
        assert_eq!(indices.len(), buffer.vertex_count() + 1);
        assert_eq!(indices.first(), indices.last());
        assert_eq!(buffer.primitive_count(), 4);
    }

    #[test]
    fn test_convex_hull_empty_mesh() {
        let buffer = convex_hull(&HalfEdgeMesh::default(), DVec2::ONE);
        assert!(buffer.is_empty());
        assert_eq!(buffer.element_count(), 0);
    }

    #[test]
    fn test_empty_face_slot_is_skipped() {
        let mut mesh_faces = unit_square().faces().to_vec();
        mesh_faces.insert(0, None);
        let square = unit_square();
        let mesh = HalfEdgeMesh::from_parts(
            square.vertices().to_vec(),
            square.edges().to_vec(),
            mesh_faces,
            square.outer_edge(),
        );

        assert_eq!(delaunay_triangles(&mesh, DVec2::ONE).primitive_count(), 2);
    }
}
