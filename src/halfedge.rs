//! Arena half-edge mesh
//!
//! Vertices, half-edges and faces live in flat arenas addressed by integer
//! handles. A slot may be empty (`None`): an empty vertex slot marks an
//! unused index, an empty face slot is never walked. A half-edge without an
//! origin is *unbounded*; it carries a [`Ray`] describing where it comes from.
//!
//! The Delaunay triangulation and its Voronoi dual share this one type; a
//! Voronoi mesh is simply a mesh whose faces are cells and whose boundary
//! edges are rays.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle of a vertex slot
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexHandle(pub usize);

/// Handle of a half-edge slot
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeHandle(pub usize);

/// Handle of a face slot
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceHandle(pub usize);

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: DVec2,
}

/// Half-line standing in for a missing vertex
///
/// `anchor` is the finite end of the edge and `direction` (unit length)
/// points toward the missing one.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub anchor: DVec2,
    pub direction: DVec2,
}

impl Ray {
    /// Point `length` units along the ray
    #[inline]
    pub fn point_at(&self, length: f64) -> DVec2 {
        self.anchor + self.direction * length
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfEdge {
    /// Start vertex, `None` for an unbounded edge
    pub origin: Option<VertexHandle>,
    /// Oppositely directed partner
    pub twin: EdgeHandle,
    /// Following edge around `face`, `None` at the end of an open chain
    pub next: Option<EdgeHandle>,
    /// Face on the left, `None` for the outer face
    pub face: Option<FaceHandle>,
    /// Set whenever this edge or its twin lacks an origin
    pub ray: Option<Ray>,
}

impl HalfEdge {
    /// Whether the edge starts at a real vertex
    #[inline]
    pub fn has_origin(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// First edge of the face's ring
    pub edge: EdgeHandle,
    /// Site a Voronoi cell belongs to; `None` for Delaunay triangles
    pub reference_point: Option<DVec2>,
}

/// Finite line segment produced by [`HalfEdgeMesh::extract_edge_list`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    pub start: DVec2,
    pub end: DVec2,
}

/// Planar subdivision stored as vertex, half-edge and face arenas
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalfEdgeMesh {
    vertices: Vec<Option<Vertex>>,
    edges: Vec<Option<HalfEdge>>,
    faces: Vec<Option<Face>>,
    outer_edge: Option<EdgeHandle>,
}

impl HalfEdgeMesh {
    /// Assemble a mesh from its arenas
    ///
    /// `outer_edge` is any edge of the outer (unbounded) face; the convex
    /// hull walk starts there.
    pub fn from_parts(
        vertices: Vec<Option<Vertex>>,
        edges: Vec<Option<HalfEdge>>,
        faces: Vec<Option<Face>>,
        outer_edge: Option<EdgeHandle>,
    ) -> Self {
        Self {
            vertices,
            edges,
            faces,
            outer_edge,
        }
    }

    /// Vertex slots, indexed by [`VertexHandle`]
    #[inline]
    pub fn vertices(&self) -> &[Option<Vertex>] {
        &self.vertices
    }

    /// Half-edge slots, indexed by [`EdgeHandle`]
    #[inline]
    pub fn edges(&self) -> &[Option<HalfEdge>] {
        &self.edges
    }

    /// Face slots, indexed by [`FaceHandle`]
    #[inline]
    pub fn faces(&self) -> &[Option<Face>] {
        &self.faces
    }

    #[inline]
    pub fn outer_edge(&self) -> Option<EdgeHandle> {
        self.outer_edge
    }

    #[inline]
    pub fn vertex(&self, handle: VertexHandle) -> Option<&Vertex> {
        self.vertices.get(handle.0).and_then(Option::as_ref)
    }

    #[inline]
    pub fn edge(&self, handle: EdgeHandle) -> Option<&HalfEdge> {
        self.edges.get(handle.0).and_then(Option::as_ref)
    }

    #[inline]
    pub fn face(&self, handle: FaceHandle) -> Option<&Face> {
        self.faces.get(handle.0).and_then(Option::as_ref)
    }

    /// Number of occupied vertex slots
    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().flatten().count()
    }

    /// Number of occupied face slots
    pub fn face_count(&self) -> usize {
        self.faces.iter().flatten().count()
    }

    /// Whether the mesh has no edges at all
    pub fn is_empty(&self) -> bool {
        self.edges.iter().all(Option::is_none)
    }

    /// Position of the edge's origin vertex, if it has one
    pub fn origin_position(&self, edge: EdgeHandle) -> Option<DVec2> {
        let origin = self.edge(edge)?.origin?;
        self.vertex(origin).map(|v| v.position)
    }

    /// Position of the edge's end vertex (its twin's origin), if it has one
    pub fn destination_position(&self, edge: EdgeHandle) -> Option<DVec2> {
        self.origin_position(self.edge(edge)?.twin)
    }

    /// Whether both ends of the edge lack a vertex
    pub fn is_fully_unbounded(&self, edge: EdgeHandle) -> bool {
        self.origin_position(edge).is_none() && self.destination_position(edge).is_none()
    }

    /// Start of the edge, extending its ray by `ray_length` when unbounded
    pub fn resolve_origin(&self, edge: EdgeHandle, ray_length: f64) -> Option<DVec2> {
        self.origin_position(edge)
            .or_else(|| self.edge_ray(edge).map(|ray| ray.point_at(ray_length)))
    }

    /// End of the edge, extending its ray by `ray_length` when unbounded
    pub fn resolve_destination(&self, edge: EdgeHandle, ray_length: f64) -> Option<DVec2> {
        self.destination_position(edge)
            .or_else(|| self.edge_ray(edge).map(|ray| ray.point_at(ray_length)))
    }

    /// Finite segment for an edge, or `None` when neither end is a vertex
    pub fn segment(&self, edge: EdgeHandle, ray_length: f64) -> Option<EdgeSegment> {
        if self.is_fully_unbounded(edge) {
            return None;
        }
        Some(EdgeSegment {
            start: self.resolve_origin(edge, ray_length)?,
            end: self.resolve_destination(edge, ray_length)?,
        })
    }

    /// Walk a face's ring starting at its designated edge
    ///
    /// The walk ends when it returns to the first edge, reaches an open
    /// chain's end, or has visited as many edges as the mesh holds. An
    /// empty face slot yields nothing.
    pub fn face_ring(&self, face: FaceHandle) -> FaceRing<'_> {
        let start = self.face(face).map(|f| f.edge);
        self.ring_from(start)
    }

    /// Every edge pair once, as finite segments
    ///
    /// Unbounded ends are extended by `ray_length`; pairs with no vertex on
    /// either side are skipped.
    pub fn extract_edge_list(&self, ray_length: f64) -> Vec<EdgeSegment> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let edge = slot.as_ref()?;
                // Emit each pair from its lower-indexed half
                if edge.twin.0 < index && self.edge(edge.twin).is_some() {
                    return None;
                }
                self.segment(EdgeHandle(index), ray_length)
            })
            .collect()
    }

    /// Boundary points in walk order around the outer face
    ///
    /// Empty for meshes without an outer face (such as Voronoi duals).
    pub fn extract_convex_hull(&self) -> Vec<DVec2> {
        self.ring_from(self.outer_edge)
            .filter_map(|edge| self.origin_position(edge))
            .collect()
    }

    fn edge_ray(&self, edge: EdgeHandle) -> Option<Ray> {
        let half = self.edge(edge)?;
        half.ray.or_else(|| self.edge(half.twin).and_then(|twin| twin.ray))
    }

    fn ring_from(&self, start: Option<EdgeHandle>) -> FaceRing<'_> {
        FaceRing {
            mesh: self,
            start,
            current: start.filter(|&e| self.edge(e).is_some()),
            remaining: self.edges.len(),
        }
    }
}

/// Iterator over the edges of one face, see [`HalfEdgeMesh::face_ring`]
pub struct FaceRing<'a> {
    mesh: &'a HalfEdgeMesh,
    start: Option<EdgeHandle>,
    current: Option<EdgeHandle>,
    remaining: usize,
}

impl Iterator for FaceRing<'_> {
    type Item = EdgeHandle;

    fn next(&mut self) -> Option<EdgeHandle> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.current?;
        self.remaining -= 1;

        self.current = self
            .mesh
            .edge(current)
            .and_then(|e| e.next)
            .filter(|&next| Some(next) != self.start && self.mesh.edge(next).is_some());

        Some(current)
    }
}
