//! Delaunay triangulation and Voronoi dual construction
//!
//! Triangulating is delegated to the `delaunator` crate; this module only
//! converts its flat half-edge arrays into a [`HalfEdgeMesh`] and derives the
//! Voronoi dual from any triangle mesh.
//!
//! # Duality
//!
//! - Each Delaunay face becomes a Voronoi vertex at its circumcenter.
//! - Each Delaunay vertex (site) becomes a Voronoi face.
//! - Delaunay half-edge `e` becomes Voronoi half-edge `e` in the cell of
//!   `e`'s origin, running from the circumcenter right of `e` to the one
//!   left of it. Handles are shared, so twins stay twins.

use delaunator::{next_halfedge, EMPTY};
use glam::DVec2;
use std::collections::HashMap;

use crate::error::{DiagramError, Result};
use crate::halfedge::{
    EdgeHandle, Face, FaceHandle, HalfEdge, HalfEdgeMesh, Ray, Vertex, VertexHandle,
};

/// Builds a half-edge Delaunay triangulation from a point set
pub trait Triangulator {
    /// Triangulate `points`; vertex handles equal input indices
    fn triangulate(&self, points: &[DVec2]) -> Result<HalfEdgeMesh>;
}

/// [`Triangulator`] backed by the `delaunator` crate
///
/// Every triangle edge gets a twin: hull edges are paired with outer
/// half-edges that form a closed ring around the outer face. Collinear or
/// too-small inputs produce a mesh with vertices but no edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunatorTriangulator;

impl Triangulator for DelaunatorTriangulator {
    fn triangulate(&self, points: &[DVec2]) -> Result<HalfEdgeMesh> {
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(DiagramError::TriangulationFailed(format!(
                "point {} is not finite: ({}, {})",
                index, p.x, p.y
            )));
        }

        let input: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();
        let triangulation = delaunator::triangulate(&input);

        let vertices = points.iter().map(|&position| Some(Vertex { position })).collect();
        let inner_count = triangulation.triangles.len();
        let triangles = &triangulation.triangles;

        let mut edges: Vec<Option<HalfEdge>> = (0..inner_count)
            .map(|e| {
                Some(HalfEdge {
                    origin: Some(VertexHandle(triangles[e])),
                    twin: EdgeHandle(triangulation.halfedges[e]),
                    next: Some(EdgeHandle(next_halfedge(e))),
                    face: Some(FaceHandle(e / 3)),
                    ray: None,
                })
            })
            .collect();

        // Close every hull edge with an outer twin running the other way
        let mut outer_by_origin: HashMap<usize, usize> = HashMap::new();
        for e in 0..inner_count {
            if triangulation.halfedges[e] != EMPTY {
                continue;
            }
            let outer = edges.len();
            let origin = triangles[next_halfedge(e)];
            edges.push(Some(HalfEdge {
                origin: Some(VertexHandle(origin)),
                twin: EdgeHandle(e),
                next: None,
                face: None,
                ray: None,
            }));
            if let Some(inner) = edges[e].as_mut() {
                inner.twin = EdgeHandle(outer);
            }
            outer_by_origin.insert(origin, outer);
        }

        // An outer edge continues with the outer edge leaving its end vertex
        for outer in inner_count..edges.len() {
            let end = edges[outer]
                .and_then(|o| edges[o.twin.0])
                .and_then(|twin| twin.origin);
            let next = end.and_then(|v| outer_by_origin.get(&v.0)).copied();
            if let Some(edge) = edges[outer].as_mut() {
                edge.next = next.map(EdgeHandle);
            }
        }

        let faces = (0..inner_count / 3)
            .map(|t| {
                Some(Face {
                    edge: EdgeHandle(3 * t),
                    reference_point: None,
                })
            })
            .collect();
        let outer_edge = (inner_count < edges.len()).then_some(EdgeHandle(inner_count));

        log::trace!(
            "[triangulate] {} points -> {} triangles, {} hull edges",
            points.len(),
            inner_count / 3,
            edges.len() - inner_count
        );

        Ok(HalfEdgeMesh::from_parts(vertices, edges, faces, outer_edge))
    }
}

/// Circumcenter of a triangle, `None` when its corners are collinear
pub fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> Option<DVec2> {
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * ab.perp_dot(ac);
    if d == 0.0 {
        return None;
    }

    let ab2 = ab.length_squared();
    let ac2 = ac.length_squared();
    let offset = DVec2::new(ac.y * ab2 - ab.y * ac2, ab.x * ac2 - ac.x * ab2) / d;

    let center = a + offset;
    center.is_finite().then_some(center)
}

impl HalfEdgeMesh {
    /// Build the Voronoi diagram dual to this triangulation
    ///
    /// Cells of hull sites are open chains: their designated edge comes in
    /// from infinity and the last edge leaves toward it. Unbounded edges carry
    /// a [`Ray`] anchored at the finite circumcenter and pointing away from
    /// the hull.
    pub fn voronoi_dual(&self) -> HalfEdgeMesh {
        let edge_count = self.edges().len();

        // One Voronoi vertex per Delaunay face
        let vertices: Vec<Option<Vertex>> = (0..self.faces().len())
            .map(|f| {
                let corners: Vec<DVec2> = self
                    .face_ring(FaceHandle(f))
                    .filter_map(|e| self.origin_position(e))
                    .collect();
                match corners[..] {
                    [a, b, c] => circumcenter(a, b, c).map(|position| Vertex { position }),
                    _ => None,
                }
            })
            .collect();

        let center_of = |face: Option<FaceHandle>| -> Option<VertexHandle> {
            let face = face?;
            vertices.get(face.0)?.as_ref().map(|_| VertexHandle(face.0))
        };

        let mut edges: Vec<Option<HalfEdge>> = vec![None; edge_count];
        for (index, slot) in self.edges().iter().enumerate() {
            let Some(edge) = slot else { continue };
            let Some(site) = edge.origin else { continue };
            let Some(twin) = self.edge(edge.twin) else { continue };

            let origin = center_of(twin.face);
            let destination = center_of(edge.face);

            let next = edge
                .face
                .and_then(|_| self.previous(EdgeHandle(index)))
                .and_then(|prev| self.edge(prev))
                .map(|prev| prev.twin);

            let ray = match (origin, destination) {
                (None, Some(finite)) | (Some(finite), None) => {
                    self.outward_ray(EdgeHandle(index), vertices[finite.0].map(|v| v.position))
                }
                _ => None,
            };

            edges[index] = Some(HalfEdge {
                origin,
                twin: edge.twin,
                next,
                face: Some(FaceHandle(site.0)),
                ray,
            });
        }

        // One Voronoi face per site, starting at the incoming ray when open
        let mut faces: Vec<Option<Face>> = vec![None; self.vertices().len()];
        for (index, slot) in edges.iter().enumerate() {
            let Some(edge) = slot else { continue };
            let Some(FaceHandle(site)) = edge.face else { continue };
            let Some(position) = self.vertex(VertexHandle(site)).map(|v| v.position) else {
                continue;
            };

            let opens_chain = edge.origin.is_none();
            let keep_current = faces[site]
                .map(|face| edges[face.edge.0].map_or(false, |e| e.origin.is_none()))
                .unwrap_or(false);

            if faces[site].is_none() || (opens_chain && !keep_current) {
                faces[site] = Some(Face {
                    edge: EdgeHandle(index),
                    reference_point: Some(position),
                });
            }
        }

        HalfEdgeMesh::from_parts(vertices, edges, faces, None)
    }

    /// Edge whose `next` is `edge`, found by walking its face ring
    fn previous(&self, edge: EdgeHandle) -> Option<EdgeHandle> {
        let mut current = edge;
        for _ in 0..self.edges().len() {
            let next = self.edge(current)?.next?;
            if next == edge {
                return Some(current);
            }
            current = next;
        }
        None
    }

    /// Ray from `anchor` perpendicular to `edge`, away from the face holding the anchor
    fn outward_ray(&self, edge: EdgeHandle, anchor: Option<DVec2>) -> Option<Ray> {
        let anchor = anchor?;
        let half = self.edge(edge)?;
        let a = self.origin_position(edge)?;
        let b = self.destination_position(edge)?;

        // The bounded side is whichever half-edge has a face
        let inner = if half.face.is_some() { edge } else { half.twin };
        let opposite = self
            .edge(inner)?
            .next
            .and_then(|next| self.destination_position(next))?;

        let mut direction = (b - a).perp().normalize_or_zero();
        if direction.dot(opposite - a) > 0.0 {
            direction = -direction;
        }

        Some(Ray { anchor, direction })
    }
}
