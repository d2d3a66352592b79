//! The host interface the flip core talks to.
//!
//! The flip core never owns mesh storage. Whatever editor or data structure
//! holds the mesh implements [`MeshHost`], and the core reads a fresh snapshot
//! through it at the start of every iteration and asks it to perform exactly one
//! edge rotation per iteration.
//!
//! [`PolyMesh`](super::PolyMesh) is the reference implementation shipped with
//! this crate.

use nalgebra::Point3;

use super::edge::{EdgeKey, Triangle};
use crate::error::Result;

/// Operations a mesh-owning environment provides to the flip core.
pub trait MeshHost {
    /// Convert every non-triangular face into triangles.
    ///
    /// This is a precondition of the flip loop, not part of it. It is called
    /// once by the caller before the loop starts.
    fn triangulate_all_faces(&mut self);

    /// Current vertex positions. The vertex index is the position in the
    /// returned vector.
    fn vertices(&self) -> Vec<Point3<f64>>;

    /// Current triangles with their unit face normals.
    fn triangles(&self) -> Vec<Triangle>;

    /// Current undirected edges, each listed once.
    fn raw_edges(&self) -> Vec<EdgeKey>;

    /// Replace the two triangles sharing `(v0, v1)` with the two triangles
    /// sharing the other diagonal of their quad.
    ///
    /// Fails with [`MeshError::EdgeNotFlippable`](crate::error::MeshError::EdgeNotFlippable)
    /// if the edge is not shared by exactly two triangles at call time, or if
    /// the rotation would produce a degenerate or duplicated edge.
    fn rotate_edge(&mut self, v0: usize, v1: usize) -> Result<()>;

    /// Mark or unmark a vertex as selected. Cosmetic only.
    fn set_vertex_selected(&mut self, v: usize, selected: bool);
}

impl<H: MeshHost + ?Sized> MeshHost for &mut H {
    fn triangulate_all_faces(&mut self) {
        (**self).triangulate_all_faces()
    }

    fn vertices(&self) -> Vec<Point3<f64>> {
        (**self).vertices()
    }

    fn triangles(&self) -> Vec<Triangle> {
        (**self).triangles()
    }

    fn raw_edges(&self) -> Vec<EdgeKey> {
        (**self).raw_edges()
    }

    fn rotate_edge(&mut self, v0: usize, v1: usize) -> Result<()> {
        (**self).rotate_edge(v0, v1)
    }

    fn set_vertex_selected(&mut self, v: usize, selected: bool) {
        (**self).set_vertex_selected(v, selected)
    }
}
