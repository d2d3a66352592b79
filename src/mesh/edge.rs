//! Canonical edge and triangle types.
//!
//! Edges are never stored as entities of their own. They are derived from the
//! triangle list on demand and identified by an [`EdgeKey`], the unordered pair
//! of endpoint indices with the smaller index first.

use std::fmt::{self, Debug};

use nalgebra::Vector3;

/// An undirected edge, canonicalized so that `v0 <= v1`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EdgeKey {
    v0: usize,
    v1: usize,
}

impl EdgeKey {
    /// Create a key from two endpoints in any order.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { v0: a, v1: b }
        } else {
            Self { v0: b, v1: a }
        }
    }

    /// The smaller endpoint.
    #[inline]
    pub fn v0(self) -> usize {
        self.v0
    }

    /// The larger endpoint.
    #[inline]
    pub fn v1(self) -> usize {
        self.v1
    }

    /// Both endpoints, smaller first.
    #[inline]
    pub fn vertices(self) -> (usize, usize) {
        (self.v0, self.v1)
    }

    /// Check if `v` is one of the endpoints.
    #[inline]
    pub fn contains(self, v: usize) -> bool {
        self.v0 == v || self.v1 == v
    }

    /// Get the endpoint across from `v`, if `v` is on this edge.
    #[inline]
    pub fn other(self, v: usize) -> Option<usize> {
        if v == self.v0 {
            Some(self.v1)
        } else if v == self.v1 {
            Some(self.v0)
        } else {
            None
        }
    }
}

impl Debug for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E({}, {})", self.v0, self.v1)
    }
}

impl From<(usize, usize)> for EdgeKey {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

/// A triangle as seen by the flip core: three vertex indices in winding
/// order plus the unit face normal.
///
/// Degenerate triangles carry a zero normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertex indices in winding order.
    pub vertices: [usize; 3],
    /// Unit face normal.
    pub normal: Vector3<f64>,
}

impl Triangle {
    /// Create a triangle from its indices and normal.
    pub fn new(vertices: [usize; 3], normal: Vector3<f64>) -> Self {
        Self { vertices, normal }
    }

    /// The three edges of the triangle, each paired with its opposite vertex.
    ///
    /// Edges are taken cyclically: `(a, b) -> c`, `(b, c) -> a`, `(c, a) -> b`.
    pub fn edges_with_opposite(&self) -> [(EdgeKey, usize); 3] {
        let [a, b, c] = self.vertices;
        [
            (EdgeKey::new(a, b), c),
            (EdgeKey::new(b, c), a),
            (EdgeKey::new(c, a), b),
        ]
    }
}
