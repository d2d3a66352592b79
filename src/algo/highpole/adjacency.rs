//! Vertex and edge adjacency derived from a triangle snapshot.

use std::collections::HashMap;

use nalgebra::Vector3;

use crate::mesh::{EdgeKey, Triangle};

/// Vertex index to the edges touching it.
///
/// Stored densely by vertex index, so enumeration runs in ascending index
/// order. That order is what breaks ties between equal-gain flips.
#[derive(Debug, Clone, Default)]
pub struct VertexAdjacency {
    edges: Vec<Vec<EdgeKey>>,
}

impl VertexAdjacency {
    /// Build from the raw undirected edge list.
    ///
    /// `num_vertices` only sizes the table; edges naming larger indices grow it.
    pub fn from_edges(edges: &[EdgeKey], num_vertices: usize) -> Self {
        let mut table: Vec<Vec<EdgeKey>> = vec![Vec::new(); num_vertices];
        for &edge in edges {
            let (a, b) = edge.vertices();
            if b >= table.len() {
                table.resize_with(b + 1, Vec::new);
            }
            table[a].push(edge);
            table[b].push(edge);
        }
        Self { edges: table }
    }

    /// Number of incident edges. Unknown vertices have valence 0.
    #[inline]
    pub fn valence(&self, v: usize) -> usize {
        self.edges.get(v).map_or(0, Vec::len)
    }

    /// Edges incident to `v`, in insertion order.
    #[inline]
    pub fn edges(&self, v: usize) -> &[EdgeKey] {
        self.edges.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The largest valence over all vertices (0 for an empty table).
    pub fn max_valence(&self) -> usize {
        self.edges.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Iterate `(vertex, valence)` in ascending vertex order.
    pub fn valences(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().enumerate().map(|(v, e)| (v, e.len()))
    }

    /// Vertices whose valence equals `valence`, ascending.
    pub fn vertices_with_valence(&self, valence: usize) -> impl Iterator<Item = usize> + '_ {
        self.valences()
            .filter(move |&(_, n)| n == valence)
            .map(|(v, _)| v)
    }

    /// Number of vertex slots in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check whether the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// The triangles on one side of an edge, seen from the edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Opposites {
    /// Opposite vertex per incident triangle, in triangle order.
    pub vertices: Vec<usize>,
    /// Face normal per incident triangle, parallel to `vertices`.
    pub normals: Vec<Vector3<f64>>,
}

impl Opposites {
    /// Number of incident triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check whether no triangle has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check whether the edge is shared by exactly two triangles.
    #[inline]
    pub fn is_interior(&self) -> bool {
        self.vertices.len() == 2
    }
}

/// Edge to the vertices and normals of its incident triangles.
///
/// No manifold validation happens here; an edge on three triangles simply
/// gets three entries.
#[derive(Debug, Clone, Default)]
pub struct EdgeOpposites {
    map: HashMap<EdgeKey, Opposites>,
}

impl EdgeOpposites {
    /// Build from a triangle list.
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut map: HashMap<EdgeKey, Opposites> = HashMap::with_capacity(triangles.len() * 2);
        for triangle in triangles {
            for (edge, opposite) in triangle.edges_with_opposite() {
                let entry = map.entry(edge).or_default();
                entry.vertices.push(opposite);
                entry.normals.push(triangle.normal);
            }
        }
        Self { map }
    }

    /// Look up an edge.
    #[inline]
    pub fn get(&self, edge: EdgeKey) -> Option<&Opposites> {
        self.map.get(&edge)
    }

    /// Check whether an edge is present in any triangle.
    #[inline]
    pub fn contains(&self, edge: EdgeKey) -> bool {
        self.map.contains_key(&edge)
    }

    /// Number of distinct edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check whether there are no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Both adjacency tables for one snapshot of the mesh.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    /// Vertex to incident edges.
    pub vertices: VertexAdjacency,
    /// Edge to opposite vertices and normals.
    pub opposites: EdgeOpposites,
}

impl Adjacency {
    /// Build both tables from the current triangles and edges.
    pub fn build(triangles: &[Triangle], edges: &[EdgeKey], num_vertices: usize) -> Self {
        Self {
            vertices: VertexAdjacency::from_edges(edges, num_vertices),
            opposites: EdgeOpposites::from_triangles(triangles),
        }
    }
}
