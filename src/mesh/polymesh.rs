//! Face-list polygon mesh used as the reference [`MeshHost`].
//!
//! [`PolyMesh`] keeps vertex positions, polygonal faces as index lists and a
//! per-vertex selection flag. Faces may be arbitrary polygons until
//! [`MeshHost::triangulate_all_faces`] is called; all topology queries used by
//! the flip core only look at triangles.

use std::collections::{HashMap, HashSet};

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use super::edge::{EdgeKey, Triangle};
use super::host::MeshHost;
use crate::error::{MeshError, Result};

/// Normals shorter than this are treated as degenerate.
const NORMAL_EPSILON: f64 = 1e-12;

/// A polygon mesh stored as a face-vertex list with vertex selection.
#[derive(Debug, Clone)]
pub struct PolyMesh {
    vertices: Vec<Point3<f64>>,
    faces: Vec<Vec<usize>>,
    selected: Vec<bool>,
    parallel: bool,
}

impl PolyMesh {
    /// Build a mesh from vertices and polygonal faces.
    ///
    /// # Arguments
    /// * `vertices` - List of vertex positions
    /// * `faces` - List of faces, each a list of at least 3 vertex indices
    ///
    /// # Example
    /// ```
    /// use highpole::mesh::PolyMesh;
    /// use nalgebra::Point3;
    ///
    /// let vertices = vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(1.0, 1.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// ];
    /// let mesh = PolyMesh::from_polygons(vertices, vec![vec![0, 1, 2, 3]]).unwrap();
    /// assert_eq!(mesh.num_faces(), 1);
    /// assert!(!mesh.is_triangle_mesh());
    /// ```
    pub fn from_polygons(vertices: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> Result<Self> {
        if faces.is_empty() {
            return Err(MeshError::EmptyMesh);
        }

        for (fi, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::DegenerateFace { face: fi });
            }
            for &vi in face {
                if vi >= vertices.len() {
                    return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
                }
            }
            let distinct: HashSet<usize> = face.iter().copied().collect();
            if distinct.len() != face.len() {
                return Err(MeshError::DegenerateFace { face: fi });
            }
        }

        let selected = vec![false; vertices.len()];
        Ok(Self {
            vertices,
            faces,
            selected,
            parallel: true,
        })
    }

    /// Build a mesh from vertices and triangle faces.
    pub fn from_triangles(vertices: Vec<Point3<f64>>, faces: &[[usize; 3]]) -> Result<Self> {
        Self::from_polygons(vertices, faces.iter().map(|f| f.to_vec()).collect())
    }

    /// Set whether face normals are computed in parallel (default: true).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Faces as vertex index lists.
    #[inline]
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Check whether every face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }

    /// Check whether a vertex is selected.
    #[inline]
    pub fn is_selected(&self, v: usize) -> bool {
        self.selected.get(v).copied().unwrap_or(false)
    }

    /// Indices of all selected vertices, ascending.
    pub fn selected_vertices(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| s.then_some(i))
            .collect()
    }

    /// Deselect every vertex.
    pub fn clear_selection(&mut self) {
        self.selected.iter_mut().for_each(|s| *s = false);
    }

    // ==================== Topology ====================

    /// Valence (number of incident edges) of every vertex.
    pub fn valences(&self) -> Vec<usize> {
        let mut valence = vec![0; self.vertices.len()];
        for edge in self.raw_edges() {
            valence[edge.v0()] += 1;
            valence[edge.v1()] += 1;
        }
        valence
    }

    /// Valence of a single vertex.
    pub fn valence(&self, v: usize) -> usize {
        self.raw_edges().iter().filter(|e| e.contains(v)).count()
    }

    /// Compute the unit normal of a face.
    ///
    /// Uses Newell's method so it also works for non-planar polygons. Returns
    /// the zero vector for degenerate faces.
    pub fn face_normal(&self, face: usize) -> Vector3<f64> {
        newell_normal(&self.vertices, &self.faces[face])
    }

    /// Check that the face list is a consistently oriented manifold.
    ///
    /// No undirected edge may be shared by more than two faces and no directed
    /// edge may appear twice.
    pub fn is_valid(&self) -> bool {
        let mut edge_counts: HashMap<EdgeKey, usize> = HashMap::new();
        let mut directed: HashSet<(usize, usize)> = HashSet::new();

        for face in &self.faces {
            for (a, b) in face_edges(face) {
                *edge_counts.entry(EdgeKey::new(a, b)).or_insert(0) += 1;
                if !directed.insert((a, b)) {
                    return false;
                }
            }
        }

        edge_counts.values().all(|&c| c <= 2)
    }

    /// Check whether any face has `(a, b)` as a boundary edge.
    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.faces
            .iter()
            .any(|face| face_edges(face).any(|(p, q)| (p == a && q == b) || (p == b && q == a)))
    }

    /// Find the triangles containing edge `(v0, v1)`, with the position of
    /// the edge's first vertex inside each triangle.
    fn triangles_on_edge(&self, v0: usize, v1: usize) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        for (idx, face) in self.faces.iter().enumerate() {
            if face.len() != 3 {
                continue;
            }
            for i in 0..3 {
                let a = face[i];
                let b = face[(i + 1) % 3];
                if (a == v0 && b == v1) || (a == v1 && b == v0) {
                    found.push((idx, i));
                    break;
                }
            }
        }
        found
    }
}

impl MeshHost for PolyMesh {
    /// Fan-triangulate every face with more than three vertices.
    fn triangulate_all_faces(&mut self) {
        if self.is_triangle_mesh() {
            return;
        }

        let mut triangles = Vec::with_capacity(self.faces.len() * 2);
        for face in self.faces.drain(..) {
            if face.len() == 3 {
                triangles.push(face);
            } else {
                for i in 1..face.len() - 1 {
                    triangles.push(vec![face[0], face[i], face[i + 1]]);
                }
            }
        }
        self.faces = triangles;
    }

    fn vertices(&self) -> Vec<Point3<f64>> {
        self.vertices.clone()
    }

    fn triangles(&self) -> Vec<Triangle> {
        let to_triangle = |face: &Vec<usize>| -> Option<Triangle> {
            if face.len() != 3 {
                return None;
            }
            let normal = newell_normal(&self.vertices, face);
            Some(Triangle::new([face[0], face[1], face[2]], normal))
        };

        if self.parallel {
            self.faces.par_iter().filter_map(to_triangle).collect()
        } else {
            self.faces.iter().filter_map(to_triangle).collect()
        }
    }

    fn raw_edges(&self) -> Vec<EdgeKey> {
        let mut seen: HashSet<EdgeKey> = HashSet::new();
        let mut edges = Vec::new();
        for face in &self.faces {
            for (a, b) in face_edges(face) {
                let key = EdgeKey::new(a, b);
                if seen.insert(key) {
                    edges.push(key);
                }
            }
        }
        edges
    }

    fn rotate_edge(&mut self, v0: usize, v1: usize) -> Result<()> {
        let found = self.triangles_on_edge(v0, v1);
        let refuse = |reason| MeshError::EdgeNotFlippable {
            v0,
            v1,
            triangles: found.len(),
            reason,
        };
        if found.len() != 2 {
            return Err(refuse("edge is not shared by two triangles"));
        }

        let (idx0, e0) = found[0];
        let (idx1, e1) = found[1];

        // Triangle 0 is (a, b, opp0), triangle 1 is (b, a, opp1). The quad
        // boundary runs a -> opp1 -> b -> opp0.
        let a = self.faces[idx0][e0];
        let b = self.faces[idx0][(e0 + 1) % 3];
        let opp0 = self.faces[idx0][(e0 + 2) % 3];
        let opp1 = self.faces[idx1][(e1 + 2) % 3];

        if opp0 == opp1 {
            return Err(refuse("both triangles have the same opposite vertex"));
        }
        if self.has_edge(opp0, opp1) {
            return Err(refuse("the other diagonal is already an edge"));
        }

        self.faces[idx0] = vec![opp0, a, opp1];
        self.faces[idx1] = vec![opp1, b, opp0];
        Ok(())
    }

    fn set_vertex_selected(&mut self, v: usize, selected: bool) {
        if let Some(flag) = self.selected.get_mut(v) {
            *flag = selected;
        }
    }
}

/// Iterate the directed boundary edges of a polygon.
fn face_edges(face: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = face.len();
    (0..n).map(move |i| (face[i], face[(i + 1) % n]))
}

fn newell_normal(vertices: &[Point3<f64>], face: &[usize]) -> Vector3<f64> {
    let mut normal = Vector3::zeros();
    for (a, b) in face_edges(face) {
        let p = &vertices[a];
        let q = &vertices[b];
        normal.x += (p.y - q.y) * (p.z + q.z);
        normal.y += (p.z - q.z) * (p.x + q.x);
        normal.z += (p.x - q.x) * (p.y + q.y);
    }
    normal.try_normalize(NORMAL_EPSILON).unwrap_or_else(Vector3::zeros)
}
