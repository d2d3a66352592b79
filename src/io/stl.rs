//! STL (stereolithography) format support.
//!
//! STL stores every triangle with its own copy of the corner positions.
//! Loading welds corners with bit-identical coordinates back into shared
//! vertices so the result has real edge adjacency.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::debug;
use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};
use crate::mesh::PolyMesh;

/// Load a mesh from an STL file.
///
/// Automatically detects binary vs ASCII format. Triangles that collapse to
/// fewer than three distinct vertices after welding are dropped.
///
/// # Example
///
/// ```no_run
/// use highpole::io::stl;
///
/// let mesh = stl::load("model.stl").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<PolyMesh> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    let stl = stl_io::read_stl(&mut file).map_err(|e| MeshError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut welded: HashMap<[u32; 3], usize> = HashMap::new();
    let mut remap: Vec<usize> = Vec::with_capacity(stl.vertices.len());

    for vtx in &stl.vertices {
        let key = [vtx[0].to_bits(), vtx[1].to_bits(), vtx[2].to_bits()];
        let index = *welded.entry(key).or_insert_with(|| {
            vertices.push(Point3::new(vtx[0] as f64, vtx[1] as f64, vtx[2] as f64));
            vertices.len() - 1
        });
        remap.push(index);
    }

    let mut faces: Vec<[usize; 3]> = Vec::with_capacity(stl.faces.len());
    let mut dropped = 0usize;
    for tri in &stl.faces {
        let [i0, i1, i2] = tri.vertices.map(|i| remap[i]);
        if i0 != i1 && i1 != i2 && i0 != i2 {
            faces.push([i0, i1, i2]);
        } else {
            dropped += 1;
        }
    }

    if faces.is_empty() {
        return Err(MeshError::LoadError {
            path: path.to_path_buf(),
            message: "STL file contains no valid triangles".to_string(),
        });
    }

    debug!(
        "loaded STL: {} vertices, {} triangles, {} degenerate dropped",
        vertices.len(),
        faces.len(),
        dropped
    );
    PolyMesh::from_triangles(vertices, &faces)
}

/// Save a mesh to a binary STL file.
///
/// Polygons are fan-triangulated on output; the mesh itself is not changed.
pub fn save<P: AsRef<Path>>(mesh: &PolyMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let vertices = mesh.positions();
    let to_vertex = |p: &Point3<f64>| stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32]);

    let triangles: Vec<stl_io::Triangle> = mesh
        .faces()
        .iter()
        .flat_map(|face| (1..face.len() - 1).map(move |i| [face[0], face[i], face[i + 1]]))
        .map(|[a, b, c]| {
            let (p0, p1, p2) = (&vertices[a], &vertices[b], &vertices[c]);
            let n = (p1 - p0)
                .cross(&(p2 - p0))
                .try_normalize(f64::EPSILON)
                .unwrap_or_else(Vector3::zeros);

            stl_io::Triangle {
                normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [to_vertex(p0), to_vertex(p1), to_vertex(p2)],
            }
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.iter()).map_err(|e| MeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshHost;

    #[test]
    fn test_save_welds_shared_corners_on_load() {
        // Two triangles sharing an edge plus a quad: 6 vertices, 4 triangles.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ];
        let faces = vec![vec![0, 1, 2], vec![0, 2, 3], vec![1, 4, 5, 2]];
        let mesh = PolyMesh::from_polygons(vertices, faces).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.stl");
        save(&mesh, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.num_vertices(), 6);
        assert_eq!(loaded.num_faces(), 4);
        assert!(loaded.is_triangle_mesh());
        assert!(loaded.is_valid());
        assert_eq!(loaded.raw_edges().len(), 9);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(dir.path().join("absent.stl"));
        assert!(matches!(result, Err(MeshError::Io(_))));
    }
}
