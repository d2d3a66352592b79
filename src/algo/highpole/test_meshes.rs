//! Small synthetic meshes shared by the flip tests.

use std::f64::consts::TAU;

use nalgebra::Point3;

use crate::mesh::PolyMesh;

/// Regular `n x n` grid in the xy-plane, two triangles per cell.
///
/// Interior vertices have valence 6.
pub(crate) fn grid(n: usize) -> PolyMesh {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }

    PolyMesh::from_triangles(vertices, &faces).unwrap()
}

/// Closed fan around hub 0 with `n` rim vertices `1..=n` on the unit circle.
///
/// The hub sits at height `hub_z`; `0.0` gives a flat disk.
pub(crate) fn cone_fan(n: usize, hub_z: f64) -> PolyMesh {
    let mut vertices = vec![Point3::new(0.0, 0.0, hub_z)];
    for i in 0..n {
        let angle = TAU * i as f64 / n as f64;
        vertices.push(Point3::new(angle.cos(), angle.sin(), 0.0));
    }
    let faces: Vec<[usize; 3]> = (0..n).map(|i| [0, 1 + i, 1 + (i + 1) % n]).collect();
    PolyMesh::from_triangles(vertices, &faces).unwrap()
}

/// Flat closed fan: hub 0 has valence `n`, rim vertices valence 3.
pub(crate) fn fan_disk(n: usize) -> PolyMesh {
    cone_fan(n, 0.0)
}

/// Flat fan of `n` spokes surrounded by a second, boundary ring.
///
/// Hub 0 has valence `n`, inner ring vertices `1..=n` valence 5 and outer ring
/// vertices `n+1..=2n` valence 4.
pub(crate) fn pole_in_ring(n: usize) -> PolyMesh {
    let mut vertices = vec![Point3::origin()];
    for i in 0..n {
        let angle = TAU * i as f64 / n as f64;
        vertices.push(Point3::new(angle.cos(), angle.sin(), 0.0));
    }
    for i in 0..n {
        let angle = TAU * (i as f64 + 0.5) / n as f64;
        vertices.push(Point3::new(2.0 * angle.cos(), 2.0 * angle.sin(), 0.0));
    }

    let inner = |i: usize| 1 + i % n;
    let outer = |i: usize| 1 + n + i % n;

    let mut faces = Vec::new();
    for i in 0..n {
        faces.push([0, inner(i), inner(i + 1)]);
        faces.push([inner(i), outer(i), inner(i + 1)]);
        faces.push([inner(i + 1), outer(i), outer(i + 1)]);
    }
    PolyMesh::from_triangles(vertices, &faces).unwrap()
}

#[test]
fn test_fixture_valences() {
    let fan = fan_disk(13);
    assert_eq!(fan.valence(0), 13);
    assert!(fan.valences()[1..].iter().all(|&v| v == 3));

    let ring = pole_in_ring(16);
    let valences = ring.valences();
    assert_eq!(valences[0], 16);
    assert!(valences[1..=16].iter().all(|&v| v == 5));
    assert!(valences[17..].iter().all(|&v| v == 4));
    assert!(ring.is_valid());

    let g = grid(4);
    assert_eq!(g.valences().into_iter().max(), Some(6));
}
