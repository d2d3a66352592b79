//! Benchmarks for highpole reduction.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use highpole::algo::highpole::Adjacency;
use highpole::prelude::*;
use nalgebra::Point3;

/// A flat `n x n` grid whose quads are kept as polygons, plus one large
/// separate polygon with `spokes` rim vertices.
fn create_ngon_grid(n: usize, spokes: usize) -> PolyMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n);

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
            faces.push(vec![v00, v10, v11, v01]);
        }
    }

    // Detached disk: one n-gon that fans into a highpole on triangulation.
    let base = vertices.len();
    let center = Point3::new(n as f64 * 0.5, n as f64 * 0.5, 0.0);
    for k in 0..spokes {
        let a = std::f64::consts::TAU * k as f64 / spokes as f64;
        vertices.push(center + nalgebra::Vector3::new(a.cos(), a.sin(), 0.0) * 3.0);
    }
    faces.push((base..base + spokes).collect());

    PolyMesh::from_polygons(vertices, faces).unwrap()
}

fn bench_adjacency(c: &mut Criterion) {
    let mut mesh = create_ngon_grid(50, 32);
    mesh.triangulate_all_faces();

    c.bench_function("adjacency_build_50x50", |b| {
        b.iter(|| {
            let triangles = mesh.triangles();
            let edges = mesh.raw_edges();
            Adjacency::build(&triangles, &edges, mesh.num_vertices())
        });
    });
}

fn bench_reduce(c: &mut Criterion) {
    let mesh = create_ngon_grid(20, 32);
    let options = HighpoleOptions::default();

    c.bench_function("reduce_highpoles_20x20_32gon", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mut m| reduce_highpoles(&mut m, &options).unwrap(),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("reduce_highpoles_20x20_32gon_sequential", |b| {
        b.iter_batched(
            || mesh.clone().with_parallel(false),
            |mut m| reduce_highpoles(&mut m, &options).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_adjacency, bench_reduce);
criterion_main!(benches);
