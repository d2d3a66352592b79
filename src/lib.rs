//! # Highpole
//!
//! Reduce high-valence vertices ("highpoles") in polygon meshes by greedy
//! edge flips.
//!
//! Highpoles are vertices with many incident edges, typically left behind by
//! fan triangulation of large n-gons. They shade and deform badly. Highpole
//! triangulates the mesh and then repeatedly flips the single edge that best
//! lowers the worst valence, subject to flatness and convexity checks, until
//! every vertex is below a threshold or no acceptable flip remains.
//!
//! ## Features
//!
//! - **Host-agnostic core**: the flip loop only needs the small [`MeshHost`]
//!   trait, so it can drive any mesh editor that can report triangles and
//!   rotate an edge
//! - **Reference mesh**: [`PolyMesh`] is a simple face-list mesh implementing
//!   [`MeshHost`]
//! - **File formats**: PLY and STL
//!
//! ## Quick Start
//!
//! ```no_run
//! use highpole::prelude::*;
//!
//! let mut mesh = highpole::io::load("model.ply").unwrap();
//!
//! let report = reduce_highpoles(&mut mesh, &HighpoleOptions::default()).unwrap();
//! println!(
//!     "{} flips, worst valence {} -> {}",
//!     report.num_flips(),
//!     report.initial_worst_valence,
//!     report.final_worst_valence
//! );
//!
//! highpole::io::save(&mesh, "output.ply").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use highpole::prelude::*;
//! use nalgebra::Point3;
//!
//! // A unit square split along its diagonal (0, 2).
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mut mesh = PolyMesh::from_triangles(vertices, &[[0, 1, 2], [0, 2, 3]]).unwrap();
//! assert_eq!(mesh.valence(0), 3);
//!
//! // Rotate the diagonal so it joins 1 and 3 instead.
//! mesh.rotate_edge(0, 2).unwrap();
//! assert_eq!(mesh.valence(0), 2);
//! assert_eq!(mesh.valence(1), 3);
//! ```
//!
//! [`MeshHost`]: mesh::MeshHost
//! [`PolyMesh`]: mesh::PolyMesh

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use highpole::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::highpole::{
        reduce_highpoles, reduce_highpoles_with_progress, HighpoleOptions, ReduceReport,
        Termination,
    };
    pub use crate::algo::Progress;
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{EdgeKey, MeshHost, PolyMesh, Triangle};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
