//! Core mesh data structures.
//!
//! This module provides the types the flip core exchanges with its host and a
//! reference host implementation.
//!
//! # Overview
//!
//! - [`EdgeKey`] - an undirected edge, canonicalized smaller-index-first
//! - [`Triangle`] - three vertex indices plus a unit face normal
//! - [`MeshHost`] - the operations a mesh-owning environment must provide
//! - [`PolyMesh`] - a face-list polygon mesh implementing [`MeshHost`]
//!
//! # Construction
//!
//! ```
//! use highpole::mesh::{MeshHost, PolyMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let mesh = PolyMesh::from_triangles(vertices, &[[0, 1, 2]]).unwrap();
//! assert_eq!(mesh.raw_edges().len(), 3);
//! ```

mod edge;
mod host;
mod polymesh;

pub use edge::{EdgeKey, Triangle};
pub use host::MeshHost;
pub use polymesh::PolyMesh;
