//! Highpole reduction by greedy edge flips.
//!
//! A *highpole* is a vertex whose valence (number of incident edges) is at or
//! above a threshold. Such vertices are common after fan triangulation or
//! boolean operations and produce poor shading and deformation. This module
//! repeatedly flips one edge around the current worst vertex until every
//! vertex falls below the threshold or no acceptable flip is left.
//!
//! The algorithm talks to the mesh only through [`MeshHost`], so it works
//! on the bundled [`PolyMesh`](crate::mesh::PolyMesh) as well as on any
//! external mesh that can triangulate, report edges and rotate an edge.
//!
//! # Example
//!
//! ```
//! use highpole::prelude::*;
//! use nalgebra::Point3;
//!
//! // A flat disk with 13 spokes around vertex 0.
//! let n = 13;
//! let mut vertices = vec![Point3::origin()];
//! for i in 0..n {
//!     let a = std::f64::consts::TAU * i as f64 / n as f64;
//!     vertices.push(Point3::new(a.cos(), a.sin(), 0.0));
//! }
//! let faces: Vec<[usize; 3]> = (0..n).map(|i| [0, 1 + i, 1 + (i + 1) % n]).collect();
//! let mut mesh = PolyMesh::from_triangles(vertices, &faces).unwrap();
//!
//! let options = HighpoleOptions::default().with_min_edges(13);
//! let report = reduce_highpoles(&mut mesh, &options).unwrap();
//!
//! assert_eq!(report.num_flips(), 1);
//! assert_eq!(mesh.valence(0), 12);
//! ```

mod adjacency;
mod lines;
mod reduce;
mod score;

#[cfg(test)]
pub(crate) mod test_meshes;

pub use adjacency::{Adjacency, EdgeOpposites, Opposites, VertexAdjacency};
pub use lines::{closest_line_params, PARALLEL_EPSILON};
pub use reduce::{run_flip_loop, select_flip, ReduceReport, RejectionHistory, Termination};
pub use score::{evaluate_flip, score_flip, FlipScore, FlipThresholds, GateFailure};

use log::info;

use super::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::MeshHost;

/// Options for highpole reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct HighpoleOptions {
    /// Valence at or above which a vertex counts as a highpole (7 to 24).
    pub min_edges: usize,

    /// Largest allowed angle in degrees between the two triangles of a
    /// flipped edge (0 to 90). Guards creases and silhouettes.
    pub face_divergence_deg: f64,

    /// Margin on where the new edge may cross the old one (-0.4 to 0.4).
    ///
    /// Positive values reject flips whose crossing lies near an endpoint;
    /// negative values admit crossings slightly beyond the old edge.
    pub flip_padding: f64,

    /// Stop after this many flips. `None` runs until no flip is possible.
    pub max_iterations: Option<usize>,
}

impl Default for HighpoleOptions {
    fn default() -> Self {
        Self {
            min_edges: 12,
            face_divergence_deg: 1.0,
            flip_padding: 0.0,
            max_iterations: None,
        }
    }
}

impl HighpoleOptions {
    /// Smallest accepted `min_edges`.
    pub const MIN_EDGES_LOWER: usize = 7;
    /// Largest accepted `min_edges`.
    pub const MIN_EDGES_UPPER: usize = 24;
    /// Largest accepted `face_divergence_deg`.
    pub const MAX_DIVERGENCE_DEG: f64 = 90.0;
    /// Largest accepted magnitude of `flip_padding`.
    pub const MAX_PADDING: f64 = 0.4;

    /// Set the highpole valence threshold.
    pub fn with_min_edges(mut self, min_edges: usize) -> Self {
        self.min_edges = min_edges;
        self
    }

    /// Set the maximum normal divergence in degrees.
    pub fn with_face_divergence_deg(mut self, degrees: f64) -> Self {
        self.face_divergence_deg = degrees;
        self
    }

    /// Set the flip padding.
    pub fn with_flip_padding(mut self, padding: f64) -> Self {
        self.flip_padding = padding;
        self
    }

    /// Cap the number of flips.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<()> {
        if !(Self::MIN_EDGES_LOWER..=Self::MIN_EDGES_UPPER).contains(&self.min_edges) {
            return Err(MeshError::invalid_param(
                "min_edges",
                self.min_edges,
                "must be in 7..=24",
            ));
        }
        if !(0.0..=Self::MAX_DIVERGENCE_DEG).contains(&self.face_divergence_deg) {
            return Err(MeshError::invalid_param(
                "face_divergence_deg",
                self.face_divergence_deg,
                "must be in 0..=90",
            ));
        }
        if !(-Self::MAX_PADDING..=Self::MAX_PADDING).contains(&self.flip_padding) {
            return Err(MeshError::invalid_param(
                "flip_padding",
                self.flip_padding,
                "must be in -0.4..=0.4",
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(MeshError::invalid_param("max_iterations", 0, "must be at least 1"));
        }
        Ok(())
    }

    /// Minimum `|n0 . n1|` for two triangle normals, `cos(face_divergence_deg)`.
    #[inline]
    pub fn divergence_cos(&self) -> f64 {
        self.face_divergence_deg.to_radians().cos()
    }

    /// Geometric thresholds derived from these options.
    #[inline]
    pub fn thresholds(&self) -> FlipThresholds {
        FlipThresholds::new(self.divergence_cos(), self.flip_padding)
    }
}

/// Reduce highpoles on a mesh by flipping edges.
///
/// Validates `options`, triangulates every face of the host, then runs the
/// flip loop until the worst valence drops below `options.min_edges`, no
/// acceptable flip remains, or `options.max_iterations` is reached. On return
/// the host's selection marks the vertices still at or above the threshold.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] for out-of-range options, or the
/// host's error if an edge rotation fails. Flips performed before the failure
/// stay applied.
pub fn reduce_highpoles<H: MeshHost + ?Sized>(
    host: &mut H,
    options: &HighpoleOptions,
) -> Result<ReduceReport> {
    reduce(host, options, None)
}

/// [`reduce_highpoles`] with progress reporting.
///
/// Progress is measured in valence steps from the initial worst valence down
/// to the threshold.
pub fn reduce_highpoles_with_progress<H: MeshHost + ?Sized>(
    host: &mut H,
    options: &HighpoleOptions,
    progress: &Progress,
) -> Result<ReduceReport> {
    reduce(host, options, Some(progress))
}

fn reduce<H: MeshHost + ?Sized>(
    host: &mut H,
    options: &HighpoleOptions,
    progress: Option<&Progress>,
) -> Result<ReduceReport> {
    options.validate()?;
    info!(
        "reducing highpoles (min edges {}, divergence {} deg, padding {})",
        options.min_edges, options.face_divergence_deg, options.flip_padding
    );
    host.triangulate_all_faces();
    run_flip_loop(host, options, progress)
}

#[cfg(test)]
mod tests {
    use super::test_meshes::fan_disk;
    use super::*;
    use crate::mesh::PolyMesh;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_default_options() {
        let options = HighpoleOptions::default();
        assert_eq!(options.min_edges, 12);
        assert_relative_eq!(options.face_divergence_deg, 1.0);
        assert_relative_eq!(options.flip_padding, 0.0);
        assert_eq!(options.max_iterations, None);
        assert!(options.validate().is_ok());
        assert_relative_eq!(options.divergence_cos(), 1.0_f64.to_radians().cos());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let cases = [
            HighpoleOptions::default().with_min_edges(6),
            HighpoleOptions::default().with_min_edges(25),
            HighpoleOptions::default().with_face_divergence_deg(-1.0),
            HighpoleOptions::default().with_face_divergence_deg(91.0),
            HighpoleOptions::default().with_face_divergence_deg(f64::NAN),
            HighpoleOptions::default().with_flip_padding(0.5),
            HighpoleOptions::default().with_flip_padding(-0.41),
            HighpoleOptions::default().with_max_iterations(0),
        ];
        for options in cases {
            assert!(
                matches!(options.validate(), Err(MeshError::InvalidParameter { .. })),
                "{:?} should be rejected",
                options
            );
        }

        let edges = HighpoleOptions::default()
            .with_min_edges(7)
            .with_face_divergence_deg(90.0)
            .with_flip_padding(-0.4);
        assert!(edges.validate().is_ok());
    }

    #[test]
    fn test_invalid_options_leave_mesh_untouched() {
        let mut mesh = fan_disk(13);
        let before = mesh.faces().to_vec();

        let result = reduce_highpoles(&mut mesh, &HighpoleOptions::default().with_min_edges(3));

        assert!(result.is_err());
        assert_eq!(mesh.faces(), before.as_slice());
    }

    #[test]
    fn test_polygon_input_is_triangulated() {
        // A single 14-gon: after triangulation the polygon's
        // first vertex fans to every other rim vertex.
        let n = 14;
        let mut vertices = Vec::new();
        for i in 0..n {
            let a = std::f64::consts::TAU * i as f64 / n as f64;
            vertices.push(Point3::new(a.cos(), a.sin(), 0.0));
        }
        let mut mesh = PolyMesh::from_polygons(vertices, vec![(0..n).collect()]).unwrap();
        assert!(!mesh.is_triangle_mesh());

        let options = HighpoleOptions::default();
        let report = reduce_highpoles(&mut mesh, &options).unwrap();

        assert!(mesh.is_triangle_mesh());
        assert_eq!(report.initial_worst_valence, n - 1);
        assert!(report.num_flips() > 0);
        assert!(mesh.valences().into_iter().max().unwrap() < report.initial_worst_valence);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_progress_variant() {
        let mut mesh = fan_disk(13);
        let progress = Progress::none();
        let options = HighpoleOptions::default().with_min_edges(13);

        let report = reduce_highpoles_with_progress(&mut mesh, &options, &progress).unwrap();

        assert_eq!(report.num_flips(), 1);
    }
}
