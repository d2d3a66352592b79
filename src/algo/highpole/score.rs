//! Gain heuristic for a single candidate flip.
//!
//! Flipping edge `(v0, v1)` removes one edge from each endpoint and adds one to
//! each opposite vertex `o0`, `o1`. The gain estimates how much the worst valence
//! drops:
//!
//! ```text
//! gain = worst_valence + r0 - 1 - max(valence(o0), valence(o1))
//! ```
//!
//! where `r0` is the parameter along `v0 -> v1` at which the line through the
//! prospective new edge `o0 -> o1` passes closest. A well-centered new edge
//! (`r0` near 0.5) scores slightly higher than one near the padding bounds, and a
//! flip that would turn an opposite vertex into a new highpole is penalized.

use nalgebra::Point3;
use thiserror::Error;

use super::adjacency::Adjacency;
use super::lines::closest_line_params;
use crate::mesh::EdgeKey;

/// Geometric acceptance thresholds for a flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipThresholds {
    /// Minimum `|n0 . n1|` of the two triangle normals.
    pub divergence_cos: f64,
    /// Margin on `r0`; the flip needs `padding < r0 < 1 - padding`.
    pub padding: f64,
}

impl FlipThresholds {
    /// Create thresholds from a cosine and a padding.
    pub fn new(divergence_cos: f64, padding: f64) -> Self {
        Self {
            divergence_cos,
            padding,
        }
    }
}

/// Why a candidate edge was not scored.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GateFailure {
    /// The edge is not shared by exactly two triangles.
    #[error("edge has {triangles} incident triangles")]
    NotInterior {
        /// Number of incident triangles.
        triangles: usize,
    },
    /// Both triangles have the same opposite vertex.
    #[error("opposite vertices coincide")]
    SharedOpposite,
    /// The other diagonal already exists as an edge.
    #[error("flipped edge already exists")]
    DiagonalExists,
    /// A vertex index has no position in the snapshot.
    #[error("vertex {0} has no position")]
    MissingVertex(usize),
    /// The two face normals diverge too much.
    #[error("normals diverge (|n0.n1| = {normal_dot:.6})")]
    NormalsDiverge {
        /// `|n0 . n1|`.
        normal_dot: f64,
    },
    /// The edge and the prospective diagonal are parallel.
    #[error("edge and diagonal are parallel")]
    ParallelLines,
    /// The closest-approach parameter falls inside the padding margin.
    #[error("r0 = {r0:.4} inside padding")]
    OutsidePadding {
        /// The closest-approach parameter along the edge.
        r0: f64,
    },
}

/// A candidate flip that passed every gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipScore {
    /// The edge to rotate.
    pub edge: EdgeKey,
    /// The opposite vertices, which become the new edge.
    pub opposites: (usize, usize),
    /// `|n0 . n1|` of the two triangles.
    pub normal_dot: f64,
    /// Closest-approach parameter along the edge.
    pub r0: f64,
    /// Estimated reduction of the worst valence. May be zero or negative.
    pub gain: f64,
}

/// Run every gate on `edge` and compute its gain.
pub fn evaluate_flip(
    edge: EdgeKey,
    adjacency: &Adjacency,
    positions: &[Point3<f64>],
    worst_valence: usize,
    thresholds: &FlipThresholds,
) -> Result<FlipScore, GateFailure> {
    let opposites = match adjacency.opposites.get(edge) {
        Some(o) if o.is_interior() => o,
        Some(o) => return Err(GateFailure::NotInterior { triangles: o.len() }),
        None => return Err(GateFailure::NotInterior { triangles: 0 }),
    };

    let (o0, o1) = (opposites.vertices[0], opposites.vertices[1]);
    if o0 == o1 {
        return Err(GateFailure::SharedOpposite);
    }
    if adjacency.opposites.contains(EdgeKey::new(o0, o1)) {
        return Err(GateFailure::DiagonalExists);
    }

    let normal_dot = opposites.normals[0].dot(&opposites.normals[1]).abs();
    if normal_dot < thresholds.divergence_cos {
        return Err(GateFailure::NormalsDiverge { normal_dot });
    }

    let position = |v: usize| positions.get(v).ok_or(GateFailure::MissingVertex(v));
    let (v0, v1) = edge.vertices();
    let (r0, _) = closest_line_params(position(v0)?, position(v1)?, position(o0)?, position(o1)?)
        .ok_or(GateFailure::ParallelLines)?;

    if r0 <= thresholds.padding || r0 >= 1.0 - thresholds.padding {
        return Err(GateFailure::OutsidePadding { r0 });
    }

    let worst_opposite = adjacency.vertices.valence(o0).max(adjacency.vertices.valence(o1));
    let gain = worst_valence as f64 + r0 - 1.0 - worst_opposite as f64;

    Ok(FlipScore {
        edge,
        opposites: (o0, o1),
        normal_dot,
        r0,
        gain,
    })
}

/// Gain of flipping `edge`, or `None` if the edge is not a candidate.
pub fn score_flip(
    edge: EdgeKey,
    adjacency: &Adjacency,
    positions: &[Point3<f64>],
    worst_valence: usize,
    thresholds: &FlipThresholds,
) -> Option<f64> {
    evaluate_flip(edge, adjacency, positions, worst_valence, thresholds)
        .ok()
        .map(|s| s.gain)
}
