//! The greedy flip loop.
//!
//! Each iteration scans the mesh, selects the single best flip around the
//! current worst-valence vertices, and asks the host to perform it:
//!
//! ```text
//! SCANNING -> SELECTING -> FLIPPING -> SCANNING
//!     |            |
//!     +------------+-----> TERMINATED
//! ```
//!
//! Every flipped edge goes into a [`RejectionHistory`] and is never selected
//! again in the same run, so the loop cannot oscillate between two
//! triangulations.

use std::collections::HashSet;

use log::{debug, info, trace, warn};
use nalgebra::Point3;

use super::adjacency::Adjacency;
use super::score::{evaluate_flip, FlipScore, FlipThresholds};
use super::HighpoleOptions;
use crate::algo::Progress;
use crate::error::Result;
use crate::mesh::{EdgeKey, MeshHost};

/// Edges already flipped during one run, in flip order.
#[derive(Debug, Clone, Default)]
pub struct RejectionHistory {
    order: Vec<EdgeKey>,
    lookup: HashSet<EdgeKey>,
}

impl RejectionHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a flipped edge. Returns `false` if it was already present.
    pub fn push(&mut self, edge: EdgeKey) -> bool {
        if self.lookup.insert(edge) {
            self.order.push(edge);
            true
        } else {
            false
        }
    }

    /// Check whether an edge has been flipped in this run.
    #[inline]
    pub fn contains(&self, edge: EdgeKey) -> bool {
        self.lookup.contains(&edge)
    }

    /// Flipped edges in the order they were flipped.
    #[inline]
    pub fn edges(&self) -> &[EdgeKey] {
        &self.order
    }

    /// Number of recorded edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether nothing has been flipped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn into_edges(self) -> Vec<EdgeKey> {
        self.order
    }
}

/// Why the flip loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The worst valence dropped below `min_edges`.
    BelowThreshold,
    /// No gate-passing flip with positive gain was left.
    NoCandidate,
    /// The configured iteration cap was reached.
    IterationLimit,
}

/// Outcome of a flip run.
#[derive(Debug, Clone)]
pub struct ReduceReport {
    /// Edges rotated, in order. Each key names the edge before its rotation.
    pub flips: Vec<EdgeKey>,
    /// Worst valence before the first flip.
    pub initial_worst_valence: usize,
    /// Worst valence after the last flip.
    pub final_worst_valence: usize,
    /// Why the loop stopped.
    pub termination: Termination,
    /// Vertices whose valence is still at or above `min_edges`, ascending.
    pub remaining_highpoles: Vec<usize>,
}

impl ReduceReport {
    /// Number of flips performed.
    #[inline]
    pub fn num_flips(&self) -> usize {
        self.flips.len()
    }
}

/// Pick the best flip among the edges of the worst-valence vertices.
///
/// Vertices are visited in ascending index order and their edges in adjacency
/// order; among equal gains the first one encountered wins. Only flips with
/// strictly positive gain are returned.
pub fn select_flip(
    adjacency: &Adjacency,
    positions: &[Point3<f64>],
    worst_valence: usize,
    history: &RejectionHistory,
    thresholds: &FlipThresholds,
) -> Option<FlipScore> {
    let mut best: Option<FlipScore> = None;

    for v in adjacency.vertices.vertices_with_valence(worst_valence) {
        for &edge in adjacency.vertices.edges(v) {
            if history.contains(edge) {
                continue;
            }

            match evaluate_flip(edge, adjacency, positions, worst_valence, thresholds) {
                Ok(score) => {
                    let best_gain = best.as_ref().map_or(0.0, |b| b.gain);
                    if score.gain > best_gain {
                        best = Some(score);
                    }
                }
                Err(reason) => trace!("candidate {:?} rejected: {}", edge, reason),
            }
        }
    }

    best
}

/// Run the flip loop on an already triangulated host.
///
/// The host must consist of triangles only; call
/// [`MeshHost::triangulate_all_faces`] first, or use
/// [`reduce_highpoles`](super::reduce_highpoles) which does so.
///
/// A failing [`MeshHost::rotate_edge`] aborts the run and the error is
/// returned; flips already performed stay applied.
pub fn run_flip_loop<H: MeshHost + ?Sized>(
    host: &mut H,
    options: &HighpoleOptions,
    progress: Option<&Progress>,
) -> Result<ReduceReport> {
    let thresholds = options.thresholds();
    let mut history = RejectionHistory::new();
    let mut initial_worst_valence = None;

    let (adjacency, worst_valence, termination) = loop {
        // SCANNING
        let positions = host.vertices();
        for v in 0..positions.len() {
            host.set_vertex_selected(v, false);
        }
        let adjacency = Adjacency::build(&host.triangles(), &host.raw_edges(), positions.len());
        let worst_valence = adjacency.vertices.max_valence();
        let initial = *initial_worst_valence.get_or_insert(worst_valence);

        debug!(
            "iteration {}: worst valence {}, {} edges",
            history.len(),
            worst_valence,
            adjacency.opposites.len()
        );
        if let Some(p) = progress {
            let total = initial.saturating_sub(options.min_edges) + 1;
            let done = initial.saturating_sub(worst_valence).min(total);
            p.report(done, total, &format!("Flipping edges (worst valence {})", worst_valence));
        }

        if worst_valence < options.min_edges {
            break (adjacency, worst_valence, Termination::BelowThreshold);
        }
        if options.max_iterations.is_some_and(|cap| history.len() >= cap) {
            break (adjacency, worst_valence, Termination::IterationLimit);
        }

        // SELECTING
        let selected = select_flip(&adjacency, &positions, worst_valence, &history, &thresholds);
        let Some(choice) = selected else {
            break (adjacency, worst_valence, Termination::NoCandidate);
        };

        // FLIPPING
        let (v0, v1) = choice.edge.vertices();
        debug!(
            "flipping {:?} to {:?} (gain {:.4}, r0 {:.4})",
            choice.edge, choice.opposites, choice.gain, choice.r0
        );
        history.push(choice.edge);
        if let Err(err) = host.rotate_edge(v0, v1) {
            warn!("host refused to rotate {:?}, aborting: {}", choice.edge, err);
            return Err(err);
        }
        host.set_vertex_selected(v0, true);
        host.set_vertex_selected(v1, true);
    };

    // TERMINATED: leave the remaining highpoles selected for inspection.
    let remaining_highpoles: Vec<usize> = adjacency
        .vertices
        .valences()
        .filter(|&(_, n)| n >= options.min_edges)
        .map(|(v, _)| v)
        .collect();
    for &v in &remaining_highpoles {
        host.set_vertex_selected(v, true);
    }

    if let Some(p) = progress {
        p.report(1, 1, "Done");
    }

    let report = ReduceReport {
        flips: history.into_edges(),
        initial_worst_valence: initial_worst_valence.unwrap_or(worst_valence),
        final_worst_valence: worst_valence,
        termination,
        remaining_highpoles,
    };
    info!(
        "highpole reduction finished: {} flips, worst valence {} -> {}, {} highpoles left ({:?})",
        report.num_flips(),
        report.initial_worst_valence,
        report.final_worst_valence,
        report.remaining_highpoles.len(),
        report.termination
    );
    Ok(report)
}
