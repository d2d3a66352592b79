//! Error types for highpole.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three vertices or repeats a vertex.
    #[error("face {face} is degenerate (fewer than 3 distinct vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// The host could not rotate the requested edge.
    #[error("edge ({v0}, {v1}) on {triangles} triangle(s) cannot be rotated: {reason}")]
    EdgeNotFlippable {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
        /// Number of triangles found on the edge at call time.
        triangles: usize,
        /// Why the rotation was refused.
        reason: &'static str,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Check whether this error came from the host refusing a flip.
    pub fn is_flip_failure(&self) -> bool {
        matches!(self, MeshError::EdgeNotFlippable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_message() {
        let err = MeshError::invalid_param("min_edges", 3, "must be in 7..=24");
        assert_eq!(
            err.to_string(),
            "invalid parameter: min_edges = 3 (must be in 7..=24)"
        );
        assert!(!err.is_flip_failure());
    }

    #[test]
    fn test_flip_failure_message() {
        let err = MeshError::EdgeNotFlippable {
            v0: 1,
            v1: 4,
            triangles: 1,
            reason: "edge is not shared by two triangles",
        };
        assert!(err.is_flip_failure());
        assert_eq!(
            err.to_string(),
            "edge (1, 4) on 1 triangle(s) cannot be rotated: edge is not shared by two triangles"
        );
    }
}
