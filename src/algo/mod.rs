//! Mesh processing algorithms.
//!
//! - **Highpole reduction**: greedy edge flips that lower the valence of
//!   vertices with too many incident edges, see [`highpole`].

pub mod highpole;
mod progress;

pub use progress::Progress;
