//! Error types for concave hull computation.

use thiserror::Error;

/// Errors that abort a hull computation.
///
/// These are the fatal failures of the pipeline. Local conditions inside the
/// boundary graph (duplicate edges, unreachable endpoints) are surfaced as
/// statuses from [`crate::graph::Graph`] instead and never abort the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HullError {
    /// Fewer than 3 input points; no triangulation is possible.
    #[error("alpha shape needs at least 3 input points, got {count}")]
    NotEnoughPoints {
        /// Number of points supplied.
        count: usize,
    },

    /// The triangulation produced too few side lengths to compute quartiles,
    /// so the Tukey fence is undefined (e.g. degenerate or collinear input).
    #[error("side-length sample too small to compute the alpha fence ({samples} lengths)")]
    UndefinedFence {
        /// Number of side lengths collected from the triangulation.
        samples: usize,
    },
}
