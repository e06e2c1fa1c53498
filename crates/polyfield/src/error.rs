//! Error types for contour scoring and vertex recovery.
//!
//! Every variant is a precondition violation for the current sample. None of
//! them is transient, so callers skip the sample instead of retrying.

use nalgebra::Vector2;
use thiserror::Error;

/// Result type alias for polyfield operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, scoring or recovering a sample.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Contour violates the simple-polygon invariants.
    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),

    /// Characteristic edge length or lattice parameters are unusable.
    #[error("invalid lattice scale: {0}")]
    InvalidScale(String),

    /// Target coordinates could not be interpreted as 2D points.
    #[error("invalid target set: {0}")]
    InvalidTargets(String),

    /// Distance field requested against zero targets.
    #[error("target set is empty; no nearest distance is defined")]
    EmptyTargetSet,

    /// The score minimum lacks one or more of its 8 lattice neighbors.
    #[error(
        "score minimum at ({x}, {y}) has {found} of 8 lattice neighbors",
        x = .at.x,
        y = .at.y
    )]
    InsufficientNeighborhood { at: Vector2<f64>, found: usize },

    /// All interpolation weights around the minimum vanish.
    #[error("interpolation weights vanish around ({x}, {y})", x = .at.x, y = .at.y)]
    DegenerateWeights { at: Vector2<f64> },

    /// Grid and score field fell out of index correspondence.
    #[error("grid has {grid} nodes but score field has {scores} entries")]
    MismatchedScores { grid: usize, scores: usize },

    /// A node index past the end of the grid.
    #[error("node {index} is out of range for a grid of {len} nodes")]
    NodeOutOfRange { index: usize, len: usize },

    /// Another vertex was requested but no grid node is left.
    #[error("grid exhausted after {recovered} of {requested} vertices")]
    ExhaustedGrid { recovered: usize, requested: usize },
}
