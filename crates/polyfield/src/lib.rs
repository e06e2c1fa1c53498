//! Grid-based recovery of interior mesh vertices from a polygonal contour.
//!
//! A contour is sampled on a uniform square lattice restricted to its
//! interior, every lattice node is scored by its distance to the nearest known
//! interior vertex, and vertices are then recovered one by one by
//! interpolating around the current score minimum.
//!
//! Layout
//! - `geom`: `Polygon` (validated simple contour) and the point-in-polygon oracle.
//! - `geom::rand`: seeded random contours with replay tokens.
//! - `grid`: row/column addressable lattice clipped to the polygon.
//! - `score`: target sets and the distance field.
//! - `recover`: local interpolation and the greedy recovery loop.
//! - `pipeline`: one sample end to end.
//!
//! Everything here is synchronous and allocation-local; independent samples
//! share no state and can be processed in parallel by the caller.

pub mod cfg;
pub mod error;
pub mod geom;
pub mod grid;
pub mod pipeline;
pub mod recover;
pub mod score;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, Result};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geom::rand::{draw_contour, ContourCfg, ReplayToken};
    pub use crate::geom::Polygon;
    pub use crate::grid::{build_grid, Grid, GridCfg, Lattice};
    pub use crate::pipeline::{reconstruct, EngineCfg, Reconstruction};
    pub use crate::recover::{recover_all, recover_from, recover_one, RecoveryCfg, ScoredGrid};
    pub use crate::score::{score, ScoreField, TargetSet};
    pub use nalgebra::Vector2 as Vec2;
}
