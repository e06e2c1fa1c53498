//! Planar contours and the point-in-polygon oracle.
//!
//! Purpose
//! - Provide a validated, immutable `Polygon` (implicitly closed, simple, at
//!   least 3 vertices) and an exact crossing-number membership test.
//! - Keep predicates exact: vertex and on-edge checks compare floats without
//!   tolerance so that lattice nodes on the boundary are classified the same
//!   way on every run.
//!
//! Code cross-refs: `grid::build_grid` (only consumer of `contains` in the
//! engine), `rand::draw_contour` (random simple contours).

mod polygon;
pub mod rand;
mod util;

pub use polygon::Polygon;
pub use util::{cross, on_segment, segments_intersect};
