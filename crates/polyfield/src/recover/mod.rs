//! Vertex recovery from a scored grid.
//!
//! - `interp`: 8-neighborhood gathering (offset-tagged) and the weighted
//!   barycenter around the score minimum.
//! - `looped`: `ScoredGrid` (grid + scores shrunk in lockstep) and the greedy
//!   recover/prune loop.
//!
//! Weights are the raw neighbor scores, not their inverses: a neighbor that is
//! farther from every target pulls the estimate harder.

mod interp;
mod looped;

pub use interp::{recover_one, Neighbor, Neighborhood, NEIGHBOR_OFFSETS};
pub use looped::{recover_all, recover_from, RecoveryCfg, ScoredGrid};
