//! Default parameters.
//!
//! These are the values the training data was generated with. Callers override
//! them through `GridCfg`, `RecoveryCfg` and `ContourCfg`.

/// Lattice spacing as a fraction of the characteristic edge length.
pub const GRID_SCALE_FACTOR: f64 = 0.01;
/// Side of the square sampling window centered on the origin.
pub const GRID_WINDOW: f64 = 2.0;
/// Largest lattice side accepted (nodes per axis).
pub const MAX_DIVISIONS: usize = 4096;
/// Exclusion radius as a fraction of the characteristic edge length.
pub const EXCLUSION_FACTOR: f64 = 0.1;
/// Default number of contour vertices for random draws.
pub const CONTOUR_VERTICES: usize = 8;
/// Default radial band of random contours.
pub const CONTOUR_R_MIN: f64 = 0.7;
pub const CONTOUR_R_MAX: f64 = 1.0;
