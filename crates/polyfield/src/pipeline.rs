//! One sample end to end: grid → scores → recovered vertices.

use nalgebra::Vector2;

use crate::error::{Error, Result};
use crate::geom::Polygon;
use crate::grid::{build_grid, GridCfg};
use crate::recover::{recover_from, RecoveryCfg, ScoredGrid};
use crate::score::{score, TargetSet};

/// Engine configuration (lattice + recovery loop).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EngineCfg {
    pub grid: GridCfg,
    pub recovery: RecoveryCfg,
}

/// Output of one reconstruction.
#[derive(Clone, Debug, PartialEq)]
pub struct Reconstruction {
    pub vertices: Vec<Vector2<f64>>,
    /// Interior lattice nodes before recovery.
    pub grid_nodes: usize,
    /// Nodes left after the last pruning step.
    pub remaining_nodes: usize,
}

impl Reconstruction {
    /// Mean distance from each recovered vertex to its nearest target.
    pub fn mean_error(&self, targets: &TargetSet) -> Option<f64> {
        if self.vertices.is_empty() {
            return None;
        }
        let total = self
            .vertices
            .iter()
            .map(|v| targets.nearest_distance(*v))
            .sum::<Option<f64>>()?;
        Some(total / self.vertices.len() as f64)
    }
}

/// Recover one vertex per target from the contour's lattice.
pub fn reconstruct(
    polygon: &Polygon,
    targets: &TargetSet,
    ls: f64,
    cfg: EngineCfg,
) -> Result<Reconstruction> {
    if targets.is_empty() {
        return Err(Error::EmptyTargetSet);
    }
    let grid = build_grid(polygon, ls, cfg.grid)?;
    let grid_nodes = grid.len();
    let scores = score(&grid, targets)?;
    let mut state = ScoredGrid::new(grid, scores)?;
    let vertices = recover_from(&mut state, polygon, ls, targets.len(), cfg.recovery)?;
    let remaining_nodes = state.len();
    tracing::debug!(
        grid_nodes,
        remaining_nodes,
        recovered = vertices.len(),
        "reconstructed sample"
    );
    Ok(Reconstruction {
        vertices,
        grid_nodes,
        remaining_nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::rand::{draw_contour, ContourCfg, ReplayToken};
    use nalgebra::vector;

    #[test]
    fn octagon_center_end_to_end() {
        let p = Polygon::regular(8, 1.0).unwrap();
        let t = TargetSet::new(vec![Vector2::zeros()]);
        let r = reconstruct(&p, &t, 1.0, EngineCfg::default()).unwrap();
        assert_eq!(r.vertices.len(), 1);
        assert!(r.vertices[0].norm() <= 0.01);
        assert!(r.remaining_nodes < r.grid_nodes);
        // Roughly a disk of radius 0.1 in lattice cells of 0.01.
        let removed = (r.grid_nodes - r.remaining_nodes) as f64;
        assert!((removed - std::f64::consts::PI * 100.0).abs() < 20.0);
        assert!(r.mean_error(&t).unwrap() <= 0.01);
    }

    #[test]
    fn random_contour_with_interior_targets() {
        let p = draw_contour(ContourCfg::default(), ReplayToken::new(11, 2)).unwrap();
        let t = TargetSet::new(vec![vector![0.2, 0.1], vector![-0.25, -0.15]]);
        let r = reconstruct(&p, &t, 1.0, EngineCfg::default()).unwrap();
        assert_eq!(r.vertices.len(), 2);
        assert!(r.mean_error(&t).unwrap() < 0.022);
        assert!(r.vertices.iter().all(|v| p.contains(*v)));
    }

    #[test]
    fn empty_targets_fail_before_gridding() {
        let p = Polygon::regular(6, 1.0).unwrap();
        assert_eq!(
            reconstruct(&p, &TargetSet::default(), 1.0, EngineCfg::default()),
            Err(Error::EmptyTargetSet)
        );
    }
}
