use nalgebra::Vector2;

use super::interp;
use crate::cfg::EXCLUSION_FACTOR;
use crate::error::{Error, Result};
use crate::geom::Polygon;
use crate::grid::Grid;
use crate::score::ScoreField;

/// Recovery loop parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecoveryCfg {
    /// Exclusion radius as a fraction of the characteristic edge length.
    pub exclusion_factor: f64,
}

impl Default for RecoveryCfg {
    fn default() -> Self {
        Self {
            exclusion_factor: EXCLUSION_FACTOR,
        }
    }
}

/// Grid and score field owned together; every removal hits both.
///
/// Invariant: `grid.len() == scores.len()` and `scores[i]` belongs to `grid[i]`.
#[derive(Clone, Debug)]
pub struct ScoredGrid {
    grid: Grid,
    scores: ScoreField,
}

impl ScoredGrid {
    pub fn new(grid: Grid, scores: ScoreField) -> Result<Self> {
        if grid.len() != scores.len() {
            return Err(Error::MismatchedScores {
                grid: grid.len(),
                scores: scores.len(),
            });
        }
        Ok(Self { grid, scores })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn scores(&self) -> &ScoreField {
        &self.scores
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn into_parts(self) -> (Grid, ScoreField) {
        (self.grid, self.scores)
    }

    /// See `recover::recover_one`.
    pub fn recover_one(&self) -> Result<Vector2<f64>> {
        interp::recover_one(&self.grid, &self.scores)
    }

    /// Drop every node strictly closer than `radius` to `center`; returns the count removed.
    pub fn prune(&mut self, center: Vector2<f64>, radius: f64) -> usize {
        let r2 = radius * radius;
        let mask = self
            .grid
            .retain_mask(|_, n| (n.pos - center).norm_squared() >= r2);
        self.scores.retain_by_mask(&mask);
        debug_assert_eq!(self.grid.len(), self.scores.len());
        mask.iter().filter(|k| !**k).count()
    }
}

/// Recover `count` vertices, pruning a disk of radius `exclusion_factor * ls`
/// around each one.
///
/// All-or-nothing: the first failure aborts and no partial output is returned.
/// The radius must exceed the lattice cell diagonal so that each step removes
/// at least the node it was interpolated around.
pub fn recover_all(
    polygon: &Polygon,
    ls: f64,
    grid: Grid,
    scores: ScoreField,
    count: usize,
    cfg: RecoveryCfg,
) -> Result<Vec<Vector2<f64>>> {
    let mut state = ScoredGrid::new(grid, scores)?;
    recover_from(&mut state, polygon, ls, count, cfg)
}

/// Same as `recover_all`, leaving the pruned grid in `state` for inspection.
pub fn recover_from(
    state: &mut ScoredGrid,
    polygon: &Polygon,
    ls: f64,
    count: usize,
    cfg: RecoveryCfg,
) -> Result<Vec<Vector2<f64>>> {
    let radius = cfg.exclusion_factor * ls;
    let cell_diag = state.grid.spacing() * std::f64::consts::SQRT_2;
    if !(radius.is_finite() && radius > cell_diag) {
        return Err(Error::InvalidScale(format!(
            "exclusion radius {radius} must exceed the lattice cell diagonal {cell_diag}"
        )));
    }
    let mut out = Vec::with_capacity(count);
    for k in 0..count {
        if state.is_empty() {
            return Err(Error::ExhaustedGrid {
                recovered: k,
                requested: count,
            });
        }
        let v = state.recover_one()?;
        let removed = state.prune(v, radius);
        tracing::trace!(
            step = k,
            x = v.x,
            y = v.y,
            inside = polygon.contains(v),
            removed,
            left = state.len(),
            "recovered vertex"
        );
        out.push(v);
    }
    Ok(out)
}
