//! Distance-to-nearest-target field over a grid.
//!
//! `score[i] = min_t |grid[i] - t|`, O(|grid| × |targets|). The field has the
//! same length and order as the grid it was computed from; after that the two
//! are only ever shrunk together (see `recover::ScoredGrid`).

use nalgebra::Vector2;

use crate::error::{Error, Result};
use crate::grid::Grid;

/// Known interior points a sample is scored against.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetSet {
    points: Vec<Vector2<f64>>,
}

impl TargetSet {
    pub fn new(points: Vec<Vector2<f64>>) -> Self {
        Self { points }
    }

    /// Interleaved `x0, y0, x1, y1, ...` as produced by a mesher.
    pub fn from_flat(coords: &[f64]) -> Result<Self> {
        if coords.len() % 2 != 0 {
            return Err(Error::InvalidTargets(format!(
                "odd coordinate count {}",
                coords.len()
            )));
        }
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidTargets("non-finite coordinate".into()));
        }
        Ok(Self::new(
            coords
                .chunks_exact(2)
                .map(|c| Vector2::new(c[0], c[1]))
                .collect(),
        ))
    }

    #[inline]
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Euclidean distance from `p` to the closest target; `None` if empty.
    pub fn nearest_distance(&self, p: Vector2<f64>) -> Option<f64> {
        self.points
            .iter()
            .map(|t| (p - t).norm())
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Per-node scores, index-aligned with the grid they were computed from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreField(Vec<f64>);

impl ScoreField {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.0.get(i).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Index of the smallest score; ties go to the lowest index.
    pub fn argmin(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &s) in self.0.iter().enumerate() {
            if best.is_none_or(|(_, b)| s < b) {
                best = Some((i, s));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Keep entries where `mask[i]` is true.
    pub(crate) fn retain_by_mask(&mut self, mask: &[bool]) {
        let mut it = mask.iter();
        self.0.retain(|_| *it.next().unwrap_or(&true));
    }
}

/// Score every grid node against `targets`.
pub fn score(grid: &Grid, targets: &TargetSet) -> Result<ScoreField> {
    if targets.is_empty() {
        return Err(Error::EmptyTargetSet);
    }
    let values = grid
        .points()
        .map(|p| targets.nearest_distance(p).ok_or(Error::EmptyTargetSet))
        .collect::<Result<Vec<f64>>>()?;
    tracing::trace!(nodes = values.len(), targets = targets.len(), "scored grid");
    Ok(ScoreField(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Polygon;
    use crate::grid::{build_grid, GridCfg};
    use nalgebra::vector;

    fn octagon_grid() -> Grid {
        let p = Polygon::regular(8, 1.0).unwrap();
        build_grid(&p, 5.0, GridCfg::default()).unwrap()
    }

    #[test]
    fn empty_targets_are_rejected() {
        let g = octagon_grid();
        assert_eq!(score(&g, &TargetSet::default()), Err(Error::EmptyTargetSet));
    }

    #[test]
    fn scores_are_nearest_distances() {
        let g = octagon_grid();
        let t = TargetSet::new(vec![vector![0.0, 0.0], vector![0.5, 0.0]]);
        let s = score(&g, &t).unwrap();
        assert_eq!(s.len(), g.len());
        for (p, v) in g.points().zip(s.as_slice()) {
            let expect = p.norm().min((p - vector![0.5, 0.0]).norm());
            assert!((v - expect).abs() < 1e-15);
        }
    }

    #[test]
    fn rescoring_is_idempotent() {
        let g = octagon_grid();
        let t = TargetSet::from_flat(&[0.1, -0.2, -0.3, 0.4]).unwrap();
        assert_eq!(score(&g, &t).unwrap(), score(&g, &t).unwrap());
    }

    #[test]
    fn argmin_prefers_first_occurrence() {
        let s = ScoreField::new(vec![3.0, 1.0, 2.0, 1.0]);
        assert_eq!(s.argmin(), Some(1));
        assert_eq!(ScoreField::default().argmin(), None);
    }

    #[test]
    fn flat_targets_validation() {
        assert!(matches!(
            TargetSet::from_flat(&[1.0, 2.0, 3.0]),
            Err(Error::InvalidTargets(_))
        ));
        assert!(matches!(
            TargetSet::from_flat(&[1.0, f64::NAN]),
            Err(Error::InvalidTargets(_))
        ));
        let t = TargetSet::from_flat(&[]).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.nearest_distance(vector![0.0, 0.0]), None);
    }
}
