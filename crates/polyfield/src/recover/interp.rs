use nalgebra::Vector2;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::score::ScoreField;

/// Lattice offsets `(dx, dy)` of the 8 neighbors in raster order:
/// NW, N, NE, W, E, SW, S, SE.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// A lattice neighbor of the minimum, tagged by its offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub offset: (isize, isize),
    pub pos: Vector2<f64>,
    pub score: f64,
}

/// The 8 lattice neighbors around one grid node (center excluded).
#[derive(Clone, Debug, PartialEq)]
pub struct Neighborhood {
    pub center: usize,
    pub neighbors: Vec<Neighbor>,
}

impl Neighborhood {
    /// Collect all 8 neighbors of node `center`; any gap is an error.
    pub fn gather(grid: &Grid, scores: &ScoreField, center: usize) -> Result<Self> {
        if grid.len() != scores.len() {
            return Err(Error::MismatchedScores {
                grid: grid.len(),
                scores: scores.len(),
            });
        }
        let node = grid.node(center).ok_or(Error::NodeOutOfRange {
            index: center,
            len: grid.len(),
        })?;
        let neighbors: Vec<Neighbor> = NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let j = grid.neighbor(center, dx, dy)?;
                Some(Neighbor {
                    offset: (dx, dy),
                    pos: grid.nodes()[j].pos,
                    score: scores.get(j)?,
                })
            })
            .collect();
        if neighbors.len() != NEIGHBOR_OFFSETS.len() {
            return Err(Error::InsufficientNeighborhood {
                at: node.pos,
                found: neighbors.len(),
            });
        }
        Ok(Self { center, neighbors })
    }

    /// Score-weighted barycenter.
    ///
    /// x averages the neighbors off the center row (`dy != 0`), y averages the
    /// neighbors off the center column (`dx != 0`).
    pub fn interpolate(&self, at: Vector2<f64>) -> Result<Vector2<f64>> {
        let x = weighted_mean(
            self.neighbors
                .iter()
                .filter(|n| n.offset.1 != 0)
                .map(|n| (n.score, n.pos.x)),
        )
        .ok_or(Error::DegenerateWeights { at })?;
        let y = weighted_mean(
            self.neighbors
                .iter()
                .filter(|n| n.offset.0 != 0)
                .map(|n| (n.score, n.pos.y)),
        )
        .ok_or(Error::DegenerateWeights { at })?;
        Ok(Vector2::new(x, y))
    }
}

fn weighted_mean(items: impl Iterator<Item = (f64, f64)>) -> Option<f64> {
    let (num, den) = items.fold((0.0, 0.0), |(num, den), (w, v)| (num + w * v, den + w));
    if den == 0.0 || !den.is_finite() {
        return None;
    }
    Some(num / den)
}

/// Estimate one vertex around the current score minimum (pure; no pruning).
pub fn recover_one(grid: &Grid, scores: &ScoreField) -> Result<Vector2<f64>> {
    if grid.len() != scores.len() {
        return Err(Error::MismatchedScores {
            grid: grid.len(),
            scores: scores.len(),
        });
    }
    let m = scores.argmin().ok_or(Error::ExhaustedGrid {
        recovered: 0,
        requested: 1,
    })?;
    let at = grid.nodes()[m].pos;
    Neighborhood::gather(grid, scores, m)?.interpolate(at)
}
