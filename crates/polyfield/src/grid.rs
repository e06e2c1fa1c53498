//! Uniform square lattice clipped to a polygon interior.
//!
//! The lattice is a centered square window of side `spacing * divisions`
//! with `spacing = scale_factor * ls` and `divisions = floor(window / spacing)`.
//! It assumes the contour has been normalized to roughly unit size around the
//! origin; nodes outside the window are never sampled.
//!
//! Kept nodes are stored in row-major order (row = y outer, col = x inner,
//! starting bottom-left). A dense slot table maps `(row, col)` to the node
//! index, so lattice neighbors stay addressable after arbitrary pruning.

use nalgebra::Vector2;

use crate::cfg::{GRID_SCALE_FACTOR, GRID_WINDOW, MAX_DIVISIONS};
use crate::error::{Error, Result};
use crate::geom::Polygon;

/// Lattice sizing parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCfg {
    /// Spacing as a fraction of the characteristic edge length.
    pub scale_factor: f64,
    /// Side of the sampling window centered on the origin.
    pub window: f64,
}

impl Default for GridCfg {
    fn default() -> Self {
        Self {
            scale_factor: GRID_SCALE_FACTOR,
            window: GRID_WINDOW,
        }
    }
}

/// Geometry of the full (unclipped) lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lattice {
    /// Position of node `(0, 0)`, the bottom-left corner.
    pub origin: Vector2<f64>,
    pub spacing: f64,
    /// Nodes per axis.
    pub divisions: usize,
}

impl Lattice {
    /// Size the lattice for edge length `ls`.
    pub fn new(ls: f64, cfg: GridCfg) -> Result<Self> {
        if !(ls.is_finite() && ls > 0.0) {
            return Err(Error::InvalidScale(format!(
                "edge length must be positive and finite, got {ls}"
            )));
        }
        if !(cfg.scale_factor.is_finite() && cfg.scale_factor > 0.0) {
            return Err(Error::InvalidScale(format!(
                "scale factor must be positive and finite, got {}",
                cfg.scale_factor
            )));
        }
        let spacing = cfg.scale_factor * ls;
        let div = (cfg.window / spacing).floor();
        if !(div.is_finite() && div >= 1.0) {
            return Err(Error::InvalidScale(format!(
                "spacing {spacing} does not fit window {}",
                cfg.window
            )));
        }
        let divisions = div as usize;
        if divisions > MAX_DIVISIONS {
            return Err(Error::InvalidScale(format!(
                "{divisions} nodes per axis exceeds the limit of {MAX_DIVISIONS}"
            )));
        }
        let half = -spacing * (divisions as f64) / 2.0;
        Ok(Self {
            origin: Vector2::new(half, half),
            spacing,
            divisions,
        })
    }

    /// Position of node `(row, col)`.
    #[inline]
    pub fn point(&self, row: usize, col: usize) -> Vector2<f64> {
        self.origin + Vector2::new(col as f64, row as f64) * self.spacing
    }

    #[inline]
    fn slot(&self, row: usize, col: usize) -> usize {
        row * self.divisions + col
    }
}

/// One kept lattice node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub row: usize,
    pub col: usize,
    pub pos: Vector2<f64>,
}

/// Interior lattice nodes, row-major, with O(1) `(row, col)` lookup.
#[derive(Clone, Debug)]
pub struct Grid {
    lattice: Lattice,
    nodes: Vec<Node>,
    slots: Vec<Option<u32>>,
}

impl Grid {
    /// Grid from nodes already in row-major order.
    fn from_nodes(lattice: Lattice, nodes: Vec<Node>) -> Self {
        let mut grid = Self {
            lattice,
            nodes,
            slots: vec![None; lattice.divisions * lattice.divisions],
        };
        grid.reindex();
        grid
    }

    /// Write every kept node's index into its slot; stale slots must already be cleared.
    fn reindex(&mut self) {
        for (i, n) in self.nodes.iter().enumerate() {
            let s = self.lattice.slot(n.row, n.col);
            self.slots[s] = Some(i as u32);
        }
    }

    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[inline]
    pub fn spacing(&self) -> f64 {
        self.lattice.spacing
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, i: usize) -> Option<&Node> {
        self.nodes.get(i)
    }

    /// Node positions in grid order.
    pub fn points(&self) -> impl Iterator<Item = Vector2<f64>> + '_ {
        self.nodes.iter().map(|n| n.pos)
    }

    /// Index of the kept node at `(row, col)`, if any.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.lattice.divisions || col >= self.lattice.divisions {
            return None;
        }
        self.slots[self.lattice.slot(row, col)].map(|i| i as usize)
    }

    /// Index of the node at lattice offset `(dx, dy)` from node `i`.
    pub fn neighbor(&self, i: usize, dx: isize, dy: isize) -> Option<usize> {
        let n = self.nodes.get(i)?;
        let row = n.row.checked_add_signed(dy)?;
        let col = n.col.checked_add_signed(dx)?;
        self.index_of(row, col)
    }

    /// Keep nodes for which `keep(index, node)` is true; order is preserved.
    ///
    /// Returns the kept/removed mask so parallel arrays can follow in lockstep.
    pub fn retain_mask<F>(&mut self, mut keep: F) -> Vec<bool>
    where
        F: FnMut(usize, &Node) -> bool,
    {
        let mask: Vec<bool> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| keep(i, n))
            .collect();
        for (n, _) in self.nodes.iter().zip(&mask).filter(|(_, k)| !**k) {
            self.slots[self.lattice.slot(n.row, n.col)] = None;
        }
        let mut it = mask.iter();
        self.nodes.retain(|_| *it.next().unwrap_or(&true));
        self.reindex();
        mask
    }
}

/// Sample `polygon` on the lattice for `ls`, keeping interior and boundary nodes.
///
/// An empty grid is a valid result when the polygon is thinner than the spacing.
pub fn build_grid(polygon: &Polygon, ls: f64, cfg: GridCfg) -> Result<Grid> {
    let lattice = Lattice::new(ls, cfg)?;
    let mut nodes = Vec::new();
    for row in 0..lattice.divisions {
        for col in 0..lattice.divisions {
            let pos = lattice.point(row, col);
            if polygon.contains(pos) {
                nodes.push(Node { row, col, pos });
            }
        }
    }
    tracing::debug!(
        divisions = lattice.divisions,
        spacing = lattice.spacing,
        kept = nodes.len(),
        "built grid"
    );
    Ok(Grid::from_nodes(lattice, nodes))
}
