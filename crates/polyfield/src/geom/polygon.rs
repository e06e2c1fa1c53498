//! Validated simple polygon (vertex representation).
//!
//! Invariants:
//! - At least 3 vertices, all finite.
//! - Non-zero signed area (orientation may be CW or CCW).
//! - Simple: non-adjacent edges are disjoint, adjacent edges meet only at
//!   their shared vertex.

use nalgebra::Vector2;

use super::util::{cross, on_segment, segments_intersect};
use crate::error::{Error, Result};

/// Implicitly closed contour; the last vertex connects back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    verts: Vec<Vector2<f64>>,
}

impl Polygon {
    /// Validate and wrap a vertex loop.
    pub fn new(verts: Vec<Vector2<f64>>) -> Result<Self> {
        let n = verts.len();
        if n < 3 {
            return Err(Error::InvalidPolygon(format!(
                "need at least 3 vertices, got {n}"
            )));
        }
        if let Some(k) = verts.iter().position(|v| !(v.x.is_finite() && v.y.is_finite())) {
            return Err(Error::InvalidPolygon(format!(
                "vertex {k} has a non-finite coordinate"
            )));
        }
        let poly = Self { verts };
        if poly.signed_area() == 0.0 {
            return Err(Error::InvalidPolygon("zero area (collinear vertices)".into()));
        }
        poly.check_simple()?;
        Ok(poly)
    }

    /// Build from interleaved coordinates `x0, y0, x1, y1, ...`.
    pub fn from_flat(coords: &[f64]) -> Result<Self> {
        if coords.len() % 2 != 0 {
            return Err(Error::InvalidPolygon(format!(
                "odd coordinate count {}",
                coords.len()
            )));
        }
        let verts = coords
            .chunks_exact(2)
            .map(|c| Vector2::new(c[0], c[1]))
            .collect();
        Self::new(verts)
    }

    /// Regular polygon with vertex `k` at angle `2πk/n` on a circle of `radius`.
    pub fn regular(n: usize, radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::InvalidPolygon(format!(
                "radius must be positive, got {radius}"
            )));
        }
        let verts = (0..n)
            .map(|k| {
                let th = (k as f64) * std::f64::consts::TAU / (n as f64);
                Vector2::new(radius * th.cos(), radius * th.sin())
            })
            .collect();
        Self::new(verts)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.verts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// Always false for a constructed polygon; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Edges as `(previous, current)` vertex pairs, starting with `(last, first)`.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
        let n = self.verts.len();
        (0..n).map(move |i| (self.verts[(i + n - 1) % n], self.verts[i]))
    }

    /// Shoelace area; positive for counterclockwise vertex order.
    pub fn signed_area(&self) -> f64 {
        0.5 * self
            .edges()
            .map(|(p, q)| p.x * q.y - q.x * p.y)
            .sum::<f64>()
    }

    /// Area centroid.
    pub fn centroid(&self) -> Vector2<f64> {
        let mut a = 0.0;
        let mut c = Vector2::zeros();
        for (p, q) in self.edges() {
            let w = p.x * q.y - q.x * p.y;
            a += w;
            c += (p + q) * w;
        }
        c / (3.0 * a)
    }

    /// Crossing-number membership test; vertices and edges count as inside.
    ///
    /// For each edge `(prev, cur)`:
    /// - `p == cur` or `p` on the closed edge returns `true` immediately;
    /// - otherwise, if the edge straddles `p.y` (exactly one endpoint strictly
    ///   above), the sign of the cross product decides whether the edge passes
    ///   to the right of `p`, which toggles parity.
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        let mut inside = false;
        for (prev, cur) in self.edges() {
            if p == cur || on_segment(p, prev, cur) {
                return true;
            }
            if (cur.y > p.y) != (prev.y > p.y) {
                let slope = (p.x - cur.x) * (prev.y - cur.y) - (prev.x - cur.x) * (p.y - cur.y);
                if (slope < 0.0) != (prev.y < cur.y) {
                    inside = !inside;
                }
            }
        }
        inside
    }

    fn check_simple(&self) -> Result<()> {
        let n = self.verts.len();
        let v = &self.verts;
        for i in 0..n {
            let a = v[i];
            let b = v[(i + 1) % n];
            if a == b {
                return Err(Error::InvalidPolygon(format!("edge {i} has zero length")));
            }
            // Adjacent edge folding back onto this one.
            let c = v[(i + 2) % n];
            if cross(a, b, c) == 0.0 && (a - b).dot(&(c - b)) > 0.0 {
                return Err(Error::InvalidPolygon(format!(
                    "edges {i} and {} overlap",
                    (i + 1) % n
                )));
            }
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let c = v[j];
                let d = v[(j + 1) % n];
                if segments_intersect(a, b, c, d) {
                    return Err(Error::InvalidPolygon(format!(
                        "edges {i} and {j} intersect"
                    )));
                }
            }
        }
        Ok(())
    }
}
