//! Triangulation primitive consumed by world generation.
//!
//! The pipeline only depends on the [`Triangulator`] contract: index triples into the input
//! sequence whose triangles satisfy the Delaunay empty-circumcircle property.
//! [`BowyerWatson`] is the bundled implementation.

use std::collections::BTreeMap;

use zambi_core::Vec2;

use crate::error::TriangulationError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One triangle as three indices into the triangulated point sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triad {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Triad {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }

    pub fn references(&self, idx: usize) -> bool {
        self.a == idx || self.b == idx || self.c == idx
    }

    /// Side pairs in the order (a, b), (a, c), (b, c).
    pub fn sides(&self) -> [(usize, usize); 3] {
        [(self.a, self.b), (self.a, self.c), (self.b, self.c)]
    }
}

pub trait Triangulator {
    fn triangulate(&self, points: &[Vec2]) -> Result<Vec<Triad>, TriangulationError>;
}

impl<F> Triangulator for F
where
    F: Fn(&[Vec2]) -> Result<Vec<Triad>, TriangulationError>,
{
    fn triangulate(&self, points: &[Vec2]) -> Result<Vec<Triad>, TriangulationError> {
        self(points)
    }
}

/// Incremental Bowyer–Watson Delaunay triangulation.
///
/// Exact duplicate points are skipped, so they never appear in the output triads. Arithmetic is
/// done in `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BowyerWatson;

#[derive(Debug, Clone, Copy)]
struct Tri {
    v: [usize; 3],
    cx: f64,
    cy: f64,
    r2: f64,
}

impl Tri {
    fn new(v: [usize; 3], pts: &[(f64, f64)]) -> Self {
        let (cx, cy, r2) = circumcircle(pts[v[0]], pts[v[1]], pts[v[2]]);
        Self { v, cx, cy, r2 }
    }

    fn circumcircle_contains(&self, p: (f64, f64)) -> bool {
        let dx = p.0 - self.cx;
        let dy = p.1 - self.cy;
        // Relative epsilon so co-circular points (rectangle corners) are not treated as inside.
        dx * dx + dy * dy < self.r2 * (1.0 - 1e-12)
    }
}

impl Triangulator for BowyerWatson {
    fn triangulate(&self, points: &[Vec2]) -> Result<Vec<Triad>, TriangulationError> {
        let mut unique: Vec<usize> = Vec::with_capacity(points.len());
        let mut seen = BTreeMap::new();
        for (i, p) in points.iter().enumerate() {
            let key = ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
            if seen.insert(key, i).is_none() {
                unique.push(i);
            }
        }

        if unique.len() < 3 {
            return Err(TriangulationError::TooFewPoints {
                count: unique.len(),
            });
        }

        let mut pts: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (f64::from(p.x), f64::from(p.y)))
            .collect();

        if all_colinear(&unique, &pts) {
            return Err(TriangulationError::Colinear);
        }

        // Super triangle enclosing every input point, appended after the inputs.
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &i in &unique {
            let (x, y) = pts[i];
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let span = (max_x - min_x).max(max_y - min_y).max(1.0);
        let mid_x = (min_x + max_x) * 0.5;
        let mid_y = (min_y + max_y) * 0.5;
        let s0 = pts.len();
        pts.push((mid_x - 20.0 * span, mid_y - span));
        pts.push((mid_x, mid_y + 20.0 * span));
        pts.push((mid_x + 20.0 * span, mid_y - span));

        let mut tris = vec![Tri::new([s0, s0 + 1, s0 + 2], &pts)];

        for &i in &unique {
            let p = pts[i];

            let mut boundary: BTreeMap<(usize, usize), u32> = BTreeMap::new();
            tris.retain(|t| {
                if !t.circumcircle_contains(p) {
                    return true;
                }
                for (a, b) in [(t.v[0], t.v[1]), (t.v[1], t.v[2]), (t.v[2], t.v[0])] {
                    *boundary.entry((a.min(b), a.max(b))).or_insert(0) += 1;
                }
                false
            });

            for ((a, b), count) in boundary {
                if count == 1 {
                    tris.push(Tri::new([a, b, i], &pts));
                }
            }
        }

        Ok(tris
            .into_iter()
            .filter(|t| t.v.iter().all(|&v| v < s0))
            .map(|t| Triad::new(t.v[0], t.v[1], t.v[2]))
            .collect())
    }
}

fn circumcircle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> (f64, f64, f64) {
    let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
    if d.abs() < f64::EPSILON {
        // Degenerate sliver: an infinite circle swallows every later point, so it gets replaced.
        return (a.0, a.1, f64::INFINITY);
    }
    let a2 = a.0 * a.0 + a.1 * a.1;
    let b2 = b.0 * b.0 + b.1 * b.1;
    let c2 = c.0 * c.0 + c.1 * c.1;
    let cx = (a2 * (b.1 - c.1) + b2 * (c.1 - a.1) + c2 * (a.1 - b.1)) / d;
    let cy = (a2 * (c.0 - b.0) + b2 * (a.0 - c.0) + c2 * (b.0 - a.0)) / d;
    let r2 = (a.0 - cx).powi(2) + (a.1 - cy).powi(2);
    (cx, cy, r2)
}

fn all_colinear(unique: &[usize], pts: &[(f64, f64)]) -> bool {
    let o = pts[unique[0]];
    let Some(&dir_idx) = unique[1..].first() else {
        return true;
    };
    let d = (pts[dir_idx].0 - o.0, pts[dir_idx].1 - o.1);
    let scale = (d.0 * d.0 + d.1 * d.1).sqrt().max(1.0);
    unique[2..].iter().all(|&i| {
        let e = (pts[i].0 - o.0, pts[i].1 - o.1);
        let cross = d.0 * e.1 - d.1 * e.0;
        cross.abs() <= 1e-9 * scale * (e.0 * e.0 + e.1 * e.1).sqrt().max(1.0)
    })
}
