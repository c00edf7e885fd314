use zambi_core::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance (per axis) under which two edge endpoints are considered the same.
pub const EDGE_TOLERANCE: f32 = 2.0;

/// Undirected mesh edge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn midpoint(&self) -> Vec2 {
        self.start.lerp(self.end, 0.5)
    }

    pub fn touches(&self, p: Vec2) -> bool {
        self.start == p || self.end == p
    }

    /// Tolerant equality: endpoints match within [`EDGE_TOLERANCE`] on both axes, in either
    /// orientation.
    ///
    /// This relation is not transitive, so it is deliberately not `PartialEq`. Deduplication
    /// goes through [`EdgeKey`] instead.
    pub fn approx_eq(&self, other: &Edge) -> bool {
        let near = |a: Vec2, b: Vec2| {
            (a.x - b.x).abs() <= EDGE_TOLERANCE && (a.y - b.y).abs() <= EDGE_TOLERANCE
        };
        (near(self.start, other.start) && near(self.end, other.end))
            || (near(self.start, other.end) && near(self.end, other.start))
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct GridKey(i32, i32);

impl GridKey {
    fn from_vec2(p: Vec2) -> Self {
        Self(
            (p.x / EDGE_TOLERANCE).round() as i32,
            (p.y / EDGE_TOLERANCE).round() as i32,
        )
    }
}

/// Canonical lookup key for an edge.
///
/// Endpoints are snapped to a grid of [`EDGE_TOLERANCE`] cells and ordered, so both
/// orientations of the same (or a nearly coincident) edge share one key. Equal keys always
/// hash equally, which a tolerance-based `Eq` could not guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey(GridKey, GridKey);

impl EdgeKey {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        let ka = GridKey::from_vec2(a);
        let kb = GridKey::from_vec2(b);
        if ka <= kb {
            Self(ka, kb)
        } else {
            Self(kb, ka)
        }
    }
}
