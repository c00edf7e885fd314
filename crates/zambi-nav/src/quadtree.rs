use zambi_core::{Rect, Vec2};

use crate::error::{NavError, Result};

/// Points a leaf buffers before it subdivides.
pub const NODE_CAPACITY: usize = 8;

/// Every node's bounds are grown by this much on each side, so the integer halving in
/// [`QuadTree::insert`] leaves no gaps between siblings.
const NODE_MARGIN: i32 = 1;

/// Nodes this narrow (or flatter) keep buffering past capacity; halving them would no longer
/// shrink the bounds once the margin is added back.
const MIN_SPLIT_EXTENT: i32 = 4;

/// Point quadtree over a fixed rectangular region.
///
/// Children are stored in the fixed order northwest, northeast, southeast, southwest. When a
/// full leaf splits, its points move into the first child that accepts them; a point no child
/// accepts stays in the (now internal) node's buffer.
#[derive(Debug, Clone)]
pub struct QuadTree {
    bounds: Rect,
    points: Vec<Vec2>,
    children: Option<Box<[QuadTree; 4]>>,
}

impl QuadTree {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::from_rect(Rect::new(x, y, width, height))
    }

    pub fn from_rect(region: Rect) -> Self {
        Self {
            bounds: region.expanded(NODE_MARGIN),
            points: Vec::with_capacity(NODE_CAPACITY),
            children: None,
        }
    }

    /// Region this node accepts, including the margin.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Child nodes (northwest, northeast, southeast, southwest) once subdivided.
    pub fn quadrants(&self) -> Option<&[QuadTree; 4]> {
        self.children.as_deref()
    }

    /// Points resident in this node's own buffer.
    pub fn resident(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children
                .iter()
                .flat_map(|c| c.iter())
                .map(QuadTree::len)
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `point`; returns `false` if it lies outside this node's bounds.
    pub fn insert(&mut self, point: Vec2) -> bool {
        if !self.bounds.contains_point(point) {
            return false;
        }

        if self.children.is_none() {
            if self.points.len() < NODE_CAPACITY || !self.can_split() {
                self.points.push(point);
                return true;
            }
            self.subdivide();
        }

        match self.children.as_deref_mut() {
            Some(children) => children.iter_mut().any(|c| c.insert(point)),
            None => false,
        }
    }

    /// Every stored point inside `range` (half-open), skipping subtrees that miss it.
    pub fn query_range(&self, range: &Rect) -> Vec<Vec2> {
        let mut out = Vec::new();
        self.query_range_into(range, &mut out);
        out
    }

    fn query_range_into(&self, range: &Rect, out: &mut Vec<Vec2>) {
        if !self.bounds.intersects(range) {
            return;
        }

        out.extend(self.points.iter().copied().filter(|p| range.contains_point(*p)));

        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.query_range_into(range, out);
            }
        }
    }

    /// Closest stored point to `point`.
    ///
    /// The search starts in the leaf owning `point` and only visits sibling subtrees whose
    /// bounds could hold something closer. Ties keep the first point found.
    pub fn find_nearest(&self, point: Vec2) -> Result<Option<Vec2>> {
        if !self.bounds.contains_point(point) {
            return Err(NavError::out_of_bounds(point));
        }

        let mut best = None;
        self.nearest_into(point, &mut best);
        Ok(best.map(|(_, p)| p))
    }

    fn nearest_into(&self, point: Vec2, best: &mut Option<(f32, Vec2)>) {
        for p in &self.points {
            let d2 = (*p - point).length_squared();
            if best.map_or(true, |(best_d2, _)| d2 < best_d2) {
                *best = Some((d2, *p));
            }
        }

        let Some(children) = self.children.as_deref() else {
            return;
        };

        let owner = children.iter().position(|c| c.bounds.contains_point(point));
        if let Some(i) = owner {
            children[i].nearest_into(point, best);
        }

        for (i, child) in children.iter().enumerate() {
            if Some(i) == owner {
                continue;
            }
            let reachable =
                best.map_or(true, |(best_d2, _)| child.bounds.distance_squared_to(point) < best_d2);
            if reachable {
                child.nearest_into(point, best);
            }
        }
    }

    /// Exact membership test.
    pub fn contains(&self, point: Vec2) -> bool {
        if !self.bounds.contains_point(point) {
            return false;
        }

        if self.points.contains(&point) {
            return true;
        }

        // Insertion hands a point to the first child whose bounds accept it, so that child is
        // the only place it can live.
        self.children
            .as_deref()
            .and_then(|children| children.iter().find(|c| c.bounds.contains_point(point)))
            .is_some_and(|child| child.contains(point))
    }

    fn can_split(&self) -> bool {
        self.bounds.width > MIN_SPLIT_EXTENT && self.bounds.height > MIN_SPLIT_EXTENT
    }

    fn subdivide(&mut self) {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.bounds;
        let hw = width / 2;
        let hh = height / 2;

        let mut children = Box::new([
            QuadTree::new(x, y, hw, hh),
            QuadTree::new(x + hw, y, hw, hh),
            QuadTree::new(x + hw, y + hh, hw, hh),
            QuadTree::new(x, y + hh, hw, hh),
        ]);

        let buffered = std::mem::take(&mut self.points);
        for p in buffered {
            if !children.iter_mut().any(|c| c.insert(p)) {
                self.points.push(p);
            }
        }

        self.children = Some(children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_stop_splitting() {
        let mut tree = QuadTree::new(0, 0, 64, 64);
        for _ in 0..40 {
            assert!(tree.insert(Vec2::new(10.0, 10.0)));
        }
        assert_eq!(tree.len(), 40);
        assert!(tree.contains(Vec2::new(10.0, 10.0)));
    }
}
