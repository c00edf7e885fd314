use zambi_core::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Search-tree node stored in a per-query arena.
///
/// `parent` indexes into the same arena, so the chain stays valid after the open and closed
/// sets are dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNode {
    pub location: Vec2,
    pub parent: Option<usize>,
    pub cost: f32,
}

impl PathNode {
    pub fn root(location: Vec2) -> Self {
        Self {
            location,
            parent: None,
            cost: 0.0,
        }
    }

    /// Child of `arena[parent]`, one step further than its parent.
    ///
    /// Search cost counts hops, not distance: every edge costs 1.
    pub fn step(location: Vec2, parent: usize, arena: &[PathNode]) -> Self {
        Self {
            location,
            parent: Some(parent),
            cost: arena[parent].cost + 1.0,
        }
    }
}

/// Waypoints returned by a path query, consumed last-in-first-out.
///
/// The next point to walk to is on top; the requested goal is at the bottom. An empty sequence
/// means the agent has arrived.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoints {
    stack: Vec<Vec2>,
}

impl Waypoints {
    /// Build from points in push order (goal first, next waypoint last).
    pub fn from_stack(stack: Vec<Vec2>) -> Self {
        Self { stack }
    }

    pub fn push(&mut self, p: Vec2) {
        self.stack.push(p);
    }

    pub fn pop(&mut self) -> Option<Vec2> {
        self.stack.pop()
    }

    pub fn peek(&self) -> Option<Vec2> {
        self.stack.last().copied()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Points in the order they were pushed (goal first).
    pub fn as_stack(&self) -> &[Vec2] {
        &self.stack
    }

    /// Points in the order an agent visits them (goal last).
    pub fn into_travel_order(mut self) -> Vec<Vec2> {
        self.stack.reverse();
        self.stack
    }
}
