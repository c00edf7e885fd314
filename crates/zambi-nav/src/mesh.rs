use core::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tracing::debug;
use zambi_core::{PriorityQueue, Vec2};

use crate::edge::{Edge, EdgeKey};
use crate::error::{NavError, Result};
use crate::path::{PathNode, Waypoints};
use crate::triangulate::Triad;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Weight of the accumulated hop count in the search priority.
const COST_WEIGHT: f32 = 0.4;
/// Weight of the straight-line distance to the goal in the search priority.
const HEURISTIC_WEIGHT: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct VertexKey(u32, u32);

impl VertexKey {
    fn from_vec2(p: Vec2) -> Self {
        // `+ 0.0` folds -0.0 into 0.0 so both spellings of zero share a key.
        Self((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Priority(f32);

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Walkable graph over the corners of surviving triangles.
///
/// Built once from a point set and its triangle list, immutable afterwards.
#[derive(Debug, Clone)]
pub struct NavMesh {
    vertices: Vec<Vec2>,
    index: BTreeMap<VertexKey, usize>,
    /// Triangles re-indexed onto `vertices`.
    triads: Vec<Triad>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
}

impl NavMesh {
    /// Build a mesh from the triangulated point set and the triangles that survived pruning.
    ///
    /// Only points referenced by some triangle become vertices (exact duplicates collapse).
    /// Each triangle contributes its three sides; sides whose endpoints snap to the same
    /// [`EdgeKey`] are stored once. Triads with out-of-range indices are ignored.
    pub fn from_triads(points: &[Vec2], triads: &[Triad]) -> Self {
        let started = Instant::now();

        let triads: Vec<Triad> = triads
            .iter()
            .copied()
            .filter(|t| t.indices().iter().all(|&i| i < points.len()))
            .collect();

        let mut referenced = vec![false; points.len()];
        for t in &triads {
            for i in t.indices() {
                referenced[i] = true;
            }
        }

        let mut vertices = Vec::new();
        let mut index = BTreeMap::new();
        for (p, _) in points.iter().zip(&referenced).filter(|(_, used)| **used) {
            index.entry(VertexKey::from_vec2(*p)).or_insert_with(|| {
                vertices.push(*p);
                vertices.len() - 1
            });
        }

        let vertex_of = |i: usize| index[&VertexKey::from_vec2(points[i])];

        let mut edges = Vec::with_capacity(triads.len() * 3);
        let mut adjacency = vec![Vec::new(); vertices.len()];
        let mut seen: BTreeSet<EdgeKey> = BTreeSet::new();
        let mut linked: BTreeSet<(usize, usize)> = BTreeSet::new();
        for t in &triads {
            for (i, j) in t.sides() {
                // Adjacency follows exact vertices; two vertices sharing a grid cell must both
                // keep their neighbours even though only one of their edges is stored.
                let (a, b) = (vertex_of(i), vertex_of(j));
                if a != b && linked.insert((a.min(b), a.max(b))) {
                    adjacency[a].push(b);
                    adjacency[b].push(a);
                }

                let edge = Edge::new(points[i], points[j]);
                if seen.insert(edge.key()) {
                    edges.push(edge);
                }
            }
        }

        let triads: Vec<Triad> = triads
            .iter()
            .map(|t| Triad::new(vertex_of(t.a), vertex_of(t.b), vertex_of(t.c)))
            .collect();

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            vertices = vertices.len(),
            edges = edges.len(),
            triads = triads.len(),
            "navigation mesh built"
        );

        Self {
            vertices,
            index,
            triads,
            edges,
            adjacency,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Triangles as indices into [`vertices`](Self::vertices).
    pub fn triads(&self) -> &[Triad] {
        &self.triads
    }

    pub fn edge_midpoints(&self) -> Vec<Vec2> {
        self.edges.iter().map(Edge::midpoint).collect()
    }

    pub fn contains_vertex(&self, p: Vec2) -> bool {
        self.vertex_index(p).is_some()
    }

    fn vertex_index(&self, p: Vec2) -> Option<usize> {
        self.index.get(&VertexKey::from_vec2(p)).copied()
    }

    fn nearest_vertex_index(&self, p: Vec2) -> Option<usize> {
        let mut best: Option<(f32, usize)> = None;
        for (i, v) in self.vertices.iter().enumerate() {
            let d2 = (*v - p).length_squared();
            match best {
                None => best = Some((d2, i)),
                Some((best_d2, _)) if d2 < best_d2 => best = Some((d2, i)),
                _ => {}
            }
        }
        best.map(|(_, i)| i)
    }

    /// Closest mesh vertex by Euclidean distance; the first one wins ties.
    pub fn nearest_vertex(&self, p: Vec2) -> Option<Vec2> {
        self.nearest_vertex_index(p).map(|i| self.vertices[i])
    }

    /// Every vertex sharing a triangle side with `vertex`, in insertion order.
    ///
    /// `vertex` must be an exact mesh vertex.
    pub fn adjacent_vertices(&self, vertex: Vec2) -> Result<Vec<Vec2>> {
        let idx = self
            .vertex_index(vertex)
            .ok_or_else(|| NavError::vertex_not_found(vertex))?;
        Ok(self.adjacency[idx]
            .iter()
            .map(|&n| self.vertices[n])
            .collect())
    }

    /// Weighted best-first search from the mesh vertex `start` towards the vertex nearest `end`.
    ///
    /// Every hop costs 1; the queue is ordered by `0.4 * hops + 0.6 * distance(node, end)`. The
    /// returned stack holds `end` at the bottom, then the reached vertex, then the rest of the
    /// chain back towards (but excluding) `start`.
    pub fn find_path(&self, start: Vec2, end: Vec2) -> Result<Waypoints> {
        let start_idx = self
            .vertex_index(start)
            .ok_or_else(|| NavError::vertex_not_found(start))?;
        let target = self.nearest_vertex_index(end).ok_or(NavError::EmptyMesh)?;

        let n = self.vertices.len();
        let mut arena = vec![PathNode::root(start)];
        let mut arena_vertex = vec![start_idx];
        // Queue items are arena indices; `open_node` maps a vertex to its open arena entry.
        let mut open: PriorityQueue<Priority, usize> = PriorityQueue::new();
        let mut open_node: Vec<Option<usize>> = vec![None; n];
        let mut closed = vec![false; n];

        open.enqueue(Priority(0.0), 0);
        open_node[start_idx] = Some(0);

        let priority = |node: &PathNode| {
            Priority(COST_WEIGHT * node.cost + HEURISTIC_WEIGHT * node.location.distance(end))
        };

        let reached = loop {
            let Some(&current) = open.peek() else {
                debug!(?start, ?end, expanded = arena.len(), "open set exhausted");
                return Err(NavError::NoPath { from: start, to: end });
            };
            let current_v = arena_vertex[current];
            if current_v == target {
                break current;
            }

            let _ = open.dequeue();
            open_node[current_v] = None;
            closed[current_v] = true;

            for &next in &self.adjacency[current_v] {
                let candidate = PathNode::step(self.vertices[next], current, &arena);
                let admit = match open_node[next] {
                    Some(existing) => {
                        candidate.cost < arena[existing].cost
                            && open.remove(&existing).is_some()
                    }
                    None => !closed[next],
                };
                if admit {
                    open.enqueue(priority(&candidate), arena.len());
                    open_node[next] = Some(arena.len());
                    arena.push(candidate);
                    arena_vertex.push(next);
                }
            }
        };

        let mut stack = vec![end];
        let mut node = reached;
        while let Some(parent) = arena[node].parent {
            stack.push(arena[node].location);
            node = parent;
        }

        Ok(Waypoints::from_stack(stack))
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct NavMeshSerde {
    vertices: Vec<Vec2>,
    triads: Vec<Triad>,
}

#[cfg(feature = "serde")]
impl Serialize for NavMesh {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        NavMeshSerde {
            vertices: self.vertices.clone(),
            triads: self.triads.clone(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for NavMesh {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = NavMeshSerde::deserialize(deserializer)?;
        Ok(NavMesh::from_triads(&data.vertices, &data.triads))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_by_value() {
        assert!(Priority(0.5) < Priority(1.0));
        assert_eq!(Priority(2.0).cmp(&Priority(2.0)), Ordering::Equal);
    }

    #[test]
    fn negative_zero_matches_zero() {
        assert_eq!(
            VertexKey::from_vec2(Vec2::new(-0.0, 0.0)),
            VertexKey::from_vec2(Vec2::new(0.0, -0.0))
        );
    }
}
