//! Error types for navigation queries and world generation.

use thiserror::Error;
use zambi_core::Vec2;

/// Result type alias for navigation operations.
pub type Result<T> = std::result::Result<T, NavError>;

/// Reasons the triangulation primitive refuses its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriangulationError {
    #[error("triangulation needs at least 3 distinct points, got {count}")]
    TooFewPoints { count: usize },

    #[error("all input points are colinear")]
    Colinear,
}

/// Errors surfaced by mesh queries, spatial-index queries and world generation.
///
/// None of these are fatal: callers typically regenerate the world or skip a move.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    #[error("({x}, {y}) is not a vertex of the navigation mesh")]
    VertexNotFound { x: f32, y: f32 },

    #[error("({x}, {y}) lies outside the indexed region")]
    OutOfBounds { x: f32, y: f32 },

    #[error("no path from ({}, {}) to ({}, {})", from.x, from.y, to.x, to.y)]
    NoPath { from: Vec2, to: Vec2 },

    #[error("triangulation failed: {0}")]
    Triangulation(#[from] TriangulationError),

    #[error("every triangle was pruned; the navigation mesh would be empty")]
    EmptyMesh,

    #[error("invalid world configuration: {0}")]
    InvalidConfig(String),
}

impl NavError {
    pub(crate) fn vertex_not_found(p: Vec2) -> Self {
        Self::VertexNotFound { x: p.x, y: p.y }
    }

    pub(crate) fn out_of_bounds(p: Vec2) -> Self {
        Self::OutOfBounds { x: p.x, y: p.y }
    }
}
