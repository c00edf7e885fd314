//! Obstacle-aware navigation for a procedurally generated 2D world.
//!
//! [`World::generate`] places rotated rectangular obstacles, triangulates the corners that are
//! not buried inside other obstacles, prunes triangles that cut through an obstacle and builds a
//! [`NavMesh`] from the rest. The mesh answers nearest-vertex and path queries.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod edge;
pub mod error;
pub mod mesh;
pub mod path;
pub mod quadtree;
pub mod rect;
pub mod triangulate;
pub mod world;

pub use config::{WorldConfig, MAX_WORLD_SIZE};
pub use edge::{Edge, EdgeKey, EDGE_TOLERANCE};
pub use error::{NavError, Result, TriangulationError};
pub use mesh::NavMesh;
pub use path::{PathNode, Waypoints};
pub use quadtree::{QuadTree, NODE_CAPACITY};
pub use rect::OrientedRect;
pub use triangulate::{BowyerWatson, Triad, Triangulator};
pub use world::World;
pub use zambi_core::{Rect, Vec2};
