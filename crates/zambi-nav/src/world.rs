//! World generation: obstacle placement, candidate points, triangulation, pruning, mesh.

use std::f32::consts::PI;
use std::time::Instant;

use tracing::{debug, info};
use zambi_core::{DeterministicRng, Rect, SplitMix64, Vec2};

use crate::config::{WorldConfig, MAX_WORLD_SIZE};
use crate::error::{NavError, Result};
use crate::mesh::NavMesh;
use crate::path::Waypoints;
use crate::quadtree::QuadTree;
use crate::rect::OrientedRect;
use crate::triangulate::{BowyerWatson, Triad, Triangulator};

/// Place `config.obstacle_count` obstacles uniformly inside the world. Overlaps are allowed.
pub fn place_obstacles<R: DeterministicRng>(config: &WorldConfig, rng: &mut R) -> Vec<OrientedRect> {
    (0..config.obstacle_count)
        .map(|_| {
            let x = rng.next_below(config.width) as i32;
            let y = rng.next_below(config.height) as i32;
            let rotation = PI * rng.next_f32_unit();
            let w = rng.next_in_range(config.min_obstacle_size, config.max_obstacle_size);
            let h = rng.next_in_range(config.min_obstacle_size, config.max_obstacle_size);
            OrientedRect::new(Rect::new(x, y, w, h), rotation)
        })
        .collect()
}

/// The four world corners followed by every obstacle corner not buried inside another obstacle.
pub fn candidate_points(width: u32, height: u32, obstacles: &[OrientedRect]) -> Vec<Vec2> {
    let (w, h) = (width as f32, height as f32);
    let mut points = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(w, h),
        Vec2::new(w, 0.0),
        Vec2::new(0.0, h),
    ];

    for (i, obstacle) in obstacles.iter().enumerate() {
        for corner in obstacle.corners() {
            let buried = obstacles
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && other.contains(corner));
            if !buried {
                points.push(corner);
            }
        }
    }

    points
}

/// Whether the segment `a`-`b` may not be walked.
///
/// A segment is blocked when it joins opposite corners of an obstacle, or when it does not run
/// along an obstacle side and its midpoint falls inside that obstacle.
pub fn segment_blocked(a: Vec2, b: Vec2, obstacles: &[OrientedRect]) -> bool {
    let mid = a.lerp(b, 0.5);
    obstacles.iter().any(|r| {
        r.corners_are_diagonal(a, b) || (!r.corners_share_side(a, b) && r.contains(mid))
    })
}

/// Drop every triangle with a blocked side, and any triangle indexing past `points`.
pub fn prune_triads(points: &[Vec2], triads: &[Triad], obstacles: &[OrientedRect]) -> Vec<Triad> {
    triads
        .iter()
        .copied()
        .filter(|t| {
            t.indices().iter().all(|&i| i < points.len())
                && !t
                    .sides()
                    .into_iter()
                    .any(|(i, j)| segment_blocked(points[i], points[j], obstacles))
        })
        .collect()
}

/// One generated world: obstacles plus the navigation structures derived from them.
///
/// A world is never edited in place; regenerating produces a new value.
#[derive(Debug, Clone)]
pub struct World {
    width: u32,
    height: u32,
    obstacles: Vec<OrientedRect>,
    candidates: Vec<Vec2>,
    triads: Vec<Triad>,
    mesh: NavMesh,
    index: QuadTree,
}

impl World {
    /// Generate with the bundled triangulator and an RNG seeded from `config.seed`.
    pub fn generate(config: &WorldConfig) -> Result<Self> {
        let mut rng = SplitMix64::new(config.seed);
        Self::generate_with(config, &mut rng, &BowyerWatson)
    }

    pub fn generate_with<R, T>(config: &WorldConfig, rng: &mut R, triangulator: &T) -> Result<Self>
    where
        R: DeterministicRng,
        T: Triangulator + ?Sized,
    {
        config.validate()?;
        debug!(
            width = config.width,
            height = config.height,
            obstacles = config.obstacle_count,
            seed = config.seed,
            "beginning world generation"
        );

        let started = Instant::now();
        let obstacles = place_obstacles(config, rng);
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "obstacles placed"
        );

        Self::from_obstacles(config.width, config.height, obstacles, triangulator)
    }

    /// Run the pipeline from already placed obstacles. They are sorted by position first.
    pub fn from_obstacles<T>(
        width: u32,
        height: u32,
        mut obstacles: Vec<OrientedRect>,
        triangulator: &T,
    ) -> Result<Self>
    where
        T: Triangulator + ?Sized,
    {
        if width == 0 || height == 0 || width > MAX_WORLD_SIZE || height > MAX_WORLD_SIZE {
            return Err(NavError::InvalidConfig(format!(
                "world size {width}x{height} is not usable"
            )));
        }

        let started = Instant::now();
        let mut phase = Instant::now();

        obstacles.sort_by_key(OrientedRect::position_key);

        let candidates = candidate_points(width, height, &obstacles);
        debug!(
            elapsed_ms = phase.elapsed().as_millis() as u64,
            candidates = candidates.len(),
            "candidate points generated"
        );
        phase = Instant::now();

        let mut triads = triangulator.triangulate(&candidates)?;
        let produced = triads.len();
        triads.retain(|t| t.indices().iter().all(|&i| i < candidates.len()));
        if triads.len() < produced {
            debug!(
                dropped = produced - triads.len(),
                "triads referencing missing candidate points ignored"
            );
        }
        debug!(
            elapsed_ms = phase.elapsed().as_millis() as u64,
            triads = triads.len(),
            "triangulation generated"
        );
        phase = Instant::now();

        let triads = prune_triads(&candidates, &triads, &obstacles);
        debug!(
            elapsed_ms = phase.elapsed().as_millis() as u64,
            remaining = triads.len(),
            "blocked triads removed"
        );
        if triads.is_empty() {
            return Err(NavError::EmptyMesh);
        }

        let mesh = NavMesh::from_triads(&candidates, &triads);

        let mut index = QuadTree::new(0, 0, width as i32, height as i32);
        let unindexed = mesh
            .vertices()
            .iter()
            .filter(|v| !index.insert(**v))
            .count();
        if unindexed > 0 {
            debug!(unindexed, "mesh vertices outside the world were not indexed");
        }

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            obstacles = obstacles.len(),
            vertices = mesh.vertex_count(),
            edges = mesh.edge_count(),
            triads = mesh.triangle_count(),
            "world generation complete"
        );

        Ok(Self {
            width,
            height,
            obstacles,
            candidates,
            triads,
            mesh,
            index,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Obstacles, sorted by position.
    pub fn obstacles(&self) -> &[OrientedRect] {
        &self.obstacles
    }

    /// Points handed to the triangulator.
    pub fn candidates(&self) -> &[Vec2] {
        &self.candidates
    }

    /// Surviving triangles, indexing into [`candidates`](Self::candidates).
    pub fn triads(&self) -> &[Triad] {
        &self.triads
    }

    pub fn mesh(&self) -> &NavMesh {
        &self.mesh
    }

    /// Spatial index over the mesh vertices that fall inside the world rectangle.
    pub fn index(&self) -> &QuadTree {
        &self.index
    }

    /// Nearest indexed mesh vertex; fails for points outside the world.
    pub fn nearest_vertex(&self, p: Vec2) -> Result<Option<Vec2>> {
        self.index.find_nearest(p)
    }

    /// Path from an arbitrary position: `from` is snapped to its nearest mesh vertex first.
    pub fn find_path(&self, from: Vec2, to: Vec2) -> Result<Waypoints> {
        let start = self.mesh.nearest_vertex(from).ok_or(NavError::EmptyMesh)?;
        self.mesh.find_path(start, to)
    }
}
