//! World generation parameters.

use crate::error::{NavError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest accepted world width or height.
///
/// Corners are `f32`, which is exact for integers up to 2^24; the margin still leaves room for
/// obstacles hanging past the far edge and for the quadtree's grown bounds in `i32`.
pub const MAX_WORLD_SIZE: u32 = 1 << 24;

/// Parameters for one world generation cycle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// World width; fixes the right boundary corners and the spatial index region.
    pub width: u32,

    /// World height; fixes the bottom boundary corners and the spatial index region.
    pub height: u32,

    /// Number of obstacles to place. Zero yields a mesh over the four boundary corners.
    pub obstacle_count: usize,

    /// Smallest obstacle side length (inclusive).
    pub min_obstacle_size: i32,

    /// Largest obstacle side length (exclusive).
    pub max_obstacle_size: i32,

    /// Seed for the placement RNG.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            obstacle_count: 40,
            min_obstacle_size: 10,
            max_obstacle_size: 25,
            seed: 0,
        }
    }
}

impl WorldConfig {
    pub fn new(width: u32, height: u32, obstacle_count: usize) -> Self {
        Self {
            width,
            height,
            obstacle_count,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(NavError::InvalidConfig(format!(
                "world must have a positive size, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_WORLD_SIZE || self.height > MAX_WORLD_SIZE {
            return Err(NavError::InvalidConfig(format!(
                "world size {}x{} exceeds the {MAX_WORLD_SIZE} unit limit",
                self.width, self.height
            )));
        }
        if self.min_obstacle_size <= 0
            || self.max_obstacle_size <= self.min_obstacle_size
            || self.max_obstacle_size as u32 > MAX_WORLD_SIZE
        {
            return Err(NavError::InvalidConfig(format!(
                "obstacle size range [{}, {}) is empty, non-positive or too large",
                self.min_obstacle_size, self.max_obstacle_size
            )));
        }
        Ok(())
    }
}
