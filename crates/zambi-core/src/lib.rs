//! Deterministic geometry, RNG and queue primitives shared by the navigation crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod math;
pub mod queue;
pub mod rng;

pub use math::{Rect, Vec2};
pub use queue::PriorityQueue;
pub use rng::{DeterministicRng, SplitMix64};
