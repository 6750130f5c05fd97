//! Terrain graphs and dual-agent uniform-cost search with counter handovers.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod graph;
pub mod heap;
pub mod node;
pub mod search;

pub use graph::{counter_between, HandoverGraph, TerrainGraphs, WalkGraph};
pub use heap::IndexedMinHeap;
pub use node::{GoalKey, SearchNode};
pub use search::{uniform_cost_search, walk_distance, GoalMap};
