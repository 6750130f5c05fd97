//! Medium-level-action composition, command translation, and layout scoring.
//!
//! Chains per-stage uniform-cost searches into a full cook-and-serve cycle
//! and reduces the surviving branches to primitive command sequences plus a
//! path-smoothness score.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod actions;
pub mod composer;
pub mod entropy;
pub mod node;
pub mod pipeline;
pub mod stage;

pub use actions::paths_to_commands;
pub use composer::{compose, BranchMap, ComposerConfig};
pub use entropy::{path_entropy, DEFAULT_RHO};
pub use node::{MlaKey, MlaNode};
pub use pipeline::{evaluate_layout, LayoutReport, PipelineConfig, PlanPair};
pub use stage::{Stage, StageKind};
