//! Deterministic kernel primitives for kitchen-layout evaluation.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod location;
pub mod rng;
pub mod terrain;

pub use command::Command;
pub use error::EvalError;
pub use location::Loc;
pub use rng::{DeterministicRng, SplitMix64};
pub use terrain::{Cell, Terrain};
