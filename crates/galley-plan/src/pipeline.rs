use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use galley_core::{Command, DeterministicRng, EvalError, Terrain};
use galley_nav::TerrainGraphs;

use crate::actions::paths_to_commands;
use crate::composer::{branch_node_count, compose, BranchMap, ComposerConfig};
use crate::entropy::{path_entropy, DEFAULT_RHO};
use crate::node::MlaNode;
use crate::stage::Stage;

/// Knobs for one evaluation run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub composer: ComposerConfig,
    /// Run-length weight for the entropy score attached to each plan.
    pub rho: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            composer: ComposerConfig::default(),
            rho: DEFAULT_RHO,
        }
    }
}

/// One accepted end-to-end completion: both agents' full command sequences
/// (all five stages concatenated in order) and their smoothness scores.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanPair {
    pub commands: [Vec<Option<Command>>; 2],
    pub entropy: [f64; 2],
}

/// Result of evaluating one layout: per-stage feasibility flags in pipeline
/// order, plus every distinct accepted plan.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutReport {
    pub stage_scores: [bool; 5],
    pub plans: Vec<PlanPair>,
}

impl LayoutReport {
    pub fn is_solvable(&self) -> bool {
        self.stage_scores.iter().all(|&flag| flag)
    }
}

/// Evaluate whether two cooperating agents can complete a full
/// cook-and-serve cycle on this layout.
///
/// Start squares are resolved through the injected RNG, then the five
/// stages run through the composer in fixed order. Once a stage's branch
/// map comes up empty, every later flag stays clear. Surviving branches are
/// translated to primitive commands and scored.
pub fn evaluate_layout(
    terrain: &Terrain,
    rng: &mut impl DeterministicRng,
    config: &PipelineConfig,
) -> Result<LayoutReport, EvalError> {
    let (terrain, starts) = terrain.clone().resolve_starts(rng)?;
    let graphs = TerrainGraphs::from_terrain(&terrain);

    let root = MlaNode::start(starts);
    let mut branches: BranchMap = BTreeMap::from([(root.key(), vec![root])]);
    let mut stage_scores = [false; 5];

    for (index, stage) in Stage::ALL.into_iter().enumerate() {
        let targets = match stage.target_feature() {
            Some(cell) => terrain.feature_locations(cell),
            None => Vec::new(),
        };
        branches = compose(&targets, &branches, &graphs, &terrain, stage, &config.composer)?;
        stage_scores[index] = !branches.is_empty();
        tracing::debug!(
            stage = stage.name(),
            keys = branches.len(),
            nodes = branch_node_count(&branches),
            feasible = stage_scores[index],
            "stage folded"
        );
    }

    let mut plans = Vec::new();
    for nodes in branches.values() {
        for node in nodes {
            let mut commands0: Vec<Option<Command>> = Vec::new();
            let mut commands1: Vec<Option<Command>> = Vec::new();
            for (stage, path0) in node.paths(0) {
                let path1 = node.paths(1).get(stage).ok_or(EvalError::InvariantViolation(
                    "stage path recorded for only one agent",
                ))?;
                let (stage0, stage1) = paths_to_commands(path0, path1)?;
                commands0.extend(stage0);
                commands1.extend(stage1);
            }
            let entropy = [
                path_entropy(&commands0, config.rho),
                path_entropy(&commands1, config.rho),
            ];
            plans.push(PlanPair {
                commands: [commands0, commands1],
                entropy,
            });
        }
    }

    Ok(LayoutReport {
        stage_scores,
        plans,
    })
}
