use std::collections::BTreeMap;

use galley_core::{EvalError, Loc, Terrain};
use galley_nav::{uniform_cost_search, HandoverGraph, TerrainGraphs};

use crate::node::{MlaKey, MlaNode};
use crate::stage::{Stage, StageKind};

/// Branches alive after a stage, grouped by composite key.
pub type BranchMap = BTreeMap<MlaKey, Vec<MlaNode>>;

/// Composer limits.
#[derive(Debug, Clone, Copy)]
pub struct ComposerConfig {
    /// Safety valve against combinatorial branch growth: once a stage has
    /// folded this many nodes, the rest of its fold is skipped. Feasibility
    /// flags are unaffected for any stage that folded at least one node.
    pub max_branch_nodes: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_branch_nodes: 4096,
        }
    }
}

/// Total branch nodes in a map (as opposed to the number of keys).
pub fn branch_node_count(map: &BranchMap) -> usize {
    map.values().map(Vec::len).sum()
}

/// Run one stage from every surviving branch.
///
/// For each branch node, candidate target and eligible starting agent, one
/// uniform-cost episode runs from the branch's agent configuration; every
/// goal-reaching search node becomes a new branch. Branches are only ever
/// deduplicated by key, never pruned by cost, so all qualitatively distinct
/// completions survive.
pub fn compose(
    targets: &[Loc],
    prev: &BranchMap,
    graphs: &TerrainGraphs,
    terrain: &Terrain,
    stage: Stage,
    config: &ComposerConfig,
) -> Result<BranchMap, EvalError> {
    let kind = stage.kind();
    let no_handover = HandoverGraph::none();
    let handover = if stage.allows_handover() {
        &graphs.handover
    } else {
        &no_handover
    };

    let mut out = BranchMap::new();
    let mut folded = 0usize;

    for nodes in prev.values() {
        for node in nodes {
            let node_targets = match kind {
                StageKind::Dishing => {
                    vec![node.pot().ok_or(EvalError::InvariantViolation(
                        "dishing before a pot is bound",
                    ))?]
                }
                _ => targets.to_vec(),
            };
            let eligible: Vec<u8> = match kind {
                StageKind::Pickup {
                    both_eligible: true,
                } => vec![0, 1],
                _ => vec![node.primary().ok_or(EvalError::InvariantViolation(
                    "stage requires a primary agent",
                ))?],
            };

            for &target in &node_targets {
                for &agent in &eligible {
                    let goals = uniform_cost_search(
                        &graphs.walk,
                        handover,
                        terrain,
                        node.locs(),
                        agent,
                        target,
                    )?;
                    for bundle in goals.values() {
                        for search_node in bundle {
                            if folded >= config.max_branch_nodes {
                                tracing::debug!(
                                    stage = stage.name(),
                                    cap = config.max_branch_nodes,
                                    "branch cap reached, truncating stage fold"
                                );
                                return Ok(out);
                            }
                            let pot = match kind {
                                StageKind::DropAtPot => Some(target),
                                _ => None,
                            };
                            let next = node.update_from_search_node(stage, search_node, pot)?;
                            out.entry(next.key()).or_default().push(next);
                            folded += 1;
                        }
                    }
                }
            }
        }
    }

    Ok(out)
}
