use std::collections::{BTreeMap, BTreeSet};

use galley_core::{Cell, EvalError, Loc, Terrain};

use crate::graph::{HandoverGraph, WalkGraph};
use crate::heap::IndexedMinHeap;
use crate::node::{GoalKey, SearchNode};

/// All minimal-and-later goal-reaching nodes, grouped by ending
/// configuration. Empty means the goal is unreachable from this start,
/// which is the normal "infeasible" answer, not an error.
pub type GoalMap = BTreeMap<GoalKey, Vec<SearchNode>>;

/// Single-agent shortest walk distance from `start` to `goal`.
///
/// The goal cell is usually a feature square that is not a walk-graph node,
/// so it gets synthetic incoming edges from its empty 4-neighbors. Returns
/// `None` when no walk-only path exists.
pub fn walk_distance(
    walk: &WalkGraph,
    terrain: &Terrain,
    start: Loc,
    goal: Loc,
) -> Option<u32> {
    let mut frontier: IndexedMinHeap<Loc, (Loc, u32)> = IndexedMinHeap::new();
    let mut closed: BTreeSet<Loc> = BTreeSet::new();
    frontier.push(start, (start, 0), 0);

    while let Some((loc, dist)) = frontier.pop() {
        if loc == goal {
            return Some(dist);
        }
        if !closed.insert(loc) {
            continue;
        }
        for &next in walk.neighbors(loc) {
            if !closed.contains(&next) {
                frontier.insert_or_decrease(next, (next, dist + 1), dist + 1);
            }
        }
        // Synthetic incoming edge: any empty neighbor of the goal may step
        // onto it even though it is not a graph node.
        if loc.manhattan(goal) == 1 && terrain.is(loc, Cell::Empty) && !closed.contains(&goal) {
            frontier.insert_or_decrease(goal, (goal, dist + 1), dist + 1);
        }
    }
    None
}

/// Dual-agent uniform-cost search to a single goal location.
///
/// Expansion emits walk successors for the primary agent and, where the
/// handover graph allows it, control-flipping handover successors, gated on
/// the secondary agent actually being able to walk to the far side.
///
/// The closed set is bucketed by handover count: a square already closed
/// with no more handovers than the current node is never expanded again.
/// This assumes extra handovers never reach the same square cheaper in walk
/// cost; it trades completeness for tractability and is part of the engine's
/// observable behavior, so it must not be "improved".
pub fn uniform_cost_search(
    walk: &WalkGraph,
    handover: &HandoverGraph,
    terrain: &Terrain,
    starts: [Loc; 2],
    start_agent: u8,
    goal: Loc,
) -> Result<GoalMap, EvalError> {
    for &start in &starts {
        if !terrain.is(start, Cell::Empty) {
            return Err(EvalError::StartNotWalkable(start));
        }
    }

    let mut res = GoalMap::new();
    let mut closed: BTreeMap<u32, BTreeSet<Loc>> = BTreeMap::new();
    let truly_closed = |closed: &BTreeMap<u32, BTreeSet<Loc>>, loc: Loc, handovers: u32| {
        closed
            .range(..=handovers)
            .any(|(_, bucket)| bucket.contains(&loc))
    };

    let mut frontier: IndexedMinHeap<u64, SearchNode> = IndexedMinHeap::new();
    let mut next_id: u64 = 0;
    let mut push = |frontier: &mut IndexedMinHeap<u64, SearchNode>,
                    next_id: &mut u64,
                    node: SearchNode| {
        let priority = node.cost();
        frontier.push(*next_id, node, priority);
        *next_id += 1;
    };

    push(&mut frontier, &mut next_id, SearchNode::start(starts, start_agent));

    while let Some(node) = frontier.pop() {
        let loc = node.primary_loc();

        if loc == goal {
            let mut node = node;
            node.correct_primary_loc_at_goal();
            res.entry(node.goal_key()).or_default().push(node);
            continue;
        }

        if truly_closed(&closed, loc, node.handovers()) {
            continue;
        }
        closed.entry(node.handovers()).or_default().insert(loc);

        // Walk successors, then the synthetic step onto the goal cell.
        for &next in walk.neighbors(loc) {
            push(&mut frontier, &mut next_id, node.successor_move(next));
        }
        if loc.manhattan(goal) == 1 && terrain.is(loc, Cell::Empty) {
            push(&mut frontier, &mut next_id, node.successor_move(goal));
        }

        // Handover successors: only where the secondary agent can actually
        // make the walk to the far side.
        for &far in handover.neighbors(loc) {
            if walk_distance(walk, terrain, node.secondary_loc(), far).is_some() {
                let successor = node.successor_handover(far, terrain)?;
                push(&mut frontier, &mut next_id, successor);
            }
        }
    }

    Ok(res)
}
