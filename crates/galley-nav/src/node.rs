#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use galley_core::{EvalError, Loc, Terrain};

use crate::graph::counter_between;

/// Ending configuration of a goal-reaching search node.
///
/// Deliberately excludes the path histories: distinct paths that end in the
/// same configuration share a key, and downstream stages branch over every
/// node collected under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GoalKey {
    pub primary: u8,
    pub primary_loc: Loc,
    pub secondary_loc: Loc,
}

/// Dual-agent search state for one uniform-cost episode.
///
/// Exactly one agent (the primary) moves at a time; control flips only on a
/// handover. Both path histories grow in lockstep: the idle agent's history
/// records `None` for every step it sits out, so
/// `path(0).len() == path(1).len()` holds at all times.
///
/// Nodes are immutable value snapshots; successor constructors clone.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchNode {
    primary: u8,
    loc: [Loc; 2],
    path: [Vec<Option<Loc>>; 2],
    handovers: u32,
}

impl SearchNode {
    pub fn start(starts: [Loc; 2], start_agent: u8) -> Self {
        let mut path: [Vec<Option<Loc>>; 2] = [vec![None], vec![None]];
        path[start_agent as usize] = vec![Some(starts[start_agent as usize])];
        Self {
            primary: start_agent,
            loc: starts,
            path,
            handovers: 0,
        }
    }

    pub fn primary(&self) -> u8 {
        self.primary
    }

    pub fn loc(&self, agent: u8) -> Loc {
        self.loc[agent as usize]
    }

    pub fn primary_loc(&self) -> Loc {
        self.loc[self.primary as usize]
    }

    pub fn secondary_loc(&self) -> Loc {
        self.loc[1 - self.primary as usize]
    }

    pub fn path(&self, agent: u8) -> &[Option<Loc>] {
        &self.path[agent as usize]
    }

    pub fn handovers(&self) -> u32 {
        self.handovers
    }

    /// Search cost: length of the primary agent's history. A walk edge adds
    /// one entry, a handover adds two.
    pub fn cost(&self) -> u32 {
        self.path[self.primary as usize].len() as u32
    }

    /// Append one step to both histories.
    ///
    /// An omitted `new_secondary` leaves the idle agent where it is and
    /// records `None` in its history; `secondary_path_undefined` forces the
    /// `None` record even when a location is given (used once per handover,
    /// to mark that the displaced agent has not begun its own segment).
    fn advance(&mut self, new_primary: Loc, new_secondary: Option<Loc>, secondary_path_undefined: bool) {
        let p = self.primary as usize;
        let s = 1 - p;
        self.loc[p] = new_primary;
        if let Some(loc) = new_secondary {
            self.loc[s] = loc;
        }
        self.path[p].push(Some(new_primary));
        self.path[s].push(if secondary_path_undefined {
            None
        } else {
            new_secondary
        });
        debug_assert_eq!(self.path[0].len(), self.path[1].len());
    }

    /// Pure movement: only the primary agent steps.
    pub fn successor_move(&self, new_loc: Loc) -> SearchNode {
        let mut next = self.clone();
        next.advance(new_loc, None, false);
        next
    }

    /// Handover across the counter between the primary's square and
    /// `new_loc`: the item goes onto the counter, control flips, and the new
    /// primary continues from the far side. Two micro-steps, so the cost
    /// charge is 2, and `handovers` grows by 2 (one drop, one pickup).
    pub fn successor_handover(
        &self,
        new_loc: Loc,
        terrain: &Terrain,
    ) -> Result<SearchNode, EvalError> {
        let far_loc = self.primary_loc();
        let counter = counter_between(new_loc, far_loc, terrain)?;

        let mut next = self.clone();
        // Drop: the item (and nominally both agents) meet at the counter.
        next.advance(counter, Some(counter), false);
        // Control flips; the former primary stays on its own square.
        next.primary = 1 - self.primary;
        next.advance(new_loc, Some(far_loc), true);
        next.handovers += 2;
        Ok(next)
    }

    /// The last path entry at a goal is the feature cell itself, not a
    /// standable square; pull the physical location back one step before
    /// keying the result.
    pub fn correct_primary_loc_at_goal(&mut self) {
        let p = self.primary as usize;
        let n = self.path[p].len();
        if n >= 2 {
            if let Some(loc) = self.path[p][n - 2] {
                self.loc[p] = loc;
            }
        }
    }

    pub fn goal_key(&self) -> GoalKey {
        GoalKey {
            primary: self.primary,
            primary_loc: self.primary_loc(),
            secondary_loc: self.secondary_loc(),
        }
    }
}
