use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use galley_core::{EvalError, Loc};
use galley_nav::SearchNode;

use crate::stage::Stage;

/// Composite dedup key for cross-stage branches: ending configuration plus
/// the bound pot. Branches sharing a key are interchangeable for every
/// later stage, which is what bounds the branching factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MlaKey {
    pub loc0: Loc,
    pub loc1: Loc,
    pub pot: Option<Loc>,
    pub primary: Option<u8>,
}

/// Cross-stage search state: where both agents stand, which pot the branch
/// committed to, and the per-stage location paths accumulated so far.
///
/// `primary` is `None` until the first stage completes (nobody has moved
/// yet). The pot binds once; rebinding to a different pot is a logic error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MlaNode {
    primary: Option<u8>,
    loc: [Loc; 2],
    pot: Option<Loc>,
    paths: [BTreeMap<Stage, Vec<Option<Loc>>>; 2],
    handovers: u32,
}

impl MlaNode {
    pub fn start(starts: [Loc; 2]) -> Self {
        Self {
            primary: None,
            loc: starts,
            pot: None,
            paths: [BTreeMap::new(), BTreeMap::new()],
            handovers: 0,
        }
    }

    pub fn primary(&self) -> Option<u8> {
        self.primary
    }

    pub fn locs(&self) -> [Loc; 2] {
        self.loc
    }

    pub fn pot(&self) -> Option<Loc> {
        self.pot
    }

    pub fn handovers(&self) -> u32 {
        self.handovers
    }

    /// Per-stage location paths for one agent, in pipeline order.
    pub fn paths(&self, agent: u8) -> &BTreeMap<Stage, Vec<Option<Loc>>> {
        &self.paths[agent as usize]
    }

    pub fn key(&self) -> MlaKey {
        MlaKey {
            loc0: self.loc[0],
            loc1: self.loc[1],
            pot: self.pot,
            primary: self.primary,
        }
    }

    fn bind_pot(&mut self, pot: Loc) -> Result<(), EvalError> {
        if let Some(bound) = self.pot {
            if bound != pot {
                return Err(EvalError::InvariantViolation(
                    "cannot switch pot halfway through a plan",
                ));
            }
        }
        self.pot = Some(pot);
        Ok(())
    }

    /// Fold one completed stage into a new branch node: adopt the search
    /// node's ending configuration, record its two paths under `stage`,
    /// accumulate handovers, and bind the pot when one is given.
    pub fn update_from_search_node(
        &self,
        stage: Stage,
        search_node: &SearchNode,
        pot: Option<Loc>,
    ) -> Result<MlaNode, EvalError> {
        let mut next = self.clone();
        next.primary = Some(search_node.primary());
        next.loc = [search_node.loc(0), search_node.loc(1)];
        next.paths[0].insert(stage, search_node.path(0).to_vec());
        next.paths[1].insert(stage, search_node.path(1).to_vec());
        next.handovers += search_node.handovers();
        if let Some(pot) = pot {
            next.bind_pot(pot)?;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn searched(starts: [Loc; 2]) -> SearchNode {
        SearchNode::start(starts, 0).successor_move(Loc::new(0, 1))
    }

    #[test]
    fn update_adopts_search_configuration() {
        let start = MlaNode::start([Loc::new(0, 0), Loc::new(0, 2)]);
        assert_eq!(start.primary(), None);

        let folded = start
            .update_from_search_node(
                Stage::OnionPickup,
                &searched([Loc::new(0, 0), Loc::new(0, 2)]),
                None,
            )
            .expect("fold");
        assert_eq!(folded.primary(), Some(0));
        assert_eq!(folded.locs(), [Loc::new(0, 1), Loc::new(0, 2)]);
        assert_eq!(folded.paths(0).len(), 1);
        assert!(folded.paths(0).contains_key(&Stage::OnionPickup));
        // The originating branch is untouched.
        assert!(start.paths(0).is_empty());
    }

    #[test]
    fn rebinding_a_different_pot_is_fatal() {
        let node = MlaNode::start([Loc::new(0, 0), Loc::new(0, 2)]);
        let sn = searched([Loc::new(0, 0), Loc::new(0, 2)]);
        let bound = node
            .update_from_search_node(Stage::OnionDrop, &sn, Some(Loc::new(2, 2)))
            .expect("first bind");
        assert_eq!(bound.pot(), Some(Loc::new(2, 2)));

        // Same pot again is fine.
        assert!(bound
            .update_from_search_node(Stage::SoupDishing, &sn, Some(Loc::new(2, 2)))
            .is_ok());
        // A different pot is a logic error.
        assert!(matches!(
            bound.update_from_search_node(Stage::SoupDishing, &sn, Some(Loc::new(3, 3))),
            Err(EvalError::InvariantViolation(_))
        ));
    }
}
