#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use galley_core::Cell;

/// One medium-level task of the cook-and-serve cycle, in pipeline order.
///
/// `Ord` follows that order, so stage-keyed maps iterate onion pickup
/// through serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stage {
    OnionPickup,
    OnionDrop,
    DishPickup,
    SoupDishing,
    Serve,
}

/// How the composer treats a stage.
///
/// A closed set of variants instead of loose booleans, so every
/// branching/binding rule is matched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    /// Fetch something from a dispenser. Either agent may start (nothing is
    /// carried yet), and nothing can be handed over on the way.
    Pickup { both_eligible: bool },
    /// Drop the carried onion at a pot; binds the branch's pot.
    DropAtPot,
    /// Plate the soup: the target is forced to the branch's bound pot.
    Dishing,
    /// Deliver to a serving window.
    Serve,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::OnionPickup,
        Stage::OnionDrop,
        Stage::DishPickup,
        Stage::SoupDishing,
        Stage::Serve,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::OnionPickup => "onion_pickup",
            Stage::OnionDrop => "onion_drop",
            Stage::DishPickup => "dish_pickup",
            Stage::SoupDishing => "dishing_soup",
            Stage::Serve => "serving",
        }
    }

    pub fn kind(self) -> StageKind {
        match self {
            Stage::OnionPickup | Stage::DishPickup => StageKind::Pickup {
                both_eligible: true,
            },
            Stage::OnionDrop => StageKind::DropAtPot,
            Stage::SoupDishing => StageKind::Dishing,
            Stage::Serve => StageKind::Serve,
        }
    }

    /// Terrain feature this stage walks to. `None` for dishing, whose
    /// target is the branch's bound pot rather than a terrain scan.
    pub fn target_feature(self) -> Option<Cell> {
        match self {
            Stage::OnionPickup => Some(Cell::OnionDispenser),
            Stage::OnionDrop => Some(Cell::Pot),
            Stage::DishPickup => Some(Cell::DishDispenser),
            Stage::SoupDishing => None,
            Stage::Serve => Some(Cell::Serving),
        }
    }

    /// Whether the carried item can be handed over across counters during
    /// this stage. Pickup stages walk empty-handed.
    pub fn allows_handover(self) -> bool {
        !matches!(self.kind(), StageKind::Pickup { .. })
    }
}
