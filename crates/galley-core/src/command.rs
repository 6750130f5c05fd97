#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Loc;

/// Primitive command emitted for one agent at one step.
///
/// `Move { dx, dy }` is a unit direction vector (`dx` = column delta, `dy` =
/// row delta). `Interact` covers every counter/feature operation: dropping an
/// item, picking one up, using a dispenser or the serving window. The
/// "waiting, nothing emitted yet" slot is represented as `Option<Command>`
/// being `None`; it is never a reachable value of `Command` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Command {
    Move { dx: i32, dy: i32 },
    Interact,
}

impl Command {
    /// The movement command that steps an agent from `curr` to `next`.
    pub fn step(curr: Loc, next: Loc) -> Self {
        Command::Move {
            dx: next.col - curr.col,
            dy: next.row - curr.row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_east_then_south() {
        let a = Loc::new(1, 1);
        assert_eq!(
            Command::step(a, Loc::new(1, 2)),
            Command::Move { dx: 1, dy: 0 }
        );
        assert_eq!(
            Command::step(a, Loc::new(2, 1)),
            Command::Move { dx: 0, dy: 1 }
        );
    }
}
