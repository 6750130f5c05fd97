#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid coordinate, row-major: `row` indexes into the terrain's outer axis,
/// `col` into the inner one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Loc {
    pub row: i32,
    pub col: i32,
}

impl Loc {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// 4-neighborhood in fixed order for determinism: N, S, W, E.
    pub fn neighbors(self) -> [Loc; 4] {
        [
            Loc::new(self.row - 1, self.col),
            Loc::new(self.row + 1, self.col),
            Loc::new(self.row, self.col - 1),
            Loc::new(self.row, self.col + 1),
        ]
    }

    pub fn manhattan(self, other: Loc) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// True when the two locations share a row or a column.
    pub fn is_aligned_with(self, other: Loc) -> bool {
        self.row == other.row || self.col == other.col
    }

    /// Arithmetic midpoint. Only meaningful for aligned locations an even
    /// distance apart (the straight two-hop handover).
    pub fn midpoint_aligned(self, other: Loc) -> Loc {
        Loc::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }
}

impl core::fmt::Display for Loc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
