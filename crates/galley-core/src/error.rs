use thiserror::Error;

use crate::Loc;

/// Errors surfaced by the evaluation core.
///
/// An infeasible stage is *not* an error: searches and compositions return
/// empty maps for "this layout cannot do that", and callers read it off the
/// stage-score flags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A diagonal handover midpoint could not be uniquely resolved: either
    /// none or both of the two diagonal cells are counters. Structural
    /// layout defect, always propagated.
    #[error("malformed terrain: no unique counter between {a} and {b}")]
    MalformedTerrain { a: Loc, b: Loc },

    /// A core invariant broke (diverging path lengths, pot rebinding, a
    /// stage that needs a primary agent before one exists). Logic bug, never
    /// recovered locally.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// An agent's starting square is not walkable. Checked before any
    /// search begins.
    #[error("agent start {0} is not an empty square")]
    StartNotWalkable(Loc),

    /// No empty square is left to place an agent on.
    #[error("terrain has no free starting square")]
    NoStartAvailable,

    #[error("unknown terrain symbol {symbol:?} at {loc}")]
    UnknownSymbol { symbol: char, loc: Loc },

    #[error("terrain rows have inconsistent widths")]
    RaggedRows,

    #[error("cell buffer does not match the {rows}x{cols} dimensions")]
    DimensionMismatch { rows: usize, cols: usize },

    #[error("terrain is empty")]
    EmptyTerrain,
}
