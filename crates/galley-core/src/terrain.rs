#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DeterministicRng, EvalError, Loc};

/// One square of the kitchen grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    Empty,
    Counter,
    OnionDispenser,
    Pot,
    DishDispenser,
    Serving,
    /// Marked starting square for agent 0. Resolved to a concrete
    /// coordinate and cleared to `Empty` before any search runs.
    AgentStart1,
    /// Marked starting square for agent 1.
    AgentStart2,
}

impl Cell {
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            ' ' => Some(Cell::Empty),
            'X' => Some(Cell::Counter),
            'O' => Some(Cell::OnionDispenser),
            'P' => Some(Cell::Pot),
            'D' => Some(Cell::DishDispenser),
            'S' => Some(Cell::Serving),
            '1' => Some(Cell::AgentStart1),
            '2' => Some(Cell::AgentStart2),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Counter => 'X',
            Cell::OnionDispenser => 'O',
            Cell::Pot => 'P',
            Cell::DishDispenser => 'D',
            Cell::Serving => 'S',
            Cell::AgentStart1 => '1',
            Cell::AgentStart2 => '2',
        }
    }
}

/// Immutable rectangular grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Terrain {
    cells: Vec<Cell>,
    rows: i32,
    cols: i32,
}

impl Terrain {
    pub fn new(cells: Vec<Cell>, rows: usize, cols: usize) -> Result<Self, EvalError> {
        if rows == 0 || cols == 0 {
            return Err(EvalError::EmptyTerrain);
        }
        if cells.len() != rows * cols {
            return Err(EvalError::DimensionMismatch { rows, cols });
        }
        Ok(Self {
            cells,
            rows: rows as i32,
            cols: cols as i32,
        })
    }

    /// Parse a grid from symbol rows, e.g. `["XXOXX", "X1 2X", "XXPXX"]`.
    pub fn parse(lines: &[&str]) -> Result<Self, EvalError> {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(EvalError::EmptyTerrain);
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(EvalError::RaggedRows);
            }
            for (col, symbol) in line.chars().enumerate() {
                let loc = Loc::new(row as i32, col as i32);
                let cell = Cell::from_symbol(symbol)
                    .ok_or(EvalError::UnknownSymbol { symbol, loc })?;
                cells.push(cell);
            }
        }
        Terrain::new(cells, rows, cols)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn in_bounds(&self, loc: Loc) -> bool {
        loc.row >= 0 && loc.col >= 0 && loc.row < self.rows && loc.col < self.cols
    }

    fn idx(&self, loc: Loc) -> Option<usize> {
        if !self.in_bounds(loc) {
            return None;
        }
        Some((loc.row * self.cols + loc.col) as usize)
    }

    pub fn get(&self, loc: Loc) -> Option<Cell> {
        self.idx(loc).map(|i| self.cells[i])
    }

    /// True when `loc` is in bounds and holds exactly `cell`.
    pub fn is(&self, loc: Loc, cell: Cell) -> bool {
        self.get(loc) == Some(cell)
    }

    /// All locations holding `cell`, in row-major scan order.
    pub fn feature_locations(&self, cell: Cell) -> Vec<Loc> {
        let mut out = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let loc = Loc::new(row, col);
                if self.is(loc, cell) {
                    out.push(loc);
                }
            }
        }
        out
    }

    fn set(&mut self, loc: Loc, cell: Cell) {
        if let Some(i) = self.idx(loc) {
            self.cells[i] = cell;
        }
    }

    /// Resolve agent start markers to concrete coordinates.
    ///
    /// Each agent gets one of its marked squares, chosen by the injected
    /// RNG; all markers are then cleared to `Empty`. An agent with no marker
    /// lands on a random empty square, distinct from the other agent's.
    /// Returns the cleaned terrain plus the two starting locations.
    pub fn resolve_starts(
        mut self,
        rng: &mut impl DeterministicRng,
    ) -> Result<(Terrain, [Loc; 2]), EvalError> {
        let mut picked = [None, None];
        for (agent, marker) in [(0, Cell::AgentStart1), (1, Cell::AgentStart2)] {
            let marked = self.feature_locations(marker);
            if !marked.is_empty() {
                picked[agent] = Some(marked[rng.pick_index(marked.len())]);
                for loc in marked {
                    self.set(loc, Cell::Empty);
                }
            }
        }

        let empty = self.feature_locations(Cell::Empty);
        let start0 = match picked[0] {
            Some(loc) => loc,
            None => {
                if empty.is_empty() {
                    return Err(EvalError::NoStartAvailable);
                }
                empty[rng.pick_index(empty.len())]
            }
        };
        let start1 = match picked[1] {
            Some(loc) => loc,
            None => {
                let candidates: Vec<Loc> =
                    empty.iter().copied().filter(|&l| l != start0).collect();
                if candidates.is_empty() {
                    return Err(EvalError::NoStartAvailable);
                }
                candidates[rng.pick_index(candidates.len())]
            }
        };

        Ok((self, [start0, start1]))
    }
}
