use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use galley_core::{Cell, EvalError, Loc, Terrain};

/// Pair-vector codec for the edge maps: JSON maps cannot have struct keys,
/// so `{loc: [loc..]}` travels as `[(loc, [loc..])..]`.
#[cfg(feature = "serde")]
mod edge_map {
    use std::collections::BTreeMap;

    use galley_core::Loc;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(
        edges: &BTreeMap<Loc, Vec<Loc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        edges.iter().collect::<Vec<_>>().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<Loc, Vec<Loc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(Loc, Vec<Loc>)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

/// Walk adjacency over empty squares: each empty cell maps to its
/// 4-adjacent empty cells, in N, S, W, E order. Every empty cell is present,
/// possibly with no edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WalkGraph {
    #[cfg_attr(feature = "serde", serde(with = "edge_map"))]
    edges: BTreeMap<Loc, Vec<Loc>>,
}

impl WalkGraph {
    /// Walk-only builder; cheaper than [`TerrainGraphs::from_terrain`] when
    /// only single-agent distance estimates are needed.
    pub fn from_terrain(terrain: &Terrain) -> Self {
        let mut edges = BTreeMap::new();
        for row in 0..terrain.rows() {
            for col in 0..terrain.cols() {
                let loc = Loc::new(row, col);
                if !terrain.is(loc, Cell::Empty) {
                    continue;
                }
                let out: Vec<Loc> = loc
                    .neighbors()
                    .into_iter()
                    .filter(|&n| terrain.is(n, Cell::Empty))
                    .collect();
                edges.insert(loc, out);
            }
        }
        Self { edges }
    }

    pub fn contains(&self, loc: Loc) -> bool {
        self.edges.contains_key(&loc)
    }

    pub fn neighbors(&self, loc: Loc) -> &[Loc] {
        self.edges.get(&loc).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Handover adjacency: an empty cell maps to every empty cell separated from
/// it by exactly one counter, either straight through (two-hop) or around
/// the corner (diagonal across the counter). Cells with no handover edges
/// are omitted entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandoverGraph {
    #[cfg_attr(feature = "serde", serde(with = "edge_map"))]
    edges: BTreeMap<Loc, Vec<Loc>>,
}

impl HandoverGraph {
    /// Graph with no edges; used for stages where nothing can be handed
    /// over (an empty-handed agent just walks).
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, loc: Loc) -> bool {
        self.edges.contains_key(&loc)
    }

    pub fn neighbors(&self, loc: Loc) -> &[Loc] {
        self.edges.get(&loc).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Walk and handover graphs for one terrain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerrainGraphs {
    pub walk: WalkGraph,
    pub handover: HandoverGraph,
}

impl TerrainGraphs {
    pub fn from_terrain(terrain: &Terrain) -> Self {
        let walk = WalkGraph::from_terrain(terrain);

        let mut handover = BTreeMap::new();
        for row in 0..terrain.rows() {
            for col in 0..terrain.cols() {
                let loc = Loc::new(row, col);
                if !terrain.is(loc, Cell::Empty) {
                    continue;
                }
                let mut out = Vec::new();
                // Counter scan in the same N, S, W, E order as walking.
                for counter in loc.neighbors() {
                    if !terrain.is(counter, Cell::Counter) {
                        continue;
                    }
                    let dr = counter.row - loc.row;
                    let dc = counter.col - loc.col;
                    // Straight two-hop past the counter.
                    let straight = Loc::new(loc.row + 2 * dr, loc.col + 2 * dc);
                    if terrain.is(straight, Cell::Empty) {
                        out.push(straight);
                    }
                    // Around the corner: the two empty cells flanking the
                    // counter on the perpendicular axis.
                    for side in [-1, 1] {
                        let corner = if dr != 0 {
                            Loc::new(counter.row, counter.col + side)
                        } else {
                            Loc::new(counter.row + side, counter.col)
                        };
                        if terrain.is(corner, Cell::Empty) {
                            out.push(corner);
                        }
                    }
                }
                if !out.is_empty() {
                    handover.insert(loc, out);
                }
            }
        }

        Self {
            walk,
            handover: HandoverGraph { edges: handover },
        }
    }
}

/// The counter cell an item crosses when handed over between `a` and `b`.
///
/// Aligned endpoints give the arithmetic midpoint. Diagonal endpoints must
/// have exactly one counter on the two candidate corner cells; zero or two
/// candidates mean the layout is malformed and the error propagates.
pub fn counter_between(a: Loc, b: Loc, terrain: &Terrain) -> Result<Loc, EvalError> {
    if a.is_aligned_with(b) {
        return Ok(a.midpoint_aligned(b));
    }
    let first = Loc::new(a.row, b.col);
    let second = Loc::new(b.row, a.col);
    match (
        terrain.is(first, Cell::Counter),
        terrain.is(second, Cell::Counter),
    ) {
        (true, false) => Ok(first),
        (false, true) => Ok(second),
        _ => Err(EvalError::MalformedTerrain { a, b }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_graph_connects_empty_neighbors() {
        let terrain = Terrain::parse(&["  X", "   "]).expect("valid layout");
        let walk = WalkGraph::from_terrain(&terrain);

        assert_eq!(walk.len(), 5);
        // N, S, W, E order.
        assert_eq!(
            walk.neighbors(Loc::new(1, 1)),
            &[Loc::new(0, 1), Loc::new(1, 0), Loc::new(1, 2)]
        );
        assert!(walk.neighbors(Loc::new(0, 2)).is_empty());
        assert!(!walk.contains(Loc::new(0, 2)));
    }

    #[test]
    fn handover_straight_edges_across_counter_column() {
        // Two corridors split by a counter column.
        let terrain = Terrain::parse(&[" X ", " X ", " X "]).expect("valid layout");
        let graphs = TerrainGraphs::from_terrain(&terrain);

        // The flanking cells of each counter are counters themselves, so
        // only the straight two-hop survives.
        assert_eq!(graphs.handover.neighbors(Loc::new(1, 0)), &[Loc::new(1, 2)]);
        assert_eq!(graphs.handover.neighbors(Loc::new(0, 0)), &[Loc::new(0, 2)]);
    }

    #[test]
    fn handover_corner_edges_around_lone_counter() {
        let terrain = Terrain::parse(&["  ", "X ", "  "]).expect("valid layout");
        let graphs = TerrainGraphs::from_terrain(&terrain);

        // Straight pass first, then the corner beside the counter.
        assert_eq!(
            graphs.handover.neighbors(Loc::new(0, 0)),
            &[Loc::new(2, 0), Loc::new(1, 1)]
        );
        // From beside the counter, both corners but no straight pass.
        assert_eq!(
            graphs.handover.neighbors(Loc::new(1, 1)),
            &[Loc::new(0, 0), Loc::new(2, 0)]
        );
    }

    #[test]
    fn cells_without_handover_are_omitted() {
        let terrain = Terrain::parse(&["   ", "   "]).expect("valid layout");
        let graphs = TerrainGraphs::from_terrain(&terrain);
        assert!(graphs.handover.is_empty());
    }

    #[test]
    fn counter_between_aligned() {
        let terrain = Terrain::parse(&[" X "]).expect("valid layout");
        let mid = counter_between(Loc::new(0, 0), Loc::new(0, 2), &terrain)
            .expect("aligned midpoint");
        assert_eq!(mid, Loc::new(0, 1));
    }

    #[test]
    fn counter_between_diagonal_unique() {
        let terrain = Terrain::parse(&[" X", "  "]).expect("valid layout");
        let mid = counter_between(Loc::new(1, 1), Loc::new(0, 0), &terrain)
            .expect("unique corner counter");
        assert_eq!(mid, Loc::new(0, 1));
    }

    #[test]
    fn counter_between_diagonal_ambiguous_fails() {
        // Both corner candidates are counters.
        let both = Terrain::parse(&[" X", "X "]).expect("valid layout");
        assert!(matches!(
            counter_between(Loc::new(0, 0), Loc::new(1, 1), &both),
            Err(EvalError::MalformedTerrain { .. })
        ));
        // Neither candidate is a counter.
        let neither = Terrain::parse(&["  ", "  "]).expect("valid layout");
        assert!(matches!(
            counter_between(Loc::new(0, 0), Loc::new(1, 1), &neither),
            Err(EvalError::MalformedTerrain { .. })
        ));
    }
}
