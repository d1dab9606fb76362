use std::collections::{BTreeSet, HashMap};
use std::fmt;

use flatgrid_core::Grid;

/// Default wall marker for character grids.
pub const DEFAULT_WALL: char = '#';

// ---------------------------------------------------------------------------
// Search state
// ---------------------------------------------------------------------------

/// Per-cell search record: accumulated cost and the path that produced it.
///
/// `cost == None` is the unvisited state; an empty `path` means the same
/// thing. Both are populated together by the first relaxation that reaches
/// the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeState {
    pub cost: Option<u32>,
    pub path: Vec<usize>,
}

impl NodeState {
    fn unvisited() -> Self {
        Self {
            cost: None,
            path: Vec::new(),
        }
    }

    /// Whether any wave has reached this cell.
    #[inline]
    pub fn visited(&self) -> bool {
        self.cost.is_some()
    }
}

/// The full node map produced by a search: every non-wall cell's cost and
/// path as known when the target was reached.
#[derive(Debug, Clone)]
pub struct SearchMap {
    nodes: HashMap<usize, NodeState>,
}

impl SearchMap {
    /// Whether `index` is part of the searched space (in bounds, mapped,
    /// not a wall).
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.nodes.contains_key(&index)
    }

    /// The node record for `index`, if it is part of the searched space.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&NodeState> {
        self.nodes.get(&index)
    }

    /// Cost of the best known path to `index`, or `None` if unvisited or
    /// outside the searched space.
    #[inline]
    pub fn cost(&self, index: usize) -> Option<u32> {
        self.nodes.get(&index).and_then(|n| n.cost)
    }

    /// Best known path to `index`, start and `index` inclusive. Empty if
    /// unvisited or outside the searched space.
    #[inline]
    pub fn path(&self, index: usize) -> &[usize] {
        self.nodes.get(&index).map_or(&[], |n| n.path.as_slice())
    }

    /// Number of cells in the searched space.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the searched space is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A single shortest path, as returned by [`PathFinder::shortest_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Total unit-step cost.
    pub cost: u32,
    /// Cell indices from start to finish, both inclusive.
    pub cells: Vec<usize>,
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Unit-cost shortest-path search over a borrowed grid.
///
/// Cells whose value equals the wall marker are excluded from the node map
/// entirely and can never be traversed. The search expands the frontier one
/// wave at a time; each wave relaxes the unvisited 4-connected neighbors of
/// the previous wave's cells.
pub struct PathFinder<'g, T> {
    grid: &'g Grid<T>,
    wall: T,
}

impl<'g> PathFinder<'g, char> {
    /// A finder over a character grid using [`DEFAULT_WALL`] as the marker.
    pub fn walls(grid: &'g Grid<char>) -> Self {
        Self::new(grid, DEFAULT_WALL)
    }
}

impl<'g, T: PartialEq> PathFinder<'g, T> {
    /// Create a finder with the given wall marker.
    pub fn new(grid: &'g Grid<T>, wall: T) -> Self {
        Self { grid, wall }
    }

    fn check_endpoint(&self, index: usize) -> Result<(), PathError> {
        match self.grid.at(index) {
            None => Err(PathError::OutOfBounds(index)),
            Some(v) if *v == self.wall => Err(PathError::Wall(index)),
            Some(_) => Ok(()),
        }
    }

    /// Run the wavefront search from `start` until `finish` is reached.
    ///
    /// Returns the full node map; query it with [`SearchMap::cost`] and
    /// [`SearchMap::path`]. Fails with [`PathError::Unreachable`] when the
    /// frontier empties before `finish` is visited.
    pub fn search(&self, start: usize, finish: usize) -> Result<SearchMap, PathError> {
        self.check_endpoint(start)?;
        self.check_endpoint(finish)?;

        let mut nodes: HashMap<usize, NodeState> = self
            .grid
            .iter()
            .filter(|(_, v)| **v != self.wall)
            .map(|(i, _)| (i, NodeState::unvisited()))
            .collect();
        if let Some(n) = nodes.get_mut(&start) {
            n.cost = Some(0);
            n.path.push(start);
        }

        log::debug!(
            "search {start} -> {finish} over {} open cells",
            nodes.len()
        );

        let mut frontier: BTreeSet<usize> = BTreeSet::from([start]);
        let mut wave = 0u32;
        loop {
            if nodes.get(&finish).is_some_and(NodeState::visited) {
                log::debug!("reached {finish} after {wave} waves");
                return Ok(SearchMap { nodes });
            }
            if frontier.is_empty() {
                log::debug!("frontier exhausted after {wave} waves, {finish} unreached");
                return Err(PathError::Unreachable { start, finish });
            }

            let mut next: BTreeSet<usize> = BTreeSet::new();
            for &ci in &frontier {
                let Some(cur) = nodes.get(&ci) else { continue };
                let Some(cur_cost) = cur.cost else { continue };
                let cur_path = cur.path.clone();
                for ni in self.grid.neighbors4(ci) {
                    let Some(n) = nodes.get_mut(&ni) else { continue };
                    if n.visited() {
                        continue;
                    }
                    // First strict improvement wins; with unit edges no
                    // later wave can beat it.
                    n.cost = Some(cur_cost + 1);
                    n.path = cur_path.clone();
                    n.path.push(ni);
                    next.insert(ni);
                }
            }
            wave += 1;
            log::trace!("wave {wave}: {} cells touched", next.len());
            frontier = next;
        }
    }

    /// The single shortest path from `start` to `finish`.
    pub fn shortest_path(&self, start: usize, finish: usize) -> Result<Route, PathError> {
        let map = self.search(start, finish)?;
        match map.get(finish) {
            Some(NodeState {
                cost: Some(cost),
                path,
            }) => Ok(Route {
                cost: *cost,
                cells: path.clone(),
            }),
            _ => Err(PathError::Unreachable { start, finish }),
        }
    }
}

// ---------------------------------------------------------------------------
// PathError
// ---------------------------------------------------------------------------

/// Errors from a path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// An endpoint is off the grid or unmapped.
    OutOfBounds(usize),
    /// An endpoint sits on a wall cell.
    Wall(usize),
    /// The frontier emptied before the target was visited.
    Unreachable { start: usize, finish: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(i) => write!(f, "path: cell {i} is off the grid"),
            Self::Wall(i) => write!(f, "path: cell {i} is a wall"),
            Self::Unreachable { start, finish } => {
                write!(f, "path: no route from {start} to {finish}")
            }
        }
    }
}

impl std::error::Error for PathError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;

    const OPEN_3X3: &str = "\
...
...
...";

    #[test]
    fn open_grid_corner_to_corner() {
        let g = Grid::from_text(OPEN_3X3).unwrap();
        let route = PathFinder::walls(&g).shortest_path(0, 8).unwrap();
        assert_eq!(route.cost, 4);
        assert_eq!(route.cells.len(), 5);
        assert_eq!(route.cells[0], 0);
        assert_eq!(route.cells[4], 8);
        // Every hop is a 4-neighbor step.
        for pair in route.cells.windows(2) {
            assert!(g.neighbors4(pair[0]).contains(&pair[1]));
        }
    }

    #[test]
    fn walls_force_a_detour() {
        let g = Grid::from_text("...\n.#.\n...").unwrap();
        let route = PathFinder::walls(&g).shortest_path(0, 8).unwrap();
        assert_eq!(route.cost, 4);
        assert!(!route.cells.contains(&4));
    }

    #[test]
    fn isolated_corner_is_unreachable() {
        // Walls at 1, 3, 4 cut off index 0 completely.
        let g = Grid::from_text(".#.\n##.\n...").unwrap();
        let err = PathFinder::walls(&g).shortest_path(0, 8).unwrap_err();
        assert_eq!(
            err,
            PathError::Unreachable {
                start: 0,
                finish: 8
            }
        );
    }

    #[test]
    fn start_equals_finish() {
        let g = Grid::from_text(OPEN_3X3).unwrap();
        let route = PathFinder::walls(&g).shortest_path(4, 4).unwrap();
        assert_eq!(route.cost, 0);
        assert_eq!(route.cells, vec![4]);
    }

    #[test]
    fn endpoint_on_wall_is_an_error() {
        let g = Grid::from_text(".#.\n...\n...").unwrap();
        let finder = PathFinder::walls(&g);
        assert_eq!(finder.search(1, 8).unwrap_err(), PathError::Wall(1));
        assert_eq!(finder.search(0, 1).unwrap_err(), PathError::Wall(1));
    }

    #[test]
    fn endpoint_off_grid_is_an_error() {
        let g = Grid::from_text(OPEN_3X3).unwrap();
        let finder = PathFinder::walls(&g);
        assert_eq!(finder.search(0, 9).unwrap_err(), PathError::OutOfBounds(9));
        assert_eq!(finder.search(42, 0).unwrap_err(), PathError::OutOfBounds(42));
    }

    #[test]
    fn wall_free_cost_is_manhattan_distance() {
        let g = Grid::solid(5, 4, '.').unwrap();
        let finder = PathFinder::walls(&g);
        for start in 0..=g.last_cell() {
            for finish in 0..=g.last_cell() {
                let route = finder.shortest_path(start, finish).unwrap();
                let expected = manhattan(
                    (g.x(start), g.y(start)),
                    (g.x(finish), g.y(finish)),
                );
                assert_eq!(route.cost as usize, expected, "{start} -> {finish}");
            }
        }
    }

    #[test]
    fn search_map_exposes_full_state() {
        let g = Grid::from_text("..\n#.").unwrap();
        let map = PathFinder::walls(&g).search(0, 3).unwrap();
        assert_eq!(map.len(), 3); // wall excluded
        assert!(!map.contains(2));
        assert_eq!(map.cost(0), Some(0));
        assert_eq!(map.path(0), &[0]);
        assert_eq!(map.cost(3), Some(2));
        assert_eq!(map.path(3), &[0, 1, 3]);
        // Outside the searched space: empty, not a panic.
        assert_eq!(map.cost(2), None);
        assert!(map.path(2).is_empty());
    }

    #[test]
    fn custom_wall_marker_on_digit_grid() {
        let g = Grid::from_digits("10\n01").unwrap();
        // Treat 0 as the wall: 0 -> 3 has no diagonal route.
        let err = PathFinder::new(&g, 0).shortest_path(0, 3).unwrap_err();
        assert_eq!(
            err,
            PathError::Unreachable {
                start: 0,
                finish: 3
            }
        );
    }

    #[test]
    fn search_works_on_infinite_grids() {
        // Padding indices are absent from the node map, so the wavefront
        // stays on mapped cells.
        let g = Grid::from_text_with_width("..\n..", Some(4)).unwrap();
        let route = PathFinder::walls(&g).shortest_path(0, 5).unwrap();
        assert_eq!(route.cost, 2);
        assert_eq!(route.cells.len(), 3);
    }
}
