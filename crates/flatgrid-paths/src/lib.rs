//! Shortest-path search over flat-indexed grids.
//!
//! [`PathFinder`] borrows a [`flatgrid_core::Grid`] plus a wall marker and
//! runs a unit-cost Dijkstra expanded one frontier wave at a time, rather
//! than through a priority queue: with every edge costing exactly 1, the
//! first wave to reach a cell already carries a shortest path to it.
//!
//! A full search returns a [`SearchMap`] holding per-cell cost and path;
//! [`PathFinder::shortest_path`] reduces that to a single [`Route`].

mod distance;
mod finder;

pub use distance::{chebyshev, manhattan};
pub use finder::{DEFAULT_WALL, NodeState, PathError, PathFinder, Route, SearchMap};
