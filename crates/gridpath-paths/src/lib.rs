//! Shortest-path search on wall grids.
//!
//! The search is Dijkstra's algorithm specialized to unit edge weights on a
//! 4-connected [`Grid`](gridpath_core::Grid). Two front ends share one
//! relaxation loop:
//!
//! - [`search`] / [`reconstruct_path`] write distance, visited flag and
//!   back-reference into the grid's own cells. The grid must be reset with
//!   [`Grid::reset_search`](gridpath_core::Grid::reset_search) before it is
//!   searched again.
//! - [`PathSearch`] keeps that state in its own records, leaves the grid
//!   untouched and reports a [`SearchOutcome`].
//!
//! Both produce the same visitation order for the same grid.

mod dijkstra;
mod search;
mod traits;

pub use dijkstra::{reconstruct_path, search};
pub use search::{PathSearch, SearchOutcome};
