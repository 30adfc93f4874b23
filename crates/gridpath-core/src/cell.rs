//! The [`Cell`] type — one grid position with its search scratch state.

use crate::geom::Point;

/// Sentinel distance meaning "not reached yet".
pub const UNREACHABLE: i32 = i32::MAX;

/// A single grid position.
///
/// `pos`, `is_start` and `is_finish` are fixed when the grid is built.
/// `is_wall` is edited between searches. `distance`, `is_visited` and
/// `previous` are scratch fields written by an in-place search and cleared
/// by [`Grid::reset_search`](crate::Grid::reset_search).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub is_start: bool,
    pub is_finish: bool,
    pub is_wall: bool,
    pub distance: i32,
    pub is_visited: bool,
    /// The cell this one was reached from. A plain coordinate, never an
    /// owning link.
    pub previous: Option<Point>,
}

impl Cell {
    /// A fresh open cell at `pos`.
    #[inline]
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            is_start: false,
            is_finish: false,
            is_wall: false,
            distance: UNREACHABLE,
            is_visited: false,
            previous: None,
        }
    }

    #[inline]
    pub const fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub const fn col(&self) -> i32 {
        self.pos.col
    }

    /// Whether the cell is the start or the finish.
    #[inline]
    pub const fn is_endpoint(&self) -> bool {
        self.is_start || self.is_finish
    }

    /// Clear the scratch fields.
    #[inline]
    pub fn reset(&mut self) {
        self.distance = UNREACHABLE;
        self.is_visited = false;
        self.previous = None;
    }
}
