//! Grid construction settings.

use crate::error::Result;
use crate::geom::Point;
use crate::grid::Grid;

/// Default number of rows.
pub const DEFAULT_ROWS: i32 = 20;
/// Default number of columns.
pub const DEFAULT_COLS: i32 = 50;
/// Default start cell.
pub const DEFAULT_START: Point = Point::new(10, 15);
/// Default finish cell.
pub const DEFAULT_FINISH: Point = Point::new(10, 35);

/// Dimensions and endpoints of a grid.
///
/// Every field falls back to its default when missing from a serialized
/// config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Point,
    pub finish: Point,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            start: DEFAULT_START,
            finish: DEFAULT_FINISH,
        }
    }
}

impl GridConfig {
    /// Build an open grid from this config.
    pub fn build(&self) -> Result<Grid> {
        Grid::new(self.rows, self.cols, self.start, self.finish)
    }
}
