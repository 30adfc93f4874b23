//! Error types for grid construction and editing.

use thiserror::Error;

use crate::geom::{Point, Range};

/// Failures raised while building or editing a [`Grid`](crate::Grid).
///
/// Searching never fails; every error here is a precondition the grid
/// enforces so that the search can assume a well-formed grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: i32, cols: i32 },

    #[error("{point} is outside the grid {bounds}")]
    OutOfBounds { point: Point, bounds: Range },

    #[error("start and finish must be different cells, both are {0}")]
    SameEndpoints(Point),

    #[error("cannot place a wall on the start or finish cell {0}")]
    WallOnEndpoint(Point),

    #[error("layout row {row} has {len} columns, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("unknown tile {tile:?} at {point}")]
    UnknownTile { tile: char, point: Point },

    #[error("layout has no {0} cell")]
    MissingEndpoint(&'static str),

    #[error("layout has more than one {0} cell")]
    DuplicateEndpoint(&'static str),
}

pub type Result<T> = std::result::Result<T, GridError>;
