//! **gridpath-core** — the grid model for shortest-path search.
//!
//! This crate provides the types every search runs over: geometry
//! primitives, the [`Cell`] with its search scratch fields, the [`Grid`]
//! arena that owns all cells, and the [`GridConfig`] used to build one.

pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, UNREACHABLE};
pub use config::GridConfig;
pub use error::{GridError, Result};
pub use geom::{Point, Range, manhattan};
pub use grid::Grid;
