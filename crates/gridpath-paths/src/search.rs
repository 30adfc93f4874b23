use std::collections::VecDeque;

use gridpath_core::{Grid, Point, Range, UNREACHABLE};

use crate::dijkstra::{Termination, relax, walk_back};
use crate::traits::SearchSpace;

/// Result of the last [`PathSearch::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// No search has run yet.
    #[default]
    NotYetRun,
    /// The finish was reached at `distance` steps from the start.
    Found { distance: i32 },
    /// The finish cannot be reached from the start.
    Unreachable,
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

// ---------------------------------------------------------------------------
// Per-search records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct Records {
    distance: Vec<i32>,
    visited: Vec<bool>,
    previous: Vec<Option<usize>>,
}

impl Records {
    fn reset(&mut self, len: usize) {
        self.distance.clear();
        self.distance.resize(len, UNREACHABLE);
        self.visited.clear();
        self.visited.resize(len, false);
        self.previous.clear();
        self.previous.resize(len, None);
    }
}

/// An immutable grid paired with the records of one search over it.
struct Overlay<'a> {
    grid: &'a Grid,
    records: &'a mut Records,
}

impl SearchSpace for Overlay<'_> {
    fn grid(&self) -> &Grid {
        self.grid
    }

    fn distance(&self, idx: usize) -> i32 {
        self.records.distance[idx]
    }

    fn set_distance(&mut self, idx: usize, distance: i32) {
        self.records.distance[idx] = distance;
    }

    fn visited(&self, idx: usize) -> bool {
        self.records.visited[idx]
    }

    fn set_visited(&mut self, idx: usize) {
        self.records.visited[idx] = true;
    }

    fn previous(&self, idx: usize) -> Option<usize> {
        self.records.previous[idx]
    }

    fn set_previous(&mut self, idx: usize, from: usize) {
        self.records.previous[idx] = Some(from);
    }
}

// ---------------------------------------------------------------------------
// PathSearch
// ---------------------------------------------------------------------------

/// Shortest-path search that leaves the [`Grid`] untouched.
///
/// Distance, visited flag and back-reference live in records indexed in
/// parallel with the grid's cells. Every [`run`](PathSearch::run) starts
/// from fresh records, so walls can be edited between runs without a manual
/// reset, and any number of `PathSearch` values can share one grid. Buffers
/// are reused, so repeated runs on the same grid size do not allocate.
///
/// Visitation order is identical to in-place [`search`](crate::search()) on a
/// freshly reset grid.
#[derive(Debug, Clone, Default)]
pub struct PathSearch {
    bounds: Range,
    records: Records,
    order: Vec<usize>,
    visited: Vec<Point>,
    outcome: SearchOutcome,
    finish: Option<usize>,
    // reused scratch buffers
    unvisited: VecDeque<usize>,
    nbuf: Vec<usize>,
}

impl PathSearch {
    /// Create a search sized for grids covering `bounds`.
    pub fn new(bounds: Range) -> Self {
        let mut search = Self {
            bounds,
            nbuf: Vec::with_capacity(4),
            ..Self::default()
        };
        search.records.reset(bounds.len());
        search
    }

    /// Create a search sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.bounds())
    }

    /// The bounds this search is currently sized for.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Search `grid` from its start to its finish and return the
    /// visitation order.
    ///
    /// A grid of different bounds resizes the records first.
    pub fn run(&mut self, grid: &Grid) -> &[Point] {
        if grid.bounds() != self.bounds {
            log::debug!("resizing search from {} to {}", self.bounds, grid.bounds());
            self.bounds = grid.bounds();
        }
        self.records.reset(grid.len());

        let (start, finish) = (grid.start(), grid.finish());
        self.visited.clear();
        self.finish = grid.index(finish);
        let Some(si) = grid.index(start) else {
            self.outcome = SearchOutcome::Unreachable;
            return &self.visited;
        };

        log::debug!(
            "searching {}x{} grid from {start} to {finish} ({} walls)",
            grid.rows(),
            grid.cols(),
            grid.wall_count()
        );
        let end = {
            let mut space = Overlay {
                grid,
                records: &mut self.records,
            };
            relax(
                &mut space,
                si,
                self.finish,
                &mut self.order,
                &mut self.unvisited,
                &mut self.nbuf,
            )
        };

        self.outcome = match (end, self.finish) {
            (Termination::Finished, Some(fi)) => SearchOutcome::Found {
                distance: self.records.distance[fi],
            },
            _ => SearchOutcome::Unreachable,
        };
        log::debug!(
            "search stopped ({end:?}) after visiting {} cells: {:?}",
            self.order.len(),
            self.outcome
        );

        self.visited.extend(self.order.iter().map(|&i| grid.point(i)));
        &self.visited
    }

    /// Outcome of the last run.
    #[inline]
    pub fn outcome(&self) -> SearchOutcome {
        self.outcome
    }

    /// Visitation order of the last run.
    #[inline]
    pub fn visited(&self) -> &[Point] {
        &self.visited
    }

    /// The start-to-finish path of the last run, or `None` unless the
    /// outcome is [`SearchOutcome::Found`].
    ///
    /// `grid` must be the grid passed to the last run, unedited.
    pub fn path(&self, grid: &Grid) -> Option<Vec<Point>> {
        if !self.outcome.is_found() || grid.bounds() != self.bounds {
            return None;
        }
        let fi = self.finish?;
        Some(walk_back(grid, fi, |i| self.records.previous[i]))
    }

    /// Distance of `p` from the start after the last run, or
    /// [`UNREACHABLE`] if `p` was not reached or lies outside the bounds.
    pub fn distance_at(&self, p: Point) -> i32 {
        self.bounds
            .index_of(p)
            .and_then(|i| self.records.distance.get(i).copied())
            .unwrap_or(UNREACHABLE)
    }

    /// Whether `p` was finalized by the last run.
    pub fn is_visited(&self, p: Point) -> bool {
        self.bounds
            .index_of(p)
            .and_then(|i| self.records.visited.get(i).copied())
            .unwrap_or(false)
    }

    /// The cell `p` was reached from in the last run.
    pub fn previous_of(&self, p: Point) -> Option<Point> {
        let i = self.bounds.index_of(p)?;
        let prev = (*self.records.previous.get(i)?)?;
        Some(self.bounds.point_at(prev))
    }
}
