//! Shared pieces of the `gridpath` command-line demo.
//!
//! Demonstrates: building a grid from a JSON config or a text layout,
//! seeded random wall painting, both search front ends, and a text overlay
//! of the visitation order and the shortest path.

use std::fs;
use std::path::Path;

use gridpath_core::{Grid, GridConfig, GridError, Point};
use gridpath_paths::{PathSearch, SearchOutcome, reconstruct_path, search};
use rand::Rng;
use thiserror::Error;

/// Overlay characters beyond the layout tiles.
pub const VISITED: char = 'o';
pub const PATH: char = '*';

/// Errors surfaced by the demo binary.
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Read a whole file, tagging errors with its path.
fn read(path: &Path) -> Result<String, DemoError> {
    fs::read_to_string(path).map_err(|source| DemoError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load a [`GridConfig`] from a JSON file. Missing fields keep defaults.
pub fn load_config(path: &Path) -> Result<GridConfig, DemoError> {
    let text = read(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Load a grid from a text layout file (see [`Grid::parse`]).
pub fn load_layout(path: &Path) -> Result<Grid, DemoError> {
    let text = read(path)?;
    Ok(Grid::parse(&text)?)
}

/// Parse a `ROW,COL` pair.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = row.trim().parse().map_err(|e| format!("bad row {row:?}: {e}"))?;
    let col = col.trim().parse().map_err(|e| format!("bad column {col:?}: {e}"))?;
    Ok(Point::new(row, col))
}

/// Turn each open, non-endpoint cell into a wall with probability
/// `density`. Returns how many walls were added.
pub fn scatter_walls(grid: &mut Grid, density: f64, rng: &mut impl Rng) -> usize {
    let density = density.clamp(0.0, 1.0);
    let candidates: Vec<Point> = grid
        .iter()
        .filter(|c| !c.is_wall && !c.is_endpoint())
        .map(|c| c.pos)
        .collect();

    let mut added = 0;
    for p in candidates {
        if rng.random_bool(density) && grid.set_wall(p, true).is_ok() {
            added += 1;
        }
    }
    added
}

/// Output of one demo search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub visited: Vec<Point>,
    pub path: Option<Vec<Point>>,
    pub outcome: SearchOutcome,
}

/// Search `grid` in place, resetting its scratch state first.
///
/// The path is reported only when the finish ended up visited, since the
/// in-place engine has no explicit "no path" result.
pub fn run_in_place(grid: &mut Grid) -> Report {
    grid.reset_search();
    let (start, finish) = (grid.start(), grid.finish());
    let visited = search(grid, start, finish);
    let reached = grid.at(finish).is_some_and(|c| c.is_visited);
    let (path, outcome) = if reached {
        let distance = grid.at(finish).map_or(0, |c| c.distance);
        (
            Some(reconstruct_path(grid, finish)),
            SearchOutcome::Found { distance },
        )
    } else {
        (None, SearchOutcome::Unreachable)
    };
    Report {
        visited,
        path,
        outcome,
    }
}

/// Search `grid` with a [`PathSearch`], leaving the grid untouched.
pub fn run_separate(grid: &Grid) -> Report {
    let mut ps = PathSearch::for_grid(grid);
    let visited = ps.run(grid).to_vec();
    Report {
        visited,
        path: ps.path(grid),
        outcome: ps.outcome(),
    }
}

/// Draw the layout with the visitation order and path on top.
///
/// Start, finish and walls always show; path cells win over visited ones.
pub fn render(grid: &Grid, report: &Report) -> String {
    let mut tiles: Vec<char> = grid
        .to_string()
        .lines()
        .flat_map(|l| l.chars())
        .collect();

    let paint = |tiles: &mut Vec<char>, p: Point, ch: char| {
        if let Some(i) = grid.index(p) {
            if !grid.cells()[i].is_endpoint() {
                tiles[i] = ch;
            }
        }
    };
    for &p in &report.visited {
        paint(&mut tiles, p, VISITED);
    }
    for &p in report.path.iter().flatten() {
        paint(&mut tiles, p, PATH);
    }

    let cols = grid.cols() as usize;
    let mut out = String::with_capacity(tiles.len() + grid.rows() as usize);
    for row in tiles.chunks(cols) {
        out.extend(row);
        out.push('\n');
    }
    out
}
