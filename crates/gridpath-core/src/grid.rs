//! The [`Grid`] type — a rectangular arena of [`Cell`]s.
//!
//! Cells live in one row-major `Vec` owned by the grid. Everything else
//! refers to a cell by its [`Point`] (or the flat index derived from it), so
//! back-references between cells never own anything.

use std::fmt;

use crate::cell::Cell;
use crate::error::{GridError, Result};
use crate::geom::{Point, Range};

/// Layout characters understood by [`Grid::parse`] and produced by
/// `Display`.
pub mod tile {
    pub const START: char = 'S';
    pub const FINISH: char = 'F';
    pub const WALL: char = '#';
    pub const OPEN: char = '.';
}

/// A rows × cols grid with exactly one start and one finish cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    start: Point,
    finish: Point,
}

impl Grid {
    /// Create an open grid (no walls) with the given endpoints.
    pub fn new(rows: i32, cols: i32, start: Point, finish: Point) -> Result<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        let bounds = Range::with_size(rows, cols);
        for p in [start, finish] {
            if !bounds.contains(p) {
                return Err(GridError::OutOfBounds { point: p, bounds });
            }
        }
        if start == finish {
            return Err(GridError::SameEndpoints(start));
        }

        let cells = bounds
            .iter()
            .map(|p| {
                let mut cell = Cell::new(p);
                cell.is_start = p == start;
                cell.is_finish = p == finish;
                cell
            })
            .collect();
        Ok(Self {
            cells,
            bounds,
            start,
            finish,
        })
    }

    /// Build a grid from a text layout, one line per row.
    ///
    /// `S` marks the start, `F` the finish, `#` a wall and `.` an open cell.
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let expected = lines.first().map_or(0, |l| l.chars().count());

        let mut start = None;
        let mut finish = None;
        let mut walls = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len != expected {
                return Err(GridError::RaggedRow { row, len, expected });
            }
            for (col, tile) in line.chars().enumerate() {
                let p = Point::new(row as i32, col as i32);
                match tile {
                    tile::START if start.replace(p).is_some() => {
                        return Err(GridError::DuplicateEndpoint("start"));
                    }
                    tile::FINISH if finish.replace(p).is_some() => {
                        return Err(GridError::DuplicateEndpoint("finish"));
                    }
                    tile::START | tile::FINISH | tile::OPEN => {}
                    tile::WALL => walls.push(p),
                    _ => return Err(GridError::UnknownTile { tile, point: p }),
                }
            }
        }

        let start = start.ok_or(GridError::MissingEndpoint("start"))?;
        let finish = finish.ok_or(GridError::MissingEndpoint("finish"))?;
        let mut grid = Self::new(lines.len() as i32, expected as i32, start, finish)?;
        for p in walls {
            grid.set_wall(p, true)?;
        }
        Ok(grid)
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Position of the start cell.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Position of the finish cell.
    #[inline]
    pub fn finish(&self) -> Point {
        self.finish
    }

    /// Flat arena index of `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.bounds.index_of(p)
    }

    /// Position of the cell stored at arena index `idx`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.bounds.point_at(idx)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Mutable access to the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable view of all cells in row-major order.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Whether the cell at `p` is a wall. Out-of-bounds points are not.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.at(p).is_some_and(|c| c.is_wall)
    }

    /// Mark or clear a wall at `p`.
    pub fn set_wall(&mut self, p: Point, wall: bool) -> Result<()> {
        let bounds = self.bounds;
        let cell = self
            .at_mut(p)
            .ok_or(GridError::OutOfBounds { point: p, bounds })?;
        if cell.is_endpoint() {
            return Err(GridError::WallOnEndpoint(p));
        }
        cell.is_wall = wall;
        Ok(())
    }

    /// Flip the wall flag at `p` and return the new state.
    pub fn toggle_wall(&mut self, p: Point) -> Result<bool> {
        let wall = !self.is_wall(p);
        self.set_wall(p, wall)?;
        Ok(wall)
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall).count()
    }

    /// In-bounds, not yet visited cardinal neighbours of `p`, in the order
    /// up, down, left, right.
    ///
    /// Walls are included; the search discards them when they are drawn
    /// from its working set.
    pub fn neighbors(&self, p: Point) -> Vec<Point> {
        p.neighbors_4()
            .into_iter()
            .filter(|&n| self.at(n).is_some_and(|c| !c.is_visited))
            .collect()
    }

    /// Clear the scratch fields of every cell so the grid can be searched
    /// again.
    pub fn reset_search(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }
}

impl fmt::Display for Grid {
    /// Writes the layout in the format accepted by [`Grid::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            let ch = if cell.is_start {
                tile::START
            } else if cell.is_finish {
                tile::FINISH
            } else if cell.is_wall {
                tile::WALL
            } else {
                tile::OPEN
            };
            write!(f, "{ch}")?;
            if (i + 1) % self.cols() as usize == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::UNREACHABLE;

    fn open_3x3() -> Grid {
        Grid::new(3, 3, Point::new(0, 0), Point::new(2, 2)).unwrap()
    }

    #[test]
    fn new_marks_endpoints() {
        let g = open_3x3();
        assert_eq!(g.len(), 9);
        assert_eq!((g.rows(), g.cols()), (3, 3));
        assert!(g.at(Point::new(0, 0)).unwrap().is_start);
        assert!(g.at(Point::new(2, 2)).unwrap().is_finish);
        assert_eq!(g.iter().filter(|c| c.is_start).count(), 1);
        assert_eq!(g.iter().filter(|c| c.is_finish).count(), 1);
        assert!(g.iter().all(|c| c.distance == UNREACHABLE));
    }

    #[test]
    fn new_rejects_malformed_grids() {
        let p = Point::ZERO;
        assert_eq!(
            Grid::new(0, 4, p, p).unwrap_err(),
            GridError::EmptyGrid { rows: 0, cols: 4 }
        );
        assert!(matches!(
            Grid::new(2, 2, p, Point::new(2, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(
            Grid::new(2, 2, p, p).unwrap_err(),
            GridError::SameEndpoints(p)
        );
    }

    #[test]
    fn cells_are_stored_row_major() {
        let g = Grid::new(2, 3, Point::new(0, 0), Point::new(1, 2)).unwrap();
        for (i, cell) in g.iter().enumerate() {
            assert_eq!(g.point(i), cell.pos);
            assert_eq!(g.index(cell.pos), Some(i));
        }
        assert_eq!(g.at(Point::new(2, 0)), None);
    }

    #[test]
    fn walls_cannot_cover_endpoints() {
        let mut g = open_3x3();
        assert_eq!(
            g.set_wall(Point::new(0, 0), true),
            Err(GridError::WallOnEndpoint(Point::new(0, 0)))
        );
        assert!(matches!(
            g.toggle_wall(Point::new(5, 5)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(g.toggle_wall(Point::new(1, 1)), Ok(true));
        assert!(g.is_wall(Point::new(1, 1)));
        assert_eq!(g.toggle_wall(Point::new(1, 1)), Ok(false));
        assert_eq!(g.wall_count(), 0);
    }

    #[test]
    fn neighbors_order_and_bounds() {
        let g = open_3x3();
        assert_eq!(
            g.neighbors(Point::new(1, 1)),
            vec![
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(1, 2),
            ]
        );
        assert_eq!(
            g.neighbors(Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
        assert_eq!(
            g.neighbors(Point::new(2, 2)),
            vec![Point::new(1, 2), Point::new(2, 1)]
        );
    }

    #[test]
    fn neighbors_skip_visited_but_keep_walls() {
        let mut g = open_3x3();
        g.set_wall(Point::new(0, 1), true).unwrap();
        g.at_mut(Point::new(1, 0)).unwrap().is_visited = true;
        assert_eq!(g.neighbors(Point::new(0, 0)), vec![Point::new(0, 1)]);
    }

    #[test]
    fn reset_search_clears_scratch_only() {
        let mut g = open_3x3();
        g.set_wall(Point::new(1, 1), true).unwrap();
        {
            let c = g.at_mut(Point::new(0, 1)).unwrap();
            c.distance = 1;
            c.is_visited = true;
            c.previous = Some(Point::new(0, 0));
        }
        g.reset_search();
        let c = g.at(Point::new(0, 1)).unwrap();
        assert_eq!(c.distance, UNREACHABLE);
        assert!(!c.is_visited);
        assert_eq!(c.previous, None);
        assert!(g.is_wall(Point::new(1, 1)));
    }

    #[test]
    fn parse_and_display_round_trip() {
        let text = "S.#\n.##\n..F\n";
        let g = Grid::parse(text).unwrap();
        assert_eq!(g.start(), Point::new(0, 0));
        assert_eq!(g.finish(), Point::new(2, 2));
        assert_eq!(g.wall_count(), 3);
        assert_eq!(g.to_string(), text);
    }

    #[test]
    fn parse_ignores_blank_lines_and_indentation() {
        let g = Grid::parse(
            "
            S..
            ..F
            ",
        )
        .unwrap();
        assert_eq!((g.rows(), g.cols()), (2, 3));
        assert_eq!(g.finish(), Point::new(1, 2));
    }

    #[test]
    fn parse_reports_layout_errors() {
        assert_eq!(
            Grid::parse("S..\n.F").unwrap_err(),
            GridError::RaggedRow {
                row: 1,
                len: 2,
                expected: 3
            }
        );
        assert_eq!(
            Grid::parse("S.x\n..F").unwrap_err(),
            GridError::UnknownTile {
                tile: 'x',
                point: Point::new(0, 2)
            }
        );
        assert_eq!(
            Grid::parse("...\n..F").unwrap_err(),
            GridError::MissingEndpoint("start")
        );
        assert_eq!(
            Grid::parse("S.S\n..F").unwrap_err(),
            GridError::DuplicateEndpoint("start")
        );
        assert_eq!(
            Grid::parse("").unwrap_err(),
            GridError::MissingEndpoint("start")
        );
    }
}
