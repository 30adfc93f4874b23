use gridpath_core::Grid;

/// Storage seam between the grid layout and the scratch state of a search.
///
/// Cells are addressed by their flat arena index in [`Grid`]. The in-place
/// engine implements this on [`Grid`] itself; [`PathSearch`](crate::PathSearch)
/// keeps the scratch records beside an immutable grid.
pub(crate) trait SearchSpace {
    /// Layout being searched (bounds, walls).
    fn grid(&self) -> &Grid;

    /// Tentative distance of cell `idx`.
    fn distance(&self, idx: usize) -> i32;

    fn set_distance(&mut self, idx: usize, distance: i32);

    /// Whether cell `idx` has been finalized.
    fn visited(&self, idx: usize) -> bool;

    fn set_visited(&mut self, idx: usize);

    /// Index of the cell `idx` was reached from.
    fn previous(&self, idx: usize) -> Option<usize>;

    fn set_previous(&mut self, idx: usize, from: usize);

    /// Append the in-bounds, unvisited cardinal neighbours of `idx` to `buf`
    /// in the order up, down, left, right. The caller clears `buf`.
    fn open_neighbors(&self, idx: usize, buf: &mut Vec<usize>) {
        let grid = self.grid();
        for n in grid.point(idx).neighbors_4() {
            let Some(ni) = grid.index(n) else {
                continue;
            };
            if !self.visited(ni) {
                buf.push(ni);
            }
        }
    }
}

impl SearchSpace for Grid {
    fn grid(&self) -> &Grid {
        self
    }

    fn distance(&self, idx: usize) -> i32 {
        self.cells()[idx].distance
    }

    fn set_distance(&mut self, idx: usize, distance: i32) {
        self.cells_mut()[idx].distance = distance;
    }

    fn visited(&self, idx: usize) -> bool {
        self.cells()[idx].is_visited
    }

    fn set_visited(&mut self, idx: usize) {
        self.cells_mut()[idx].is_visited = true;
    }

    fn previous(&self, idx: usize) -> Option<usize> {
        self.cells()[idx].previous.and_then(|p| self.index(p))
    }

    fn set_previous(&mut self, idx: usize, from: usize) {
        let from = self.point(from);
        self.cells_mut()[idx].previous = Some(from);
    }

    fn open_neighbors(&self, idx: usize, buf: &mut Vec<usize>) {
        buf.extend(
            self.neighbors(self.point(idx))
                .into_iter()
                .filter_map(|p| self.index(p)),
        );
    }
}
