use std::collections::VecDeque;

use gridpath_core::{Grid, Point, UNREACHABLE};

use crate::traits::SearchSpace;

/// Why a relaxation run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Termination {
    /// The finish cell was finalized.
    Finished,
    /// The cheapest remaining cell was never reached.
    Trapped,
    /// The working set ran dry.
    Exhausted,
}

/// Uniform-cost relaxation over every cell of `space.grid()`.
///
/// The working set starts as all cells in row-major order, walls included.
/// Each round it is stably sorted by distance and its head is drawn, so ties
/// keep their current relative order. Finalized cells are appended to
/// `order`; the other buffers are scratch space reused across runs.
pub(crate) fn relax<S: SearchSpace>(
    space: &mut S,
    start: usize,
    finish: Option<usize>,
    order: &mut Vec<usize>,
    unvisited: &mut VecDeque<usize>,
    nbuf: &mut Vec<usize>,
) -> Termination {
    order.clear();
    unvisited.clear();
    unvisited.extend(0..space.grid().len());
    space.set_distance(start, 0);

    while !unvisited.is_empty() {
        unvisited
            .make_contiguous()
            .sort_by_key(|&i| space.distance(i));
        let Some(ci) = unvisited.pop_front() else {
            break;
        };

        if space.grid().cells()[ci].is_wall {
            continue;
        }
        let current = space.distance(ci);
        if current == UNREACHABLE {
            return Termination::Trapped;
        }

        space.set_visited(ci);
        order.push(ci);
        log::trace!("finalized {} at distance {current}", space.grid().point(ci));
        if Some(ci) == finish {
            return Termination::Finished;
        }

        nbuf.clear();
        space.open_neighbors(ci, nbuf);
        for &ni in nbuf.iter() {
            // Unit weights drained in ascending order: overwriting is safe.
            // A weighted variant must only relax on a strictly smaller distance.
            space.set_distance(ni, current + 1);
            space.set_previous(ni, ci);
        }
    }
    Termination::Exhausted
}

/// Follow back-references from `finish` and return the chain start-first.
///
/// Stops after `grid.len()` steps so a stale, cyclic chain cannot loop
/// forever.
pub(crate) fn walk_back(
    grid: &Grid,
    finish: usize,
    previous: impl Fn(usize) -> Option<usize>,
) -> Vec<Point> {
    let mut path = Vec::new();
    let mut cur = Some(finish);
    while let Some(ci) = cur {
        if path.len() == grid.len() {
            log::warn!("back-reference chain from {} does not end", grid.point(finish));
            break;
        }
        path.push(grid.point(ci));
        cur = previous(ci);
    }
    path.reverse();
    path
}

/// Run the search in place, writing `distance`, `is_visited` and `previous`
/// into the grid's cells, and return the visitation order.
///
/// The order always begins with `start`. It ends with `finish` when the
/// finish was reached; otherwise `finish` is absent and the caller should
/// treat it as unreachable (its `is_visited` stays false).
///
/// The grid's scratch fields must be fresh: call
/// [`Grid::reset_search`] before searching an edited grid again. Returns an
/// empty order if `start` lies outside the grid.
pub fn search(grid: &mut Grid, start: Point, finish: Point) -> Vec<Point> {
    let Some(si) = grid.index(start) else {
        log::warn!("start {start} is outside the grid {}", grid.bounds());
        return Vec::new();
    };
    let fi = grid.index(finish);

    log::debug!(
        "searching {}x{} grid from {start} to {finish}",
        grid.rows(),
        grid.cols()
    );
    let mut order = Vec::new();
    let mut unvisited = VecDeque::with_capacity(grid.len());
    let mut nbuf = Vec::with_capacity(4);
    let end = relax(grid, si, fi, &mut order, &mut unvisited, &mut nbuf);
    log::debug!("search stopped ({end:?}) after visiting {} cells", order.len());

    order.into_iter().map(|i| grid.point(i)).collect()
}

/// Rebuild the path ending at `finish` from the `previous` links left by
/// [`search`], ordered start to finish.
///
/// If `finish` was never reached (or no search ran) the result is just
/// `[finish]`. That single cell is not a path; check `is_visited` on the
/// finish cell to tell the cases apart. Returns an empty path if `finish`
/// lies outside the grid.
pub fn reconstruct_path(grid: &Grid, finish: Point) -> Vec<Point> {
    match grid.index(finish) {
        Some(fi) => walk_back(grid, fi, |i| grid.previous(i)),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::manhattan;

    fn p(row: i32, col: i32) -> Point {
        Point::new(row, col)
    }

    fn run(grid: &mut Grid) -> (Vec<Point>, Vec<Point>) {
        let (start, finish) = (grid.start(), grid.finish());
        let order = search(grid, start, finish);
        let path = reconstruct_path(grid, finish);
        (order, path)
    }

    #[test]
    fn open_3x3_path_goes_down_then_right() {
        let mut g = Grid::parse("S..\n...\n..F").unwrap();
        let (order, path) = run(&mut g);

        assert_eq!(
            order,
            vec![
                p(0, 0),
                p(0, 1),
                p(1, 0),
                p(0, 2),
                p(1, 1),
                p(2, 0),
                p(1, 2),
                p(2, 1),
                p(2, 2),
            ]
        );
        assert_eq!(path, vec![p(0, 0), p(1, 0), p(2, 0), p(2, 1), p(2, 2)]);
        assert_eq!(g.at(p(2, 2)).unwrap().distance, 4);
    }

    #[test]
    fn start_is_visited_first() {
        let mut g = Grid::parse(
            "
            ....#
            .F..#
            ..#S.
            ",
        )
        .unwrap();
        let (order, _) = run(&mut g);
        assert_eq!(order.first(), Some(&p(2, 3)));
        assert_eq!(g.at(p(2, 3)).unwrap().distance, 0);
    }

    #[test]
    fn unobstructed_path_length_is_manhattan_plus_one() {
        let mut g = Grid::new(20, 50, p(10, 15), p(10, 35)).unwrap();
        let (order, path) = run(&mut g);
        let finish = g.at(p(10, 35)).unwrap();

        assert_eq!(order.last(), Some(&p(10, 35)));
        assert_eq!(finish.distance, 20);
        assert_eq!(path.len() as i32, finish.distance + 1);
        assert_eq!(path.len() as i32, manhattan(p(10, 15), p(10, 35)) + 1);
        assert_eq!(path.first(), Some(&p(10, 15)));
        assert_eq!(path.last(), Some(&p(10, 35)));
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1);
        }
    }

    #[test]
    fn partial_wall_forces_route_around() {
        let mut g = Grid::parse("S#.\n.#.\n..F").unwrap();
        let (order, path) = run(&mut g);

        assert_eq!(path, vec![p(0, 0), p(1, 0), p(2, 0), p(2, 1), p(2, 2)]);
        assert_eq!(g.at(p(2, 2)).unwrap().distance, 4);
        assert!(order.iter().all(|&q| !g.is_wall(q)));
        assert!(path.iter().all(|&q| !g.is_wall(q)));
    }

    #[test]
    fn full_wall_column_disconnects_3x3() {
        let mut g = Grid::parse("S#.\n.#.\n.#F").unwrap();
        let (order, path) = run(&mut g);

        assert_eq!(order, vec![p(0, 0), p(1, 0), p(2, 0)]);
        assert!(!g.at(p(2, 2)).unwrap().is_visited);
        assert_eq!(path, vec![p(2, 2)]);
    }

    #[test]
    fn enclosed_finish_is_never_visited() {
        let mut g = Grid::parse("S#.\n#F#\n.#.").unwrap();
        let (order, path) = run(&mut g);

        assert_eq!(order, vec![p(0, 0)]);
        assert!(!order.contains(&p(1, 1)));
        assert_eq!(path, vec![p(1, 1)]);
    }

    #[test]
    fn trapped_order_counts_reachable_open_cells() {
        let mut g = Grid::parse(
            "
            S...
            ..#.
            ...#
            ..#F
            ",
        )
        .unwrap();
        let (order, path) = run(&mut g);

        // 16 cells, 3 walls, finish sealed off.
        assert_eq!(order.len(), 12);
        assert!(!order.contains(&p(3, 3)));
        assert_eq!(path, vec![p(3, 3)]);
        let mut sorted = order.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), order.len());
    }

    #[test]
    fn reconstruct_before_search_is_degenerate() {
        let g = Grid::parse("S..\n...\n..F").unwrap();
        assert_eq!(reconstruct_path(&g, p(2, 2)), vec![p(2, 2)]);
        assert!(reconstruct_path(&g, p(9, 9)).is_empty());
    }

    #[test]
    fn walls_are_relaxed_but_never_visited() {
        let mut g = Grid::parse("S#F").unwrap();
        let (order, path) = run(&mut g);

        let wall = g.at(p(0, 1)).unwrap();
        assert_eq!(wall.distance, 1);
        assert!(!wall.is_visited);
        assert_eq!(order, vec![p(0, 0)]);
        assert_eq!(path, vec![p(0, 2)]);
    }

    #[test]
    fn rerun_without_reset_is_wrong_after_edit() {
        let mut g = Grid::parse("S.F\n...\n...").unwrap();
        let (order, path) = run(&mut g);
        assert_eq!(order, vec![p(0, 0), p(0, 1), p(1, 0), p(0, 2)]);
        assert_eq!(path, vec![p(0, 0), p(0, 1), p(0, 2)]);

        g.set_wall(p(0, 1), true).unwrap();

        // Stale links still lead through the new wall.
        let (_, stale) = run(&mut g);
        assert!(stale.iter().any(|&q| g.is_wall(q)));

        g.reset_search();
        let (_, fresh) = run(&mut g);
        assert_eq!(fresh, vec![p(0, 0), p(1, 0), p(1, 1), p(1, 2), p(0, 2)]);
        assert!(fresh.iter().all(|&q| !g.is_wall(q)));
        assert_ne!(stale, fresh);
    }

    #[test]
    fn start_outside_grid_visits_nothing() {
        let mut g = Grid::parse("S.F").unwrap();
        assert!(search(&mut g, p(4, 4), p(0, 2)).is_empty());
    }

    #[test]
    fn unreachable_finish_outside_grid_exhausts_reachable_cells() {
        let mut g = Grid::parse("S.#\n..F").unwrap();
        let order = search(&mut g, p(0, 0), p(7, 7));
        assert_eq!(order.len(), 5);
    }
}
