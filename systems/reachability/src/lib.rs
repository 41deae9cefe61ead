#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first solvability checks over passage grids.
//!
//! An edge from a cell to its neighbour exists when the cell is open in the
//! direction of travel or the neighbour is a locked door. Doors count as
//! traversable because a key could open them.

use std::collections::{BTreeSet, VecDeque};

use maze_runner_core::{CellCoord, Direction, Grid};

/// Reports whether `end` can be reached from `start`.
///
/// The search is confined to the rectangle spanning the origin and `end`, so
/// callers verifying a full maze must pass its true exit coordinate.
#[must_use]
pub fn is_solvable(
    grid: &Grid,
    doors: &BTreeSet<CellCoord>,
    start: CellCoord,
    end: CellCoord,
) -> bool {
    if !grid.in_bounds(start) || !grid.in_bounds(end) {
        return false;
    }

    let mut found = false;
    flood(grid, doors, start, end, |cell| {
        found = cell == end;
        found
    });
    found
}

/// Lists every cell reachable from `start`, in breadth-first order.
#[must_use]
pub fn reachable_cells(
    grid: &Grid,
    doors: &BTreeSet<CellCoord>,
    start: CellCoord,
) -> Vec<CellCoord> {
    let mut cells = Vec::new();
    if !grid.in_bounds(start) {
        return cells;
    }

    let bound = grid.dimensions().exit();
    flood(grid, doors, start, bound, |cell| {
        cells.push(cell);
        false
    });
    cells
}

/// Visits cells breadth-first until `visit` returns `true` or the queue drains.
fn flood<F>(
    grid: &Grid,
    doors: &BTreeSet<CellCoord>,
    start: CellCoord,
    bound: CellCoord,
    mut visit: F,
) where
    F: FnMut(CellCoord) -> bool,
{
    let dimensions = grid.dimensions();
    let mut seen = vec![false; dimensions.cell_count()];
    let mut queue = VecDeque::new();

    if let Some(index) = dimensions.index(start) {
        seen[index] = true;
        queue.push_back(start);
    }

    while let Some(cell) = queue.pop_front() {
        if visit(cell) {
            return;
        }

        for direction in Direction::ALL {
            let Some(neighbor) = dimensions.neighbor(cell, direction) else {
                continue;
            };
            if neighbor.column() > bound.column() || neighbor.row() > bound.row() {
                continue;
            }
            let Some(index) = dimensions.index(neighbor) else {
                continue;
            };
            if seen[index] {
                continue;
            }
            if grid.is_open(cell, direction) || doors.contains(&neighbor) {
                seen[index] = true;
                queue.push_back(neighbor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_runner_core::{Dimensions, PassageMask};

    fn walled(width: u32, height: u32) -> Grid {
        Grid::new(Dimensions::new(width, height).expect("valid dimensions"))
    }

    #[test]
    fn single_cell_is_trivially_solvable() {
        let grid = walled(1, 1);
        let origin = CellCoord::new(0, 0);
        assert!(is_solvable(&grid, &BTreeSet::new(), origin, origin));
    }

    #[test]
    fn walled_grid_is_unsolvable() {
        let grid = walled(3, 3);
        assert!(!is_solvable(
            &grid,
            &BTreeSet::new(),
            CellCoord::new(0, 0),
            CellCoord::new(2, 2)
        ));
    }

    #[test]
    fn door_bridges_a_missing_passage() {
        let mut grid = walled(3, 1);
        let _ = grid
            .carve(CellCoord::new(1, 0), Direction::East)
            .expect("carve");
        let start = CellCoord::new(0, 0);
        let end = CellCoord::new(2, 0);

        assert!(!is_solvable(&grid, &BTreeSet::new(), start, end));
        assert!(is_solvable(
            &grid,
            &BTreeSet::from([CellCoord::new(1, 0)]),
            start,
            end
        ));
    }

    #[test]
    fn passages_are_followed_from_the_source_side() {
        let mut grid = walled(2, 1);
        grid.set_mask(CellCoord::new(1, 0), PassageMask::FULLY_OPEN)
            .expect("in bounds");
        let left = CellCoord::new(0, 0);
        let right = CellCoord::new(1, 0);

        assert!(!is_solvable(&grid, &BTreeSet::new(), left, right));
        assert!(is_solvable(&grid, &BTreeSet::new(), right, left));
    }

    #[test]
    fn out_of_range_endpoints_are_unsolvable() {
        let grid = walled(2, 2);
        assert!(!is_solvable(
            &grid,
            &BTreeSet::new(),
            CellCoord::new(0, 0),
            CellCoord::new(3, 3)
        ));
        assert!(reachable_cells(&grid, &BTreeSet::new(), CellCoord::new(9, 0)).is_empty());
    }

    #[test]
    fn search_stays_inside_the_destination_rectangle() {
        let mut grid = walled(3, 2);
        let mut cell = CellCoord::new(0, 0);
        for direction in [Direction::East, Direction::East, Direction::South, Direction::West] {
            cell = grid.carve(cell, direction).expect("carve");
        }
        let start = CellCoord::new(0, 0);

        assert_eq!(cell, CellCoord::new(1, 1));
        assert!(!is_solvable(&grid, &BTreeSet::new(), start, cell));
        assert!(is_solvable(&grid, &BTreeSet::new(), start, CellCoord::new(2, 1)));
        assert!(reachable_cells(&grid, &BTreeSet::new(), start).contains(&cell));
    }
}
