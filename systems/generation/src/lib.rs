#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomised depth-first maze carving.
//!
//! Carving starts at the entrance and walks an explicit stack: the cell on
//! top of the stack opens a passage to a uniformly chosen unvisited
//! neighbour, which is then pushed; cells without unvisited neighbours are
//! popped. Every cell is visited exactly once, so the result is a perfect
//! maze with `width * height - 1` passages.

use maze_runner_core::{CellCoord, Dimensions, Direction, Grid, GridError};
use rand::{seq::SliceRandom, Rng};

/// Carves a perfect maze covering every cell of the requested dimensions.
///
/// The random source is injected so callers can replay layouts from a seed.
pub fn generate<R>(dimensions: Dimensions, rng: &mut R) -> Result<Grid, GridError>
where
    R: Rng + ?Sized,
{
    let mut grid = Grid::new(dimensions);
    let mut visited = VisitedCells::new(dimensions);
    let mut stack = Vec::with_capacity(dimensions.cell_count());
    let mut candidates = Vec::with_capacity(Direction::ALL.len());

    let entrance = dimensions.entrance();
    visited.mark(entrance);
    stack.push(entrance);

    while let Some(&current) = stack.last() {
        candidates.clear();
        candidates.extend(Direction::ALL.into_iter().filter(|direction| {
            dimensions
                .neighbor(current, *direction)
                .map_or(false, |neighbor| !visited.contains(neighbor))
        }));

        let Some(&direction) = candidates.choose(rng) else {
            let _ = stack.pop();
            continue;
        };

        let next = grid.carve(current, direction)?;
        visited.mark(next);
        stack.push(next);
    }

    Ok(grid)
}

/// Dense visited flags mirroring the grid layout.
#[derive(Debug)]
struct VisitedCells {
    dimensions: Dimensions,
    flags: Vec<bool>,
}

impl VisitedCells {
    fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            flags: vec![false; dimensions.cell_count()],
        }
    }

    fn mark(&mut self, cell: CellCoord) {
        if let Some(flag) = self
            .dimensions
            .index(cell)
            .and_then(|index| self.flags.get_mut(index))
        {
            *flag = true;
        }
    }

    fn contains(&self, cell: CellCoord) -> bool {
        self.dimensions
            .index(cell)
            .and_then(|index| self.flags.get(index).copied())
            .unwrap_or(false)
    }
}
