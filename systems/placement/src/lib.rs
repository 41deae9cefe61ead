#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Constrained random placement of the key and the locked door.

use maze_runner_core::{CellCoord, Dimensions, Grid, GridError, Layout, PassageMask};
use rand::Rng;
use thiserror::Error;

/// Smallest grid that can host distinct entrance, exit, key and door cells.
pub const MIN_PLACEMENT_CELLS: usize = 4;

/// Reasons a key and door could not be placed on a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The grid is too small to keep every special cell distinct.
    #[error("a {dimensions} grid cannot hold distinct entrance, exit, key and door cells")]
    TooFewCells {
        /// Dimensions of the rejected grid.
        dimensions: Dimensions,
    },
    /// The exit cell could not be opened.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Places one key and one locked door on the grid and opens the exit cell.
///
/// The key lands on a uniformly random cell other than the entrance and the
/// exit; the door lands on a uniformly random cell other than those and the
/// key. The exit mask is then forced fully open.
pub fn place_key_and_door<R>(mut grid: Grid, rng: &mut R) -> Result<Layout, PlacementError>
where
    R: Rng + ?Sized,
{
    let dimensions = grid.dimensions();
    if dimensions.cell_count() < MIN_PLACEMENT_CELLS {
        return Err(PlacementError::TooFewCells { dimensions });
    }

    let entrance = dimensions.entrance();
    let exit = dimensions.exit();
    let key = random_cell_excluding(dimensions, &[entrance, exit], rng);
    let door = random_cell_excluding(dimensions, &[entrance, exit, key], rng);

    grid.set_mask(exit, PassageMask::FULLY_OPEN)?;

    Ok(Layout::with_key_and_door(grid, key, door))
}

/// Draws uniformly random cells until one outside `exclude` comes up.
///
/// Callers must leave at least one cell unexcluded or this never returns.
pub fn random_cell_excluding<R>(
    dimensions: Dimensions,
    exclude: &[CellCoord],
    rng: &mut R,
) -> CellCoord
where
    R: Rng + ?Sized,
{
    loop {
        let candidate = CellCoord::new(
            rng.gen_range(0..dimensions.width()),
            rng.gen_range(0..dimensions.height()),
        );
        if !exclude.contains(&candidate) {
            return candidate;
        }
    }
}
