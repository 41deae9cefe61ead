//! Dense passage-mask grid backing every maze.

use crate::{CellCoord, Dimensions, Direction, GridError, PassageMask};

/// Row-major grid of passage masks with fixed dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dimensions: Dimensions,
    masks: Vec<PassageMask>,
}

impl Grid {
    /// Creates a grid with every cell walled off.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            masks: vec![PassageMask::CLOSED; dimensions.cell_count()],
        }
    }

    /// Dimensions fixed at construction.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, cell: CellCoord) -> bool {
        self.dimensions.contains(cell)
    }

    /// Passage mask stored for the cell.
    pub fn mask(&self, cell: CellCoord) -> Result<PassageMask, GridError> {
        self.offset(cell).map(|offset| self.masks[offset])
    }

    /// Overwrites the passage mask stored for the cell.
    pub fn set_mask(&mut self, cell: CellCoord, mask: PassageMask) -> Result<(), GridError> {
        let offset = self.offset(cell)?;
        self.masks[offset] = mask;
        Ok(())
    }

    /// Reports whether the side of `cell` facing `direction` is open.
    ///
    /// Out-of-range cells are treated as fully walled.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord, direction: Direction) -> bool {
        self.mask(cell)
            .map_or(false, |mask| mask.is_open(direction))
    }

    /// Opens a bidirectional passage between `cell` and its neighbour in
    /// `direction`, returning the neighbour.
    pub fn carve(&mut self, cell: CellCoord, direction: Direction) -> Result<CellCoord, GridError> {
        let neighbor = self
            .dimensions
            .neighbor(cell, direction)
            .ok_or(GridError::OutOfRange { cell })?;
        let from = self.offset(cell)?;
        let to = self.offset(neighbor)?;
        self.masks[from] = self.masks[from].with_opening(direction);
        self.masks[to] = self.masks[to].with_opening(direction.opposite());
        Ok(neighbor)
    }

    /// Counts undirected passages whose reciprocal bits are both set.
    #[must_use]
    pub fn passage_count(&self) -> usize {
        self.dimensions
            .cells()
            .map(|cell| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|direction| self.is_reciprocal(cell, *direction))
                    .count()
            })
            .sum()
    }

    /// Reports whether every in-bounds opening is matched by the neighbour.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.dimensions.cells().all(|cell| {
            Direction::ALL.into_iter().all(|direction| {
                match self.dimensions.neighbor(cell, direction) {
                    Some(neighbor) => {
                        self.is_open(cell, direction) == self.is_open(neighbor, direction.opposite())
                    }
                    None => true,
                }
            })
        })
    }

    fn is_reciprocal(&self, cell: CellCoord, direction: Direction) -> bool {
        self.dimensions
            .neighbor(cell, direction)
            .map_or(false, |neighbor| {
                self.is_open(cell, direction) && self.is_open(neighbor, direction.opposite())
            })
    }

    fn offset(&self, cell: CellCoord) -> Result<usize, GridError> {
        self.dimensions
            .index(cell)
            .filter(|offset| *offset < self.masks.len())
            .ok_or(GridError::OutOfRange { cell })
    }
}
