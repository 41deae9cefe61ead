#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Runner engine.
//!
//! This crate defines the message surface that connects the terminal host,
//! the authoritative world, and the pure generation systems. Hosts submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values the
//! host turns into feedback. Systems build [`Layout`] values from a [`Grid`]
//! of passage masks and never touch the world directly.

mod grid;

use std::{collections::BTreeSet, fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use grid::Grid;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Runner.";

/// Smallest width or height accepted for a playable session.
pub const MIN_DIMENSION: u32 = 5;

/// Largest width or height accepted for a playable session.
pub const MAX_DIMENSION: u32 = 10;

/// Width and height used whenever a requested value is missing or unsupported.
pub const DEFAULT_DIMENSION: u32 = 10;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a fresh session on an accepted layout, discarding prior state.
    LoadLayout {
        /// Maze, key and door arrangement the session plays on.
        layout: Layout,
    },
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of real time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player advance a single cell in the given direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a new session began on a freshly loaded layout.
    SessionStarted {
        /// Dimensions of the maze the session plays on.
        dimensions: Dimensions,
    },
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports that the player picked up the key lying on a cell.
    KeyCollected {
        /// Cell the key was collected from.
        cell: CellCoord,
    },
    /// Reports that the player spent a key to open a locked door.
    DoorUnlocked {
        /// Cell of the door that is now permanently open.
        cell: CellCoord,
    },
    /// Reports that the player bumped into a locked door without a key.
    DoorBlocked {
        /// Cell of the door that refused entry.
        cell: CellCoord,
    },
    /// Reports that the exit refused the player while doors remain locked.
    WinBlocked {
        /// Exit cell the player attempted to enter.
        cell: CellCoord,
    },
    /// Announces that the player reached the exit with every door opened.
    GameWon {
        /// Session time accumulated until the exit was reached.
        elapsed: Duration,
    },
}

/// Outcome of a single movement request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveResult {
    /// Cell the player occupies after the request was fully resolved.
    pub position: CellCoord,
    /// Events emitted while resolving the request, in emission order.
    pub events: Vec<Event>,
    /// Indicates whether the step was reverted to the previous cell.
    pub rolled_back: bool,
}

/// Errors raised when grids are constructed or accessed incorrectly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The requested dimensions fall outside the accepted range.
    #[error("maze dimensions {width}x{height} are not supported")]
    InvalidDimensions {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// A coordinate lies outside the grid bounds.
    #[error("cell {cell} lies outside the grid")]
    OutOfRange {
        /// Offending coordinate.
        cell: CellCoord,
    },
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction, in the order neighbours are inspected during carving.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// Passage bit that marks this side of a cell as open.
    #[must_use]
    pub const fn mask_bit(self) -> u8 {
        match self {
            Self::West => 1,
            Self::East => 2,
            Self::North => 4,
            Self::South => 8,
        }
    }

    /// Direction pointing back toward the cell of origin.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Adjacent coordinate in the given direction, ignoring any upper bound.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Four-bit set of open sides belonging to a single cell.
///
/// Bit 1 opens the west side, bit 2 the east side, bit 4 the north side and
/// bit 8 the south side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassageMask(u8);

impl PassageMask {
    /// Mask with every side walled off.
    pub const CLOSED: Self = Self(0);

    /// Mask with every side open.
    pub const FULLY_OPEN: Self = Self(15);

    /// Builds a mask from raw bits, discarding anything above the low nibble.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::FULLY_OPEN.0)
    }

    /// Raw bit representation of the mask.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Reports whether the side facing `direction` is open.
    #[must_use]
    pub const fn is_open(self, direction: Direction) -> bool {
        self.0 & direction.mask_bit() != 0
    }

    /// Returns a copy of the mask with the side facing `direction` opened.
    #[must_use]
    pub const fn with_opening(self, direction: Direction) -> Self {
        Self(self.0 | direction.mask_bit())
    }
}

impl fmt::Display for PassageMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Width and height of a maze measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Creates dimensions for an arbitrary non-empty grid.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Creates dimensions restricted to the playable session range.
    pub fn playable(width: u32, height: u32) -> Result<Self, GridError> {
        let range = MIN_DIMENSION..=MAX_DIMENSION;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Resolves host-supplied values, falling back to the default for any
    /// value that is missing or outside the playable range.
    #[must_use]
    pub fn from_requested(width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            width: sanitize_dimension(width),
            height: sanitize_dimension(height),
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let width = usize::try_from(self.width).unwrap_or(0);
        let height = usize::try_from(self.height).unwrap_or(0);
        width.saturating_mul(height)
    }

    /// Fixed entrance at the upper-left corner.
    #[must_use]
    pub const fn entrance(&self) -> CellCoord {
        CellCoord::new(0, 0)
    }

    /// Fixed exit at the lower-right corner.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        CellCoord::new(self.width.saturating_sub(1), self.height.saturating_sub(1))
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// In-bounds neighbour of `cell` in the given direction.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.step(direction).filter(|next| self.contains(*next))
    }

    /// Row-major offset of the cell, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let width = usize::try_from(self.width).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let width = self.width;
        (0..self.height)
            .flat_map(move |row| (0..width).map(move |column| CellCoord::new(column, row)))
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn sanitize_dimension(value: Option<u32>) -> u32 {
    match value {
        Some(value) if (MIN_DIMENSION..=MAX_DIMENSION).contains(&value) => value,
        _ => DEFAULT_DIMENSION,
    }
}

/// Maze together with the pickups and gates placed on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    grid: Grid,
    keys: BTreeSet<CellCoord>,
    doors: BTreeSet<CellCoord>,
}

impl Layout {
    /// Assembles a layout from its parts.
    #[must_use]
    pub fn new(grid: Grid, keys: BTreeSet<CellCoord>, doors: BTreeSet<CellCoord>) -> Self {
        Self { grid, keys, doors }
    }

    /// Assembles a layout holding exactly one key and one locked door.
    #[must_use]
    pub fn with_key_and_door(grid: Grid, key: CellCoord, door: CellCoord) -> Self {
        Self::new(grid, BTreeSet::from([key]), BTreeSet::from([door]))
    }

    /// Passage grid of the layout.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Dimensions of the underlying grid.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Cells holding an uncollected key.
    #[must_use]
    pub const fn keys(&self) -> &BTreeSet<CellCoord> {
        &self.keys
    }

    /// Cells acting as locked doors.
    #[must_use]
    pub const fn doors(&self) -> &BTreeSet<CellCoord> {
        &self.doors
    }

    /// Consumes the layout, yielding the grid, key set and door set.
    #[must_use]
    pub fn into_parts(self) -> (Grid, BTreeSet<CellCoord>, BTreeSet<CellCoord>) {
        (self.grid, self.keys, self.doors)
    }
}
