#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text rendering of Maze Runner sessions for fixed-width displays.

use std::{fmt, time::Duration};

use maze_runner_core::{CellCoord, Event, PassageMask};
use maze_runner_world::{query, World};

/// Number of columns every cell occupies in the rendered grid.
pub const CELL_WIDTH: usize = 3;

/// Symbol drawn for a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellGlyph {
    /// The cell holds the player.
    Player,
    /// The cell holds an uncollected key.
    Key,
    /// The cell is a locked door.
    Door,
    /// Plain cell, drawn as its numeric passage mask.
    Passage(PassageMask),
}

impl CellGlyph {
    /// Resolves the glyph for a cell; the player hides keys and doors beneath.
    #[must_use]
    pub fn at(world: &World, cell: CellCoord) -> Self {
        if query::player(world) == cell {
            Self::Player
        } else if query::key_at(world, cell) {
            Self::Key
        } else if query::door_at(world, cell) {
            Self::Door
        } else {
            Self::Passage(query::grid(world).mask(cell).unwrap_or_default())
        }
    }
}

impl fmt::Display for CellGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => f.write_str("P"),
            Self::Key => f.write_str("K"),
            Self::Door => f.write_str("D"),
            Self::Passage(mask) => write!(f, "{mask}"),
        }
    }
}

/// Renders the session as rows of left-aligned, fixed-width cells.
///
/// Rows are separated by a blank spacer line so the grid reads evenly in a
/// proportional-height terminal.
#[must_use]
pub fn render_grid(world: &World) -> String {
    let dimensions = query::dimensions(world);
    let width = usize::try_from(dimensions.width()).unwrap_or(0);
    let mut out = String::new();

    for row in 0..dimensions.height() {
        for column in 0..dimensions.width() {
            let glyph = CellGlyph::at(world, CellCoord::new(column, row));
            out.push_str(&format!("{:<CELL_WIDTH$}", glyph.to_string()));
        }
        out.push('\n');
        if row + 1 < dimensions.height() {
            out.push_str(&" ".repeat(CELL_WIDTH * width));
            out.push('\n');
        }
    }

    out
}

/// Player-facing message describing a gameplay event, if it warrants one.
#[must_use]
pub fn event_message(event: &Event) -> Option<String> {
    match event {
        Event::KeyCollected { .. } => Some("You found a key!".to_owned()),
        Event::DoorUnlocked { .. } => Some("You used a key to open the door!".to_owned()),
        Event::DoorBlocked { .. } => Some("You need a key to open this door!".to_owned()),
        Event::WinBlocked { .. } => Some("You need to open all doors to win!".to_owned()),
        Event::GameWon { elapsed } => Some(format!(
            "Congratulations! You completed the maze in {} seconds",
            whole_seconds(*elapsed)
        )),
        Event::SessionStarted { .. } | Event::TimeAdvanced { .. } => None,
    }
}

/// Truncates a duration to whole seconds for display.
#[must_use]
pub const fn whole_seconds(duration: Duration) -> u64 {
    duration.as_secs()
}
