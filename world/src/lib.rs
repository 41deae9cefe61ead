#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Maze Runner.

mod movement;

use std::{collections::BTreeSet, time::Duration};

use maze_runner_core::{
    CellCoord, Command, Dimensions, Direction, Event, Grid, Layout, MoveResult, WELCOME_BANNER,
};

/// Represents a single Maze Runner session: the maze, its pickups and gates,
/// and the player walking through it.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    keys: BTreeSet<CellCoord>,
    doors: BTreeSet<CellCoord>,
    player: Player,
    elapsed: Duration,
    status: SessionStatus,
}

impl World {
    /// Creates a session positioned at the entrance of the provided layout.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        let (grid, keys, doors) = layout.into_parts();
        let entrance = grid.dimensions().entrance();
        Self {
            banner: WELCOME_BANNER,
            grid,
            keys,
            doors,
            player: Player::at(entrance),
            elapsed: Duration::ZERO,
            status: SessionStatus::Playing,
        }
    }

    fn load(&mut self, layout: Layout) {
        *self = Self::new(layout);
    }

    fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Player {
    cell: CellCoord,
    previous: CellCoord,
    has_key: bool,
}

impl Player {
    const fn at(cell: CellCoord) -> Self {
        Self {
            cell,
            previous: cell,
            has_key: false,
        }
    }

    fn roll_back(&mut self) {
        self.cell = self.previous;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionStatus {
    Playing,
    Won,
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLayout { layout } => {
            world.load(layout);
            out_events.push(Event::SessionStarted {
                dimensions: world.dimensions(),
            });
        }
        Command::Tick { dt } => {
            if world.status == SessionStatus::Won {
                return;
            }
            world.elapsed = world.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MovePlayer { direction } => {
            let _ = movement::step(world, direction, out_events);
        }
    }
}

/// Requests a single player step and reports how it resolved.
///
/// Illegal steps leave the world untouched and yield an empty event list.
pub fn move_player(world: &mut World, direction: Direction) -> MoveResult {
    let mut events = Vec::new();
    let rolled_back = movement::step(world, direction, &mut events);
    MoveResult {
        position: world.player.cell,
        events,
        rolled_back,
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::{collections::BTreeSet, time::Duration};

    use super::{SessionStatus, World};
    use maze_runner_core::{CellCoord, Dimensions, Grid};

    /// Retrieves the welcome banner that hosts may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the passage grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Dimensions of the maze the session plays on.
    #[must_use]
    pub fn dimensions(world: &World) -> Dimensions {
        world.dimensions()
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player(world: &World) -> CellCoord {
        world.player.cell
    }

    /// Cell the player occupied before the most recent legal step.
    #[must_use]
    pub fn previous_position(world: &World) -> CellCoord {
        world.player.previous
    }

    /// Reports whether the player carries an unspent key.
    #[must_use]
    pub fn has_key(world: &World) -> bool {
        world.player.has_key
    }

    /// Cells still holding an uncollected key.
    #[must_use]
    pub fn keys(world: &World) -> &BTreeSet<CellCoord> {
        &world.keys
    }

    /// Cells still acting as locked doors.
    #[must_use]
    pub fn doors(world: &World) -> &BTreeSet<CellCoord> {
        &world.doors
    }

    /// Reports whether an uncollected key lies on the cell.
    #[must_use]
    pub fn key_at(world: &World, cell: CellCoord) -> bool {
        world.keys.contains(&cell)
    }

    /// Reports whether a locked door occupies the cell.
    #[must_use]
    pub fn door_at(world: &World, cell: CellCoord) -> bool {
        world.doors.contains(&cell)
    }

    /// Session time accumulated through tick commands.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Reports whether the session reached its terminal won state.
    #[must_use]
    pub fn is_won(world: &World) -> bool {
        world.status == SessionStatus::Won
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_runner_core::PassageMask;

    fn corridor_layout() -> Layout {
        let dimensions = Dimensions::new(5, 1).expect("valid dimensions");
        let mut grid = Grid::new(dimensions);
        let mut cell = dimensions.entrance();
        for _ in 0..4 {
            cell = grid.carve(cell, Direction::East).expect("carve corridor");
        }
        Layout::with_key_and_door(grid, CellCoord::new(1, 0), CellCoord::new(3, 0))
    }

    #[test]
    fn load_layout_resets_the_player() {
        let mut world = World::new(corridor_layout());
        let _ = move_player(&mut world, Direction::East);
        assert!(query::has_key(&world));

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadLayout {
                layout: corridor_layout(),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::SessionStarted {
                dimensions: Dimensions::new(5, 1).expect("valid dimensions"),
            }]
        );
        assert_eq!(query::player(&world), CellCoord::new(0, 0));
        assert_eq!(query::previous_position(&world), CellCoord::new(0, 0));
        assert!(!query::has_key(&world));
        assert!(query::key_at(&world, CellCoord::new(1, 0)));
        assert_eq!(query::elapsed(&world), Duration::ZERO);
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn tick_accumulates_elapsed_time() {
        let mut world = World::new(corridor_layout());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(400),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(350),
            },
            &mut events,
        );

        assert_eq!(query::elapsed(&world), Duration::from_millis(750));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn corridor_can_be_completed() {
        let mut world = World::new(corridor_layout());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(3),
            },
            &mut events,
        );
        for _ in 0..4 {
            apply(
                &mut world,
                Command::MovePlayer {
                    direction: Direction::East,
                },
                &mut events,
            );
        }

        assert_eq!(
            events,
            vec![
                Event::TimeAdvanced {
                    dt: Duration::from_secs(3)
                },
                Event::KeyCollected {
                    cell: CellCoord::new(1, 0)
                },
                Event::DoorUnlocked {
                    cell: CellCoord::new(3, 0)
                },
                Event::GameWon {
                    elapsed: Duration::from_secs(3)
                },
            ]
        );
        assert!(query::is_won(&world));
        assert_eq!(
            query::grid(&world).mask(CellCoord::new(3, 0)),
            Ok(PassageMask::FULLY_OPEN)
        );
    }

    #[test]
    fn ticks_after_the_win_are_ignored() {
        let mut world = World::new(corridor_layout());
        for _ in 0..4 {
            let _ = move_player(&mut world, Direction::East);
        }
        assert!(query::is_won(&world));

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::elapsed(&world), Duration::ZERO);
    }
}
