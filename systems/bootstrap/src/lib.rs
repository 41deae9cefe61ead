#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that prepares playable Maze Runner sessions.
//!
//! A session is only handed to the host once its layout passed the
//! solvability check: the maze is carved, the key and door are placed, and
//! the exit is verified reachable from the entrance. Rejected layouts are
//! discarded and carved again from scratch.

use log::{debug, warn};
use maze_runner_core::{Command, Dimensions, Event, GridError, Layout};
use maze_runner_system_generation::generate;
use maze_runner_system_placement::{place_key_and_door, PlacementError};
use maze_runner_system_reachability::is_solvable;
use maze_runner_world::{apply, query, World};
use rand::Rng;
use thiserror::Error;

pub use maze_runner_world::move_player;

/// Number of layouts carved before bootstrapping gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// Failures that prevent a session from starting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BootstrapError {
    /// The requested dimensions are unsupported.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The key or door could not be placed.
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// No carved layout passed the solvability check.
    #[error("no solvable {dimensions} maze found after {attempts} attempts")]
    AttemptsExhausted {
        /// Dimensions that were requested.
        dimensions: Dimensions,
        /// Number of layouts carved and rejected.
        attempts: u32,
    },
}

/// Produces solvable layouts and the sessions that play on them.
#[derive(Clone, Copy, Debug)]
pub struct Bootstrap {
    max_attempts: u32,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl Bootstrap {
    /// Creates a bootstrap system with the default attempt cap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Creates a bootstrap system that carves at most `max_attempts` layouts.
    #[must_use]
    pub const fn with_max_attempts(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Carves, decorates and verifies layouts until one is solvable.
    pub fn generate_layout<R>(
        &self,
        dimensions: Dimensions,
        rng: &mut R,
    ) -> Result<Layout, BootstrapError>
    where
        R: Rng + ?Sized,
    {
        for attempt in 1..=self.max_attempts {
            let grid = generate(dimensions, rng)?;
            let layout = place_key_and_door(grid, rng)?;
            if is_solvable(
                layout.grid(),
                layout.doors(),
                dimensions.entrance(),
                dimensions.exit(),
            ) {
                debug!("accepted {dimensions} layout on attempt {attempt}");
                return Ok(layout);
            }
            debug!("rejected unsolvable {dimensions} layout on attempt {attempt}");
        }

        warn!(
            "gave up carving a {dimensions} maze after {} attempts",
            self.max_attempts
        );
        Err(BootstrapError::AttemptsExhausted {
            dimensions,
            attempts: self.max_attempts,
        })
    }

    /// Starts a new session on a freshly carved maze.
    ///
    /// Width and height must both lie within the playable range; hosts are
    /// expected to resolve user input with `Dimensions::from_requested` first.
    pub fn new_session<R>(
        &self,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Result<World, BootstrapError>
    where
        R: Rng + ?Sized,
    {
        let dimensions = Dimensions::playable(width, height)?;
        let layout = self.generate_layout(dimensions, rng)?;
        Ok(World::new(layout))
    }

    /// Replaces the session's maze with a new one of the same dimensions.
    ///
    /// The player returns to the entrance and the session clock restarts.
    /// On failure the current session is left untouched.
    pub fn regenerate<R>(
        &self,
        world: &mut World,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> Result<(), BootstrapError>
    where
        R: Rng + ?Sized,
    {
        let layout = self.generate_layout(query::dimensions(world), rng)?;
        apply(world, Command::LoadLayout { layout }, out_events);
        Ok(())
    }
}
