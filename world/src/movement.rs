//! Player movement rules: collision against passage masks, key pickup,
//! door unlocking and the exit gate.

use log::{error, trace};
use maze_runner_core::{Direction, Event, PassageMask};

use super::{SessionStatus, World};

/// Resolves a single step request, returning whether the step was rolled back.
///
/// A step is legal when the current cell is open toward the target or the
/// target is a locked door. Door and exit consequences are evaluated after
/// the player has entered the target cell and may send the player back.
/// The current cell is recorded as the previous position even when the step
/// is refused.
pub(crate) fn step(world: &mut World, direction: Direction, out_events: &mut Vec<Event>) -> bool {
    if world.status == SessionStatus::Won {
        return false;
    }

    let from = world.player.cell;
    world.player.previous = from;
    let Some(target) = world.dimensions().neighbor(from, direction) else {
        trace!("step {direction:?} from {from} leaves the maze");
        return false;
    };

    let passable = world.grid.is_open(from, direction) || world.doors.contains(&target);
    if !passable {
        trace!("step {direction:?} from {from} hits a wall");
        return false;
    }

    world.player.cell = target;
    trace!("player moved {from} -> {target}");

    if world.keys.remove(&target) {
        world.player.has_key = true;
        out_events.push(Event::KeyCollected { cell: target });
    }

    if world.doors.contains(&target) {
        if !world.player.has_key {
            out_events.push(Event::DoorBlocked { cell: target });
            world.player.roll_back();
            return true;
        }

        let _ = world.doors.remove(&target);
        world.player.has_key = false;
        if let Err(err) = world.grid.set_mask(target, PassageMask::FULLY_OPEN) {
            error!("failed to open unlocked door: {err}");
        }
        out_events.push(Event::DoorUnlocked { cell: target });
    }

    if target == world.dimensions().exit() {
        if !world.doors.is_empty() {
            out_events.push(Event::WinBlocked { cell: target });
            world.player.roll_back();
            return true;
        }

        world.status = SessionStatus::Won;
        out_events.push(Event::GameWon {
            elapsed: world.elapsed,
        });
    }

    false
}
