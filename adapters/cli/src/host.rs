//! Interactive terminal host: main menu, game loop and result screen.

use std::{
    io::{BufRead, Write},
    time::Instant,
};

use anyhow::{Context, Result};
use log::{debug, info};
use maze_runner_core::{Command, Dimensions, Direction, Event, MAX_DIMENSION, MIN_DIMENSION};
use maze_runner_rendering::{event_message, render_grid, whole_seconds};
use maze_runner_system_bootstrap::{move_player, Bootstrap};
use maze_runner_world::{apply, World};
use rand::Rng;

use crate::records::{RecordOutcome, RecordStore};

/// Player input accepted while a maze is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Step one cell in the given direction.
    Move(Direction),
    /// Replace the maze with a fresh one of the same size.
    Regenerate,
    /// Abandon the run and return to the main menu.
    Quit,
}

/// Parses a line typed during play.
pub(crate) fn parse_action(input: &str) -> Option<Action> {
    match input.trim().to_ascii_lowercase().as_str() {
        "w" | "up" | "north" => Some(Action::Move(Direction::North)),
        "s" | "down" | "south" => Some(Action::Move(Direction::South)),
        "a" | "left" | "west" => Some(Action::Move(Direction::West)),
        "d" | "right" | "east" => Some(Action::Move(Direction::East)),
        "n" | "new" | "regenerate" => Some(Action::Regenerate),
        "q" | "quit" | "menu" => Some(Action::Quit),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuChoice {
    Start,
    Results,
    Exit,
}

fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim().to_ascii_lowercase().as_str() {
        "s" | "start" => Some(MenuChoice::Start),
        "r" | "results" => Some(MenuChoice::Results),
        "x" | "q" | "exit" | "quit" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Drives Maze Runner sessions over a line-oriented input and output pair.
pub(crate) struct Host<I, O, G> {
    input: I,
    output: O,
    rng: G,
    bootstrap: Bootstrap,
    records: RecordStore,
    width: Option<u32>,
    height: Option<u32>,
}

impl<I, O, G> Host<I, O, G>
where
    I: BufRead,
    O: Write,
    G: Rng,
{
    /// Creates a host; `width` and `height` pre-fill the size prompts.
    pub(crate) fn new(
        input: I,
        output: O,
        rng: G,
        records: RecordStore,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        Self {
            input,
            output,
            rng,
            bootstrap: Bootstrap::default(),
            records,
            width,
            height,
        }
    }

    /// Runs the main menu until the player exits or input ends.
    pub(crate) fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "[s] Start  [r] Results  [x] Exit")?;
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            match parse_menu_choice(&line) {
                Some(MenuChoice::Start) => {
                    let dimensions = self.prompt_dimensions()?;
                    self.play(dimensions)?;
                }
                Some(MenuChoice::Results) => {
                    writeln!(self.output, "{}", self.records.describe())?;
                }
                Some(MenuChoice::Exit) => return Ok(()),
                None => writeln!(self.output, "Unknown option: {}", line.trim())?,
            }
        }
    }

    /// Returns the next input line, or `None` once input is exhausted.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from input")?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }

    fn prompt_dimensions(&mut self) -> Result<Dimensions> {
        let width = self.prompt_dimension("width", self.width)?;
        let height = self.prompt_dimension("height", self.height)?;
        Ok(Dimensions::from_requested(width, height))
    }

    /// Blank or unparsable answers fall back to the command-line value.
    fn prompt_dimension(&mut self, label: &str, fallback: Option<u32>) -> Result<Option<u32>> {
        write!(
            self.output,
            "Maze {label} ({MIN_DIMENSION}-{MAX_DIMENSION}): "
        )?;
        self.output.flush()?;
        let answer = self
            .read_line()?
            .and_then(|line| line.trim().parse::<u32>().ok());
        Ok(answer.or(fallback))
    }

    fn play(&mut self, dimensions: Dimensions) -> Result<()> {
        let mut world = self
            .bootstrap
            .new_session(dimensions.width(), dimensions.height(), &mut self.rng)
            .with_context(|| format!("failed to start a {dimensions} maze"))?;
        info!("started a {dimensions} session");
        writeln!(self.output, "{}", self.bootstrap.welcome_banner(&world))?;

        let mut last_input = Instant::now();
        loop {
            self.draw(&world)?;
            write!(
                self.output,
                "Move with w/a/s/d, [n] new maze, [q] menu: "
            )?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            match parse_action(&line) {
                Some(Action::Move(direction)) => {
                    let now = Instant::now();
                    let mut ticks = Vec::new();
                    apply(
                        &mut world,
                        Command::Tick {
                            dt: now.duration_since(last_input),
                        },
                        &mut ticks,
                    );
                    last_input = now;

                    let result = move_player(&mut world, direction);
                    if self.report(&result.events)? {
                        self.draw(&world)?;
                        return Ok(());
                    }
                }
                Some(Action::Regenerate) => {
                    let mut events = Vec::new();
                    self.bootstrap
                        .regenerate(&mut world, &mut self.rng, &mut events)
                        .context("failed to regenerate the maze")?;
                    debug!("regenerated maze, {} events", events.len());
                    last_input = Instant::now();
                }
                Some(Action::Quit) => return Ok(()),
                None => writeln!(self.output, "Unknown command: {}", line.trim())?,
            }
        }
    }

    fn draw(&mut self, world: &World) -> Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{}", render_grid(world))?;
        Ok(())
    }

    /// Prints the messages for `events`; returns `true` when the maze was won.
    ///
    /// A winning run prints either the new record or the plain completion time.
    fn report(&mut self, events: &[Event]) -> Result<bool> {
        let mut won = false;
        for event in events {
            if let Event::GameWon { elapsed } = event {
                won = true;
                if self.records.record(*elapsed)? == RecordOutcome::NewRecord {
                    writeln!(
                        self.output,
                        "Congratulations! New record time: {} seconds",
                        whole_seconds(*elapsed)
                    )?;
                    continue;
                }
            }
            if let Some(message) = event_message(event) {
                writeln!(self.output, "{message}")?;
            }
        }
        Ok(won)
    }
}
