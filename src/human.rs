#![cfg(feature = "std")]

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use rand::rngs::SmallRng;

use crate::agent::{Agent, AgentKind};
use crate::board::{random_candidate, Board, Grid};
use crate::common::BoardError;
use crate::config::FLEET_SIZE;
use crate::coord::Coord;
use crate::game::TurnReport;
use crate::ship::{Orientation, Placement, ShipType};
use crate::terminal::{describe_target, render_grid};

/// How a human's fleet gets onto the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    Automatic,
    Manual,
}

/// Line-oriented input for a human player.
pub trait LineSource {
    /// Append one line to `buf`; `Ok(0)` at end of input.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

// Locks per call, so two players can share the terminal.
impl LineSource for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineSource for io::Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Player at a keyboard.
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
    placement: PlacementMode,
    opponent_reports: bool,
}

impl HumanAgent<io::Stdin, io::Stdout> {
    /// Human on the process's own terminal.
    pub fn stdio(placement: PlacementMode) -> Self {
        Self::new(io::stdin(), io::stdout(), placement)
    }
}

impl<R: LineSource, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W, placement: PlacementMode) -> Self {
        Self {
            input,
            output,
            placement,
            opponent_reports: true,
        }
    }

    /// Whether to announce the opponent's shots. Off for hot-seat play,
    /// where both players read the same screen.
    pub fn with_opponent_reports(mut self, enabled: bool) -> Self {
        self.opponent_reports = enabled;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prompt and read one trimmed line. End of input is an error: there is
    /// nobody left to play. A failing display is not.
    fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.say(prompt);
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read player input")?;
        if read == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_string())
    }

    fn ask_coord(&mut self, prompt: &str) -> anyhow::Result<Coord> {
        loop {
            let line = self.ask(prompt)?;
            match line.parse::<Coord>() {
                Ok(coord) => return Ok(coord),
                Err(e) => self.say(&format!("Invalid position: {}.", e)),
            }
        }
    }

    fn ask_orientation(&mut self) -> anyhow::Result<Orientation> {
        loop {
            let line = self.ask("Horizontal (H) or Vertical (V)?")?;
            match line.parse::<Orientation>() {
                Ok(o) => return Ok(o),
                Err(e) => self.say(&format!("Invalid orientation: {}.", e)),
            }
        }
    }

    /// Best-effort write; a broken display never stops the game.
    fn say(&mut self, text: &str) {
        let written = writeln!(self.output, "{}", text).and_then(|()| self.output.flush());
        if let Err(e) = written {
            log::warn!("could not write to player output: {}", e);
        }
    }
}

impl<R: LineSource, W: Write> Agent for HumanAgent<R, W> {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }

    fn propose_placement(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        ship: ShipType,
        index: usize,
    ) -> anyhow::Result<Placement> {
        match self.placement {
            PlacementMode::Automatic => Ok(random_candidate(rng, ship)),
            PlacementMode::Manual => {
                let grid = render_grid(&board.render(false));
                self.say(&grid);
                let prompt = format!(
                    "Ship {}/{}: starting position for the {} (length {}):",
                    index + 1,
                    FLEET_SIZE,
                    ship.name(),
                    ship.length()
                );
                let origin = self.ask_coord(&prompt)?;
                let orientation = if ship.length() == 1 {
                    Orientation::Horizontal
                } else {
                    self.ask_orientation()?
                };
                Ok(Placement::new(origin, ship.length(), orientation))
            }
        }
    }

    fn placement_rejected(&mut self, _placement: &Placement, error: &BoardError) {
        if self.placement == PlacementMode::Manual {
            self.say(&format!("Invalid position ({}). Try again.", error));
        }
    }

    fn fleet_placed(&mut self, board: &Board) {
        self.say("Your fleet:");
        let grid = render_grid(&board.render(false));
        self.say(&grid);
    }

    fn select_target(
        &mut self,
        _rng: &mut SmallRng,
        own: &Grid,
        opponent: &Grid,
    ) -> anyhow::Result<Coord> {
        self.say("Your board:");
        self.say(&render_grid(own));
        self.say("Opponent's board:");
        self.say(&render_grid(opponent));
        self.ask_coord("Enter your target (e.g. B7):")
    }

    fn handle_report(&mut self, report: &TurnReport) {
        let text = match report {
            TurnReport::Hit(c) => format!("{}: you hit an enemy ship! Fire again.", c),
            TurnReport::Miss(c) => format!("{}: splash, only water.", c),
            TurnReport::Rejected {
                reason: BoardError::AlreadyAttacked(c),
                ..
            } => format!("You already fired at {}. Try again.", c),
            TurnReport::Rejected { target, .. } => {
                format!("{} is not on the board. Try again.", describe_target(*target))
            }
        };
        self.say(&text);
    }

    fn handle_opponent_report(&mut self, report: &TurnReport) {
        if !self.opponent_reports {
            return;
        }
        match report {
            TurnReport::Hit(c) => self.say(&format!("The enemy hit your ship at {}.", c)),
            TurnReport::Miss(c) => self.say(&format!("The enemy missed at {}.", c)),
            TurnReport::Rejected { .. } => {}
        }
    }
}
