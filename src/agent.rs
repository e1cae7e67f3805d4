//! The seam between the engine and whoever is playing a side.
//!
//! An [`Agent`] proposes placements during setup and targets during play.
//! The engine validates everything it is given, so agents never need to
//! pre-check their own proposals.

use core::time::Duration;
use log::trace;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::{random_candidate, Board, Grid};
use crate::common::{BoardError, Cell};
use crate::config::{BOARD_SIZE, FLEET};
use crate::coord::Coord;
use crate::game::TurnReport;
use crate::ship::{Placement, ShipType};

/// Who is behind an agent. Fixed when the slot is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    Human,
    Computer,
}

/// Interface implemented by the different kinds of player.
pub trait Agent {
    fn kind(&self) -> AgentKind;

    /// Offer a placement for `ship`, the `index`-th entry of the fleet.
    fn propose_placement(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        ship: ShipType,
        index: usize,
    ) -> anyhow::Result<Placement>;

    /// The last proposal did not fit; another one will be requested.
    fn placement_rejected(&mut self, _placement: &Placement, _error: &BoardError) {}

    /// Called once the whole fleet is on the board.
    fn fleet_placed(&mut self, _board: &Board) {}

    /// Choose the next coordinate to attack. `own` is the agent's board with
    /// ships revealed, `opponent` has them hidden.
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        own: &Grid,
        opponent: &Grid,
    ) -> anyhow::Result<Coord>;

    /// Result of this agent's own attack.
    fn handle_report(&mut self, _report: &TurnReport) {}

    /// Result of the opponent's attack against this agent's board.
    fn handle_opponent_report(&mut self, _report: &TurnReport) {}
}

/// Ask `agent` for placements, one fleet entry at a time, until each one
/// fits. Rejections go back to the same agent.
pub fn populate_fleet(
    agent: &mut dyn Agent,
    rng: &mut SmallRng,
    board: &mut Board,
) -> anyhow::Result<()> {
    for (index, ship) in FLEET.iter().copied().enumerate() {
        loop {
            let placement = agent.propose_placement(rng, board, ship, index)?;
            match board.place(&placement) {
                Ok(()) => break,
                Err(e) => {
                    trace!("rejected {}: {}", placement, e);
                    agent.placement_rejected(&placement, &e);
                }
            }
        }
    }
    agent.fleet_placed(board);
    Ok(())
}

/// Uniformly random coordinate that is neither Hit nor Miss on `grid`.
/// Loops until one is found; the caller must not ask on a fully resolved
/// grid.
pub fn random_target<R: Rng + ?Sized>(rng: &mut R, grid: &Grid) -> Coord {
    loop {
        let coord = Coord::new(rng.random_range(0..BOARD_SIZE), rng.random_range(0..BOARD_SIZE));
        if !grid.cell(coord).is_some_and(|c| c.is_resolved()) {
            return coord;
        }
    }
}

/// Scripted opponent: random placement, random fresh targets.
pub struct ComputerAgent {
    think_time: Duration,
}

impl ComputerAgent {
    /// Computer that moves without delay.
    pub fn new() -> Self {
        Self {
            think_time: Duration::ZERO,
        }
    }

    /// Computer that pauses before each move, purely for show.
    pub fn with_think_time(think_time: Duration) -> Self {
        Self { think_time }
    }

    #[cfg(feature = "std")]
    fn think(&self) {
        if !self.think_time.is_zero() {
            std::thread::sleep(self.think_time);
        }
    }

    #[cfg(not(feature = "std"))]
    fn think(&self) {
        let _ = self.think_time;
    }
}

impl Default for ComputerAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for ComputerAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Computer
    }

    fn propose_placement(
        &mut self,
        rng: &mut SmallRng,
        _board: &Board,
        ship: ShipType,
        _index: usize,
    ) -> anyhow::Result<Placement> {
        Ok(random_candidate(rng, ship))
    }

    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        _own: &Grid,
        opponent: &Grid,
    ) -> anyhow::Result<Coord> {
        if opponent.count(Cell::Hit) + opponent.count(Cell::Miss)
            >= BOARD_SIZE * BOARD_SIZE
        {
            anyhow::bail!("no unresolved cells left to target");
        }
        self.think();
        Ok(random_target(rng, opponent))
    }
}
