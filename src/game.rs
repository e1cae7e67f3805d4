//! Match orchestration: two player slots, turn alternation and win detection.

use alloc::boxed::Box;
use alloc::string::String;
use log::{debug, info};
use rand::rngs::SmallRng;

use crate::agent::{populate_fleet, Agent, AgentKind};
use crate::board::Board;
use crate::common::{AttackOutcome, BoardError};
use crate::config::TOTAL_SHIP_CELLS;
use crate::coord::Coord;

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchPhase {
    Setup,
    InProgress,
    Finished,
}

/// What happened on one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnReport {
    Hit(Coord),
    Miss(Coord),
    /// Nothing changed on the defender's board.
    Rejected { target: Coord, reason: BoardError },
}

impl TurnReport {
    /// Whether the attacker moves again. Only a confirmed miss passes the
    /// turn.
    pub fn continues(&self) -> bool {
        !matches!(self, TurnReport::Miss(_))
    }

    pub fn target(&self) -> Coord {
        match *self {
            TurnReport::Hit(c) | TurnReport::Miss(c) => c,
            TurnReport::Rejected { target, .. } => target,
        }
    }
}

/// Running totals for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    pub shots: usize,
    pub hits: usize,
    pub misses: usize,
    pub rejected: usize,
}

impl PlayerStats {
    fn record(&mut self, report: &TurnReport) {
        match report {
            TurnReport::Hit(_) => {
                self.shots += 1;
                self.hits += 1;
            }
            TurnReport::Miss(_) => {
                self.shots += 1;
                self.misses += 1;
            }
            TurnReport::Rejected { .. } => self.rejected += 1,
        }
    }
}

/// One turn: ask `agent` for a target and resolve it on `defender`.
/// Invalid and repeated targets come back as [`TurnReport::Rejected`].
pub fn take_turn(
    agent: &mut dyn Agent,
    rng: &mut SmallRng,
    attacker: &Board,
    defender: &mut Board,
) -> anyhow::Result<TurnReport> {
    let own = attacker.render(false);
    let opponent = defender.render(true);
    let target = agent.select_target(rng, &own, &opponent)?;
    let report = match defender.attack(target) {
        Ok(AttackOutcome::Hit) => TurnReport::Hit(target),
        Ok(AttackOutcome::Miss) => TurnReport::Miss(target),
        Ok(AttackOutcome::AlreadyAttacked) => TurnReport::Rejected {
            target,
            reason: BoardError::AlreadyAttacked(target),
        },
        Err(reason) => TurnReport::Rejected { target, reason },
    };
    Ok(report)
}

/// True once either fleet is fully hit.
pub fn is_over(a: &Board, b: &Board) -> bool {
    a.is_defeated() || b.is_defeated()
}

/// A board together with the agent playing it.
pub struct PlayerSlot {
    name: String,
    kind: AgentKind,
    board: Board,
    agent: Box<dyn Agent>,
    stats: PlayerStats,
}

impl PlayerSlot {
    pub fn new(name: impl Into<String>, agent: Box<dyn Agent>) -> Self {
        let kind = agent.kind();
        Self {
            name: name.into(),
            kind,
            board: Board::new(),
            agent,
            stats: PlayerStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn stats(&self) -> PlayerStats {
        self.stats
    }
}

/// Two slots and the index of the one attacking.
pub struct Match {
    slots: [PlayerSlot; 2],
    attacker: usize,
    placed: [bool; 2],
    phase: MatchPhase,
    turns: usize,
    rng: SmallRng,
}

impl Match {
    /// New match in the setup phase. `first` attacks first.
    pub fn new(first: PlayerSlot, second: PlayerSlot, rng: SmallRng) -> Self {
        Self {
            slots: [first, second],
            attacker: 0,
            placed: [false; 2],
            phase: MatchPhase::Setup,
            turns: 0,
            rng,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Slot at `index`, or `None` past the second player.
    pub fn slot(&self, index: usize) -> Option<&PlayerSlot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[PlayerSlot; 2] {
        &self.slots
    }

    pub fn attacker_index(&self) -> usize {
        self.attacker
    }

    pub fn attacker(&self) -> &PlayerSlot {
        &self.slots[self.attacker]
    }

    /// Turns played so far, rejected ones included.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Place the fleet for one slot. The match starts once both are done.
    pub fn setup_player(&mut self, index: usize) -> anyhow::Result<()> {
        anyhow::ensure!(index < 2, "no player slot {}", index);
        anyhow::ensure!(
            self.phase == MatchPhase::Setup,
            "fleets can only be placed during setup (phase is {:?})",
            self.phase
        );
        anyhow::ensure!(!self.placed[index], "{} has already placed a fleet", self.slots[index].name);

        let slot = &mut self.slots[index];
        populate_fleet(slot.agent.as_mut(), &mut self.rng, &mut slot.board)?;
        anyhow::ensure!(
            slot.board.fleet_cells() == TOTAL_SHIP_CELLS,
            "fleet for {} covers {} cells, expected {}",
            slot.name,
            slot.board.fleet_cells(),
            TOTAL_SHIP_CELLS
        );
        self.placed[index] = true;
        info!("{} placed their fleet", slot.name);

        if self.placed.iter().all(|&p| p) {
            self.phase = MatchPhase::InProgress;
            info!("match in progress, {} attacks first", self.slots[self.attacker].name);
        }
        Ok(())
    }

    /// Place both fleets, first slot first.
    pub fn setup(&mut self) -> anyhow::Result<()> {
        for index in 0..2 {
            if !self.placed[index] {
                self.setup_player(index)?;
            }
        }
        Ok(())
    }

    /// Play one turn for the current attacker.
    pub fn play_turn(&mut self) -> anyhow::Result<TurnReport> {
        anyhow::ensure!(
            self.phase == MatchPhase::InProgress,
            "no attacks accepted while the match is {:?}",
            self.phase
        );
        let (left, right) = self.slots.split_at_mut(1);
        let (attacker, defender) = if self.attacker == 0 {
            (&mut left[0], &mut right[0])
        } else {
            (&mut right[0], &mut left[0])
        };

        let report = take_turn(
            attacker.agent.as_mut(),
            &mut self.rng,
            &attacker.board,
            &mut defender.board,
        )?;
        self.turns += 1;
        attacker.stats.record(&report);
        attacker.agent.handle_report(&report);
        defender.agent.handle_opponent_report(&report);
        debug!("turn {}: {} -> {:?}", self.turns, attacker.name, report);

        if is_over(&attacker.board, &defender.board) {
            self.phase = MatchPhase::Finished;
            info!("match finished after {} turns, {} wins", self.turns, attacker.name);
        } else if !report.continues() {
            self.attacker = 1 - self.attacker;
        }
        Ok(report)
    }

    /// Index of the slot whose board is not defeated, once finished.
    pub fn winner(&self) -> Option<usize> {
        if self.phase != MatchPhase::Finished {
            return None;
        }
        self.slots.iter().position(|s| !s.board.is_defeated())
    }

    /// Set up any missing fleets and play until someone wins.
    pub fn run(&mut self) -> anyhow::Result<usize> {
        self.setup()?;
        while self.phase == MatchPhase::InProgress {
            self.play_turn()?;
        }
        self.winner()
            .ok_or_else(|| anyhow::anyhow!("match ended without a winner"))
    }
}
