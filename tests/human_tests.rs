#![cfg(feature = "std")]

use std::io::{self, Cursor, Write};

use broadside::{
    populate_fleet, Agent, Board, Cell, ComputerAgent, Coord, HumanAgent, Match, MatchPhase,
    PlacementMode, PlayerSlot, TurnReport, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const MANUAL_FLEET: &str = concat!(
    "A8\nH\n",    // battleship runs off the board
    "A1\nQ\nH\n", // bad orientation, asked again
    "B1\nH\n",
    "C1\nv\n",
    "C3\nH\n",
    "E3\nH\n",
    "J1\nH\n",
    "I5\n",
    "I7\n",
    "I9\n",
    "J10\n",
);

/// Output that rejects every write, like a closed terminal.
struct BrokenDisplay;

impl Write for BrokenDisplay {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("display gone"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("display gone"))
    }
}

fn human(script: &str, mode: PlacementMode) -> HumanAgent<Cursor<Vec<u8>>, Vec<u8>> {
    HumanAgent::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), mode)
}

fn blind_human(script: &str, mode: PlacementMode) -> HumanAgent<Cursor<Vec<u8>>, BrokenDisplay> {
    HumanAgent::new(Cursor::new(script.as_bytes().to_vec()), BrokenDisplay, mode)
}

#[test]
fn test_manual_placement_retries_until_valid() {
    let mut agent = human(MANUAL_FLEET, PlacementMode::Manual);
    let mut rng = SmallRng::seed_from_u64(1);
    let mut board = Board::new();
    populate_fleet(&mut agent, &mut rng, &mut board).unwrap();

    assert_eq!(board.fleet_cells(), TOTAL_SHIP_CELLS);
    for col in 0..4 {
        assert_eq!(board.cell(Coord::new(0, col)), Some(Cell::Ship));
    }
    assert_eq!(board.cell(Coord::new(0, 4)), Some(Cell::Water));
    // vertical cruiser down column 1 from C1
    for row in 2..5 {
        assert_eq!(board.cell(Coord::new(row, 0)), Some(Cell::Ship));
    }
    assert_eq!(board.cell(Coord::new(9, 9)), Some(Cell::Ship));

    let out = String::from_utf8(agent.into_output()).unwrap();
    assert!(out.contains("Invalid position"));
    assert!(out.contains("Invalid orientation"));
    assert!(out.contains("Your fleet:"));
}

#[test]
fn test_automatic_placement_needs_no_input() {
    let mut agent = human("", PlacementMode::Automatic);
    let mut rng = SmallRng::seed_from_u64(5);
    let mut board = Board::new();
    populate_fleet(&mut agent, &mut rng, &mut board).unwrap();
    assert_eq!(board.fleet_cells(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_target_prompt_skips_garbage() {
    let mut agent = human("zz\n\nB7\n", PlacementMode::Automatic);
    let mut rng = SmallRng::seed_from_u64(5);
    let grid = Board::new().render(false);
    let target = agent.select_target(&mut rng, &grid, &grid).unwrap();
    assert_eq!(target, Coord::new(1, 6));
    let out = String::from_utf8(agent.into_output()).unwrap();
    assert_eq!(out.matches("Invalid position").count(), 2);
    assert!(out.contains("   1 2 3 4 5 6 7 8 9 10"));
}

#[test]
fn test_closed_input_is_an_error() {
    let mut agent = human("", PlacementMode::Manual);
    let mut rng = SmallRng::seed_from_u64(5);
    let grid = Board::new().render(false);
    assert!(agent.select_target(&mut rng, &grid, &grid).is_err());

    let mut board = Board::new();
    let mut agent = human("", PlacementMode::Manual);
    assert!(populate_fleet(&mut agent, &mut rng, &mut board).is_err());
}

#[test]
fn test_reports_are_announced() {
    let mut agent = human("", PlacementMode::Automatic);
    agent.handle_report(&TurnReport::Hit(Coord::new(0, 0)));
    agent.handle_report(&TurnReport::Miss(Coord::new(1, 1)));
    agent.handle_opponent_report(&TurnReport::Hit(Coord::new(2, 2)));
    let out = String::from_utf8(agent.into_output()).unwrap();
    assert!(out.contains("A1: you hit an enemy ship!"));
    assert!(out.contains("B2: splash"));
    assert!(out.contains("The enemy hit your ship at C3."));

    let mut quiet = human("", PlacementMode::Automatic).with_opponent_reports(false);
    quiet.handle_opponent_report(&TurnReport::Miss(Coord::new(2, 2)));
    assert!(quiet.into_output().is_empty());
}

#[test]
fn test_broken_display_does_not_end_the_match() {
    let mut game = Match::new(
        PlayerSlot::new("Ana", Box::new(blind_human("A1\n", PlacementMode::Automatic))),
        PlayerSlot::new("Computer", Box::new(ComputerAgent::new())),
        SmallRng::seed_from_u64(11),
    );
    game.setup().unwrap();
    let report = game.play_turn().unwrap();
    assert_eq!(report.target(), Coord::new(0, 0));
    assert!(!matches!(report, TurnReport::Rejected { .. }));
    assert_eq!(game.phase(), MatchPhase::InProgress);
}

#[test]
fn test_broken_display_still_reads_manual_input() {
    let mut agent = blind_human(MANUAL_FLEET, PlacementMode::Manual);
    let mut rng = SmallRng::seed_from_u64(1);
    let mut board = Board::new();
    populate_fleet(&mut agent, &mut rng, &mut board).unwrap();
    assert_eq!(board.fleet_cells(), TOTAL_SHIP_CELLS);

    let mut agent = blind_human("zz\nB7\n", PlacementMode::Automatic);
    let grid = Board::new().render(false);
    assert_eq!(agent.select_target(&mut rng, &grid, &grid).unwrap(), Coord::new(1, 6));
    // end of input still aborts
    assert!(agent.select_target(&mut rng, &grid, &grid).is_err());
}
