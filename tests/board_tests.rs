use broadside::{
    AttackOutcome, Board, BoardError, Cell, Coord, Orientation, Placement, PlacementError,
    BOARD_SIZE, FLEET, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_new_board_is_all_water() {
    let board = Board::new();
    for coord in Coord::all() {
        assert_eq!(board.cell(coord), Some(Cell::Water));
    }
    assert_eq!(board.fleet_cells(), 0);
    assert_eq!(board.cell(Coord::new(BOARD_SIZE, 0)), None);
}

#[test]
fn test_horizontal_bounds_at_right_edge() {
    let mut board = Board::new();
    let too_far = Placement::horizontal(Coord::new(0, 7), 4);
    assert!(!board.can_place(&too_far));
    assert_eq!(
        board.place(&too_far).unwrap_err(),
        BoardError::InvalidPlacement(PlacementError::OutOfBounds)
    );
    assert_eq!(board.fleet_cells(), 0);

    let flush = Placement::horizontal(Coord::new(0, 6), 4);
    assert!(board.can_place(&flush));
    board.place(&flush).unwrap();
    for col in 6..10 {
        assert_eq!(board.cell(Coord::new(0, col)), Some(Cell::Ship));
    }
}

#[test]
fn test_vertical_bounds_at_bottom_edge() {
    let board = Board::new();
    assert!(!board.can_place(&Placement::vertical(Coord::new(8, 3), 3)));
    assert!(board.can_place(&Placement::vertical(Coord::new(7, 3), 3)));
    assert!(!board.can_place(&Placement::vertical(Coord::new(10, 3), 1)));
}

#[test]
fn test_zero_length_is_rejected() {
    let board = Board::new();
    assert_eq!(
        board.check_placement(&Placement::horizontal(Coord::new(2, 2), 0)),
        Err(PlacementError::ZeroLength)
    );
}

#[test]
fn test_overlap_rejected_without_mutation() {
    let mut board = Board::new();
    board.place(&Placement::horizontal(Coord::new(3, 2), 3)).unwrap();
    let before = board;
    let crossing = Placement::vertical(Coord::new(1, 3), 4);
    assert_eq!(
        board.place(&crossing).unwrap_err(),
        BoardError::InvalidPlacement(PlacementError::Overlap)
    );
    assert_eq!(board, before);
}

#[test]
fn test_adjacent_ships_are_allowed() {
    let mut board = Board::new();
    board.place(&Placement::horizontal(Coord::new(0, 0), 4)).unwrap();
    board.place(&Placement::horizontal(Coord::new(1, 0), 3)).unwrap();
    board.place(&Placement::vertical(Coord::new(0, 4), 2)).unwrap();
    assert_eq!(board.fleet_cells(), 9);
}

#[test]
fn test_three_hits_sink_a_cruiser_at_a1() {
    let mut board = Board::new();
    let a1: Coord = "A1".parse().unwrap();
    board.place(&Placement::new(a1, 3, Orientation::Horizontal)).unwrap();
    for name in ["A1", "A2", "A3"] {
        let c: Coord = name.parse().unwrap();
        assert_eq!(board.cell(c), Some(Cell::Ship));
    }
    assert_eq!(board.cell("A4".parse().unwrap()), Some(Cell::Water));

    assert_eq!(board.attack("A1".parse().unwrap()), Ok(AttackOutcome::Hit));
    assert!(!board.is_defeated());
    assert_eq!(board.attack("A2".parse().unwrap()), Ok(AttackOutcome::Hit));
    assert!(!board.is_defeated());
    assert_eq!(board.attack("A3".parse().unwrap()), Ok(AttackOutcome::Hit));
    assert!(board.is_defeated());
}

#[test]
fn test_repeat_attack_is_rejected() {
    let mut board = Board::new();
    board.place(&Placement::vertical(Coord::new(4, 4), 2)).unwrap();

    assert_eq!(board.attack(Coord::new(4, 4)), Ok(AttackOutcome::Hit));
    let after_hit = board;
    assert_eq!(board.attack(Coord::new(4, 4)), Ok(AttackOutcome::AlreadyAttacked));
    assert_eq!(board, after_hit);

    assert_eq!(board.attack(Coord::new(0, 0)), Ok(AttackOutcome::Miss));
    assert_eq!(board.cell(Coord::new(0, 0)), Some(Cell::Miss));
    let after_miss = board;
    assert_eq!(board.attack(Coord::new(0, 0)), Ok(AttackOutcome::AlreadyAttacked));
    assert_eq!(board, after_miss);
}

#[test]
fn test_off_board_attack_is_invalid_coordinate() {
    let mut board = Board::new();
    let before = board;
    let off = Coord::new(3, 10);
    assert_eq!(board.attack(off), Err(BoardError::InvalidCoordinate(off)));
    assert_eq!(board, before);
}

#[test]
fn test_cannot_place_over_a_miss() {
    let mut board = Board::new();
    board.attack(Coord::new(5, 5)).unwrap();
    assert!(!board.can_place(&Placement::horizontal(Coord::new(5, 4), 2)));
}

#[test]
fn test_render_hides_only_unhit_ships() {
    let mut board = Board::new();
    board.place(&Placement::horizontal(Coord::new(2, 2), 2)).unwrap();
    board.attack(Coord::new(2, 2)).unwrap();
    board.attack(Coord::new(9, 9)).unwrap();

    let open = board.render(false);
    assert_eq!(open.cell(Coord::new(2, 3)), Some(Cell::Ship));
    assert_eq!(open.cell(Coord::new(2, 2)), Some(Cell::Hit));

    let hidden = board.render(true);
    assert_eq!(hidden.cell(Coord::new(2, 3)), Some(Cell::Water));
    assert_eq!(hidden.cell(Coord::new(2, 2)), Some(Cell::Hit));
    assert_eq!(hidden.cell(Coord::new(9, 9)), Some(Cell::Miss));
    assert_eq!(hidden.count(Cell::Ship), 0);
}

#[test]
fn test_initialize_clears_everything() {
    let mut board = Board::new();
    board.place(&Placement::horizontal(Coord::new(0, 0), 4)).unwrap();
    board.attack(Coord::new(0, 0)).unwrap();
    board.attack(Coord::new(9, 0)).unwrap();
    board.initialize();
    assert_eq!(board, Board::new());
}

#[test]
fn test_random_fleet_covers_every_segment() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut board = Board::new();
    board.place_fleet_randomly(&mut rng).unwrap();
    assert_eq!(board.fleet_cells(), TOTAL_SHIP_CELLS);
    assert_eq!(board.render(false).count(Cell::Ship), TOTAL_SHIP_CELLS);
    assert_eq!(TOTAL_SHIP_CELLS, 20);
    assert_eq!(FLEET.iter().map(|s| s.length()).sum::<usize>(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_random_placement_is_reproducible() {
    let mut rng1 = SmallRng::seed_from_u64(7);
    let mut rng2 = SmallRng::seed_from_u64(7);
    let mut b1 = Board::new();
    let mut b2 = Board::new();
    b1.place_fleet_randomly(&mut rng1).unwrap();
    b2.place_fleet_randomly(&mut rng2).unwrap();
    assert_eq!(b1, b2);
}

#[test]
fn test_empty_board_counts_as_defeated() {
    assert!(Board::new().is_defeated());
}
