use gridchase::{random_step, Board, Direction, GameError, Position, RandomWalk, MAX_BOARD_SIZE};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_board_size_limits() {
    assert_eq!(Board::new(0).unwrap_err(), GameError::InvalidBoardSize(0));
    assert_eq!(
        Board::new(MAX_BOARD_SIZE + 1).unwrap_err(),
        GameError::InvalidBoardSize(MAX_BOARD_SIZE + 1)
    );
    assert_eq!(Board::new(MAX_BOARD_SIZE).unwrap().size(), MAX_BOARD_SIZE);
}

#[test]
fn test_cells_cover_board_once() {
    let board = Board::new(7).unwrap();
    let cells: Vec<Position> = board.cells().collect();
    assert_eq!(cells.len(), board.cell_count());
    assert!(cells.iter().all(|&c| board.contains(c)));
    let mut dedup = cells.clone();
    dedup.sort_by_key(|p| (p.row, p.col));
    dedup.dedup();
    assert_eq!(dedup.len(), cells.len());
}

#[test]
fn test_center_of_even_and_odd_boards() {
    assert_eq!(Board::new(10).unwrap().center(), Position::new(5, 5));
    assert_eq!(Board::new(9).unwrap().center(), Position::new(4, 4));
}

#[test]
fn test_step_moves_one_cell() {
    let board = Board::new(10).unwrap();
    let p = Position::new(4, 4);
    assert_eq!(board.step(p, Direction::Up), Some(Position::new(4, 3)));
    assert_eq!(board.step(p, Direction::Down), Some(Position::new(4, 5)));
    assert_eq!(board.step(p, Direction::Left), Some(Position::new(3, 4)));
    assert_eq!(board.step(p, Direction::Right), Some(Position::new(5, 4)));
}

#[test]
fn test_corner_walk_stays_or_moves_inward() {
    let board = Board::new(10).unwrap();
    let mut rng = SmallRng::seed_from_u64(42);
    let corner = Position::new(9, 9);
    for _ in 0..100 {
        let next = random_step(&board, corner, &mut rng);
        assert!(
            next == corner || next == Position::new(8, 9) || next == Position::new(9, 8),
            "unexpected step to {}",
            next
        );
    }
}

#[test]
fn test_walk_uses_all_directions() {
    let board = Board::new(10).unwrap();
    let mut rng = SmallRng::seed_from_u64(7);
    let start = Position::new(5, 5);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(random_step(&board, start, &mut rng));
    }
    assert_eq!(seen.len(), 4);
    assert!(!seen.contains(&start));
}

#[test]
fn test_random_walk_tracks_position() {
    let board = Board::new(6).unwrap();
    let mut walk = RandomWalk::new(board, Position::new(0, 5), 11).unwrap();
    for _ in 0..30 {
        let before = walk.position();
        let after = walk.advance();
        assert_eq!(after, walk.position());
        assert!(before.manhattan(after) <= 1);
    }
}
