//! Board tests - locking, line clears, scoring and game over

use blockfall::core::{Board, Piece, ScriptedEvents, TickReport};
use blockfall::types::{
    BoardConfig, Direction, GameAction, GameStatus, PieceKind, Rgb, CELL_HEIGHT, CELL_WIDTH,
};

/// Leftmost cell column on a 16-wide board
const LEFT_COL_X: i32 = 8;
/// Lowest cell row on a 30-high board
const BOTTOM_ROW_Y: i32 = 589;

fn tall_board() -> Board {
    Board::new(BoardConfig::new(16, 30), 7)
}

/// Locked piece filling row `y` on columns `cols`
fn row_piece(y: i32, cols: std::ops::Range<i32>) -> Piece {
    let offsets: Vec<(i32, i32)> = cols.map(|c| (c, 0)).collect();
    Piece::new(PieceKind::I, &offsets, LEFT_COL_X, y, Rgb::RED, true)
}

/// Single-cell piece at pixel position `(x, y)`
fn block(x: i32, y: i32) -> Piece {
    Piece::new(PieceKind::O, &[(0, 0)], x, y, Rgb::ORANGE, false)
}

fn tick(board: &mut Board, actions: &[GameAction]) -> TickReport {
    let mut events = ScriptedEvents::new();
    events.extend(actions.iter().copied());
    board.tick(&mut events).unwrap()
}

#[test]
fn test_i_piece_locks_on_bottom_border_contact() {
    let mut board = tall_board();
    board.spawn_piece(PieceKind::I);

    // Rows 49..=589 are free: 27 falls reach the bottom row.
    for step in 1..=27 {
        let report = tick(&mut board, &[GameAction::Tick]);
        assert_eq!(report.locked, None, "locked early at step {}", step);
    }
    assert_eq!(board.active().unwrap().origin(), (168, BOTTOM_ROW_Y));

    let report = tick(&mut board, &[GameAction::Tick]);
    assert!(report.rejected);
    assert_eq!(report.locked, Some(PieceKind::I));
    assert!(!report.game_over);
    assert_eq!(board.pieces()[0].origin(), (168, BOTTOM_ROW_Y));
    assert!(board.new_piece_pending());
}

#[test]
fn test_piece_locks_when_resting_on_another() {
    let mut board = tall_board();
    board.insert_locked(row_piece(BOTTOM_ROW_Y, 6..12));
    board.spawn_piece(PieceKind::O);

    let mut locked_at = None;
    for _ in 0..40 {
        let report = tick(&mut board, &[GameAction::Tick]);
        if report.locked.is_some() {
            locked_at = Some(board.pieces()[1].origin());
            break;
        }
    }
    // The O covers rows 549 and 569, directly above the locked row.
    assert_eq!(locked_at, Some((168, 549)));
}

#[test]
fn test_row_clears_only_when_complete() {
    let mut board = tall_board();
    board.insert_locked(row_piece(BOTTOM_ROW_Y, 0..14));
    board.insert_active(block(LEFT_COL_X + 14 * CELL_WIDTH, BOTTOM_ROW_Y));

    // 15 of 16 cells: locks without clearing.
    let report = tick(&mut board, &[GameAction::Tick]);
    assert_eq!(report.locked, Some(PieceKind::O));
    assert!(report.rows_cleared.is_empty());
    assert_eq!(board.cells_in_row(BOTTOM_ROW_Y), 15);
    assert_eq!(board.score(), 0);

    board.insert_active(block(LEFT_COL_X + 15 * CELL_WIDTH, BOTTOM_ROW_Y));
    let report = tick(&mut board, &[GameAction::Tick]);
    assert_eq!(report.rows_cleared.as_slice(), &[BOTTOM_ROW_Y]);
    assert_eq!(board.cells_in_row(BOTTOM_ROW_Y), 0);
    assert!(board.pieces().is_empty());
}

#[test]
fn test_cleared_row_scores_width_times_point_value() {
    let mut board = tall_board();
    board.insert_locked(row_piece(BOTTOM_ROW_Y, 0..15));
    board.insert_active(block(LEFT_COL_X + 15 * CELL_WIDTH, BOTTOM_ROW_Y));

    let report = tick(&mut board, &[GameAction::Tick]);
    assert_eq!(board.score(), 16 * 100);
    assert!(!report.speedup);
    assert_eq!(board.speed(), 1.0);
    assert_eq!(board.status_line(), "SCORE: 1600   SPEED: 1x");
}

#[test]
fn test_two_rows_in_one_lock_speed_up_once() {
    let upper = BOTTOM_ROW_Y - CELL_HEIGHT;
    let mut board = tall_board();
    board.insert_locked(row_piece(upper, 0..15));
    board.insert_locked(row_piece(BOTTOM_ROW_Y, 0..15));
    board.insert_active(Piece::new(
        PieceKind::J,
        &[(0, 0), (0, 1)],
        LEFT_COL_X + 15 * CELL_WIDTH,
        upper,
        Rgb::BLUE,
        true,
    ));

    let report = tick(&mut board, &[GameAction::Tick]);
    assert_eq!(report.rows_cleared.as_slice(), &[upper, BOTTOM_ROW_Y]);
    assert!(report.speedup);
    assert_eq!(board.score(), 3200);
    assert_eq!(board.speed(), 1.5);
    assert_eq!(board.progression().score_level(), 4000);
    assert_eq!(board.fall_interval_ms(), 666);
    assert!(board.pieces().is_empty());
}

#[test]
fn test_clear_shifts_rows_above_down() {
    // 4x6 board: columns at x = 8, 28, 48, 68; rows at y = 49..=109.
    let mut board = Board::new(BoardConfig::new(4, 6), 1);
    assert_eq!(board.geometry().cells_per_line, 4);

    board.insert_locked(row_piece(109, 0..3));
    board.insert_locked(block(8, 89));
    board.insert_active(Piece::new(PieceKind::J, &[(0, 0), (0, -1)], 68, 109, Rgb::BLUE, true));

    let report = tick(&mut board, &[GameAction::Tick]);
    assert_eq!(report.locked, Some(PieceKind::J));
    assert_eq!(report.rows_cleared.as_slice(), &[109]);
    assert_eq!(board.score(), 400);

    // The full row piece is gone; both leftovers dropped one row.
    assert_eq!(board.pieces().len(), 2);
    assert_eq!(board.cells_in_row(109), 2);
    assert_eq!(board.cells_in_row(89), 0);
    assert_eq!(board.pieces()[0].cells()[0].y, 109);
    assert_eq!(board.pieces()[1].cells()[0].y, 109);
}

#[test]
fn test_blocked_spawn_is_game_over() {
    let mut board = tall_board();
    board.insert_locked(Piece::new(
        PieceKind::I,
        &[(0, 0), (1, 0), (2, 0), (3, 0)],
        168,
        69,
        Rgb::RED,
        true,
    ));
    board.spawn_piece(PieceKind::I);

    let report = tick(&mut board, &[]);
    assert!(report.game_over);
    assert_eq!(report.locked, Some(PieceKind::I));
    assert_eq!(board.status(), GameStatus::GameOver);
    assert!(!board.is_running());

    // Nothing happens after game over.
    assert_eq!(tick(&mut board, &[GameAction::Tick]), TickReport::default());
}

#[test]
fn test_piece_resting_below_spawn_is_not_game_over() {
    let mut board = tall_board();
    board.insert_locked(block(168, 89));
    board.spawn_piece(PieceKind::I);

    let report = tick(&mut board, &[GameAction::Tick]);
    assert_eq!(report.locked, Some(PieceKind::I));
    assert!(!report.game_over);
    assert!(board.is_running());
}

#[test]
fn test_o_rotation_at_spawn_changes_nothing() {
    let mut board = tall_board();
    board.spawn_piece(PieceKind::O);
    let before = board.active().unwrap().clone();

    let report = tick(&mut board, &[GameAction::Rotate]);
    assert!(!report.rejected);
    assert_eq!(board.active().unwrap(), &before);
}

#[test]
fn test_side_wall_stops_movement() {
    let mut board = tall_board();
    board.spawn_piece(PieceKind::O);

    // Spawn column is 8 of 16; eight moves reach the left wall.
    for _ in 0..8 {
        let report = tick(&mut board, &[GameAction::Move(Direction::Left)]);
        assert!(!report.rejected);
    }
    assert_eq!(board.active().unwrap().origin(), (LEFT_COL_X, 49));

    let report = tick(&mut board, &[GameAction::Move(Direction::Left)]);
    assert!(report.rejected);
    assert_eq!(board.active().unwrap().origin(), (LEFT_COL_X, 49));
}

#[test]
fn test_moving_into_a_piece_is_rejected() {
    let mut board = tall_board();
    board.insert_locked(block(128, 69));
    board.spawn_piece(PieceKind::O);

    // O covers columns 168 and 188: one step left is free, two hit the block.
    let report = tick(&mut board, &[GameAction::Move(Direction::Left)]);
    assert!(!report.rejected);
    let report = tick(&mut board, &[GameAction::Move(Direction::Left)]);
    assert!(report.rejected);
    assert_eq!(board.active().unwrap().origin(), (148, 49));
}

#[test]
fn test_events_after_quit_are_still_applied() {
    let mut board = tall_board();
    board.spawn_piece(PieceKind::T);

    let report = tick(
        &mut board,
        &[GameAction::Quit, GameAction::Move(Direction::Right)],
    );
    assert!(report.quit);
    assert_eq!(board.status(), GameStatus::Quit);
    assert_eq!(board.active().unwrap().origin(), (188, 49));
}
