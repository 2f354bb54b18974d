//! Make/undo correctness.

use super::{find_move, play};
use crate::board::{Board, CastleSide, Color, Move, Piece, Square};

/// Every move from every position reachable in `depth` plies undoes cleanly.
fn assert_round_trips(board: &mut Board, depth: usize, color: Color) {
    if depth == 0 {
        return;
    }
    for mv in board.generate_moves(color) {
        let before = board.clone();
        board.make_move(mv);
        assert_eq!(board.hash(), board.calculate_hash(), "hash drift after {mv}");
        assert_round_trips(board, depth - 1, color.opponent());
        assert_eq!(board.undo_move(), mv);
        assert_eq!(*board, before, "undo of {mv} changed the board");
    }
}

#[test]
fn round_trip_from_start_to_depth_four() {
    let mut board = Board::new();
    assert_round_trips(&mut board, 4, Color::White);
    assert_eq!(board, Board::new());
}

#[test]
fn round_trip_in_a_busy_position() {
    let mut board =
        Board::from_placement("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R")
            .expect("valid placement");
    assert_round_trips(&mut board, 2, Color::White);
}

#[test]
fn en_passant_make_and_undo() {
    let mut board = Board::new();
    play(&mut board, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);
    let before = board.clone();

    let mv = find_move(&board, "e5", "d6");
    assert!(matches!(mv, Move::EnPassant { .. }));
    board.make_move(mv);
    assert_eq!(board.piece_at(Square(4, 3)), None);
    assert_eq!(board.piece_at(Square(5, 3)), Some((Color::White, Piece::Pawn)));
    assert_eq!(board.piece_count(Color::Black, Piece::Pawn), 7);
    assert_eq!(board.pieces(), 31);
    assert_eq!(board.hash(), board.calculate_hash());

    board.undo_move();
    assert_eq!(board, before);
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut board = Board::new();
    play(&mut board, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);
    play(&mut board, &[("h2", "h3"), ("a6", "a5")]);
    let moves = board.generate_moves(Color::White);
    assert!(!moves.iter().any(|m| matches!(m, Move::EnPassant { .. })));
}

#[test]
fn capturing_promotion_make_and_undo() {
    let mut board = Board::from_placement("1r5k/P7/8/8/8/8/8/7K").expect("valid placement");
    let before = board.clone();
    let mv = Move::Promotion {
        from: Square(6, 0),
        to: Square(7, 1),
        promoted: Piece::Knight,
        captured: Some(Piece::Rook),
    };
    assert!(board.generate_moves(Color::White).contains(&mv));

    board.make_move(mv);
    assert_eq!(board.piece_at(Square(7, 1)), Some((Color::White, Piece::Knight)));
    assert_eq!(board.piece_count(Color::White, Piece::Pawn), 0);
    assert_eq!(board.piece_count(Color::White, Piece::Knight), 1);
    assert_eq!(board.piece_count(Color::Black, Piece::Rook), 0);
    assert_eq!(board.hash(), board.calculate_hash());

    board.undo_move();
    assert_eq!(board, before);
}

#[test]
fn castling_moves_both_pieces_and_undo_clears_markers() {
    let mut board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").expect("valid placement");
    let before = board.clone();

    board.make_move(Move::Castle {
        color: Color::White,
        side: CastleSide::QueenSide,
    });
    assert_eq!(board.piece_at(Square(0, 2)), Some((Color::White, Piece::King)));
    assert_eq!(board.piece_at(Square(0, 3)), Some((Color::White, Piece::Rook)));
    assert!(board.is_empty_square(Square(0, 0)));
    assert!(board.is_empty_square(Square(0, 4)));
    assert_ne!(board.castling().king(Color::White), 0);
    assert_ne!(board.castling().rook(Color::White, CastleSide::QueenSide), 0);
    assert_eq!(board.castling().rook(Color::White, CastleSide::KingSide), 0);
    assert_eq!(board.hash(), board.calculate_hash());

    board.undo_move();
    assert_eq!(board, before);
    assert!(board.castling().can_castle(Color::White, CastleSide::QueenSide));
}

#[test]
fn first_move_stamps_marker_and_later_moves_keep_it() {
    let mut board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").expect("valid placement");
    play(&mut board, &[("h1", "h2"), ("a8", "a7")]);
    let stamp = board.castling().rook(Color::White, CastleSide::KingSide);
    assert_eq!(stamp, 1);

    play(&mut board, &[("h2", "h1"), ("a7", "a8")]);
    assert_eq!(board.castling().rook(Color::White, CastleSide::KingSide), stamp);
    assert!(!board.castling().can_castle(Color::White, CastleSide::KingSide));

    // Undoing the return trip must not clear the stamp from the first move.
    board.undo_move();
    board.undo_move();
    assert_eq!(board.castling().rook(Color::White, CastleSide::KingSide), stamp);
    board.undo_move();
    board.undo_move();
    assert_eq!(board.castling().rook(Color::White, CastleSide::KingSide), 0);
}

#[test]
fn capturing_a_rook_on_its_corner_revokes_that_side() {
    let mut board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").expect("valid placement");
    play(&mut board, &[("h1", "h8")]);
    assert!(!board.castling().can_castle(Color::Black, CastleSide::KingSide));
    assert!(board.castling().can_castle(Color::Black, CastleSide::QueenSide));
    board.undo_move();
    assert!(board.castling().can_castle(Color::Black, CastleSide::KingSide));
}

#[test]
fn king_capture_ends_the_game_and_undoes() {
    let mut board = Board::from_placement("4k3/8/8/8/8/8/4R3/4K3").expect("valid placement");
    let before = board.clone();
    let mv = find_move(&board, "e2", "e8");
    assert!(mv.captures_king());

    board.make_move(mv);
    assert!(board.king_taken(Color::Black));
    assert!(board.is_terminal());
    assert_eq!(board.find_king(Color::Black), None);

    board.undo_move();
    assert_eq!(board, before);
    assert!(!board.is_terminal());
}

#[test]
fn phase_follows_piece_count() {
    let mut board = Board::new();
    let phase = board.phase();
    play(&mut board, &[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);
    assert_eq!(board.pieces(), 31);
    assert_eq!(board.phase(), phase);
    board.undo_move();
    assert_eq!(board.pieces(), 32);
}

#[test]
#[should_panic(expected = "empty history")]
fn undo_on_empty_history_panics() {
    let mut board = Board::new();
    board.undo_move();
}
