//! Move generation: castling rules and special moves.

use super::play;
use crate::board::{Board, CastleSide, Color, Move, MoveList, Piece, Square};

fn castles(moves: &MoveList, color: Color) -> Vec<CastleSide> {
    moves
        .iter()
        .filter_map(|m| match *m {
            Move::Castle { color: c, side } if c == color => Some(side),
            _ => None,
        })
        .collect()
}

fn white_castles(placement: &str) -> Vec<CastleSide> {
    let board = Board::from_placement(placement).expect("valid placement");
    castles(&board.generate_moves(Color::White), Color::White)
}

#[test]
fn both_sides_offered_when_untouched_and_unattacked() {
    assert_eq!(
        white_castles("r3k2r/8/8/8/8/8/8/R3K2R"),
        vec![CastleSide::KingSide, CastleSide::QueenSide]
    );
    let board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").expect("valid placement");
    assert_eq!(
        castles(&board.generate_moves(Color::Black), Color::Black),
        vec![CastleSide::KingSide, CastleSide::QueenSide]
    );
}

#[test]
fn attacked_transit_square_forbids_that_side() {
    // f1 attacked
    assert_eq!(
        white_castles("4kr2/8/8/8/8/8/8/R3K2R"),
        vec![CastleSide::QueenSide]
    );
    // g1 attacked
    assert_eq!(
        white_castles("4k1r1/8/8/8/8/8/8/R3K2R"),
        vec![CastleSide::QueenSide]
    );
    // d1 attacked
    assert_eq!(
        white_castles("3rk3/8/8/8/8/8/8/R3K2R"),
        vec![CastleSide::KingSide]
    );
}

#[test]
fn king_in_check_cannot_castle() {
    assert!(white_castles("k3r3/8/8/8/8/8/8/R3K2R").is_empty());
}

#[test]
fn attacked_rook_square_does_not_matter() {
    // b1 is crossed by the rook, not the king.
    assert_eq!(
        white_castles("kr6/8/8/8/8/8/8/R3K2R"),
        vec![CastleSide::KingSide, CastleSide::QueenSide]
    );
}

#[test]
fn blocked_path_forbids_castling() {
    assert_eq!(
        white_castles("r3k2r/8/8/8/8/8/8/RN2K1NR"),
        Vec::<CastleSide>::new()
    );
    assert_eq!(
        white_castles("r3k2r/8/8/8/8/8/8/R3KB1R"),
        vec![CastleSide::QueenSide]
    );
}

#[test]
fn moved_king_loses_both_sides_even_after_returning() {
    let mut board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").expect("valid placement");
    play(&mut board, &[("e1", "f1"), ("a8", "b8"), ("f1", "e1"), ("b8", "a8")]);
    assert!(castles(&board.generate_moves(Color::White), Color::White).is_empty());
    // Black's a8 rook moved too; only the kingside is left.
    assert_eq!(
        castles(&board.generate_moves(Color::Black), Color::Black),
        vec![CastleSide::KingSide]
    );
}

#[test]
fn castling_field_limits_rights() {
    let (board, side) =
        Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq").expect("valid fen");
    assert_eq!(side, Color::Black);
    assert_eq!(
        castles(&board.generate_moves(Color::White), Color::White),
        vec![CastleSide::KingSide]
    );
    assert_eq!(
        castles(&board.generate_moves(Color::Black), Color::Black),
        vec![CastleSide::QueenSide]
    );
}

#[test]
fn after_castling_markers_read_moved() {
    let mut board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").expect("valid placement");
    board.make_move(Move::Castle {
        color: Color::White,
        side: CastleSide::KingSide,
    });
    assert_eq!(board.castling().king(Color::White), 1);
    assert_eq!(board.castling().rook(Color::White, CastleSide::KingSide), 1);
    assert_eq!(board.piece_at(Square(0, 6)), Some((Color::White, Piece::King)));
    assert_eq!(board.piece_at(Square(0, 5)), Some((Color::White, Piece::Rook)));
}

#[test]
fn captures_include_en_passant_and_exclude_quiet_moves() {
    let mut board = Board::new();
    play(&mut board, &[("e2", "e4"), ("h7", "h6"), ("e4", "e5"), ("f7", "f5")]);
    let captures = board.generate_captures(Color::White);
    assert_eq!(captures.len(), 1);
    assert!(matches!(captures[0], Move::EnPassant { .. }));

    // With a6 played instead, Bxa6 sits beside the en passant capture.
    let mut board = Board::new();
    play(&mut board, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("f7", "f5")]);
    let captures = board.generate_captures(Color::White);
    assert_eq!(captures.len(), 2);
    assert_eq!(
        captures
            .iter()
            .filter(|mv| matches!(mv, Move::EnPassant { .. }))
            .count(),
        1
    );
    assert!(captures.iter().all(Move::is_capture));
}

#[test]
fn captures_only_target_enemy_pieces() {
    let board = Board::from_placement("4k3/8/8/3p4/4N3/8/8/4K3").expect("valid placement");
    let captures = board.generate_captures(Color::White);
    assert!(captures.is_empty());

    let board = Board::from_placement("4k3/8/3p4/8/4N3/8/8/4K3").expect("valid placement");
    let captures = board.generate_captures(Color::White);
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].captured(), Some(Piece::Pawn));
}

#[test]
fn capture_ordering_prefers_valuable_victims_and_cheap_attackers() {
    let board = Board::from_placement("4k3/8/8/2q1r3/3P4/8/8/3QK3").expect("valid placement");
    let mut moves = board.generate_moves(Color::White);
    moves.sort_by_capture_order();
    // Pawn takes queen first, then pawn takes rook, then quiet moves.
    assert_eq!(moves[0].to(), Square(4, 2));
    assert_eq!(moves[0].piece(), Piece::Pawn);
    assert_eq!(moves[1].to(), Square(4, 4));
    assert!(!moves[2].is_capture());
}
