//! Board module tests.
//!
//! - `perft.rs` - pseudo-legal node counts from the engine's own generator
//! - `make_unmake.rs` - make/undo restores every part of the board
//! - `movegen.rs` - castling rules and special moves
//! - `eval.rs` - evaluation symmetry and terms
//! - `search.rs` - search determinism and coordinator agreement
//! - `proptest.rs` - property-based tests over random playouts

mod make_unmake;
mod movegen;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Board, Color, Move, Square};

/// The generated move from `from` to `to`, panicking if there is none.
pub(super) fn find_move(board: &Board, from: &str, to: &str) -> Move {
    let from: Square = from.parse().expect("valid square");
    let to: Square = to.parse().expect("valid square");
    let color = board
        .piece_at(from)
        .map(|(c, _)| c)
        .expect("piece on origin");
    board
        .generate_moves(color)
        .iter()
        .copied()
        .find(|m| m.from() == from && m.to() == to)
        .unwrap_or_else(|| panic!("{from}{to} not generated"))
}

/// Play a sequence of `from to` pairs from the given board.
pub(super) fn play(board: &mut Board, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        let mv = find_move(board, from, to);
        board.make_move(mv);
    }
}

/// Play up to `plies` random pseudo-legal moves from the start, stopping at a
/// captured king.
///
/// Returns the final board, the side to move on it and the board before each
/// move played.
pub(super) fn random_playout(seed: u64, plies: usize) -> (Board, Color, Vec<Board>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut side = Color::White;
    let mut snapshots = Vec::new();
    for _ in 0..plies {
        if board.is_terminal() {
            break;
        }
        let moves = board.generate_moves(side);
        if moves.is_empty() {
            break;
        }
        snapshots.push(board.clone());
        let mv = moves[rng.gen_range(0..moves.len())];
        board.make_move(mv);
        side = side.opponent();
    }
    (board, side, snapshots)
}
