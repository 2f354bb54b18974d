use super::super::attacks::{KING_OFFSETS, KNIGHT_OFFSETS};
use super::super::{Board, Color, MoveList, Piece, Square};

impl Board {
    pub(super) fn generate_leaper_moves(
        &self,
        from: Square,
        color: Color,
        piece: Piece,
        captures_only: bool,
        moves: &mut MoveList,
    ) {
        let offsets = if piece == Piece::Knight {
            &KNIGHT_OFFSETS
        } else {
            &KING_OFFSETS
        };
        for &(dr, df) in offsets {
            if let Some(to) = from.offset(dr, df) {
                self.push_if_reachable(from, to, color, piece, captures_only, moves);
            }
        }
    }
}
