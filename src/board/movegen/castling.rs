use super::super::{Board, CastleSide, Color, Move, MoveList, Piece, Square};

impl Board {
    /// Castling moves whose rights are intact and whose king path is safe.
    pub(super) fn generate_castling(&self, color: Color, moves: &mut MoveList) {
        let rank = color.back_rank();
        if self.piece_at(Square(rank, 4)) != Some((color, Piece::King)) {
            return;
        }
        for side in CastleSide::BOTH {
            if self.castle_allowed(color, side) {
                moves.push(Move::Castle { color, side });
            }
        }
    }

    fn castle_allowed(&self, color: Color, side: CastleSide) -> bool {
        let rank = color.back_rank();
        if !self.castling.can_castle(color, side) {
            return false;
        }
        let rook_file = side.rook_from_file();
        if self.piece_at(Square(rank, rook_file)) != Some((color, Piece::Rook)) {
            return false;
        }
        let (lo, hi) = (rook_file.min(4) + 1, rook_file.max(4));
        if (lo..hi).any(|file| !self.is_empty_square(Square(rank, file))) {
            return false;
        }
        if self.in_check(color) {
            return false;
        }

        // Walk the king one file at a time on a scratch board.
        let mut probe = self.clone();
        let step: isize = if side == CastleSide::KingSide { 1 } else { -1 };
        let mut king = Square(rank, 4);
        while king.file() != side.king_to_file() {
            let Some(next) = king.offset(0, step) else {
                return false;
            };
            probe.make_move(Move::Regular {
                from: king,
                to: next,
                piece: Piece::King,
                captured: None,
            });
            if probe.in_check(color) {
                return false;
            }
            king = next;
        }
        true
    }
}
