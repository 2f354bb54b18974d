use super::super::{Board, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};

impl Board {
    pub(super) fn generate_pawn_moves(
        &self,
        from: Square,
        color: Color,
        captures_only: bool,
        moves: &mut MoveList,
    ) {
        let dir = color.pawn_direction();

        if !captures_only {
            if let Some(one) = from.offset(dir, 0).filter(|&sq| self.is_empty_square(sq)) {
                push_pawn_move(from, one, color, None, moves);
                if from.rank() == color.pawn_start_rank() {
                    let two = from.offset(2 * dir, 0).filter(|&sq| self.is_empty_square(sq));
                    if let Some(two) = two {
                        moves.push(Move::Regular {
                            from,
                            to: two,
                            piece: Piece::Pawn,
                            captured: None,
                        });
                    }
                }
            }
        }

        for df in [-1, 1] {
            if let Some(to) = from.offset(dir, df) {
                if let Some((c, victim)) = self.piece_at(to) {
                    if c != color {
                        push_pawn_move(from, to, color, Some(victim), moves);
                    }
                }
            }
        }

        // En passant only answers a double push that landed right beside us.
        if let Some(pushed) = self.last_double_push() {
            let beside = pushed.rank() == from.rank() && pushed.file().abs_diff(from.file()) == 1;
            let enemy_pawn = self.piece_at(pushed) == Some((color.opponent(), Piece::Pawn));
            if beside && enemy_pawn {
                if let Some(to) = from.offset(dir, pushed.file() as isize - from.file() as isize) {
                    if self.is_empty_square(to) {
                        moves.push(Move::EnPassant { from, to });
                    }
                }
            }
        }
    }
}

fn push_pawn_move(
    from: Square,
    to: Square,
    color: Color,
    captured: Option<Piece>,
    moves: &mut MoveList,
) {
    if to.rank() == color.pawn_promotion_rank() {
        for promoted in PROMOTION_PIECES {
            moves.push(Move::Promotion {
                from,
                to,
                promoted,
                captured,
            });
        }
    } else {
        moves.push(Move::Regular {
            from,
            to,
            piece: Piece::Pawn,
            captured,
        });
    }
}
