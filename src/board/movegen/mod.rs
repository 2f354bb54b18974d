mod castling;
mod leapers;
mod pawns;
mod sliders;

use super::{Board, Color, Move, MoveList, Piece, Square};

impl Board {
    /// All pseudo-legal moves for `color`.
    ///
    /// Moves may leave the mover's king attacked; only castling is checked
    /// for legality here.
    #[must_use]
    pub fn generate_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_into(color, false, &mut moves);
        self.generate_castling(color, &mut moves);
        moves
    }

    /// Capturing moves only, for quiescence.
    #[must_use]
    pub fn generate_captures(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_into(color, true, &mut moves);
        moves
    }

    fn generate_into(&self, color: Color, captures_only: bool, moves: &mut MoveList) {
        for (from, c, piece) in self.occupied() {
            if c != color {
                continue;
            }
            match piece {
                Piece::Pawn => self.generate_pawn_moves(from, color, captures_only, moves),
                Piece::Knight | Piece::King => {
                    self.generate_leaper_moves(from, color, piece, captures_only, moves);
                }
                Piece::Bishop | Piece::Rook | Piece::Queen => {
                    self.generate_slider_moves(from, color, piece, captures_only, moves);
                }
            }
        }
    }

    /// Push a regular move or capture to `to` unless an own piece sits there.
    #[inline]
    pub(super) fn push_if_reachable(
        &self,
        from: Square,
        to: Square,
        color: Color,
        piece: Piece,
        captures_only: bool,
        moves: &mut MoveList,
    ) {
        match self.piece_at(to) {
            Some((c, _)) if c == color => {}
            Some((_, victim)) => moves.push(Move::Regular {
                from,
                to,
                piece,
                captured: Some(victim),
            }),
            None if !captures_only => moves.push(Move::Regular {
                from,
                to,
                piece,
                captured: None,
            }),
            None => {}
        }
    }

    /// Pseudo-legal leaf count at `depth` with `color` to move first.
    #[must_use]
    pub fn perft(&mut self, depth: usize, color: Color) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_moves(color);
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1, color.opponent());
            self.undo_move();
        }
        nodes
    }
}
