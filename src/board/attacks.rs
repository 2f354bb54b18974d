//! Attack detection by scanning outward from a square.

use super::{Board, Color, Piece, Square};

pub(crate) const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub(crate) const KING_OFFSETS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

impl Board {
    /// First piece met walking from `sq` in direction `(dr, df)`.
    #[inline]
    pub(crate) fn first_piece_on_ray(
        &self,
        sq: Square,
        (dr, df): (isize, isize),
    ) -> Option<(Color, Piece)> {
        let mut cur = sq;
        while let Some(next) = cur.offset(dr, df) {
            if let Some(found) = self.piece_at(next) {
                return Some(found);
            }
            cur = next;
        }
        None
    }

    /// Whether any piece of `attacker` attacks `sq`.
    #[must_use]
    pub fn is_attacked(&self, sq: Square, attacker: Color) -> bool {
        let hits = |dirs: &[(isize, isize)], slider: Piece| {
            dirs.iter().any(|&dir| {
                matches!(self.first_piece_on_ray(sq, dir),
                    Some((c, p)) if c == attacker && (p == slider || p == Piece::Queen))
            })
        };
        if hits(&ROOK_DIRECTIONS, Piece::Rook) || hits(&BISHOP_DIRECTIONS, Piece::Bishop) {
            return true;
        }

        let leaper = |offsets: &[(isize, isize)], piece: Piece| {
            offsets.iter().any(|&(dr, df)| {
                sq.offset(dr, df)
                    .and_then(|from| self.piece_at(from))
                    .is_some_and(|found| found == (attacker, piece))
            })
        };
        if leaper(&KNIGHT_OFFSETS, Piece::Knight) || leaper(&KING_OFFSETS, Piece::King) {
            return true;
        }

        // An attacking pawn stands one rank behind `sq` from its own point of view.
        let back = -attacker.pawn_direction();
        [-1, 1].into_iter().any(|df| {
            sq.offset(back, df)
                .and_then(|from| self.piece_at(from))
                .is_some_and(|found| found == (attacker, Piece::Pawn))
        })
    }

    /// Whether the king of `color` is attacked. A captured king is never in check.
    #[must_use]
    pub fn in_check(&self, color: Color) -> bool {
        self.find_king(color)
            .is_some_and(|king| self.is_attacked(king, color.opponent()))
    }
}
