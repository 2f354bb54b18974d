//! Static evaluation.
//!
//! Each side is scored on its own and the result is the difference, so the
//! score for one side is always the exact negation of the score for the other.

use super::pst::{self, pst_index};
use super::{Board, Color, Piece, Square};

const ROOK_PAWN_PENALTY: i32 = 15;
const ENDGAME_KNIGHT_PENALTY: i32 = 10;
const ENDGAME_BISHOP_BONUS: i32 = 10;
const EARLY_QUEEN_PENALTY: i32 = 10;
const CRAMPED_KING_PENALTY: i32 = 5;
const NO_HEAVY_PIECES_PENALTY: i32 = 500;
const ENDGAME_ROOK_BONUS: i32 = 15;
const BISHOP_PAIR_BONUS: i32 = 20;
const DOUBLED_PAWN_PENALTY: i32 = 10;
const ISOLATED_EDGE_PAWN_PENALTY: i32 = 12;
const ISOLATED_PAWN_PENALTY: i32 = 15;

impl Board {
    /// Score of the position for `side`, shifted by `offset`.
    ///
    /// Positive means `side` is better. `evaluate(c, 0) == -evaluate(c.opponent(), 0)`
    /// holds for every position.
    #[must_use]
    pub fn evaluate(&self, side: Color, offset: i32) -> i32 {
        let mut scores = [0i32; 2];
        let mut pawn_files = [[0u8; 8]; 2];
        let endgame = self.phase.is_endgame();

        for (sq, color, piece) in self.occupied() {
            let idx = pst_index(color, sq);
            let term = match piece {
                Piece::Pawn => {
                    pawn_files[color.index()][sq.file()] += 1;
                    let edge = if sq.file() == 0 || sq.file() == 7 {
                        ROOK_PAWN_PENALTY
                    } else {
                        0
                    };
                    pst::PAWN[idx] - edge
                }
                Piece::Knight => {
                    pst::KNIGHT[idx] - if endgame { ENDGAME_KNIGHT_PENALTY } else { 0 }
                }
                Piece::Bishop => {
                    pst::BISHOP[idx] + if endgame { ENDGAME_BISHOP_BONUS } else { 0 }
                }
                Piece::Rook => pst::ROOK[idx],
                Piece::Queen => {
                    let home = Square(color.back_rank(), 3);
                    let early = !endgame && sq != home;
                    pst::QUEEN[idx] - if early { EARLY_QUEEN_PENALTY } else { 0 }
                }
                Piece::King => {
                    let table = if endgame {
                        &pst::KING_END
                    } else {
                        &pst::KING_MIDDLE
                    };
                    let cramped = if self.king_escape_squares(sq) < 2 {
                        CRAMPED_KING_PENALTY
                    } else {
                        0
                    };
                    table[idx] - cramped
                }
            };
            scores[color.index()] += piece.value() + term;
        }

        for color in Color::BOTH {
            let files = &pawn_files[color.index()];
            scores[color.index()] += self.side_structure(color, endgame, files);
        }

        scores[side.index()] - scores[side.opponent().index()] + offset
    }

    /// Material-balance and pawn-structure terms for one side.
    fn side_structure(&self, color: Color, endgame: bool, pawn_files: &[u8; 8]) -> i32 {
        let count = |piece| i32::from(self.piece_count(color, piece));
        let rooks = count(Piece::Rook);
        let mut score = 0;

        if rooks == 0 && count(Piece::Queen) == 0 {
            score -= NO_HEAVY_PIECES_PENALTY;
        }
        if endgame && rooks > 0 {
            score += ENDGAME_ROOK_BONUS;
        }
        if !endgame && count(Piece::Bishop) >= 2 {
            score += BISHOP_PAIR_BONUS;
        }

        for (file, &pawns) in pawn_files.iter().enumerate() {
            if pawns == 0 {
                continue;
            }
            score -= DOUBLED_PAWN_PENALTY * (i32::from(pawns) - 1);

            let left = file > 0 && pawn_files[file - 1] > 0;
            let right = file < 7 && pawn_files[file + 1] > 0;
            if !left && !right {
                let penalty = if file == 0 || file == 7 {
                    ISOLATED_EDGE_PAWN_PENALTY
                } else {
                    ISOLATED_PAWN_PENALTY
                };
                score -= penalty * i32::from(pawns);
            }
        }
        score
    }

    /// Empty squares around a king.
    fn king_escape_squares(&self, king: Square) -> usize {
        super::attacks::KING_OFFSETS
            .iter()
            .filter_map(|&(dr, df)| king.offset(dr, df))
            .filter(|&sq| self.is_empty_square(sq))
            .count()
    }
}
