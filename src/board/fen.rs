//! Position loading from FEN-style strings.
//!
//! Only piece placement, side to move and castling are read. En passant is
//! never loaded: it is derived from move history, which a loaded board lacks.

use super::error::FenError;
use super::{Board, CastleSide, Color, Piece, Square, MAX_MOVES};

impl Board {
    /// Board from the placement field of a FEN string.
    ///
    /// Castling is allowed for every king and rook standing on its home
    /// square; all other rights are marked lost.
    pub fn from_placement(placement: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        board.load_placement(placement)?;
        for color in Color::BOTH {
            for side in CastleSide::BOTH {
                board.revoke_unless_home(color, side);
            }
        }
        board.recount();
        Ok(board)
    }

    /// Board and side to move from a FEN string.
    ///
    /// Missing fields default to White to move and no castling rights.
    pub fn try_from_fen(fen: &str) -> Result<(Self, Color), FenError> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or(FenError::Empty)?;
        let mut board = Board::empty();
        board.load_placement(placement)?;

        let side = match parts.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut granted = [[false; 2]; 2];
        for c in parts.next().unwrap_or("-").chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastleSide::KingSide),
                'Q' => (Color::White, CastleSide::QueenSide),
                'k' => (Color::Black, CastleSide::KingSide),
                'q' => (Color::Black, CastleSide::QueenSide),
                '-' => continue,
                _ => return Err(FenError::InvalidCastling { char: c }),
            };
            granted[color.index()][side_index(side)] = true;
        }
        for color in Color::BOTH {
            for castle_side in CastleSide::BOTH {
                if granted[color.index()][side_index(castle_side)] {
                    board.revoke_unless_home(color, castle_side);
                } else {
                    board.castling.revoke(color, castle_side);
                }
            }
        }

        board.recount();
        Ok((board, side))
    }

    fn load_placement(&mut self, placement: &str) -> Result<(), FenError> {
        if placement.is_empty() {
            return Err(FenError::Empty);
        }
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if file >= 8 {
                    return Err(FenError::BadRankLength {
                        rank: rank + 1,
                        files: file + 1,
                    });
                }
                self.squares[rank][file] = Some((color, piece));
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankLength {
                    rank: rank + 1,
                    files: file,
                });
            }
        }
        self.check_move_capacity()
    }

    /// Reject placements whose pieces could generate more moves than a move
    /// list holds.
    fn check_move_capacity(&self) -> Result<(), FenError> {
        let mut bound = [0usize; 2];
        for (_, color, piece) in self.occupied() {
            bound[color.index()] += most_moves(piece);
        }
        for color in Color::BOTH {
            if bound[color.index()] > MAX_MOVES {
                return Err(FenError::TooManyPieces { color });
            }
        }
        Ok(())
    }

    fn revoke_unless_home(&mut self, color: Color, side: CastleSide) {
        let rank = color.back_rank();
        let king_home = self.piece_at(Square(rank, 4)) == Some((color, Piece::King));
        let rook_home =
            self.piece_at(Square(rank, side.rook_from_file())) == Some((color, Piece::Rook));
        if !(king_home && rook_home) {
            self.castling.revoke(color, side);
        }
    }
}

/// Most pseudo-legal moves one piece can generate on an open board.
const fn most_moves(piece: Piece) -> usize {
    match piece {
        // Three promoting destinations, two promotion pieces each
        Piece::Pawn => 6,
        Piece::Knight => 8,
        Piece::Bishop => 13,
        Piece::Rook => 14,
        Piece::Queen => 27,
        // Eight steps plus both castles
        Piece::King => 10,
    }
}

const fn side_index(side: CastleSide) -> usize {
    match side {
        CastleSide::KingSide => 0,
        CastleSide::QueenSide => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn start_placement_matches_new_board() {
        let board = Board::from_placement(START).expect("valid placement");
        assert_eq!(board, Board::new());
    }

    #[test]
    fn fen_reads_side_and_castling() {
        let (board, side) =
            Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1").expect("valid fen");
        assert_eq!(side, Color::Black);
        assert!(board.castling().can_castle(Color::White, CastleSide::KingSide));
        assert!(!board.castling().can_castle(Color::White, CastleSide::QueenSide));
        assert!(!board.castling().can_castle(Color::Black, CastleSide::KingSide));
        assert!(board.castling().can_castle(Color::Black, CastleSide::QueenSide));
    }

    #[test]
    fn placement_counts_pieces() {
        let board = Board::from_placement("4k3/8/8/8/8/8/4P3/4K2R").expect("valid placement");
        assert_eq!(board.pieces(), 4);
        assert_eq!(board.piece_count(Color::White, Piece::Pawn), 1);
        assert_eq!(board.piece_count(Color::White, Piece::Rook), 1);
        assert!(board.castling().can_castle(Color::White, CastleSide::KingSide));
        assert!(!board.castling().can_castle(Color::White, CastleSide::QueenSide));
    }

    #[test]
    fn missing_king_reads_as_taken() {
        let board = Board::from_placement("8/8/8/8/8/8/8/4K3").expect("valid placement");
        assert!(board.king_taken(Color::Black));
        assert!(!board.king_taken(Color::White));
        assert!(board.is_terminal());
    }

    #[test]
    fn rejects_malformed_placements() {
        assert_eq!(
            Board::from_placement("8/8/8"),
            Err(FenError::WrongRankCount { found: 3 })
        );
        assert!(matches!(
            Board::from_placement("9/8/8/8/8/8/8/8"),
            Err(FenError::BadRankLength { .. })
        ));
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8/7x"),
            Err(FenError::InvalidPiece { char: 'x' })
        );
        assert!(matches!(
            Board::try_from_fen("8/8/8/8/8/8/8/8 x"),
            Err(FenError::InvalidSideToMove { .. })
        ));
    }

    #[test]
    fn rejects_more_pieces_than_a_move_list_holds() {
        assert_eq!(
            Board::from_placement("QQQQQQQQ/QQ6/8/8/8/8/8/4K2k"),
            Err(FenError::TooManyPieces {
                color: Color::White
            })
        );
        // Nine queens and a king still fit.
        let crowded = "QQQQQQQQ/Q7/8/8/8/8/8/4K2k";
        let board = Board::from_placement(crowded).expect("fits in a move list");
        assert!(board.generate_moves(Color::White).len() <= MAX_MOVES);
    }
}
