//! Move notation at the game boundary.
//!
//! Incoming moves arrive as coordinate descriptors (`e2e4`, `Pe7e8Q`) and are
//! resolved against the board. Outgoing moves are written as
//! `<piece><from><to>[letter]`, where the trailing letter is the promotion
//! piece for a promotion and the captured piece for any other capture.

use std::mem;
use std::str::FromStr;

use super::error::MoveParseError;
use super::{Board, CastleSide, Color, Move, Piece, Square};

/// Origin, destination and optional promotion letter of an incoming move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveDescriptor {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl MoveDescriptor {
    /// Resolve against `board` as a move by `mover`.
    ///
    /// The origin piece must belong to `mover` and the resolved move must
    /// match one `mover` can generate. A promotion may still name a rook or
    /// bishop.
    pub fn resolve(&self, board: &Board, mover: Color) -> Result<Move, MoveParseError> {
        if let Some((color, _)) = board.piece_at(self.from) {
            if color != mover {
                return Err(MoveParseError::WrongColor {
                    square: self.from.to_string(),
                });
            }
        }
        let mv = board.create_move(self.from, self.to, self.promotion)?;
        let playable = board.generate_moves(mover).iter().any(|candidate| {
            candidate.from() == mv.from()
                && candidate.to() == mv.to()
                && mem::discriminant(candidate) == mem::discriminant(&mv)
        });
        if !playable {
            return Err(MoveParseError::IllegalMove {
                notation: format!("{}{}", self.from, self.to),
            });
        }
        Ok(mv)
    }
}

impl From<Move> for MoveDescriptor {
    fn from(mv: Move) -> Self {
        MoveDescriptor {
            from: mv.from(),
            to: mv.to(),
            promotion: mv.promotion(),
        }
    }
}

impl FromStr for MoveDescriptor {
    type Err = MoveParseError;

    /// Accepts `e2e4`, `e7e8q`, and the same with a leading uppercase piece
    /// letter (`Pe2e4`, `Pe7e8Q`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut body = s;
        if let Some(first) = s.chars().next().filter(char::is_ascii_uppercase) {
            Piece::from_char(first).ok_or(MoveParseError::InvalidPiece { char: first })?;
            body = &s[1..];
        }
        if !body.is_ascii() || !(4..=5).contains(&body.len()) {
            return Err(MoveParseError::InvalidLength { len: s.len() });
        }

        let square = |part: &str| {
            part.parse::<Square>()
                .map_err(|_| MoveParseError::InvalidSquare {
                    notation: s.to_string(),
                })
        };
        let from = square(&body[0..2])?;
        let to = square(&body[2..4])?;
        // The trailing letter of a wire move names the captured piece when it
        // is not a promotion, and a captured pawn or king promotes nothing.
        let promotion = match body[4..].chars().next() {
            None | Some('P' | 'K') => None,
            Some(c) => match Piece::from_char(c) {
                Some(p @ (Piece::Queen | Piece::Rook | Piece::Knight | Piece::Bishop)) => Some(p),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };
        Ok(MoveDescriptor {
            from,
            to,
            promotion,
        })
    }
}

impl Board {
    /// Build the move taking the piece on `from` to `to`.
    ///
    /// The shape is inferred from the grid: a king stepping two files from
    /// its home square castles, a pawn moving diagonally onto an empty square
    /// captures en passant, and a pawn reaching the last rank promotes (to a
    /// queen unless `promotion` says otherwise). `promotion` is ignored for
    /// every other move.
    pub fn create_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Move, MoveParseError> {
        let (color, piece) = self.piece_at(from).ok_or(MoveParseError::EmptyOrigin {
            square: from.to_string(),
        })?;
        let captured = self.piece_at(to).map(|(_, p)| p);

        if piece == Piece::King
            && from == Square(color.back_rank(), 4)
            && to.rank() == from.rank()
            && to.file().abs_diff(from.file()) == 2
        {
            let side = if to.file() > from.file() {
                CastleSide::KingSide
            } else {
                CastleSide::QueenSide
            };
            return Ok(Move::Castle { color, side });
        }

        if piece == Piece::Pawn {
            if from.file() != to.file() && captured.is_none() {
                return Ok(Move::EnPassant { from, to });
            }
            if to.rank() == color.pawn_promotion_rank() {
                let promoted = match promotion {
                    None => Piece::Queen,
                    Some(p @ (Piece::Queen | Piece::Rook | Piece::Knight | Piece::Bishop)) => p,
                    Some(p) => return Err(MoveParseError::InvalidPromotion { char: p.letter() }),
                };
                return Ok(Move::Promotion {
                    from,
                    to,
                    promoted,
                    captured,
                });
            }
        }

        Ok(Move::Regular {
            from,
            to,
            piece,
            captured,
        })
    }
}

impl Move {
    /// Outgoing wire form: `<piece><from><to>[letter]`.
    #[must_use]
    pub fn to_wire(&self) -> String {
        let mut out = format!("{}{}{}", self.piece().letter(), self.from(), self.to());
        if let Some(letter) = self
            .promotion()
            .or_else(|| self.captured())
            .map(Piece::letter)
        {
            out.push(letter);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(s: &str) -> MoveDescriptor {
        s.parse().expect("valid descriptor")
    }

    #[test]
    fn parses_plain_and_prefixed_descriptors() {
        let plain = desc("e2e4");
        assert_eq!(plain.from, Square(1, 4));
        assert_eq!(plain.to, Square(3, 4));
        assert_eq!(plain.promotion, None);
        assert_eq!(desc("Pe2e4"), plain);
        assert_eq!(desc("Pe7e8Q").promotion, Some(Piece::Queen));
        assert_eq!(desc("e7e8n").promotion, Some(Piece::Knight));
        assert_eq!(desc("Pe4d5P").promotion, None);
    }

    #[test]
    fn rejects_bad_descriptors() {
        assert!(matches!(
            "e2".parse::<MoveDescriptor>(),
            Err(MoveParseError::InvalidLength { .. })
        ));
        assert!(matches!(
            "z2e4".parse::<MoveDescriptor>(),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert_eq!(
            "e7e8k".parse::<MoveDescriptor>(),
            Err(MoveParseError::InvalidPromotion { char: 'k' })
        );
        assert_eq!(
            "Xe2e4".parse::<MoveDescriptor>(),
            Err(MoveParseError::InvalidPiece { char: 'X' })
        );
    }

    #[test]
    fn create_move_infers_shapes() {
        let board = Board::from_placement("r3k3/1P6/8/3pP3/8/8/8/4K2R").expect("valid placement");

        assert_eq!(
            board.create_move(Square(0, 4), Square(0, 6), None),
            Ok(Move::Castle {
                color: Color::White,
                side: CastleSide::KingSide
            })
        );
        assert_eq!(
            board.create_move(Square(4, 4), Square(5, 3), None),
            Ok(Move::EnPassant {
                from: Square(4, 4),
                to: Square(5, 3)
            })
        );
        assert_eq!(
            board.create_move(Square(6, 1), Square(7, 0), None),
            Ok(Move::Promotion {
                from: Square(6, 1),
                to: Square(7, 0),
                promoted: Piece::Queen,
                captured: Some(Piece::Rook)
            })
        );
        assert_eq!(
            board.create_move(Square(6, 1), Square(7, 1), Some(Piece::Knight)),
            Ok(Move::Promotion {
                from: Square(6, 1),
                to: Square(7, 1),
                promoted: Piece::Knight,
                captured: None
            })
        );
        assert_eq!(
            board.create_move(Square(2, 2), Square(3, 2), None),
            Err(MoveParseError::EmptyOrigin {
                square: "c3".to_string()
            })
        );
    }

    #[test]
    fn resolve_checks_mover() {
        let board = Board::new();
        assert!(matches!(
            desc("e7e5").resolve(&board, Color::White),
            Err(MoveParseError::WrongColor { .. })
        ));
        assert_eq!(
            desc("Pe2e4").resolve(&board, Color::White),
            Ok(Move::Regular {
                from: Square(1, 4),
                to: Square(3, 4),
                piece: Piece::Pawn,
                captured: None
            })
        );
    }

    #[test]
    fn resolve_rejects_moves_the_board_cannot_play() {
        let mut board = Board::new();
        board.make_move(desc("e2e4").resolve(&board, Color::White).expect("opening push"));

        // A pawn stepping diagonally onto an empty square with no pawn to take.
        assert_eq!(
            desc("e7d6").resolve(&board, Color::Black),
            Err(MoveParseError::IllegalMove {
                notation: "e7d6".to_string()
            })
        );
        // Castling through the bishop and knight still at home.
        assert_eq!(
            desc("e8g8").resolve(&board, Color::Black),
            Err(MoveParseError::IllegalMove {
                notation: "e8g8".to_string()
            })
        );
        assert_eq!(
            desc("e7e4").resolve(&board, Color::Black),
            Err(MoveParseError::IllegalMove {
                notation: "e7e4".to_string()
            })
        );
    }

    #[test]
    fn resolve_accepts_underpromotion_to_rook() {
        let board = Board::from_placement("4k3/1P6/8/8/8/8/8/4K3").expect("valid placement");
        assert_eq!(
            desc("b7b8r").resolve(&board, Color::White),
            Ok(Move::Promotion {
                from: Square(6, 1),
                to: Square(7, 1),
                promoted: Piece::Rook,
                captured: None
            })
        );
    }

    #[test]
    fn wire_form_names_piece_and_trailing_letter() {
        let board = Board::from_placement("4k3/1P6/8/4q3/8/5N2/8/4K3").expect("valid placement");
        let capture = board
            .create_move(Square(2, 5), Square(4, 4), None)
            .expect("knight move");
        assert_eq!(capture.to_wire(), "Nf3e5Q");

        let promotion = board
            .create_move(Square(6, 1), Square(7, 1), None)
            .expect("promotion");
        assert_eq!(promotion.to_wire(), "Pb7b8Q");

        let castle = Move::Castle {
            color: Color::Black,
            side: CastleSide::QueenSide,
        };
        assert_eq!(castle.to_wire(), "Ke8c8");

        let push = Board::new()
            .create_move(Square(1, 4), Square(3, 4), None)
            .expect("pawn push");
        assert_eq!(push.to_wire(), "Pe2e4");
    }

    #[test]
    fn wire_form_parses_back_to_the_same_move() {
        let board = Board::from_placement("4k3/8/8/4q3/8/5N2/8/4K3").expect("valid placement");
        let mv = board
            .create_move(Square(2, 5), Square(4, 4), None)
            .expect("knight move");
        let back = desc(&mv.to_wire())
            .resolve(&board, Color::White)
            .expect("resolves");
        assert_eq!(back, mv);
    }
}
