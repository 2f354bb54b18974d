use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{CastleSide, CastlingMarkers, Color, Move, Piece, Square};
use crate::zobrist::ZOBRIST;

/// Stage of the game, a step function of the live-piece counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GamePhase {
    Opening,
    Middle,
    End,
    LateEnd,
}

impl GamePhase {
    const MIDDLE_PIECES: u8 = 19;
    const END_PIECES: u8 = 14;
    const LATE_END_PIECES: u8 = 9;

    /// Phase for a given number of live pieces.
    ///
    /// A boundary is crossed downward once `pieces` reaches it and upward only
    /// once `pieces` strictly exceeds it, so make and undo agree.
    #[inline]
    #[must_use]
    pub const fn from_pieces(pieces: u8) -> Self {
        if pieces > Self::MIDDLE_PIECES {
            GamePhase::Opening
        } else if pieces > Self::END_PIECES {
            GamePhase::Middle
        } else if pieces > Self::LATE_END_PIECES {
            GamePhase::End
        } else {
            GamePhase::LateEnd
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_endgame(self) -> bool {
        matches!(self, GamePhase::End | GamePhase::LateEnd)
    }
}

/// One entry of the move-history stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Played {
    pub mv: Move,
    /// Board hash before `mv` was made
    pub hash_before: u64,
}

/// Mailbox board with make/undo history.
///
/// Cloning deep-copies the grid, counters and history, so a clone can be
/// searched or probed without touching the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    // squares[rank][file]
    pub(crate) squares: [[Option<(Color, Piece)>; 8]; 8],
    // piece_count[color][piece] for non-king kinds
    pub(crate) piece_count: [[u8; 5]; 2],
    pub(crate) pieces: u8,
    pub(crate) king_taken: [bool; 2],
    pub(crate) castling: CastlingMarkers,
    pub(crate) phase: GamePhase,
    pub(crate) history: Vec<Played>,
    pub(crate) hash: u64,
}

impl Board {
    /// Standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (i, piece) in back_rank.iter().enumerate() {
            board.squares[0][i] = Some((Color::White, *piece));
            board.squares[7][i] = Some((Color::Black, *piece));
            board.squares[1][i] = Some((Color::White, Piece::Pawn));
            board.squares[6][i] = Some((Color::Black, Piece::Pawn));
        }
        board.recount();
        board
    }

    /// Board with no pieces, all castling markers at 0 and no history.
    #[must_use]
    pub fn empty() -> Self {
        let mut board = Board {
            squares: [[None; 8]; 8],
            piece_count: [[0; 5]; 2],
            pieces: 0,
            king_taken: [false; 2],
            castling: CastlingMarkers::new(),
            phase: GamePhase::LateEnd,
            history: Vec::new(),
            hash: 0,
        };
        board.hash = board.calculate_hash();
        board
    }

    /// Rebuild counters, king flags, phase and hash from the grid.
    ///
    /// Used after a position is loaded square by square.
    pub(crate) fn recount(&mut self) {
        let mut counts = [[0; 5]; 2];
        let mut pieces = 0;
        let mut kings = [false; 2];
        for (_, color, piece) in self.occupied() {
            pieces += 1;
            match piece {
                Piece::King => kings[color.index()] = true,
                _ => counts[color.index()][piece.index()] += 1,
            }
        }
        self.piece_count = counts;
        self.pieces = pieces;
        self.king_taken = [!kings[0], !kings[1]];
        self.phase = GamePhase::from_pieces(self.pieces);
        self.hash = self.calculate_hash();
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.squares[sq.0][sq.1]
    }

    #[inline]
    #[must_use]
    pub fn is_empty_square(&self, sq: Square) -> bool {
        self.squares[sq.0][sq.1].is_none()
    }

    /// Number of live pieces of a non-king kind.
    ///
    /// # Panics
    /// If `piece` is the king; kings are tracked by [`Board::king_taken`].
    #[inline]
    #[must_use]
    pub fn piece_count(&self, color: Color, piece: Piece) -> u8 {
        assert!(piece != Piece::King, "kings are not counted");
        self.piece_count[color.index()][piece.index()]
    }

    /// Live pieces on the board, kings included
    #[inline]
    #[must_use]
    pub fn pieces(&self) -> u8 {
        self.pieces
    }

    #[inline]
    #[must_use]
    pub fn king_taken(&self, color: Color) -> bool {
        self.king_taken[color.index()]
    }

    /// A position where either king has been captured is terminal.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.king_taken[0] || self.king_taken[1]
    }

    #[inline]
    #[must_use]
    pub fn castling(&self) -> &CastlingMarkers {
        &self.castling
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> &[Played] {
        &self.history
    }

    #[inline]
    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|played| played.mv)
    }

    /// Grid hash: pieces, unset castling markers and en-passant file.
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Hash for a position searched with `color` to move.
    #[inline]
    #[must_use]
    pub fn position_key(&self, color: Color) -> u64 {
        self.hash ^ ZOBRIST.side(color)
    }

    /// Destination of the last move if it was a two-square pawn push.
    #[must_use]
    pub fn last_double_push(&self) -> Option<Square> {
        match self.last_move()? {
            Move::Regular {
                from,
                to,
                piece: Piece::Pawn,
                ..
            } if from.rank().abs_diff(to.rank()) == 2 => Some(to),
            _ => None,
        }
    }

    /// Locate a king by scanning the grid.
    #[must_use]
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.occupied()
            .find(|&(_, c, p)| c == color && p == Piece::King)
            .map(|(sq, _, _)| sq)
    }

    /// Occupied squares in a1..h8 order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Color, Piece)> + '_ {
        (0..8).flat_map(move |rank| {
            (0..8).filter_map(move |file| {
                self.squares[rank][file].map(|(color, piece)| (Square(rank, file), color, piece))
            })
        })
    }

    /// Full hash recomputation from the grid, markers and history.
    pub(crate) fn calculate_hash(&self) -> u64 {
        let mut hash = 0;
        for (sq, color, piece) in self.occupied() {
            hash ^= ZOBRIST.piece(color, piece, sq);
        }
        for slot in self.castling.unset_slots() {
            hash ^= ZOBRIST.castling_keys[slot];
        }
        hash ^ self.en_passant_key()
    }

    #[inline]
    pub(crate) fn en_passant_key(&self) -> u64 {
        self.last_double_push()
            .map_or(0, |sq| ZOBRIST.en_passant_keys[sq.file()])
    }

    /// Home corner of a rook, if `sq` is one for `color`.
    #[inline]
    pub(crate) fn rook_home_side(color: Color, sq: Square) -> Option<CastleSide> {
        if sq.rank() != color.back_rank() {
            return None;
        }
        CastleSide::BOTH
            .into_iter()
            .find(|side| side.rook_from_file() == sq.file())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self.squares[rank][file]
                    .map_or('.', |(color, piece)| piece.to_fen_char(color));
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
