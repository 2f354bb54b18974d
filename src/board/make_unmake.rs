use super::state::{GamePhase, Played};
use super::{Board, CastleSide, Color, Move, Piece, Square};
use crate::zobrist::ZOBRIST;

impl Board {
    /// Apply `mv` and push it onto the history.
    ///
    /// The move must come from this position's generator or
    /// [`Board::create_move`]; a move whose origin square is empty panics.
    pub fn make_move(&mut self, mv: Move) {
        let hash_before = self.hash;
        self.hash ^= self.en_passant_key();
        self.history.push(Played { mv, hash_before });
        let index = self.history.len() as u32;

        match mv {
            Move::Regular {
                from,
                to,
                piece,
                captured,
            } => {
                let (color, moved) = self.take(from);
                debug_assert_eq!(moved, piece, "move piece does not match board at {from}");
                if captured.is_some() {
                    let (victim_color, victim) = self.take(to);
                    self.on_capture(victim_color, victim);
                    self.stamp_captured_rook(victim_color, victim, to, index);
                }
                self.put(to, color, piece);
                self.stamp_home_move(color, piece, from, index);
            }
            Move::Promotion {
                from,
                to,
                promoted,
                captured,
            } => {
                let (color, _) = self.take(from);
                if captured.is_some() {
                    let (victim_color, victim) = self.take(to);
                    self.on_capture(victim_color, victim);
                    self.stamp_captured_rook(victim_color, victim, to, index);
                }
                self.put(to, color, promoted);
                self.piece_count[color.index()][Piece::Pawn.index()] -= 1;
                self.piece_count[color.index()][promoted.index()] += 1;
            }
            Move::EnPassant { from, to } => {
                let (color, _) = self.take(from);
                let (victim_color, victim) = self.take(Square(from.rank(), to.file()));
                self.put(to, color, Piece::Pawn);
                self.on_capture(victim_color, victim);
            }
            Move::Castle { color, side } => {
                let rank = color.back_rank();
                self.take(Square(rank, 4));
                self.put(Square(rank, side.king_to_file()), color, Piece::King);
                self.take(Square(rank, side.rook_from_file()));
                self.put(Square(rank, side.rook_to_file()), color, Piece::Rook);
                self.stamp_king(color, index);
                self.stamp_rook(color, side, index);
            }
        }

        self.phase = GamePhase::from_pieces(self.pieces);
        self.hash ^= self.en_passant_key();
    }

    /// Pop the last move and restore the exact prior state.
    ///
    /// # Panics
    /// If the history is empty.
    pub fn undo_move(&mut self) -> Move {
        let index = self.history.len() as u32;
        let Played { mv, hash_before } = self
            .history
            .pop()
            .expect("undo_move called with empty history");

        match mv {
            Move::Regular {
                from,
                to,
                piece,
                captured,
            } => {
                let (color, _) = self.take(to);
                self.put(from, color, piece);
                if let Some(victim) = captured {
                    self.put(to, color.opponent(), victim);
                    self.on_uncapture(color.opponent(), victim);
                    self.unstamp_captured_rook(color.opponent(), victim, to, index);
                }
                if piece == Piece::King {
                    self.castling.unstamp_king(color, index);
                } else if piece == Piece::Rook {
                    if let Some(side) = Board::rook_home_side(color, from) {
                        self.castling.unstamp_rook(color, side, index);
                    }
                }
            }
            Move::Promotion {
                from,
                to,
                promoted,
                captured,
            } => {
                let (color, _) = self.take(to);
                self.put(from, color, Piece::Pawn);
                self.piece_count[color.index()][promoted.index()] -= 1;
                self.piece_count[color.index()][Piece::Pawn.index()] += 1;
                if let Some(victim) = captured {
                    self.put(to, color.opponent(), victim);
                    self.on_uncapture(color.opponent(), victim);
                    self.unstamp_captured_rook(color.opponent(), victim, to, index);
                }
            }
            Move::EnPassant { from, to } => {
                let (color, _) = self.take(to);
                self.put(from, color, Piece::Pawn);
                self.put(Square(from.rank(), to.file()), color.opponent(), Piece::Pawn);
                self.on_uncapture(color.opponent(), Piece::Pawn);
            }
            Move::Castle { color, side } => {
                let rank = color.back_rank();
                self.take(Square(rank, side.king_to_file()));
                self.put(Square(rank, 4), color, Piece::King);
                self.take(Square(rank, side.rook_to_file()));
                self.put(Square(rank, side.rook_from_file()), color, Piece::Rook);
                self.castling.unstamp_king(color, index);
                self.castling.unstamp_rook(color, side, index);
            }
        }

        self.phase = GamePhase::from_pieces(self.pieces);
        self.hash = hash_before;
        mv
    }

    /// Remove the piece on `sq`, updating the hash.
    #[inline]
    fn take(&mut self, sq: Square) -> (Color, Piece) {
        let (color, piece) = self.squares[sq.0][sq.1]
            .take()
            .unwrap_or_else(|| panic!("no piece on {sq}"));
        self.hash ^= ZOBRIST.piece(color, piece, sq);
        (color, piece)
    }

    #[inline]
    fn put(&mut self, sq: Square, color: Color, piece: Piece) {
        debug_assert!(self.squares[sq.0][sq.1].is_none(), "square {sq} occupied");
        self.squares[sq.0][sq.1] = Some((color, piece));
        self.hash ^= ZOBRIST.piece(color, piece, sq);
    }

    #[inline]
    fn on_capture(&mut self, color: Color, piece: Piece) {
        match piece {
            Piece::King => self.king_taken[color.index()] = true,
            _ => self.piece_count[color.index()][piece.index()] -= 1,
        }
        self.pieces -= 1;
    }

    #[inline]
    fn on_uncapture(&mut self, color: Color, piece: Piece) {
        match piece {
            Piece::King => self.king_taken[color.index()] = false,
            _ => self.piece_count[color.index()][piece.index()] += 1,
        }
        self.pieces += 1;
    }

    /// Stamp a castling marker when a king or rook leaves its home square.
    fn stamp_home_move(&mut self, color: Color, piece: Piece, from: Square, index: u32) {
        match piece {
            Piece::King if from == Square(color.back_rank(), 4) => self.stamp_king(color, index),
            Piece::Rook => {
                if let Some(side) = Board::rook_home_side(color, from) {
                    self.stamp_rook(color, side, index);
                }
            }
            _ => {}
        }
    }

    /// A rook taken on its corner loses that side's castling for good.
    fn stamp_captured_rook(&mut self, color: Color, piece: Piece, at: Square, index: u32) {
        if piece == Piece::Rook {
            if let Some(side) = Board::rook_home_side(color, at) {
                self.stamp_rook(color, side, index);
            }
        }
    }

    fn unstamp_captured_rook(&mut self, color: Color, piece: Piece, at: Square, index: u32) {
        if piece == Piece::Rook {
            if let Some(side) = Board::rook_home_side(color, at) {
                self.castling.unstamp_rook(color, side, index);
            }
        }
    }

    #[inline]
    fn stamp_king(&mut self, color: Color, index: u32) {
        if self.castling.stamp_king(color, index) {
            self.hash ^= ZOBRIST.castling_keys[super::CastlingMarkers::king_slot(color)];
        }
    }

    #[inline]
    fn stamp_rook(&mut self, color: Color, side: CastleSide, index: u32) {
        if self.castling.stamp_rook(color, side, index) {
            self.hash ^= ZOBRIST.castling_keys[super::CastlingMarkers::rook_slot(color, side)];
        }
    }
}
