//! Move representation and move lists.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};
use super::square::Square;

/// Upper bound on pseudo-legal moves in any reachable position
pub(crate) const MAX_MOVES: usize = 256;

/// Which rook a castling move uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// File the king lands on
    #[inline]
    #[must_use]
    pub const fn king_to_file(self) -> usize {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    /// Corner file the rook starts on
    #[inline]
    #[must_use]
    pub const fn rook_from_file(self) -> usize {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    /// File the rook lands on
    #[inline]
    #[must_use]
    pub const fn rook_to_file(self) -> usize {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }
}

/// One board transition.
///
/// Each shape carries only what it needs, so make and undo are exhaustive
/// matches. The mover's color is whatever stands on `from` when the move is
/// applied; castling carries its color because it moves two pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Move {
    Regular {
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
    },
    Promotion {
        from: Square,
        to: Square,
        promoted: Piece,
        captured: Option<Piece>,
    },
    /// Pawn capture onto the empty square behind a pawn that just moved two.
    EnPassant { from: Square, to: Square },
    Castle { color: Color, side: CastleSide },
}

pub(crate) const EMPTY_MOVE: Move = Move::Regular {
    from: Square(0, 0),
    to: Square(0, 0),
    piece: Piece::Pawn,
    captured: None,
};

impl Move {
    #[inline]
    #[must_use]
    pub fn from(&self) -> Square {
        match *self {
            Move::Regular { from, .. }
            | Move::Promotion { from, .. }
            | Move::EnPassant { from, .. } => from,
            Move::Castle { color, .. } => Square(color.back_rank(), 4),
        }
    }

    #[inline]
    #[must_use]
    pub fn to(&self) -> Square {
        match *self {
            Move::Regular { to, .. } | Move::Promotion { to, .. } | Move::EnPassant { to, .. } => {
                to
            }
            Move::Castle { color, side } => Square(color.back_rank(), side.king_to_file()),
        }
    }

    /// Kind of the piece standing on `from` before the move
    #[inline]
    #[must_use]
    pub fn piece(&self) -> Piece {
        match *self {
            Move::Regular { piece, .. } => piece,
            Move::Promotion { .. } | Move::EnPassant { .. } => Piece::Pawn,
            Move::Castle { .. } => Piece::King,
        }
    }

    #[inline]
    #[must_use]
    pub fn captured(&self) -> Option<Piece> {
        match *self {
            Move::Regular { captured, .. } | Move::Promotion { captured, .. } => captured,
            Move::EnPassant { .. } => Some(Piece::Pawn),
            Move::Castle { .. } => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured().is_some()
    }

    #[inline]
    #[must_use]
    pub fn promotion(&self) -> Option<Piece> {
        match *self {
            Move::Promotion { promoted, .. } => Some(promoted),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn captures_king(&self) -> bool {
        self.captured() == Some(Piece::King)
    }

    #[inline]
    #[must_use]
    pub fn is_castle(&self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    /// Capture-ordering key: every capture outranks every quiet move, and
    /// among captures a cheap attacker taking a valuable victim ranks first.
    #[inline]
    #[must_use]
    pub fn ordering_key(&self) -> i32 {
        match self.captured() {
            Some(victim) => 100_000 + victim.value() - self.piece().value(),
            None => 0,
        }
    }

    /// Comparator that puts the better-looking capture first.
    ///
    /// Quiet moves compare equal to each other, so a stable sort keeps their
    /// generation order.
    #[inline]
    #[must_use]
    pub fn cmp_capture_order(&self, other: &Move) -> Ordering {
        other.ordering_key().cmp(&self.ordering_key())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promoted) = self.promotion() {
            write!(f, "{}", promoted.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Fixed-size move list to avoid heap allocation during search.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: &Move) -> bool {
        self.as_slice().contains(mv)
    }

    /// Keep only the moves matching `keep`, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&Move) -> bool) {
        let mut write = 0;
        for read in 0..self.len {
            let mv = self.moves[read];
            if keep(&mv) {
                self.moves[write] = mv;
                write += 1;
            }
        }
        self.len = write;
    }

    /// Stable insertion sort by capture order.
    ///
    /// Lists are short and mostly quiet moves, so this beats a general sort
    /// and never allocates.
    pub fn sort_by_capture_order(&mut self) {
        let moves = self.as_mut_slice();
        for i in 1..moves.len() {
            let mv = moves[i];
            let key = mv.ordering_key();
            let mut j = i;
            while j > 0 && moves[j - 1].ordering_key() < key {
                moves[j] = moves[j - 1];
                j -= 1;
            }
            moves[j] = mv;
        }
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over a [`MoveList`]
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.list.len {
            let mv = self.list.moves[self.idx];
            self.idx += 1;
            Some(mv)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}
