//! Piece and color types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chess piece kinds, in counter and table order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Wire letters indexed by [`Piece::index`]
const LETTERS: [char; 6] = ['P', 'N', 'B', 'R', 'Q', 'K'];

/// Material in centipawns indexed by [`Piece::index`]. The king's sentinel
/// makes taking it outweigh any other material swing.
const VALUES: [i32; 6] = [100, 350, 350, 525, 1000, 10_000];

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Piece named by `c` in either case.
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        let upper = c.to_ascii_uppercase();
        Piece::ALL.into_iter().find(|p| p.letter() == upper)
    }

    /// Uppercase letter used on the move wire
    #[inline]
    #[must_use]
    pub const fn letter(self) -> char {
        LETTERS[self.index()]
    }

    /// Board-diagram letter: uppercase for White, lowercase for Black
    #[inline]
    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        match color {
            Color::White => self.letter(),
            Color::Black => self.letter().to_ascii_lowercase(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        VALUES[self.index()]
    }
}

/// Pieces a pawn may promote to during move generation (queen first)
pub(crate) const PROMOTION_PIECES: [Piece; 2] = [Piece::Queen, Piece::Knight];

/// Side colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// White then Black, matching [`Color::index`]
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank the pieces start on: 0 for White, 7 for Black
    #[inline]
    #[must_use]
    pub const fn back_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank step of a pawn push
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_direction(self) -> isize {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank in front of the back rank, where pawns may push two
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_start_rank(self) -> usize {
        self.back_rank().abs_diff(1)
    }

    /// The opponent's back rank
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_promotion_rank(self) -> usize {
        self.opponent().back_rank()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "White",
            Color::Black => "Black",
        })
    }
}
