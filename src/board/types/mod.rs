//! Core chess types.
//!
//! - `Piece` and `Color` - piece kinds and sides
//! - `Square` - (rank, file) board coordinate
//! - `Move`, `CastleSide` and `MoveList` - move representation
//! - `CastlingMarkers` - history-indexed castling rights

mod castling;
mod moves;
mod piece;
mod square;

pub use castling::{CastlingMarkers, LOST_BEFORE_HISTORY};
pub use moves::{CastleSide, Move, MoveList, MoveListIntoIter};
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use castling::MARKER_COUNT;
pub(crate) use moves::MAX_MOVES;
pub(crate) use piece::PROMOTION_PIECES;
