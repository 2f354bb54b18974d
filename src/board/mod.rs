//! Chess board representation and game logic.
//!
//! An 8x8 mailbox grid with make/undo over a move-history stack, pseudo-legal
//! move generation, static evaluation and the game-tree search built on them.
//!
//! # Example
//! ```
//! use chess_ai::board::{Board, Color};
//!
//! let mut board = Board::new();
//! let moves = board.generate_moves(Color::White);
//! assert_eq!(moves.len(), 20);
//!
//! let mv = moves[0];
//! board.make_move(mv);
//! assert_eq!(board.undo_move(), mv);
//! assert_eq!(board, Board::new());
//! ```

mod attacks;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod notation;
mod pst;
pub mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError, SquareError};
pub use notation::MoveDescriptor;
pub use state::{Board, GamePhase, Played};
pub use types::{
    CastleSide, CastlingMarkers, Color, Move, MoveList, MoveListIntoIter, Piece, Square,
    LOST_BEFORE_HISTORY,
};

pub use search::{find_best_move, search, SearchContext, SearchOutcome, SearchStats, SmpConfig};

pub(crate) use types::{MARKER_COUNT, MAX_MOVES, PROMOTION_PIECES};
