pub mod board;
pub mod engine;
pub mod tt;
pub mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use engine::{EngineConfig, GameSession};
pub use tt::TranspositionTable;
