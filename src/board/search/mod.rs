//! Game-tree search.
//!
//! - NegaScout (principal variation search) over the mailbox board
//! - Captures-only quiescence extension at the horizon
//! - Shared lockless transposition table for cutoffs
//! - Root-split parallel coordinator with repetition avoidance

pub mod constants;
mod negascout;
mod quiescence;
pub mod smp;

use std::ops::AddAssign;

use crate::tt::TranspositionTable;

use super::{Board, Color};

pub use negascout::SearchContext;
pub use smp::{find_best_move, SearchOutcome, SmpConfig};

/// Counters collected by one search call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// NegaScout nodes visited
    pub nodes: u64,
    /// Quiescence nodes visited
    pub qnodes: u64,
    /// Probes that found an entry at sufficient depth
    pub tt_hits: u64,
    /// Nodes resolved by a table entry alone
    pub tt_cutoffs: u64,
    pub beta_cutoffs: u64,
    /// Null-window searches that had to be repeated with the full window
    pub researches: u64,
}

impl SearchStats {
    #[must_use]
    pub fn total_nodes(&self) -> u64 {
        self.nodes + self.qnodes
    }
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.qnodes += other.qnodes;
        self.tt_hits += other.tt_hits;
        self.tt_cutoffs += other.tt_cutoffs;
        self.beta_cutoffs += other.beta_cutoffs;
        self.researches += other.researches;
    }
}

/// Search `board` to `depth` plies with `side` to move.
///
/// Returns the score from `side`'s point of view along with the counters.
/// The board is left exactly as it was passed in.
pub fn search(
    board: &mut Board,
    tt: Option<&TranspositionTable>,
    depth: u32,
    alpha: i32,
    beta: i32,
    side: Color,
    offset: i32,
) -> (i32, SearchStats) {
    let mut ctx = SearchContext::new(board, tt);
    let score = ctx.negascout(depth, alpha, beta, side, offset);
    (score, ctx.stats())
}
