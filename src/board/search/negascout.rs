use crate::board::{Board, Color, Move};
use crate::tt::{BoundType, TTEntry, TranspositionTable};

use super::SearchStats;

/// Search state borrowed by one thread for the length of a search.
pub struct SearchContext<'a> {
    pub(super) board: &'a mut Board,
    pub(super) tt: Option<&'a TranspositionTable>,
    pub(super) stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    pub fn new(board: &'a mut Board, tt: Option<&'a TranspositionTable>) -> Self {
        SearchContext {
            board,
            tt,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.board
    }

    /// Make `mv`, score the reply from the opponent's side and undo.
    ///
    /// Returns the negated child score, i.e. from the mover's point of view.
    pub fn search_child(
        &mut self,
        mv: Move,
        depth: u32,
        alpha: i32,
        beta: i32,
        side: Color,
        offset: i32,
    ) -> i32 {
        self.board.make_move(mv);
        let score = -self.negascout(depth, -beta, -alpha, side.opponent(), offset);
        self.board.undo_move();
        score
    }

    /// Principal variation search.
    ///
    /// The first move gets the full window, later moves a null window that is
    /// widened only when the result lands strictly inside `(alpha, beta)`.
    pub fn negascout(
        &mut self,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        side: Color,
        offset: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        if self.board.is_terminal() {
            return self.board.evaluate(side, offset);
        }
        if depth == 0 {
            return self.quiesce(alpha, beta, side, offset);
        }

        let key = self.board.position_key(side);
        let alpha_orig = alpha;
        if let Some(entry) = self.probe(key, depth) {
            match entry.bound_type {
                BoundType::Exact => {
                    self.stats.tt_cutoffs += 1;
                    return entry.score;
                }
                BoundType::LowerBound => alpha = alpha.max(entry.score),
                BoundType::UpperBound => beta = beta.min(entry.score),
            }
            if alpha >= beta {
                self.stats.tt_cutoffs += 1;
                return entry.score;
            }
        }

        let mut moves = self.board.generate_moves(side);
        if moves.is_empty() {
            return self.board.evaluate(side, offset);
        }
        moves.sort_by_capture_order();

        for (i, mv) in moves.into_iter().enumerate() {
            let score = if i == 0 {
                self.search_child(mv, depth - 1, alpha, beta, side, offset)
            } else {
                let scout = self.search_child(mv, depth - 1, alpha, alpha + 1, side, offset);
                if alpha < scout && scout < beta {
                    self.stats.researches += 1;
                    self.search_child(mv, depth - 1, alpha, beta, side, offset)
                } else {
                    scout
                }
            };

            if score >= beta {
                self.stats.beta_cutoffs += 1;
                self.store(key, depth, score, BoundType::LowerBound);
                return score;
            }
            if score > alpha {
                alpha = score;
            }
        }

        let bound = if alpha <= alpha_orig {
            BoundType::UpperBound
        } else {
            BoundType::Exact
        };
        self.store(key, depth, alpha, bound);
        alpha
    }

    /// Table entry for `key` searched at least `depth` plies deep.
    #[inline]
    pub(super) fn probe(&mut self, key: u64, depth: u32) -> Option<TTEntry> {
        let entry = self.tt?.probe(key)?;
        if u32::from(entry.depth) >= depth {
            self.stats.tt_hits += 1;
            Some(entry)
        } else {
            None
        }
    }

    #[inline]
    pub(super) fn store(&self, key: u64, depth: u32, score: i32, bound: BoundType) {
        if let Some(tt) = self.tt {
            tt.store(key, depth, score, bound);
        }
    }
}
