use crate::board::Color;
use crate::tt::BoundType;

use super::negascout::SearchContext;

impl SearchContext<'_> {
    /// Captures-only search past the horizon.
    ///
    /// Fails hard: cutoffs return `beta` itself. A position with no captures
    /// left scores as its static evaluation.
    pub(super) fn quiesce(
        &mut self,
        mut alpha: i32,
        mut beta: i32,
        side: Color,
        offset: i32,
    ) -> i32 {
        self.stats.qnodes += 1;

        if self.board.is_terminal() {
            return self.board.evaluate(side, offset);
        }

        let key = self.board.position_key(side);
        let alpha_orig = alpha;
        if let Some(entry) = self.probe(key, 0) {
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

        let stand_pat = self.board.evaluate(side, offset);
        if stand_pat >= beta {
            self.store(key, 0, beta, BoundType::LowerBound);
            return beta;
        }
        alpha = alpha.max(stand_pat);

        let mut moves = self.board.generate_captures(side);
        if moves.is_empty() {
            self.store(key, 0, stand_pat, BoundType::Exact);
            return stand_pat;
        }
        moves.sort_by_capture_order();

        for mv in moves {
            self.board.make_move(mv);
            let score = -self.quiesce(-beta, -alpha, side.opponent(), offset);
            self.board.undo_move();

            if score >= beta {
                self.stats.beta_cutoffs += 1;
                self.store(key, 0, beta, BoundType::LowerBound);
                return beta;
            }
            alpha = alpha.max(score);
        }

        let bound = if alpha <= alpha_orig {
            BoundType::UpperBound
        } else {
            BoundType::Exact
        };
        self.store(key, 0, alpha, bound);
        alpha
    }
}
