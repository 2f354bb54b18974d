//! Root-split parallel search.
//!
//! Root moves are ordered once and queued. Worker threads each clone the
//! board, pull moves from the queue and report scores into one shared best
//! slot. The queue and the best slot sit behind two separate locks that are
//! never held together. All workers share the transposition table.

use std::cmp::Reverse;
use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use parking_lot::Mutex;

use crate::board::{Board, Color, Move, MoveList};
use crate::tt::TranspositionTable;

use super::constants::{INFINITY, REPETITION_MARGIN, SAFETY_NET_THRESHOLD, SEARCH_STACK_SIZE};
use super::{SearchContext, SearchStats};

/// Configuration for the root coordinator
#[derive(Clone, Debug)]
pub struct SmpConfig {
    /// Number of worker threads
    pub num_threads: usize,
    /// Margin a repeating move needs over the best alternative
    pub repetition_margin: i32,
    /// Score at or below which a move leaving the king attacked is rejected
    pub safety_net_threshold: i32,
    /// Evaluation offset passed to every leaf
    pub offset: i32,
}

impl Default for SmpConfig {
    fn default() -> Self {
        SmpConfig {
            num_threads: thread::available_parallelism().map_or(1, |n| n.get()),
            repetition_margin: REPETITION_MARGIN,
            safety_net_threshold: SAFETY_NET_THRESHOLD,
            offset: 0,
        }
    }
}

impl SmpConfig {
    /// Create config with specified thread count
    #[must_use]
    pub fn with_threads(num_threads: usize) -> Self {
        SmpConfig {
            num_threads: num_threads.max(1),
            ..Default::default()
        }
    }
}

/// Result of one root decision
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Chosen move and its score, `None` when the side has no moves at all
    pub best: Option<(Move, i32)>,
    /// Depth the chosen move was searched at
    pub depth: u32,
    /// Number of pseudo-legal root moves
    pub root_moves: usize,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

impl SearchOutcome {
    #[must_use]
    pub fn best_move(&self) -> Option<Move> {
        self.best.map(|(mv, _)| mv)
    }

    #[must_use]
    pub fn score(&self) -> Option<i32> {
        self.best.map(|(_, score)| score)
    }
}

/// Pick the best move for `side` with a fixed-depth search.
///
/// The caller's board is only read; every worker searches its own clone.
pub fn find_best_move(
    board: &Board,
    side: Color,
    depth: u32,
    tt: Option<&TranspositionTable>,
    config: &SmpConfig,
) -> SearchOutcome {
    let start = Instant::now();
    let depth = depth.max(1);
    let moves = board.generate_moves(side);
    let root_moves = moves.len();
    let mut stats = SearchStats::default();

    let finish = |best, depth, stats| SearchOutcome {
        best,
        depth,
        root_moves,
        stats,
        elapsed: start.elapsed(),
    };

    if moves.is_empty() {
        info!("{side} has no moves");
        return finish(None, depth, stats);
    }

    if let Some(mv) = moves.iter().copied().find(Move::captures_king) {
        let mut after = board.clone();
        after.make_move(mv);
        info!("{side} captures the king with {mv}");
        return finish(Some((mv, after.evaluate(side, config.offset))), depth, stats);
    }

    info!("{side} searching {root_moves} root moves at depth {depth}");
    let ordered = order_root_moves(board, side, moves, config.offset);
    let mut best = search_root(board, side, depth, ordered, tt, config, &mut stats);

    if let Some((mv, score)) = best {
        if score <= config.safety_net_threshold && leaves_king_attacked(board, side, mv) {
            let mut escapes = board.generate_moves(side);
            escapes.retain(|&m| !leaves_king_attacked(board, side, m));
            if !escapes.is_empty() {
                let retry_depth = depth.saturating_sub(1).max(1);
                info!(
                    "{side}: {mv} leaves the king attacked (score {score}), \
                     retrying {} escapes at depth {retry_depth}",
                    escapes.len()
                );
                let ordered = order_root_moves(board, side, escapes, config.offset);
                best = search_root(board, side, retry_depth, ordered, tt, config, &mut stats);
                return finish(best, retry_depth, stats);
            }
        }
    }

    finish(best, depth, stats)
}

/// Capture order first, then a stable sort by the evaluation after the move.
fn order_root_moves(board: &Board, side: Color, mut moves: MoveList, offset: i32) -> Vec<Move> {
    moves.sort_by_capture_order();
    let mut ordered: Vec<Move> = moves.into_iter().collect();
    let mut scratch = board.clone();
    ordered.sort_by_cached_key(|&mv| {
        scratch.make_move(mv);
        let score = scratch.evaluate(side, offset);
        scratch.undo_move();
        Reverse(score)
    });
    ordered
}

/// Split `ordered` into fresh moves and repeating moves, search both and choose.
fn search_root(
    board: &Board,
    side: Color,
    depth: u32,
    ordered: Vec<Move>,
    tt: Option<&TranspositionTable>,
    config: &SmpConfig,
    stats: &mut SearchStats,
) -> Option<(Move, i32)> {
    let targets = repetition_targets(board);
    let (repeating, fresh): (Vec<Move>, Vec<Move>) = ordered
        .into_iter()
        .partition(|&mv| repeats_position(board, mv, &targets));

    let best = run_workers(board, side, depth, fresh, tt, config, stats);

    let mut repeat_best: Option<(Move, i32)> = None;
    if !repeating.is_empty() {
        let mut scratch = board.clone();
        let mut ctx = SearchContext::new(&mut scratch, tt);
        for mv in repeating {
            let score = ctx.search_child(mv, depth - 1, -INFINITY, INFINITY, side, config.offset);
            if repeat_best.map_or(true, |(_, s)| score > s) {
                repeat_best = Some((mv, score));
            }
        }
        *stats += ctx.stats();
    }

    match (best, repeat_best) {
        (Some((mv, score)), Some((rep, rep_score))) => {
            if rep_score >= score + config.repetition_margin {
                info!("{side} repeats with {rep} ({rep_score} vs {score})");
                Some((rep, rep_score))
            } else {
                info!("{side} avoids repeating {rep} ({rep_score} vs {mv} at {score})");
                Some((mv, score))
            }
        }
        (best, None) => best,
        (None, repeat) => repeat,
    }
}

/// Hashes of the positions left by our own moves two and three turns ago.
///
/// The last history entry is the opponent's reply, so our previous moves sit
/// at even distances before it.
fn repetition_targets(board: &Board) -> Vec<u64> {
    let history = board.history();
    [3, 5]
        .into_iter()
        .filter_map(|back| history.len().checked_sub(back))
        .map(|idx| history[idx].hash_before)
        .collect()
}

fn repeats_position(board: &Board, mv: Move, targets: &[u64]) -> bool {
    if targets.is_empty() {
        return false;
    }
    let mut scratch = board.clone();
    scratch.make_move(mv);
    targets.contains(&scratch.hash())
}

fn leaves_king_attacked(board: &Board, side: Color, mv: Move) -> bool {
    let mut scratch = board.clone();
    scratch.make_move(mv);
    scratch.in_check(side)
}

/// Replace `best` if `score` is higher, or equal with a better-looking capture.
fn offer(best: &mut Option<(Move, i32)>, mv: Move, score: i32) -> bool {
    let better = match *best {
        None => true,
        Some((cur, cur_score)) => {
            score > cur_score || (score == cur_score && mv.cmp_capture_order(&cur).is_lt())
        }
    };
    if better {
        *best = Some((mv, score));
    }
    better
}

fn run_workers(
    board: &Board,
    side: Color,
    depth: u32,
    moves: Vec<Move>,
    tt: Option<&TranspositionTable>,
    config: &SmpConfig,
    stats: &mut SearchStats,
) -> Option<(Move, i32)> {
    if moves.is_empty() {
        return None;
    }
    let num_threads = config.num_threads.clamp(1, moves.len());
    let queue = Mutex::new(VecDeque::from(moves));
    let best: Mutex<Option<(Move, i32)>> = Mutex::new(None);

    thread::scope(|s| {
        let handles: Vec<_> = (0..num_threads)
            .map(|worker_id| {
                let queue = &queue;
                let best = &best;
                thread::Builder::new()
                    .name(format!("search-{worker_id}"))
                    .stack_size(SEARCH_STACK_SIZE)
                    .spawn_scoped(s, move || {
                        let mut local = board.clone();
                        worker_loop(&mut local, side, depth, queue, best, tt, config.offset)
                    })
            })
            .collect();

        for handle in handles {
            match handle {
                Ok(handle) => match handle.join() {
                    Ok(worker_stats) => *stats += worker_stats,
                    Err(panic) => std::panic::resume_unwind(panic),
                },
                // Moves left in the queue are picked up by the workers that did start.
                Err(e) => log::warn!("failed to spawn search worker: {e}"),
            }
        }
    });

    // Every spawn failing leaves the queue untouched; search it here instead.
    let leftover: Vec<Move> = queue.into_inner().into_iter().collect();
    if !leftover.is_empty() {
        let leftover = Mutex::new(VecDeque::from(leftover));
        let mut local = board.clone();
        *stats += worker_loop(&mut local, side, depth, &leftover, &best, tt, config.offset);
    }

    best.into_inner()
}

fn worker_loop(
    board: &mut Board,
    side: Color,
    depth: u32,
    queue: &Mutex<VecDeque<Move>>,
    best: &Mutex<Option<(Move, i32)>>,
    tt: Option<&TranspositionTable>,
    offset: i32,
) -> SearchStats {
    let mut ctx = SearchContext::new(board, tt);
    let mut alpha = -INFINITY;
    let mut first = true;

    loop {
        let Some(mv) = queue.lock().pop_front() else {
            break;
        };

        // Later moves scout just below alpha so a tie is re-searched and offered.
        let score = if first {
            ctx.search_child(mv, depth - 1, -INFINITY, INFINITY, side, offset)
        } else {
            let scout = ctx.search_child(mv, depth - 1, alpha - 1, alpha, side, offset);
            if scout >= alpha {
                ctx.search_child(mv, depth - 1, alpha - 1, INFINITY, side, offset)
            } else {
                scout
            }
        };
        first = false;

        if score >= alpha {
            let mut shared = best.lock();
            if offer(&mut shared, mv, score) {
                debug!("new best {mv} = {score}");
            }
            alpha = shared.map_or(score, |(_, s)| s);
        }
    }

    ctx.stats()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Square};

    fn quiet(from: Square, to: Square) -> Move {
        Move::Regular {
            from,
            to,
            piece: Piece::Knight,
            captured: None,
        }
    }

    #[test]
    fn offer_prefers_higher_then_better_capture() {
        let mut best = None;
        let a = quiet(Square(0, 1), Square(2, 2));
        let capture = Move::Regular {
            from: Square(3, 3),
            to: Square(4, 4),
            piece: Piece::Pawn,
            captured: Some(Piece::Knight),
        };
        assert!(offer(&mut best, a, 10));
        assert!(!offer(&mut best, quiet(Square(0, 6), Square(2, 5)), 10));
        assert!(offer(&mut best, capture, 10));
        assert!(!offer(&mut best, a, 9));
        assert_eq!(best, Some((capture, 10)));
    }

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn equal_scores_go_to_the_better_capture_in_either_queue_order() {
        // dxe3 wins a knight with a pawn and Nxe4 a bishop with a knight; both end level.
        let board = Board::from_placement("7k/8/3N4/8/4b3/4n3/3P4/K7").expect("valid placement");
        let pawn_takes = board.create_move(sq("d2"), sq("e3"), None).expect("pawn capture");
        let knight_takes = board.create_move(sq("d6"), sq("e4"), None).expect("knight capture");

        let mut scratch = board.clone();
        let mut ctx = SearchContext::new(&mut scratch, None);
        let score = ctx.search_child(pawn_takes, 0, -INFINITY, INFINITY, Color::White, 0);
        assert_eq!(
            ctx.search_child(knight_takes, 0, -INFINITY, INFINITY, Color::White, 0),
            score
        );

        for order in [[knight_takes, pawn_takes], [pawn_takes, knight_takes]] {
            let queue = Mutex::new(VecDeque::from(order.to_vec()));
            let best = Mutex::new(None);
            let mut local = board.clone();
            worker_loop(&mut local, Color::White, 1, &queue, &best, None, 0);
            assert_eq!(best.into_inner(), Some((pawn_takes, score)));
        }
    }

    #[test]
    fn knight_shuffle_back_home_repeats_start() {
        let mut board = Board::new();
        assert!(repetition_targets(&board).is_empty());
        for (from, to) in [
            (Square(0, 6), Square(2, 5)),
            (Square(7, 6), Square(5, 5)),
            (Square(2, 5), Square(0, 6)),
        ] {
            let mv = board.create_move(from, to, None).expect("legal");
            board.make_move(mv);
        }

        let targets = repetition_targets(&board);
        assert_eq!(targets, vec![Board::new().hash()]);

        let back_home = board
            .create_move(Square(5, 5), Square(7, 6), None)
            .expect("legal");
        let elsewhere = board
            .create_move(Square(5, 5), Square(3, 4), None)
            .expect("legal");
        assert!(repeats_position(&board, back_home, &targets));
        assert!(!repeats_position(&board, elsewhere, &targets));
    }
}
