//! Game session: one engine playing one game against a move source.

use std::thread;
use std::time::Instant;

use log::{info, warn};

use crate::board::search::constants::{REPETITION_MARGIN, SAFETY_NET_THRESHOLD};
use crate::board::{find_best_move, Board, Color, Move, SmpConfig};
use crate::tt::TranspositionTable;

use super::protocol::{MoveSink, MoveSource};
use super::time::{DepthRequest, LastDecision, TimeConfig};
use super::SessionError;

/// Default transposition table size in megabytes
pub const DEFAULT_TT_MB: usize = 64;

/// Engine settings for a game session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Worker threads for the root search
    pub threads: usize,
    pub tt_mb: usize,
    pub use_tt: bool,
    /// Margin a repeating move needs over the best alternative
    pub repetition_margin: i32,
    /// Score at or below which a move leaving the king attacked is rejected
    pub safety_net_threshold: i32,
    /// Search every move at this depth instead of asking the depth controller
    pub fixed_depth: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            threads: thread::available_parallelism().map_or(1, |n| n.get()),
            tt_mb: DEFAULT_TT_MB,
            use_tt: true,
            repetition_margin: REPETITION_MARGIN,
            safety_net_threshold: SAFETY_NET_THRESHOLD,
            fixed_depth: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    #[must_use]
    pub fn with_tt_mb(mut self, tt_mb: usize) -> Self {
        self.tt_mb = tt_mb;
        self
    }

    #[must_use]
    pub fn with_tt(mut self, use_tt: bool) -> Self {
        self.use_tt = use_tt;
        self
    }

    #[must_use]
    pub fn with_repetition_margin(mut self, margin: i32) -> Self {
        self.repetition_margin = margin;
        self
    }

    #[must_use]
    pub fn with_safety_net_threshold(mut self, threshold: i32) -> Self {
        self.safety_net_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_fixed_depth(mut self, depth: u32) -> Self {
        self.fixed_depth = Some(depth.max(1));
        self
    }

    fn smp_config(&self) -> SmpConfig {
        SmpConfig {
            num_threads: self.threads.max(1),
            repetition_margin: self.repetition_margin,
            safety_net_threshold: self.safety_net_threshold,
            offset: 0,
        }
    }
}

/// One game from our side of the board.
pub struct GameSession {
    board: Board,
    color: Color,
    tt: Option<TranspositionTable>,
    config: EngineConfig,
    time: TimeConfig,
    last: Option<LastDecision>,
    turn: u32,
    over: bool,
}

impl GameSession {
    #[must_use]
    pub fn new(color: Color, config: EngineConfig) -> Self {
        Self::from_board(Board::new(), color, config)
    }

    /// Start a session from an arbitrary position.
    ///
    /// One transposition table serves every turn of the session. Entries left
    /// by an earlier, deeper search are accepted at shallower depths, so a
    /// decision can score differently than the same search on a fresh table.
    #[must_use]
    pub fn from_board(board: Board, color: Color, config: EngineConfig) -> Self {
        let tt = config.use_tt.then(|| TranspositionTable::new(config.tt_mb));
        GameSession {
            board,
            color,
            tt,
            config,
            time: TimeConfig::default(),
            last: None,
            turn: 0,
            over: false,
        }
    }

    #[must_use]
    pub fn with_time_config(mut self, time: TimeConfig) -> Self {
        self.time = time;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Moves we have played so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn last_decision(&self) -> Option<LastDecision> {
        self.last
    }

    /// Play one turn: apply the opponent's move, then choose, apply and send ours.
    ///
    /// Returns the move sent, or `None` once the game is over.
    pub fn play_turn<S, K>(
        &mut self,
        source: &mut S,
        sink: &mut K,
    ) -> Result<Option<Move>, SessionError>
    where
        S: MoveSource + ?Sized,
        K: MoveSink + ?Sized,
    {
        if self.over {
            return Ok(None);
        }

        let turn = source.next_turn()?;
        if let Some(desc) = turn.last_move {
            let mv = desc
                .resolve(&self.board, self.color.opponent())
                .map_err(|e| {
                    warn!("cannot apply opponent move {}{}: {e}", desc.from, desc.to);
                    e
                })?;
            self.board.make_move(mv);
            info!("opponent played {mv}");
        }

        if turn.game_over || self.board.is_terminal() {
            info!("game over after {} of our moves", self.turn);
            self.over = true;
            return Ok(None);
        }

        let our_moves = self.board.generate_moves(self.color).len();
        let opponent_moves = self.board.generate_moves(self.color.opponent()).len();
        let depth = self.config.fixed_depth.unwrap_or_else(|| {
            self.time.choose_depth(&DepthRequest {
                phase: self.board.phase(),
                our_moves,
                opponent_moves,
                seconds_left: turn.seconds_left,
                last: self.last,
            })
        });

        let start = Instant::now();
        let outcome = find_best_move(
            &self.board,
            self.color,
            depth,
            self.tt.as_ref(),
            &self.config.smp_config(),
        );

        let Some((mv, score)) = outcome.best else {
            info!("{} has no move to play", self.color);
            self.over = true;
            return Ok(None);
        };

        self.board.make_move(mv);
        let wire = mv.to_wire();
        sink.send(&wire)?;
        info!(
            "sent {wire} (score {score}, depth {}, {} nodes, {:?})",
            outcome.depth,
            outcome.stats.total_nodes(),
            outcome.elapsed
        );

        self.last = Some(LastDecision {
            our_moves,
            opponent_moves,
            depth,
            elapsed: start.elapsed(),
        });
        self.turn += 1;
        Ok(Some(mv))
    }

    /// Play turns until the game ends or we have nothing to play.
    pub fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<(), SessionError>
    where
        S: MoveSource + ?Sized,
        K: MoveSink + ?Sized,
    {
        while !self.over {
            self.play_turn(source, sink)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_clamp_and_set() {
        let config = EngineConfig::default()
            .with_threads(0)
            .with_tt(false)
            .with_tt_mb(8)
            .with_fixed_depth(0)
            .with_repetition_margin(50)
            .with_safety_net_threshold(-1000);
        assert_eq!(config.threads, 1);
        assert!(!config.use_tt);
        assert_eq!(config.tt_mb, 8);
        assert_eq!(config.fixed_depth, Some(1));

        let smp = config.smp_config();
        assert_eq!(smp.num_threads, 1);
        assert_eq!(smp.repetition_margin, 50);
        assert_eq!(smp.safety_net_threshold, -1000);
        assert_eq!(smp.offset, 0);
    }

    #[test]
    fn disabled_table_is_not_allocated() {
        let session = GameSession::new(Color::Black, EngineConfig::default().with_tt(false));
        assert!(session.tt.is_none());
        assert_eq!(session.color(), Color::Black);
        assert_eq!(session.turn(), 0);
        assert!(!session.is_over());
    }
}
