//! Depth selection from the clock.
//!
//! The engine always searches to a fixed depth. Before each decision the depth
//! is picked by projecting how long candidate depths would take, using the
//! node rate observed on the previous decision. A position with `a` moves for
//! us and `b` for the opponent is assumed to cost `a^(d/2) * b^(d/2)` nodes at
//! depth `d`.

use std::time::Duration;

use crate::board::GamePhase;

/// Depth bounds for one game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthBounds {
    pub min: u32,
    pub max: u32,
}

/// Projected-time window in milliseconds.
///
/// Depth grows while the projection is below `grow_below_ms` and shrinks while
/// it is above `shrink_above_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetWindow {
    pub grow_below_ms: f64,
    pub shrink_above_ms: f64,
}

/// Configuration for depth selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeConfig {
    pub opening: DepthBounds,
    pub middle: DepthBounds,
    pub end: DepthBounds,
    pub late_end: DepthBounds,
    /// Window used in the opening
    pub opening_window: BudgetWindow,
    /// Window used in the middle game and endgame
    pub normal_window: BudgetWindow,
    /// Late-endgame window while plenty of clock remains
    pub late_end_window: BudgetWindow,
    /// Late-endgame window once the clock drops to `late_end_clock_secs`
    pub late_end_low_clock_window: BudgetWindow,
    pub late_end_clock_secs: f32,
    /// Below this many seconds the depth never exceeds `low_clock_max_depth`
    pub low_clock_secs: f32,
    pub low_clock_max_depth: u32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            opening: DepthBounds { min: 4, max: 8 },
            middle: DepthBounds { min: 5, max: 10 },
            end: DepthBounds { min: 6, max: 12 },
            late_end: DepthBounds { min: 7, max: 13 },
            opening_window: BudgetWindow {
                grow_below_ms: 2_500.0,
                shrink_above_ms: 8_000.0,
            },
            normal_window: BudgetWindow {
                grow_below_ms: 2_500.0,
                shrink_above_ms: 20_000.0,
            },
            late_end_window: BudgetWindow {
                grow_below_ms: 30_000.0,
                shrink_above_ms: 85_000.0,
            },
            late_end_low_clock_window: BudgetWindow {
                grow_below_ms: 10_000.0,
                shrink_above_ms: 30_000.0,
            },
            late_end_clock_secs: 500.0,
            low_clock_secs: 475.0,
            low_clock_max_depth: 12,
        }
    }
}

/// What the previous decision cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastDecision {
    pub our_moves: usize,
    pub opponent_moves: usize,
    pub depth: u32,
    pub elapsed: Duration,
}

/// Inputs for one depth decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRequest {
    pub phase: GamePhase,
    pub our_moves: usize,
    pub opponent_moves: usize,
    pub seconds_left: f32,
    /// `None` on the first decision of a game
    pub last: Option<LastDecision>,
}

/// Nodes a full-width search of `depth` plies is assumed to visit.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn projected_nodes(our_moves: usize, opponent_moves: usize, depth: u32) -> f64 {
    let half = f64::from(depth) / 2.0;
    (our_moves as f64).powf(half) * (opponent_moves as f64).powf(half)
}

impl TimeConfig {
    #[must_use]
    pub fn bounds(&self, phase: GamePhase) -> DepthBounds {
        match phase {
            GamePhase::Opening => self.opening,
            GamePhase::Middle => self.middle,
            GamePhase::End => self.end,
            GamePhase::LateEnd => self.late_end,
        }
    }

    #[must_use]
    pub fn window(&self, phase: GamePhase, seconds_left: f32) -> BudgetWindow {
        match phase {
            GamePhase::Opening => self.opening_window,
            GamePhase::Middle | GamePhase::End => self.normal_window,
            GamePhase::LateEnd if seconds_left > self.late_end_clock_secs => self.late_end_window,
            GamePhase::LateEnd => self.late_end_low_clock_window,
        }
    }

    /// Projected milliseconds for `depth`, or `None` without a usable node rate.
    #[must_use]
    pub fn estimate_ms(&self, request: &DepthRequest, depth: u32) -> Option<f64> {
        let last = request.last?;
        let last_nodes = projected_nodes(last.our_moves, last.opponent_moves, last.depth);
        let last_ms = last.elapsed.as_secs_f64() * 1000.0;
        let nodes_per_ms = last_nodes / last_ms.max(1.0);
        if !nodes_per_ms.is_finite() || nodes_per_ms <= 0.0 {
            return None;
        }
        Some(projected_nodes(request.our_moves, request.opponent_moves, depth) / nodes_per_ms)
    }

    /// Pick the search depth for one decision.
    ///
    /// Starts at the phase minimum, walks up while the projection is under the
    /// window and back down while it is over, then clamps to the phase bounds
    /// and the low-clock cap.
    #[must_use]
    pub fn choose_depth(&self, request: &DepthRequest) -> u32 {
        let bounds = self.bounds(request.phase);
        let mut depth = bounds.min;

        if let Some(mut estimate) = self.estimate_ms(request, depth) {
            let window = self.window(request.phase, request.seconds_left);
            while depth < bounds.max && estimate < window.grow_below_ms {
                depth += 1;
                estimate = self.estimate_ms(request, depth).unwrap_or(estimate);
            }
            while depth > bounds.min && estimate > window.shrink_above_ms {
                depth -= 1;
                estimate = self.estimate_ms(request, depth).unwrap_or(estimate);
            }
        }

        depth = depth.clamp(bounds.min, bounds.max);
        if request.seconds_left < self.low_clock_secs {
            depth = depth.min(self.low_clock_max_depth);
        }
        depth
    }
}
