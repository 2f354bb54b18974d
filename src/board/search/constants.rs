//! Search constants.

// ============================================================================
// SCORES
// ============================================================================

/// Window bound wider than any evaluation
pub const INFINITY: i32 = 999_999_999;

// ============================================================================
// ROOT COORDINATION
// ============================================================================

/// A move that repeats an earlier position must beat the best alternative
/// by this much to be played
pub const REPETITION_MARGIN: i32 = 100;

/// Scores at or below this, with the mover's king left attacked, trigger a
/// rerun restricted to moves that escape check
pub const SAFETY_NET_THRESHOLD: i32 = -5000;

/// Stack size for root search worker threads (32 MB)
pub const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;
