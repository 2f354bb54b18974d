//! Castling-rights markers.
//!
//! A marker is 0 while its piece has never left its home square. Otherwise it
//! holds the 1-based history length right after the move that cost the right,
//! so undo can tell whether the popped move is the one that stamped it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::moves::CastleSide;
use super::piece::Color;

/// Marker for a right that was gone before the recorded history began.
///
/// No history index ever reaches it, so undo never clears it.
pub const LOST_BEFORE_HISTORY: u32 = u32::MAX;

/// Number of markers: one king and two rooks per side
pub(crate) const MARKER_COUNT: usize = 6;

/// King and rook "moved" markers for both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingMarkers([u32; MARKER_COUNT]);

impl CastlingMarkers {
    #[inline]
    pub(crate) const fn king_slot(color: Color) -> usize {
        color.index()
    }

    #[inline]
    pub(crate) const fn rook_slot(color: Color, side: CastleSide) -> usize {
        2 + color.index() * 2
            + match side {
                CastleSide::KingSide => 0,
                CastleSide::QueenSide => 1,
            }
    }

    /// All rights still available
    #[must_use]
    pub const fn new() -> Self {
        CastlingMarkers([0; MARKER_COUNT])
    }

    #[inline]
    #[must_use]
    pub const fn king(&self, color: Color) -> u32 {
        self.0[Self::king_slot(color)]
    }

    #[inline]
    #[must_use]
    pub const fn rook(&self, color: Color, side: CastleSide) -> u32 {
        self.0[Self::rook_slot(color, side)]
    }

    /// True while neither the king nor the given rook has moved.
    #[inline]
    #[must_use]
    pub const fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.king(color) == 0 && self.rook(color, side) == 0
    }

    /// Stamp the king marker unless it is already set. Returns whether it changed.
    #[inline]
    pub fn stamp_king(&mut self, color: Color, index: u32) -> bool {
        Self::stamp(&mut self.0[Self::king_slot(color)], index)
    }

    #[inline]
    pub fn stamp_rook(&mut self, color: Color, side: CastleSide, index: u32) -> bool {
        Self::stamp(&mut self.0[Self::rook_slot(color, side)], index)
    }

    /// Reset the king marker to 0 only if `index` is the move that stamped it.
    #[inline]
    pub fn unstamp_king(&mut self, color: Color, index: u32) {
        Self::unstamp(&mut self.0[Self::king_slot(color)], index);
    }

    #[inline]
    pub fn unstamp_rook(&mut self, color: Color, side: CastleSide, index: u32) {
        Self::unstamp(&mut self.0[Self::rook_slot(color, side)], index);
    }

    /// Mark a right as lost before any recorded move.
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.0[Self::rook_slot(color, side)] = LOST_BEFORE_HISTORY;
    }

    /// Slots still at 0, in a fixed order (for hashing)
    pub(crate) fn unset_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &marker)| marker == 0)
            .map(|(slot, _)| slot)
    }

    #[inline]
    fn stamp(marker: &mut u32, index: u32) -> bool {
        if *marker == 0 {
            *marker = index;
            true
        } else {
            false
        }
    }

    #[inline]
    fn unstamp(marker: &mut u32, index: u32) {
        if *marker == index {
            *marker = 0;
        }
    }
}
