//! Transposition table for caching search results.
//!
//! One lockless slot per index, shared by every search thread. A slot holds
//! two atomic words: `key ^ data` and `data`. A probe accepts the slot only if
//! re-XORing the two words gives back the probed key, so a slot torn by two
//! racing writers reads as a miss instead of a wrong entry.

use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

impl BoundType {
    fn to_u8(self) -> u8 {
        match self {
            BoundType::Exact => 0,
            BoundType::LowerBound => 1,
            BoundType::UpperBound => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v & 0x3 {
            0 => BoundType::Exact,
            1 => BoundType::LowerBound,
            _ => BoundType::UpperBound,
        }
    }
}

/// Unpacked TT entry for reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: u8,
    pub score: i32,
    pub bound_type: BoundType,
}

/// Set on every stored word so an entry never packs to zero.
const VALID_BIT: u64 = 1 << 63;

/// Packed entry format:
/// - bits 0-31:  score (i32 as u32)
/// - bits 32-39: depth (u8)
/// - bits 40-41: bound
/// - bit 63:     valid
fn pack_entry(depth: u8, score: i32, bound_type: BoundType) -> u64 {
    u64::from(score as u32)
        | (u64::from(depth) << 32)
        | (u64::from(bound_type.to_u8()) << 40)
        | VALID_BIT
}

fn unpack_entry(data: u64) -> TTEntry {
    TTEntry {
        score: (data & 0xFFFF_FFFF) as u32 as i32,
        depth: ((data >> 32) & 0xFF) as u8,
        bound_type: BoundType::from_u8(((data >> 40) & 0x3) as u8),
    }
}

/// A single TT slot using lockless hashing.
#[repr(C)]
struct TTSlot {
    /// Stores: hash_key ^ packed_data
    key_xor: AtomicU64,
    /// Stores: packed_data
    data: AtomicU64,
}

impl TTSlot {
    fn new() -> Self {
        TTSlot {
            key_xor: AtomicU64::new(0),
            data: AtomicU64::new(0),
        }
    }

    fn store(&self, hash: u64, packed: u64) {
        self.data.store(packed, Ordering::Relaxed);
        self.key_xor.store(hash ^ packed, Ordering::Relaxed);
    }

    fn probe(&self, hash: u64) -> Option<TTEntry> {
        let key_xor = self.key_xor.load(Ordering::Relaxed);
        let data = self.data.load(Ordering::Relaxed);

        if key_xor ^ data == hash && data & VALID_BIT != 0 {
            Some(unpack_entry(data))
        } else {
            None
        }
    }
}

/// Thread-safe transposition table using lockless hashing.
///
/// Each position maps to exactly one slot and a store always overwrites it.
pub struct TranspositionTable {
    slots: Vec<TTSlot>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let slot_size = mem::size_of::<TTSlot>();
        let mut num_slots = (size_mb * 1024 * 1024) / slot_size;

        // Power of two for mask indexing
        num_slots = num_slots.next_power_of_two() / 2;
        if num_slots == 0 {
            num_slots = 1024;
        }

        let slots = (0..num_slots).map(|_| TTSlot::new()).collect();

        TranspositionTable {
            slots,
            mask: num_slots - 1,
        }
    }

    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Probe the table for an entry matching the given hash.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        self.slots[self.index(hash)].probe(hash)
    }

    /// Store an entry in the table, replacing whatever the slot held.
    pub fn store(&self, hash: u64, depth: u32, score: i32, bound_type: BoundType) {
        let depth_u8 = depth.min(255) as u8;
        let packed = pack_entry(depth_u8, score, bound_type);
        self.slots[self.index(hash)].store(hash, packed);
    }

    /// Clear all entries from the table.
    pub fn clear(&self) {
        for slot in &self.slots {
            slot.key_xor.store(0, Ordering::Relaxed);
            slot.data.store(0, Ordering::Relaxed);
        }
    }
}
