//! Core constants shared by the leaf and cluster nodes.

/// Widest universe handled by a single bitmask leaf (2^6 = 64 keys).
///
/// Any width at or below this is stored as one `u64` word; wider universes
/// split into buckets and a summary.
pub const LEAF_MAX_BITS: u32 = 6;

/// Number of bits in a leaf word.
pub const WORD_BITS: u32 = 64;

/// Widest supported universe (keys are `u64`).
pub const MAX_UNIVERSE_BITS: u32 = 64;
