//! Universe arithmetic for `u64` keys.
//!
//! A node of width `S` splits a key into a high half (the bucket index, also
//! the key stored in the summary) and a low half (the key stored inside the
//! bucket). The low half is `S / 2` bits wide and the high half takes the
//! remaining `S - S / 2` bits.

use crate::constants::MAX_UNIVERSE_BITS;

/// Largest key representable in a universe of `bits` bits.
///
/// # Arguments
/// * `bits` - Universe width (1-64)
///
/// # Returns
/// `2^bits - 1`
///
/// # Performance
/// O(1) - single shift, no overflow at 64 bits
#[inline(always)]
pub fn universe_max(bits: u32) -> u64 {
    debug_assert!((1..=MAX_UNIVERSE_BITS).contains(&bits), "width out of bounds");
    u64::MAX >> (MAX_UNIVERSE_BITS - bits)
}

/// Check whether `key` lies inside `[0, 2^bits)`.
#[inline(always)]
pub fn fits(key: u64, bits: u32) -> bool {
    key <= universe_max(bits)
}

/// High half of a key: the bucket index.
///
/// # Arguments
/// * `key` - Key inside the node's universe
/// * `low_bits` - Width of the low half (always < 64)
#[inline(always)]
pub fn high(key: u64, low_bits: u32) -> u64 {
    key >> low_bits
}

/// Low half of a key: the position inside its bucket.
#[inline(always)]
pub fn low(key: u64, low_bits: u32) -> u64 {
    key & ((1u64 << low_bits) - 1)
}

/// Rebuild a key from its bucket index and in-bucket position.
///
/// Inverse of [`high`] / [`low`]: `join(high(k), low(k)) == k`.
#[inline(always)]
pub fn join(high: u64, low: u64, low_bits: u32) -> u64 {
    debug_assert!(low >> low_bits == 0, "low half wider than its bucket");
    (high << low_bits) | low
}
