//! Basic single-bit operations.

use crate::constants::WORD_BITS;

/// Set a bit in the word.
///
/// # Arguments
/// * `word` - Mutable reference to the bitmap word
/// * `idx` - Bit index (0-63)
///
/// # Returns
/// `true` if the bit was previously clear
///
/// # Performance
/// O(1) - one OR and one test
#[inline]
pub fn set_bit(word: &mut u64, idx: u32) -> bool {
    debug_assert!(idx < WORD_BITS, "bit index out of bounds");
    let mask = 1u64 << idx;
    let was_clear = *word & mask == 0;
    *word |= mask;
    was_clear
}

/// Clear a bit in the word.
///
/// # Arguments
/// * `word` - Mutable reference to the bitmap word
/// * `idx` - Bit index (0-63)
///
/// # Returns
/// `true` if the bit was previously set
///
/// # Performance
/// O(1) - one AND and one test
#[inline]
pub fn clear_bit(word: &mut u64, idx: u32) -> bool {
    debug_assert!(idx < WORD_BITS, "bit index out of bounds");
    let mask = 1u64 << idx;
    let was_set = *word & mask != 0;
    *word &= !mask;
    was_set
}

/// Check if a bit is set.
#[inline]
pub fn is_set(word: u64, idx: u32) -> bool {
    debug_assert!(idx < WORD_BITS, "bit index out of bounds");
    word & (1u64 << idx) != 0
}
