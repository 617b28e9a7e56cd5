//! Search operations for finding set bits in a word.
//!
//! None of these shift by 64 or more: the boundary indices (`after == 63`,
//! `before == 0`) are answered before any mask is built.

use crate::constants::WORD_BITS;

/// Find first set bit (minimum).
///
/// # Returns
/// Index of the lowest set bit, or None if the word is zero
///
/// # Performance
/// O(1) - single TZCNT
#[inline]
pub fn first_set_bit(word: u64) -> Option<u32> {
    if word == 0 {
        None
    } else {
        Some(word.trailing_zeros())
    }
}

/// Find last set bit (maximum).
///
/// # Returns
/// Index of the highest set bit, or None if the word is zero
///
/// # Performance
/// O(1) - single LZCNT
#[inline]
pub fn last_set_bit(word: u64) -> Option<u32> {
    if word == 0 {
        None
    } else {
        Some(WORD_BITS - 1 - word.leading_zeros())
    }
}

/// Count set bits in the word.
#[inline]
pub fn count_ones(word: u64) -> u32 {
    word.count_ones()
}

/// Find next set bit strictly after the given index.
///
/// # Arguments
/// * `word` - Bitmap word
/// * `after` - Index to search after (0-63)
///
/// # Returns
/// Index of the next set bit, or None if no higher bit is set
///
/// # Performance
/// O(1) - one mask and TZCNT
#[inline]
pub fn next_set_bit(word: u64, after: u32) -> Option<u32> {
    debug_assert!(after < WORD_BITS, "bit index out of bounds");
    if after >= WORD_BITS - 1 {
        return None;
    }
    first_set_bit(word & (!0u64 << (after + 1)))
}

/// Find previous set bit strictly before the given index.
///
/// # Arguments
/// * `word` - Bitmap word
/// * `before` - Index to search before (0-63)
///
/// # Returns
/// Index of the previous set bit, or None if no lower bit is set
///
/// # Performance
/// O(1) - one mask and LZCNT
#[inline]
pub fn prev_set_bit(word: u64, before: u32) -> Option<u32> {
    debug_assert!(before < WORD_BITS, "bit index out of bounds");
    last_set_bit(word & ((1u64 << before) - 1))
}
