//! Leaf node: the whole universe in one bitmask word.

use crate::bitmap::{
    clear_bit, count_ones, first_set_bit, is_set, last_set_bit, next_set_bit, prev_set_bit,
    set_bit,
};
use crate::config::BucketPolicy;
use crate::constants::LEAF_MAX_BITS;
use crate::veb::VebNode;

/// Terminal node for universes of `W <= 6` bits (at most 64 keys).
///
/// Bit `k` of `mask` is set iff key `k` is present. Min and max are read off
/// the mask with TZCNT / LZCNT, so nothing is cached and no operation
/// recurses.
///
/// # Memory Layout
/// - `mask`: 8 bytes
///
/// # Performance
/// - Insert / remove / contains: O(1), one bit operation
/// - Min / max / next / prev: O(1), one mask plus one bit scan
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Leaf<const W: u32> {
    mask: u64,
}

impl<const W: u32> Leaf<W> {
    const WIDTH_OK: () = assert!(W >= 1 && W <= LEAF_MAX_BITS, "leaf width must be 1..=6");

    /// Create an empty leaf.
    ///
    /// Fails to compile (post-monomorphisation) for widths outside `1..=6`.
    #[inline(always)]
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::WIDTH_OK;
        Leaf { mask: 0 }
    }

    /// Raw bitmask.
    #[inline(always)]
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Number of keys present (POPCNT).
    #[inline(always)]
    pub fn len(&self) -> usize {
        count_ones(self.mask) as usize
    }

    #[inline(always)]
    fn bit(key: u64) -> u32 {
        debug_assert!(key >> W == 0, "key outside leaf universe");
        key as u32
    }
}

impl<const W: u32> Default for Leaf<W> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: u32> core::fmt::Debug for Leaf<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Leaf<{}>({:#b})", W, self.mask)
    }
}

impl<const W: u32> VebNode for Leaf<W> {
    const BITS: u32 = W;

    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.mask == 0
    }

    #[inline(always)]
    fn min(&self) -> Option<u64> {
        first_set_bit(self.mask).map(u64::from)
    }

    #[inline(always)]
    fn max(&self) -> Option<u64> {
        last_set_bit(self.mask).map(u64::from)
    }

    #[inline(always)]
    fn insert(&mut self, key: u64) -> bool {
        set_bit(&mut self.mask, Self::bit(key))
    }

    #[inline(always)]
    fn remove(&mut self, key: u64, _policy: BucketPolicy) -> bool {
        clear_bit(&mut self.mask, Self::bit(key))
    }

    #[inline(always)]
    fn next(&self, key: u64) -> Option<u64> {
        next_set_bit(self.mask, Self::bit(key)).map(u64::from)
    }

    #[inline(always)]
    fn prev(&self, key: u64) -> Option<u64> {
        prev_set_bit(self.mask, Self::bit(key)).map(u64::from)
    }

    #[inline(always)]
    fn contains(&self, key: u64) -> bool {
        is_set(self.mask, Self::bit(key))
    }

    #[inline(always)]
    fn bucket_count(&self) -> usize {
        0
    }

    #[inline(always)]
    fn compact(&mut self) {}

    #[cfg(test)]
    fn validate(&self) -> usize {
        assert_eq!(
            self.mask.checked_shr(1u32 << W).unwrap_or(0),
            0,
            "leaf bit set outside its universe"
        );
        self.len()
    }
}
