//! `OrderedIntSet`: the public van Emde Boas set.

use log::debug;

use crate::config::SetConfig;
use crate::error::KeyOutOfRange;
use crate::key::{fits, universe_max};
use crate::veb::{Bits, Layout, NodeFor, VebNode};

/// Ordered set of integers from the universe `[0, 2^S)`.
///
/// A van Emde Boas tree specialised at compile time for `S`-bit keys
/// (`1 <= S <= 64`). Successor and predecessor queries cost
/// O(log S) = O(log log U) node visits regardless of how many keys are stored,
/// against O(log n) for a comparison tree.
///
/// # Architecture
/// - Root node type chosen by [`Layout`]: a bitmask [`Leaf`](super::Leaf) for
///   `S <= 6`, otherwise a [`Cluster`](super::Cluster) of half-width nodes
/// - Buckets allocated lazily, one per occupied high half
/// - Minimum and maximum cached at every level; a node holding one key never
///   recurses
///
/// # Performance Characteristics
/// - Insert / remove / next / prev / contains: O(log S)
/// - Min / max / len / is_empty: O(1)
/// - Iteration: O(log S) per key
///
/// # Concurrency
/// None. The set is plain owned data; share it behind your own lock.
///
/// # Example
/// ```rust
/// use veb_ordered_set::OrderedIntSet;
///
/// let mut set = OrderedIntSet::<32>::new();
/// set.insert(10);
/// set.insert(20);
/// set.insert(30);
///
/// assert_eq!(set.next(10), Some(20));
/// assert_eq!(set.next(25), Some(30));
/// assert_eq!(set.prev(10), None);
/// assert_eq!(set.min(), Some(10));
/// ```
#[derive(Clone)]
pub struct OrderedIntSet<const S: u32>
where
    Bits<S>: Layout,
{
    /// Root node for the whole universe
    root: NodeFor<S>,

    /// Number of keys stored
    len: usize,

    /// Runtime configuration
    config: SetConfig,
}

impl<const S: u32> OrderedIntSet<S>
where
    Bits<S>: Layout,
{
    /// Create an empty set with the default configuration.
    ///
    /// # Performance
    /// O(1) - no allocation until the second key arrives
    #[inline]
    pub fn new() -> Self {
        Self::with_config(SetConfig::default())
    }

    /// Create an empty set with the given configuration.
    #[inline]
    pub fn with_config(config: SetConfig) -> Self {
        OrderedIntSet {
            root: Default::default(),
            len: 0,
            config,
        }
    }

    /// Configuration this set was built with.
    #[inline]
    pub fn config(&self) -> SetConfig {
        self.config
    }

    /// Universe width `S`.
    #[inline]
    pub const fn universe_bits(&self) -> u32 {
        S
    }

    /// Largest key the set can hold, `2^S - 1`.
    #[inline]
    pub fn universe_max(&self) -> u64 {
        universe_max(S)
    }

    /// Insert a key.
    ///
    /// # Returns
    /// * `true` if the key was newly inserted
    /// * `false` if the key already existed
    ///
    /// # Panics
    /// If `key >= 2^S`. Use [`try_insert`](Self::try_insert) to get an error
    /// instead.
    ///
    /// # Example
    /// ```rust
    /// use veb_ordered_set::OrderedIntSet;
    ///
    /// let mut set = OrderedIntSet::<16>::new();
    /// assert!(set.insert(42));   // New key
    /// assert!(!set.insert(42));  // Already exists
    /// ```
    #[inline]
    pub fn insert(&mut self, key: u64) -> bool {
        match self.try_insert(key) {
            Ok(inserted) => inserted,
            Err(err) => panic!("{err}"),
        }
    }

    /// Insert a key, rejecting keys outside the universe.
    ///
    /// # Errors
    /// [`KeyOutOfRange`] if `key >= 2^S`; the set is left unchanged.
    pub fn try_insert(&mut self, key: u64) -> Result<bool, KeyOutOfRange> {
        self.check(key)?;
        let inserted = self.root.insert(key);
        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }

    /// Remove a key.
    ///
    /// Removing an absent key is a no-op.
    ///
    /// # Returns
    /// `true` if the key was present
    ///
    /// # Panics
    /// If `key >= 2^S`. Use [`try_remove`](Self::try_remove) to get an error
    /// instead.
    #[inline]
    pub fn remove(&mut self, key: u64) -> bool {
        match self.try_remove(key) {
            Ok(removed) => removed,
            Err(err) => panic!("{err}"),
        }
    }

    /// Remove a key, rejecting keys outside the universe.
    ///
    /// # Errors
    /// [`KeyOutOfRange`] if `key >= 2^S`; the set is left unchanged.
    pub fn try_remove(&mut self, key: u64) -> Result<bool, KeyOutOfRange> {
        self.check(key)?;
        let removed = self.root.remove(key, self.config.bucket_policy);
        if removed {
            self.len -= 1;
        }
        Ok(removed)
    }

    /// Check if a key is present. Keys outside the universe never are.
    #[inline]
    pub fn contains(&self, key: u64) -> bool {
        fits(key, S) && self.root.contains(key)
    }

    /// Smallest key, or `None` if empty.
    ///
    /// # Performance
    /// O(1) - returns cached value
    #[inline]
    pub fn min(&self) -> Option<u64> {
        self.root.min()
    }

    /// Largest key, or `None` if empty.
    ///
    /// # Performance
    /// O(1) - returns cached value
    #[inline]
    pub fn max(&self) -> Option<u64> {
        self.root.max()
    }

    /// Find the successor: the smallest key strictly greater than `key`.
    ///
    /// `key` need not be present. A `key` beyond the universe has no
    /// successor.
    ///
    /// # Performance
    /// O(log S)
    ///
    /// # Example
    /// ```rust
    /// use veb_ordered_set::OrderedIntSet;
    ///
    /// let mut set = OrderedIntSet::<8>::new();
    /// set.insert(10);
    /// set.insert(20);
    ///
    /// assert_eq!(set.next(0), Some(10));
    /// assert_eq!(set.next(10), Some(20));
    /// assert_eq!(set.next(20), None);
    /// ```
    #[inline]
    pub fn next(&self, key: u64) -> Option<u64> {
        if !fits(key, S) {
            return None;
        }
        self.root.next(key)
    }

    /// Find the predecessor: the largest key strictly less than `key`.
    ///
    /// `key` need not be present. For a `key` beyond the universe this is
    /// the maximum.
    ///
    /// # Performance
    /// O(log S)
    #[inline]
    pub fn prev(&self, key: u64) -> Option<u64> {
        if !fits(key, S) {
            return self.max();
        }
        self.root.prev(key)
    }

    /// Smallest key greater than or equal to `key`.
    pub(crate) fn ceiling(&self, key: u64) -> Option<u64> {
        if self.contains(key) {
            Some(key)
        } else {
            self.next(key)
        }
    }

    /// Largest key less than or equal to `key`.
    pub(crate) fn floor(&self, key: u64) -> Option<u64> {
        if self.contains(key) {
            Some(key)
        } else {
            self.prev(key)
        }
    }

    /// Number of keys in the set.
    ///
    /// # Performance
    /// O(1) - returns cached count
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.root.is_empty(), self.len == 0);
        self.root.is_empty()
    }

    /// Remove every key and free all buckets.
    pub fn clear(&mut self) {
        debug!("clearing {}-bit set with {} keys", S, self.len);
        self.root = Default::default();
        self.len = 0;
    }

    /// Free buckets left allocated but empty under
    /// [`BucketPolicy::Retain`](crate::BucketPolicy::Retain).
    ///
    /// Contents are unchanged.
    pub fn compact(&mut self) {
        let before = self.root.bucket_count();
        self.root.compact();
        debug!(
            "compacted {}-bit set: {} -> {} buckets",
            S,
            before,
            self.root.bucket_count()
        );
    }

    /// Number of bucket nodes currently allocated, at every level.
    ///
    /// Includes empty buckets kept by `BucketPolicy::Retain`.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.root.bucket_count()
    }

    #[inline]
    fn check(&self, key: u64) -> Result<(), KeyOutOfRange> {
        if fits(key, S) {
            Ok(())
        } else {
            Err(KeyOutOfRange { key, bits: S })
        }
    }

    /// Check every structural invariant and the cached length.
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        assert_eq!(self.root.validate(), self.len, "cached len disagrees with tree");
        assert_eq!(self.root.is_empty(), self.len == 0);
    }
}

impl<const S: u32> Default for OrderedIntSet<S>
where
    Bits<S>: Layout,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const S: u32> core::fmt::Debug for OrderedIntSet<S>
where
    Bits<S>: Layout,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<const S: u32> PartialEq for OrderedIntSet<S>
where
    Bits<S>: Layout,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<const S: u32> Eq for OrderedIntSet<S> where Bits<S>: Layout {}

impl<const S: u32> Extend<u64> for OrderedIntSet<S>
where
    Bits<S>: Layout,
{
    /// Insert every key.
    ///
    /// # Panics
    /// On the first key outside the universe.
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<const S: u32> FromIterator<u64> for OrderedIntSet<S>
where
    Bits<S>: Layout,
{
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
