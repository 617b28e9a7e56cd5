//! The contract shared by leaf and cluster nodes.

use crate::config::BucketPolicy;
use core::fmt::Debug;

/// A van Emde Boas node over the universe `[0, 2^BITS)`.
///
/// Implemented by [`Leaf`](super::Leaf) (one bitmask word) and
/// [`Cluster`](super::Cluster) (buckets plus summary). A cluster is generic
/// over the node types of its halves, so the whole tree is resolved at compile
/// time and every call below a cluster is static dispatch.
///
/// Keys passed in must lie inside the node's universe; this is checked with
/// `debug_assert!` only; the public set validates keys before descending.
pub trait VebNode: Default + Clone + Debug {
    /// Universe width in bits.
    const BITS: u32;

    /// `true` if the node holds no keys.
    fn is_empty(&self) -> bool;

    /// Smallest key, O(1).
    fn min(&self) -> Option<u64>;

    /// Largest key, O(1).
    fn max(&self) -> Option<u64>;

    /// Insert a key.
    ///
    /// # Returns
    /// `true` if the key was not present before
    fn insert(&mut self, key: u64) -> bool;

    /// Remove a key, applying `policy` to any bucket drained on the way.
    ///
    /// # Returns
    /// `true` if the key was present
    fn remove(&mut self, key: u64, policy: BucketPolicy) -> bool;

    /// Smallest key strictly greater than `key`.
    fn next(&self, key: u64) -> Option<u64>;

    /// Largest key strictly less than `key`.
    fn prev(&self, key: u64) -> Option<u64>;

    /// Membership test.
    fn contains(&self, key: u64) -> bool;

    /// Number of bucket nodes currently allocated in this subtree, empty or
    /// not. Leaves have none.
    fn bucket_count(&self) -> usize;

    /// Free every allocated-but-empty bucket in this subtree.
    fn compact(&mut self);

    /// Walk the subtree checking the structural invariants, panicking on the
    /// first violation.
    ///
    /// # Returns
    /// Number of keys stored in the subtree
    #[cfg(test)]
    fn validate(&self) -> usize;
}
