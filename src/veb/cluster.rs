//! Recursive cluster node: sparse buckets, a summary, and cached extremes.

use alloc::collections::BTreeMap;
use log::trace;

use crate::config::BucketPolicy;
use crate::key::{high, join, low};
use crate::veb::VebNode;

/// Internal node over `[0, 2^(B::BITS + S::BITS))`.
///
/// A key `k` splits into `high(k)` (the top `S::BITS` bits) and `low(k)` (the
/// bottom `B::BITS` bits). `low(k)` is stored in the bucket for `high(k)` and
/// `high(k)` is stored in `summary` while that bucket is non-empty.
///
/// # Invariants
/// - `min.is_none() == max.is_none()`, and both are `None` iff the node is empty
/// - The minimum lives only in `min`; it is never stored in a bucket
/// - A single-key node has no non-empty bucket and an empty summary
/// - With two or more keys, every key other than `min` (including `max`) is
///   stored in its bucket
/// - `summary` contains `h` iff `buckets[h]` exists and is non-empty
///
/// Buckets are created on first insertion. A drained bucket is freed or kept
/// according to the [`BucketPolicy`] passed to `remove`; either way only the
/// summary decides which buckets count as occupied.
///
/// # Performance
/// Every operation resolves from `min`/`max` or makes one recursive call into
/// either a bucket or the summary (never both on a path that recurses twice),
/// so the depth is `O(log BITS)`. Bucket lookup is a `BTreeMap` probe.
#[derive(Clone, Debug)]
pub struct Cluster<B: VebNode, S: VebNode> {
    /// Lazily allocated buckets keyed by high half.
    buckets: BTreeMap<u64, B>,

    /// High halves whose bucket is non-empty.
    summary: S,

    /// Cached minimum, never stored recursively.
    min: Option<u64>,

    /// Cached maximum, also stored in its bucket when `min != max`.
    max: Option<u64>,
}

impl<B: VebNode, S: VebNode> Cluster<B, S> {
    /// Create an empty cluster. Allocates nothing.
    #[inline]
    pub fn new() -> Self {
        Cluster {
            buckets: BTreeMap::new(),
            summary: S::default(),
            min: None,
            max: None,
        }
    }

    #[inline(always)]
    fn split(key: u64) -> (u64, u64) {
        (high(key, B::BITS), low(key, B::BITS))
    }

    #[inline(always)]
    fn join(hi: u64, lo: u64) -> u64 {
        join(hi, lo, B::BITS)
    }

    /// Smallest key held in an occupied bucket.
    fn first_stored(&self) -> Option<u64> {
        let hi = self.summary.min()?;
        let lo = self
            .buckets
            .get(&hi)
            .and_then(B::min)
            .expect("summary lists a bucket that is missing or empty");
        Some(Self::join(hi, lo))
    }

    /// Largest key held in an occupied bucket.
    fn last_stored(&self) -> Option<u64> {
        let hi = self.summary.max()?;
        let lo = self
            .buckets
            .get(&hi)
            .and_then(B::max)
            .expect("summary lists a bucket that is missing or empty");
        Some(Self::join(hi, lo))
    }
}

impl<B: VebNode, S: VebNode> Default for Cluster<B, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: VebNode, S: VebNode> VebNode for Cluster<B, S> {
    const BITS: u32 = B::BITS + S::BITS;

    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    #[inline(always)]
    fn min(&self) -> Option<u64> {
        self.min
    }

    #[inline(always)]
    fn max(&self) -> Option<u64> {
        self.max
    }

    fn insert(&mut self, key: u64) -> bool {
        let (min, max) = match (self.min, self.max) {
            (Some(min), Some(max)) => (min, max),
            _ => {
                // Singletons live only in the cached extremes
                self.min = Some(key);
                self.max = Some(key);
                return true;
            }
        };

        if key == min {
            return false;
        }

        // A new minimum takes the cached slot and demotes the old one
        let key = if key < min {
            self.min = Some(key);
            min
        } else {
            key
        };
        if key > max {
            self.max = Some(key);
        }

        let (hi, lo) = Self::split(key);
        let bucket = self.buckets.entry(hi).or_insert_with(|| {
            trace!("cluster<{}>: allocating bucket {}", Self::BITS, hi);
            B::default()
        });
        if bucket.is_empty() {
            self.summary.insert(hi);
        }
        bucket.insert(lo)
    }

    fn remove(&mut self, key: u64, policy: BucketPolicy) -> bool {
        let (min, max) = match (self.min, self.max) {
            (Some(min), Some(max)) => (min, max),
            _ => return false,
        };

        if min == max {
            if key != min {
                return false;
            }
            self.min = None;
            self.max = None;
            return true;
        }

        // Removing the minimum promotes the smallest stored key, which is
        // then the key actually deleted from its bucket
        let key = if key == min {
            let promoted = self
                .first_stored()
                .expect("cluster with two keys has an empty summary");
            self.min = Some(promoted);
            promoted
        } else {
            key
        };

        let (hi, lo) = Self::split(key);
        let Some(bucket) = self.buckets.get_mut(&hi) else {
            return false;
        };
        if !bucket.remove(lo, policy) {
            return false;
        }

        if bucket.is_empty() {
            self.summary.remove(hi, policy);
            if policy == BucketPolicy::Evict {
                trace!("cluster<{}>: evicting bucket {}", Self::BITS, hi);
                self.buckets.remove(&hi);
            }
        }

        if key == max {
            self.max = Some(self.last_stored().unwrap_or_else(|| {
                // Only the cached minimum is left
                self.min.expect("non-empty cluster lost its minimum")
            }));
        }

        true
    }

    fn next(&self, key: u64) -> Option<u64> {
        let min = self.min?;
        if key < min {
            return Some(min);
        }
        if self.max.is_some_and(|max| key >= max) {
            return None;
        }

        let (hi, lo) = Self::split(key);
        if let Some(bucket) = self.buckets.get(&hi) {
            if bucket.max().is_some_and(|bucket_max| lo < bucket_max) {
                let found = bucket
                    .next(lo)
                    .expect("bucket with a larger maximum has no successor");
                return Some(Self::join(hi, found));
            }
        }

        let next_hi = self.summary.next(hi)?;
        let found = self
            .buckets
            .get(&next_hi)
            .and_then(B::min)
            .expect("summary lists a bucket that is missing or empty");
        Some(Self::join(next_hi, found))
    }

    fn prev(&self, key: u64) -> Option<u64> {
        let min = self.min?;
        if key <= min {
            return None;
        }
        if let Some(max) = self.max.filter(|&max| key > max) {
            return Some(max);
        }

        let (hi, lo) = Self::split(key);
        if let Some(bucket) = self.buckets.get(&hi) {
            if bucket.min().is_some_and(|bucket_min| bucket_min < lo) {
                let found = bucket
                    .prev(lo)
                    .expect("bucket with a smaller minimum has no predecessor");
                return Some(Self::join(hi, found));
            }
        }

        match self.summary.prev(hi) {
            Some(prev_hi) => {
                let found = self
                    .buckets
                    .get(&prev_hi)
                    .and_then(B::max)
                    .expect("summary lists a bucket that is missing or empty");
                Some(Self::join(prev_hi, found))
            }
            None => Some(min),
        }
    }

    fn contains(&self, key: u64) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => {
                if key == min || key == max {
                    return true;
                }
                if key < min || key > max {
                    return false;
                }
                let (hi, lo) = Self::split(key);
                self.buckets.get(&hi).is_some_and(|bucket| bucket.contains(lo))
            }
            _ => false,
        }
    }

    fn bucket_count(&self) -> usize {
        self.buckets.len()
            + self.buckets.values().map(B::bucket_count).sum::<usize>()
            + self.summary.bucket_count()
    }

    fn compact(&mut self) {
        self.buckets.retain(|_, bucket| {
            bucket.compact();
            !bucket.is_empty()
        });
        self.summary.compact();
    }

    #[cfg(test)]
    fn validate(&self) -> usize {
        let (min, max) = match (self.min, self.max) {
            (Some(min), Some(max)) => (min, max),
            (None, None) => {
                assert!(self.summary.is_empty(), "empty cluster has a non-empty summary");
                assert!(
                    self.buckets.values().all(B::is_empty),
                    "empty cluster has a non-empty bucket"
                );
                return 0;
            }
            _ => panic!("cluster caches only one of min/max"),
        };
        assert!(min <= max, "cached min {min} above cached max {max}");

        let occupied = self.summary.validate();
        let mut stored = 0;
        let mut non_empty = 0;
        for (&hi, bucket) in &self.buckets {
            let count = bucket.validate();
            assert_eq!(
                self.summary.contains(hi),
                count > 0,
                "summary membership of bucket {hi} disagrees with its contents"
            );
            if count > 0 {
                non_empty += 1;
                stored += count;
            }
        }
        assert_eq!(occupied, non_empty, "summary lists buckets that do not exist");

        if min == max {
            assert_eq!(stored, 0, "singleton cluster stores keys recursively");
            return 1;
        }

        assert!(stored > 0, "cluster with distinct min and max stores nothing");
        let (min_hi, min_lo) = Self::split(min);
        assert!(
            !self.buckets.get(&min_hi).is_some_and(|b| b.contains(min_lo)),
            "minimum {min} is stored recursively"
        );
        assert_eq!(self.first_stored().map(|k| k > min), Some(true), "stored key below min");
        assert_eq!(self.last_stored(), Some(max), "max is not the largest stored key");
        stored + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::veb::Leaf;
    use alloc::vec::Vec;

    /// 8-bit universe: four low bits per bucket, four high bits in the summary.
    type Byte = Cluster<Leaf<4>, Leaf<4>>;

    /// 12-bit universe with one more level of clustering.
    type Wide = Cluster<Cluster<Leaf<3>, Leaf<3>>, Cluster<Leaf<3>, Leaf<3>>>;

    fn collect<N: VebNode>(node: &N) -> Vec<u64> {
        let mut out = Vec::new();
        let mut cur = node.min();
        while let Some(k) = cur {
            out.push(k);
            cur = node.next(k);
        }
        out
    }

    #[test]
    fn test_widths() {
        assert_eq!(Byte::BITS, 8);
        assert_eq!(Wide::BITS, 12);
    }

    #[test]
    fn test_singleton_is_not_stored() {
        let mut node = Byte::new();
        assert!(node.insert(0x42));
        assert_eq!(node.min(), Some(0x42));
        assert_eq!(node.max(), Some(0x42));
        assert_eq!(node.bucket_count(), 0);
        assert!(node.summary.is_empty());
        assert_eq!(node.validate(), 1);
    }

    #[test]
    fn test_new_min_demotes_old_min() {
        let mut node = Byte::new();
        node.insert(0x42);
        node.insert(0x10);

        assert_eq!(node.min(), Some(0x10));
        assert_eq!(node.max(), Some(0x42));
        // Old min now lives in bucket 4, the new min nowhere
        assert!(node.buckets.get(&0x4).is_some_and(|b| b.contains(0x2)));
        assert!(!node.buckets.contains_key(&0x1));
        assert_eq!(node.validate(), 2);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut node = Byte::new();
        assert!(node.insert(5));
        assert!(node.insert(200));
        assert!(!node.insert(5));
        assert!(!node.insert(200));
        assert_eq!(node.validate(), 2);
    }

    #[test]
    fn test_remove_min_promotes() {
        let mut node = Byte::new();
        for k in [10, 15, 20] {
            node.insert(k);
        }
        assert!(node.remove(10, BucketPolicy::Evict));
        assert_eq!(node.min(), Some(15));
        assert_eq!(node.max(), Some(20));
        assert_eq!(collect(&node), [15, 20]);
        assert_eq!(node.validate(), 2);
    }

    #[test]
    fn test_remove_max_recomputes() {
        let mut node = Byte::new();
        for k in [15, 50, 20] {
            node.insert(k);
        }
        assert!(node.remove(50, BucketPolicy::Evict));
        assert_eq!(node.max(), Some(20));
        assert!(node.remove(20, BucketPolicy::Evict));
        assert_eq!(node.max(), Some(15));
        assert_eq!(node.min(), Some(15));
        assert_eq!(node.bucket_count(), 0);
        assert_eq!(node.validate(), 1);
    }

    #[test]
    fn test_remove_absent() {
        let mut node = Byte::new();
        assert!(!node.remove(3, BucketPolicy::Evict));

        node.insert(3);
        assert!(!node.remove(4, BucketPolicy::Evict));
        node.insert(100);
        // Absent key in an occupied bucket, and in a never-touched bucket
        assert!(!node.remove(101, BucketPolicy::Evict));
        assert!(!node.remove(0xF0, BucketPolicy::Evict));
        assert_eq!(collect(&node), [3, 100]);
        assert_eq!(node.validate(), 2);
    }

    #[test]
    fn test_retain_policy_keeps_buckets() {
        let mut node = Byte::new();
        for k in [1, 0x31, 0x32] {
            node.insert(k);
        }
        assert_eq!(node.bucket_count(), 1);

        node.remove(0x31, BucketPolicy::Retain);
        node.remove(0x32, BucketPolicy::Retain);
        assert_eq!(node.bucket_count(), 1);
        assert!(node.summary.is_empty());
        assert_eq!(node.next(1), None);
        assert_eq!(node.validate(), 1);

        node.compact();
        assert_eq!(node.bucket_count(), 0);
    }

    #[test]
    fn test_evict_policy_frees_buckets() {
        let mut node = Byte::new();
        for k in [1, 0x31, 0x32] {
            node.insert(k);
        }
        node.remove(0x31, BucketPolicy::Evict);
        node.remove(0x32, BucketPolicy::Evict);
        assert_eq!(node.bucket_count(), 0);
    }

    #[test]
    fn test_next_prev_across_buckets() {
        let mut node = Wide::new();
        let keys = [0u64, 7, 8, 63, 64, 511, 2048, 4095];
        for &k in &keys {
            node.insert(k);
        }
        assert_eq!(node.validate(), keys.len());

        for x in 0..4096u64 {
            let next = keys.iter().copied().find(|&k| k > x);
            let prev = keys.iter().copied().rev().find(|&k| k < x);
            assert_eq!(node.next(x), next, "next({x})");
            assert_eq!(node.prev(x), prev, "prev({x})");
            assert_eq!(node.contains(x), keys.contains(&x), "contains({x})");
        }
    }

    #[test]
    fn test_drain_to_empty() {
        let mut node = Wide::new();
        let keys: Vec<u64> = (0..4096).step_by(37).collect();
        for &k in &keys {
            node.insert(k);
        }
        for (removed, &k) in keys.iter().rev().enumerate() {
            assert!(node.remove(k, BucketPolicy::Evict));
            assert_eq!(node.validate(), keys.len() - removed - 1);
        }
        assert!(node.is_empty());
        assert_eq!(node.min(), None);
        assert_eq!(node.max(), None);
        assert_eq!(node.bucket_count(), 0);
    }
}
