//! Runtime configuration for [`OrderedIntSet`](crate::OrderedIntSet).

/// What a cluster does with a bucket once its last key is removed.
///
/// The choice never changes the contents seen through the public API: an
/// empty retained bucket is indistinguishable from one that was never
/// allocated, because the summary only lists non-empty buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketPolicy {
    /// Free drained buckets immediately. Memory tracks live content.
    #[default]
    Evict,

    /// Keep drained buckets allocated so refilling them costs no allocation.
    ///
    /// Use [`OrderedIntSet::compact`](crate::OrderedIntSet::compact) to free
    /// them on demand.
    Retain,
}

/// Set-wide configuration.
///
/// # Example
/// ```rust
/// use veb_ordered_set::{BucketPolicy, OrderedIntSet, SetConfig};
///
/// let config = SetConfig::new().bucket_policy(BucketPolicy::Retain);
/// let mut set = OrderedIntSet::<32>::with_config(config);
/// set.insert(7);
/// assert_eq!(set.config().bucket_policy, BucketPolicy::Retain);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetConfig {
    /// Policy applied to buckets that become empty on removal.
    pub bucket_policy: BucketPolicy,
}

impl SetConfig {
    /// Default configuration (`BucketPolicy::Evict`).
    #[inline]
    pub const fn new() -> Self {
        Self {
            bucket_policy: BucketPolicy::Evict,
        }
    }

    /// Replace the bucket policy.
    #[inline]
    pub const fn bucket_policy(mut self, policy: BucketPolicy) -> Self {
        self.bucket_policy = policy;
        self
    }
}
