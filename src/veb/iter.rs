//! Ordered iteration over an `OrderedIntSet`.
//!
//! Both iterators walk the set with `next` / `prev`, one O(log S) query per
//! key, and can be consumed from either end.

use core::iter::FusedIterator;
use core::ops::{Bound, RangeBounds};

use crate::veb::{Bits, Layout, OrderedIntSet};

/// Iterator over keys within bounds, in ascending order.
///
/// # Example
/// ```rust
/// use veb_ordered_set::OrderedIntSet;
///
/// let set: OrderedIntSet<16> = (0..100).collect();
///
/// let keys: Vec<u64> = set.range(10..20).collect();
/// assert_eq!(keys.len(), 10);
/// assert_eq!(keys[0], 10);
/// assert_eq!(keys[9], 19);
/// ```
pub struct Range<'a, const S: u32>
where
    Bits<S>: Layout,
{
    set: &'a OrderedIntSet<S>,

    /// Next key to yield from the front
    front: Option<u64>,

    /// Next key to yield from the back
    back: Option<u64>,
}

impl<'a, const S: u32> Range<'a, S>
where
    Bits<S>: Layout,
{
    /// Resolve the bounds to the first and last stored keys inside them.
    ///
    /// # Performance
    /// O(log S) - at most two membership tests and two neighbour queries
    pub(crate) fn new<R>(set: &'a OrderedIntSet<S>, range: R) -> Self
    where
        R: RangeBounds<u64>,
    {
        use Bound::*;

        let front = match range.start_bound() {
            Included(&key) => set.ceiling(key),
            Excluded(&key) => set.next(key),
            Unbounded => set.min(),
        };
        let back = match range.end_bound() {
            Included(&key) => set.floor(key),
            Excluded(&key) => set.prev(key),
            Unbounded => set.max(),
        };

        match (front, back) {
            (Some(lo), Some(hi)) if lo <= hi => Range {
                set,
                front,
                back,
            },
            _ => Range {
                set,
                front: None,
                back: None,
            },
        }
    }

    #[inline]
    fn finish(&mut self) {
        self.front = None;
        self.back = None;
    }
}

impl<const S: u32> Iterator for Range<'_, S>
where
    Bits<S>: Layout,
{
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let key = self.front?;
        if self.back == Some(key) {
            self.finish();
        } else {
            self.front = self.set.next(key);
        }
        Some(key)
    }
}

impl<const S: u32> DoubleEndedIterator for Range<'_, S>
where
    Bits<S>: Layout,
{
    fn next_back(&mut self) -> Option<u64> {
        let key = self.back?;
        if self.front == Some(key) {
            self.finish();
        } else {
            self.back = self.set.prev(key);
        }
        Some(key)
    }
}

impl<const S: u32> FusedIterator for Range<'_, S> where Bits<S>: Layout {}

/// Iterator over all keys in ascending order.
///
/// # Example
/// ```rust
/// use veb_ordered_set::OrderedIntSet;
///
/// let mut set = OrderedIntSet::<32>::new();
/// set.insert(30);
/// set.insert(10);
/// set.insert(20);
///
/// let keys: Vec<u64> = set.iter().collect();
/// assert_eq!(keys, vec![10, 20, 30]);
///
/// let keys: Vec<u64> = set.iter().rev().collect();
/// assert_eq!(keys, vec![30, 20, 10]);
/// ```
pub struct Iter<'a, const S: u32>
where
    Bits<S>: Layout,
{
    inner: Range<'a, S>,

    /// Keys not yet yielded from either end
    remaining: usize,
}

impl<'a, const S: u32> Iter<'a, S>
where
    Bits<S>: Layout,
{
    pub(crate) fn new(set: &'a OrderedIntSet<S>) -> Self {
        Iter {
            inner: Range::new(set, ..),
            remaining: set.len(),
        }
    }
}

impl<const S: u32> Iterator for Iter<'_, S>
where
    Bits<S>: Layout,
{
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let key = self.inner.next()?;
        self.remaining -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const S: u32> DoubleEndedIterator for Iter<'_, S>
where
    Bits<S>: Layout,
{
    fn next_back(&mut self) -> Option<u64> {
        let key = self.inner.next_back()?;
        self.remaining -= 1;
        Some(key)
    }
}

impl<const S: u32> ExactSizeIterator for Iter<'_, S> where Bits<S>: Layout {}

impl<const S: u32> FusedIterator for Iter<'_, S> where Bits<S>: Layout {}

impl<const S: u32> OrderedIntSet<S>
where
    Bits<S>: Layout,
{
    /// Iterate over all keys in ascending order.
    ///
    /// # Performance
    /// - O(log S) per element
    /// - O(n log S) total for n elements
    #[inline]
    pub fn iter(&self) -> Iter<'_, S> {
        Iter::new(self)
    }

    /// Iterate over the keys within `range`, in ascending order.
    ///
    /// Supports all range types:
    /// - `set.range(10..20)` - half-open range [10, 20)
    /// - `set.range(10..=20)` - closed range [10, 20]
    /// - `set.range(..20)` - unbounded start, bounded end
    /// - `set.range(10..)` - bounded start, unbounded end
    /// - `set.range(..)` - full range (same as iter())
    ///
    /// Bounds beyond the universe are allowed. An inverted range is empty.
    ///
    /// # Performance
    /// - O(log S) initial setup to find both ends
    /// - O(log S) per element
    ///
    /// # Example
    /// ```rust
    /// use veb_ordered_set::OrderedIntSet;
    ///
    /// let set: OrderedIntSet<32> = (0..100).collect();
    ///
    /// assert_eq!(set.range(10..=20).count(), 11);
    /// assert_eq!(set.range(..50).count(), 50);
    /// assert_eq!(set.range(50..).count(), 50);
    /// assert_eq!(set.range(90..).rev().next(), Some(99));
    /// ```
    #[inline]
    pub fn range<R>(&self, range: R) -> Range<'_, S>
    where
        R: RangeBounds<u64>,
    {
        Range::new(self, range)
    }
}

impl<'a, const S: u32> IntoIterator for &'a OrderedIntSet<S>
where
    Bits<S>: Layout,
{
    type Item = u64;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Iter<'a, S> {
        self.iter()
    }
}
