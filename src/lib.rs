//! # veb-ordered-set
//!
//! Ordered set of integers over a fixed `S`-bit universe, built as a
//! van Emde Boas tree. Successor and predecessor in O(log log U).
//!
//! ## Features
//! - O(1) min/max and length
//! - O(log S) insert, remove, contains, next (successor), prev (predecessor)
//! - Node shapes resolved at compile time for every width from 1 to 64 bits
//! - Buckets allocated lazily; memory follows occupied key prefixes
//! - no_std compatible (requires alloc)
//!
//! ## Example
//! ```rust
//! use veb_ordered_set::OrderedIntSet;
//!
//! let mut set = OrderedIntSet::<48>::new();
//! set.insert(10);
//! set.insert(15);
//! set.insert(20);
//!
//! assert_eq!(set.next(15), Some(20));
//! assert_eq!(set.prev(15), Some(10));
//! assert_eq!(set.next(20), None);
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod bitmap;
mod config;
mod constants;
mod error;
mod key;
pub mod veb;

#[cfg(test)]
mod proptests;

pub use config::{BucketPolicy, SetConfig};
pub use constants::{LEAF_MAX_BITS, MAX_UNIVERSE_BITS};
pub use error::KeyOutOfRange;
pub use veb::{Iter, OrderedIntSet, Range};
