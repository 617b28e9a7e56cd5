//! Error types.

use thiserror::Error;

/// A key outside the set's universe `[0, 2^bits)`.
///
/// Splitting such a key into high and low halves would address buckets that
/// cannot exist, so mutations reject it instead of storing a wrapped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("key {key} is outside the {bits}-bit universe")]
pub struct KeyOutOfRange {
    /// The rejected key.
    pub key: u64,

    /// Universe width of the set that rejected it.
    pub bits: u32,
}
