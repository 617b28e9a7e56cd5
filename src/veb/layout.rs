//! Compile-time mapping from a universe width to its node type.
//!
//! `Bits<S>` names a width; `<Bits<S> as Layout>::Node` is the node that
//! stores `S`-bit keys. Widths up to [`LEAF_MAX_BITS`](crate::constants::LEAF_MAX_BITS)
//! are single-word leaves. Wider universes are clusters whose buckets hold the
//! low `S / 2` bits and whose summary holds the high `S - S / 2` bits:
//!
//! ```text
//! Bits<16> -> Cluster<Bits<8>::Node, Bits<8>::Node>
//! Bits<8>  -> Cluster<Leaf<4>, Leaf<4>>
//! Bits<7>  -> Cluster<Leaf<3>, Leaf<4>>
//! ```

use crate::veb::{Cluster, Leaf, VebNode};

/// Type-level universe width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bits<const S: u32>;

/// Selects the node type for a universe width.
///
/// Implemented for every `Bits<S>` with `S` in `1..=64`.
pub trait Layout {
    /// Node storing keys of this width.
    type Node: VebNode;
}

macro_rules! leaf_layout {
    ($($s:literal)*) => {
        $(
            impl Layout for Bits<$s> {
                type Node = Leaf<$s>;
            }
        )*
    };
}

macro_rules! cluster_layout {
    ($($s:literal)*) => {
        $(
            impl Layout for Bits<$s> {
                type Node = Cluster<
                    <Bits<{ $s / 2 }> as Layout>::Node,
                    <Bits<{ $s - $s / 2 }> as Layout>::Node,
                >;
            }
        )*
    };
}

leaf_layout!(1 2 3 4 5 6);

cluster_layout!(
    7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32
    33 34 35 36 37 38 39 40 41 42 43 44 45 46 47 48 49 50 51 52 53 54 55 56 57
    58 59 60 61 62 63 64
);

/// Node type for an `S`-bit universe.
pub type NodeFor<const S: u32> = <Bits<S> as Layout>::Node;
