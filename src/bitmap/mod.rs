//! Single-word bitmap operations used by the leaf nodes.
//!
//! A leaf of width `W <= 6` keeps its whole universe in one `u64`, so every
//! operation here is a handful of instructions built on TZCNT / LZCNT /
//! POPCNT.

mod basic;
mod search;

pub use basic::{clear_bit, is_set, set_bit};
pub use search::{count_ones, first_set_bit, last_set_bit, next_set_bit, prev_set_bit};
