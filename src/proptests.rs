use crate::key::universe_max;
use crate::veb::{Bits, Layout};
use crate::{BucketPolicy, OrderedIntSet, SetConfig};

use core::ops::Bound::{Excluded, Unbounded};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::vec::Vec;

#[derive(Clone, Debug)]
enum Op {
    Insert(u64),
    Remove(u64),
    Probe(u64),
}

fn ops_strategy(keys: impl Strategy<Value = u64> + Clone) -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        45 => keys.clone().prop_map(Op::Insert),
        25 => keys.clone().prop_map(Op::Remove),
        30 => keys.prop_map(Op::Probe),
    ];
    prop::collection::vec(op, 0..=600)
}

/// Keys drawn from the whole universe.
fn uniform_keys(bits: u32) -> impl Strategy<Value = u64> + Clone {
    0..=universe_max(bits)
}

/// Keys packed under a few shared prefixes so buckets fill and drain.
fn clustered_keys(bits: u32) -> impl Strategy<Value = u64> + Clone {
    let low_bits = bits / 2;
    let spread = universe_max(bits) >> low_bits;
    (0u64..4, 0u64..48).prop_map(move |(hi, lo)| ((hi * (spread / 3)) << low_bits) | lo)
}

fn policies() -> impl Strategy<Value = BucketPolicy> {
    prop_oneof![Just(BucketPolicy::Evict), Just(BucketPolicy::Retain)]
}

/// Replay `ops` against a `BTreeSet` model, checking every observable after
/// every step.
fn check_against_model<const S: u32>(ops: &[Op], policy: BucketPolicy) -> Result<(), TestCaseError>
where
    Bits<S>: Layout,
{
    let mut set = OrderedIntSet::<S>::with_config(SetConfig::new().bucket_policy(policy));
    let mut model: BTreeSet<u64> = BTreeSet::new();

    for op in ops {
        match *op {
            Op::Insert(key) => {
                prop_assert_eq!(set.insert(key), model.insert(key));
            }
            Op::Remove(key) => {
                prop_assert_eq!(set.remove(key), model.remove(&key));
            }
            Op::Probe(key) => {
                let next = model.range((Excluded(key), Unbounded)).next().copied();
                let prev = model.range(..key).next_back().copied();
                prop_assert_eq!(set.next(key), next, "next({})", key);
                prop_assert_eq!(set.prev(key), prev, "prev({})", key);
                prop_assert_eq!(set.contains(key), model.contains(&key));
            }
        }

        prop_assert_eq!(set.len(), model.len());
        prop_assert_eq!(set.is_empty(), set.min().is_none());
        prop_assert_eq!(set.min(), model.first().copied());
        prop_assert_eq!(set.max(), model.last().copied());
    }

    set.validate();
    prop_assert!(set.iter().eq(model.iter().copied()));
    prop_assert!(set.iter().rev().eq(model.iter().rev().copied()));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 20_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_leaf(ops in ops_strategy(uniform_keys(6)), policy in policies()) {
        check_against_model::<6>(&ops, policy)?;
    }

    #[test]
    fn prop_equivalence_8_bits(ops in ops_strategy(uniform_keys(8)), policy in policies()) {
        check_against_model::<8>(&ops, policy)?;
    }

    #[test]
    fn prop_equivalence_odd_width(ops in ops_strategy(uniform_keys(13)), policy in policies()) {
        check_against_model::<13>(&ops, policy)?;
    }

    #[test]
    fn prop_equivalence_clustered_32(ops in ops_strategy(clustered_keys(32)), policy in policies()) {
        check_against_model::<32>(&ops, policy)?;
    }

    #[test]
    fn prop_equivalence_clustered_64(ops in ops_strategy(clustered_keys(64)), policy in policies()) {
        check_against_model::<64>(&ops, policy)?;
    }

    #[test]
    fn prop_equivalence_sparse_64(ops in ops_strategy(any::<u64>()), policy in policies()) {
        check_against_model::<64>(&ops, policy)?;
    }

    #[test]
    fn prop_every_probe_in_small_universe(keys in prop::collection::btree_set(0u64..1024, 0..64)) {
        let set: OrderedIntSet<10> = keys.iter().copied().collect();
        set.validate();

        for x in 0..1024u64 {
            let next = keys.range((Excluded(x), Unbounded)).next().copied();
            let prev = keys.range(..x).next_back().copied();
            prop_assert_eq!(set.next(x), next, "next({})", x);
            prop_assert_eq!(set.prev(x), prev, "prev({})", x);
        }
    }

    #[test]
    fn prop_insert_remove_restores(
        keys in prop::collection::vec(uniform_keys(24), 0..200),
        extra in uniform_keys(24),
    ) {
        let mut set: OrderedIntSet<24> = keys.iter().copied().collect();
        prop_assume!(!set.contains(extra));
        let before = set.clone();

        prop_assert!(set.insert(extra));
        prop_assert!(set.remove(extra));

        prop_assert_eq!(set.min(), before.min());
        prop_assert_eq!(set.max(), before.max());
        prop_assert_eq!(set.is_empty(), before.is_empty());
        prop_assert_eq!(&set, &before);
        set.validate();
    }

    #[test]
    fn prop_range_matches_model(
        keys in prop::collection::btree_set(uniform_keys(16), 0..300),
        a in uniform_keys(16),
        b in uniform_keys(16),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let set: OrderedIntSet<16> = keys.iter().copied().collect();

        prop_assert!(set.range(lo..hi).eq(keys.range(lo..hi).copied()));
        prop_assert!(set.range(lo..=hi).eq(keys.range(lo..=hi).copied()));
        prop_assert!(set.range(lo..=hi).rev().eq(keys.range(lo..=hi).rev().copied()));
    }
}

/// Random insert / probe / delete workload against a `BTreeSet`, sized like a
/// long-running index: ~10^5 keys in a 48-bit universe.
#[test]
fn stress_against_btreeset() {
    const N: usize = 100_000;
    const KEY_LIMIT: u64 = 1 << 31;

    let mut rng = StdRng::seed_from_u64(0x5EED_0B0E);
    let mut set = OrderedIntSet::<48>::new();
    let mut model: BTreeSet<u64> = BTreeSet::new();
    let mut inserted: Vec<u64> = Vec::new();

    for _ in 0..N {
        let key = rng.gen_range(0..KEY_LIMIT);
        if model.insert(key) {
            assert!(set.insert(key));
            inserted.push(key);
        }
    }
    assert_eq!(set.len(), model.len());
    assert_eq!(set.iter().count(), model.len());
    assert_eq!(set.is_empty(), model.is_empty());

    inserted.shuffle(&mut rng);

    for i in 0..N {
        let probe = rng.gen_range(0..KEY_LIMIT);

        let next = model.range((Excluded(probe), Unbounded)).next().copied();
        assert_eq!(set.next(probe), next, "next({probe})");

        let prev = model.range(..probe).next_back().copied();
        assert_eq!(set.prev(probe), prev, "prev({probe})");

        if i % 4 == 0 {
            if let Some(key) = inserted.pop() {
                assert!(model.remove(&key));
                assert!(set.remove(key));
            }
        }

        if i % 8 == 0 {
            let key = rng.gen_range(0..KEY_LIMIT);
            if model.insert(key) {
                assert!(set.insert(key));
            }
        }
    }

    // Cardinality by walking successors from the minimum
    let mut walked = 0;
    let mut cur = set.min();
    while let Some(key) = cur {
        walked += 1;
        cur = set.next(key);
    }
    assert_eq!(walked, model.len());
    assert_eq!(set.len(), model.len());
    assert!(set.iter().eq(model.iter().copied()));
    set.validate();
}

/// Draining a large set in random order leaves no allocated buckets behind.
#[test]
fn drain_frees_every_bucket() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut keys: Vec<u64> = (0..20_000).map(|_| rng.gen::<u64>() >> 8).collect();
    let mut set: OrderedIntSet<56> = keys.iter().copied().collect();
    assert!(set.bucket_count() > 0);

    keys.shuffle(&mut rng);
    for key in keys {
        set.remove(key);
    }
    assert!(set.is_empty());
    assert_eq!(set.bucket_count(), 0);
    set.validate();
}
