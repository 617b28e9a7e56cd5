//! Basic usage example for veb-ordered-set.
//!
//! Walks through inserts, removals, successor/predecessor navigation, and
//! ordered enumeration in both directions.

use veb_ordered_set::{BucketPolicy, OrderedIntSet, SetConfig};

fn main() {
    println!("=== van Emde Boas Ordered Set - Basic Usage Example ===\n");

    // 48-bit universe: keys in [0, 2^48)
    let mut set = OrderedIntSet::<48>::new();
    println!("Created empty set over a {}-bit universe", set.universe_bits());

    println!("\nInserting keys: 10, 15, 20");
    for key in [10, 15, 20] {
        set.insert(key);
    }
    println!("  min: {:?}, max: {:?}", set.min(), set.max());

    println!("\nRemoving 10");
    set.remove(10);
    println!("  min: {:?}", set.min());

    println!("\nInserting 50, removing 20 and 50");
    set.insert(50);
    println!("  max after insert: {:?}", set.max());
    set.remove(20);
    set.remove(50);
    println!("  contents: {:?}", set);

    println!("\nInserting 200 and 100");
    set.insert(200);
    set.insert(100);

    // Descending enumeration by repeated predecessor queries
    print!("  descending via prev(): ");
    let mut cur = set.max();
    while let Some(key) = cur {
        print!("{} ", key);
        cur = set.prev(key);
    }
    println!();

    println!("\nNavigation:");
    println!("  next(15):  {:?}", set.next(15));
    println!("  next(150): {:?}", set.next(150));
    println!("  prev(100): {:?}", set.prev(100));
    println!("  next(200): {:?}", set.next(200));

    println!("\n=== Clustered Data Example ===\n");
    let config = SetConfig::new().bucket_policy(BucketPolicy::Retain);
    let mut clustered = OrderedIntSet::<32>::with_config(config);

    println!("Inserting clustered ranges:");
    println!("  Range 1000-1099 (100 keys)");
    clustered.extend(1000..1100);
    println!("  Range 1_000_000-1_000_099 (100 keys)");
    clustered.extend(1_000_000..1_000_100);

    println!("\nClustered set stats:");
    println!("  Total keys: {}", clustered.len());
    println!("  Buckets allocated: {}", clustered.bucket_count());

    let gap: Vec<u64> = clustered.range(1095..1_000_005).collect();
    println!("\nRange query across gap:");
    println!("  range(1095..1_000_005) has {} keys: {:?}", gap.len(), gap);

    println!("\nDraining the first cluster");
    for key in 1000..1100 {
        clustered.remove(key);
    }
    println!("  Buckets allocated (retained): {}", clustered.bucket_count());
    clustered.compact();
    println!("  Buckets allocated (compacted): {}", clustered.bucket_count());

    println!("\nOut-of-range insert is rejected:");
    println!("  try_insert(2^32): {:?}", clustered.try_insert(1 << 32));

    println!("\n=== Example Complete ===");
}
