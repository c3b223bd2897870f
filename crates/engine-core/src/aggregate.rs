//! Reduce-side local aggregation. Each function owns its partition and builds
//! a private result; nothing here is shared between workers except the
//! read-only key set.

use crate::{
    extract::{JoinTuple, KeyGroup, TupleGroup},
    partition::Partition,
};
use model::core::key::Key;
use std::collections::{HashMap, HashSet};

/// Counts per key. The stored key keeps the text of the first occurrence.
pub type CountMap = HashMap<Key, u64>;

/// Frequency of every key across all groups of the partition.
pub fn aggregate_counts(partition: Partition<KeyGroup>) -> CountMap {
    let mut counts = CountMap::new();
    for key in partition.into_iter().flatten() {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Tuples of the partition whose key is in `key_set`, in input order.
pub fn aggregate_filtered(
    key_set: &HashSet<Key>,
    partition: Partition<TupleGroup>,
) -> Vec<JoinTuple> {
    partition
        .into_iter()
        .flatten()
        .filter(|tuple| key_set.contains(&tuple.key))
        .collect()
}
