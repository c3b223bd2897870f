use std::num::NonZeroUsize;

/// A contiguous slice of the input assigned to one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    pub index: usize,
    pub items: Vec<T>,
}

impl<T> Partition<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Partition<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Splits `items` into `min(worker_count, items.len())` contiguous partitions.
///
/// Every partition but the last gets exactly `len / workers` items; the last
/// one absorbs the remainder. No items means no partitions.
pub fn partition<T>(items: Vec<T>, worker_count: NonZeroUsize) -> Vec<Partition<T>> {
    let workers = worker_count.get().min(items.len());
    if workers == 0 {
        return Vec::new();
    }

    let chunk_size = items.len() / workers;
    let mut rest = items.into_iter();
    let mut partitions = Vec::with_capacity(workers);

    for index in 0..workers - 1 {
        partitions.push(Partition {
            index,
            items: rest.by_ref().take(chunk_size).collect(),
        });
    }
    partitions.push(Partition {
        index: workers - 1,
        items: rest.collect(),
    });

    partitions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn sizes<T>(partitions: &[Partition<T>]) -> Vec<usize> {
        partitions.iter().map(Partition::len).collect()
    }

    #[test]
    fn test_last_partition_absorbs_remainder() {
        assert_eq!(sizes(&partition((0..5).collect(), workers(2))), vec![2, 3]);
        assert_eq!(sizes(&partition((0..7).collect(), workers(3))), vec![2, 2, 3]);
        assert_eq!(
            sizes(&partition((0..10).collect(), workers(4))),
            vec![2, 2, 2, 4]
        );
        assert_eq!(sizes(&partition((0..6).collect(), workers(3))), vec![2, 2, 2]);
    }

    #[test]
    fn test_workers_clamp_to_item_count() {
        let parts = partition(vec!["f1", "f2"], workers(8));
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].items, vec!["f1"]);
        assert_eq!(parts[1].items, vec!["f2"]);
    }

    #[test]
    fn test_no_items_no_partitions() {
        let parts = partition(Vec::<u8>::new(), workers(3));
        assert!(parts.is_empty());
    }

    #[test]
    fn test_partition_invariants_hold_for_all_small_inputs() {
        for n in 0..=30usize {
            for w in 1..=35usize {
                let items: Vec<usize> = (0..n).collect();
                let parts = partition(items.clone(), workers(w));

                assert_eq!(parts.len(), w.min(n), "n={n} w={w}");
                for (i, p) in parts.iter().enumerate() {
                    assert_eq!(p.index, i, "n={n} w={w}");
                    assert!(!p.is_empty(), "n={n} w={w}");
                }
                if let Some((last, head)) = parts.split_last() {
                    let chunk = n / parts.len();
                    assert!(head.iter().all(|p| p.len() == chunk), "n={n} w={w}");
                    assert!(last.len() >= chunk, "n={n} w={w}");
                }

                let rebuilt: Vec<usize> = parts.into_iter().flatten().collect();
                assert_eq!(rebuilt, items, "n={n} w={w}");
            }
        }
    }
}
