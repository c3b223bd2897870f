use crate::{aggregate::CountMap, extract::JoinTuple};

/// Sums counts per key across partials. Keys missing from a partial
/// contribute nothing, so merge order does not matter.
pub fn combine_counts<I>(partials: I) -> CountMap
where
    I: IntoIterator<Item = CountMap>,
{
    partials
        .into_iter()
        .fold(CountMap::new(), |mut combined, partial| {
            for (key, count) in partial {
                *combined.entry(key).or_insert(0) += count;
            }
            combined
        })
}

/// Concatenates retained tuples in partition order, without deduplication.
pub fn combine_tuples<I>(partials: I) -> Vec<JoinTuple>
where
    I: IntoIterator<Item = Vec<JoinTuple>>,
{
    partials.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::key::Key;

    fn counts(pairs: &[(&str, u64)]) -> CountMap {
        pairs
            .iter()
            .map(|(k, c)| (Key::from_cell(k), *c))
            .collect()
    }

    #[test]
    fn test_sums_overlapping_keys() {
        let combined = combine_counts(vec![
            counts(&[("2021-01-01", 1), ("2021-01-02", 1)]),
            counts(&[("2021-01-01", 1)]),
        ]);
        assert_eq!(combined, counts(&[("2021-01-01", 2), ("2021-01-02", 1)]));
    }

    #[test]
    fn test_merge_order_does_not_matter() {
        let a = counts(&[("x", 1), ("y", 4)]);
        let b = counts(&[("y", 2), ("z", 7)]);
        let c = counts(&[("x", 3), ("z", 1), ("w", 5)]);

        let expected = combine_counts(vec![a.clone(), b.clone(), c.clone()]);
        let orders = [
            vec![a.clone(), c.clone(), b.clone()],
            vec![b.clone(), a.clone(), c.clone()],
            vec![b.clone(), c.clone(), a.clone()],
            vec![c.clone(), a.clone(), b.clone()],
            vec![c.clone(), b.clone(), a.clone()],
        ];
        for order in orders {
            assert_eq!(combine_counts(order), expected);
        }
        // grouping: (a + b) + c == a + (b + c)
        let left = combine_counts(vec![combine_counts(vec![a.clone(), b.clone()]), c.clone()]);
        let right = combine_counts(vec![a, combine_counts(vec![b, c])]);
        assert_eq!(left, right);
        assert_eq!(left, expected);
    }

    #[test]
    fn test_first_partial_keeps_key_text() {
        let combined = combine_counts(vec![counts(&[("7.0", 1)]), counts(&[("7", 2)])]);
        let (key, count) = combined.iter().next().unwrap();
        assert_eq!((key.text(), *count), ("7.0", 3));
    }

    #[test]
    fn test_no_partials() {
        assert!(combine_counts(Vec::new()).is_empty());
        assert!(combine_tuples(Vec::new()).is_empty());
    }

    #[test]
    fn test_tuples_concatenate_in_order_and_keep_duplicates() {
        let t = |k: &str| JoinTuple::new(Key::from_cell(k), vec![]);
        let combined = combine_tuples(vec![vec![t("u1"), t("u2")], vec![], vec![t("u1")]]);
        assert_eq!(combined, vec![t("u1"), t("u2"), t("u1")]);
    }
}
