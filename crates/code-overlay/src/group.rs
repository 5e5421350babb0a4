//! Stable key grouping.

use std::collections::BTreeMap;

/// Group `items` by `key`, preserving input order within each group.
///
/// Every item lands in exactly one group, so the groups partition the input.
pub fn group_by<I, K, F>(items: I, mut key: F) -> BTreeMap<K, Vec<I::Item>>
where
    I: IntoIterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    let mut groups = BTreeMap::<K, Vec<I::Item>>::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}
