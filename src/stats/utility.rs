use std::collections::BTreeMap;

use serde::Serialize;

/// A value together with how many rows carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counted<T> {
    pub value: T,
    pub count: usize,
}

/// Tallies occurrences of each key, ordered by key.
pub fn counts<K: Ord, I: IntoIterator<Item = K>>(items: I) -> BTreeMap<K, usize> {
    let mut tally = BTreeMap::new();
    for item in items {
        *tally.entry(item).or_insert(0) += 1;
    }
    tally
}

/// Most frequent key. Returns `None` for empty input.
///
/// Keys are visited in ascending order and only a strictly greater count
/// replaces the current best, so ties resolve to the smallest key.
pub fn mode<K: Ord, I: IntoIterator<Item = K>>(items: I) -> Option<Counted<K>> {
    let mut best: Option<Counted<K>> = None;
    for (value, count) in counts(items) {
        if best.as_ref().is_none_or(|b| count > b.count) {
            best = Some(Counted { value, count });
        }
    }
    best
}

/// All tallies ordered by descending count, ties by ascending key.
pub fn ranked<K: Ord, I: IntoIterator<Item = K>>(items: I) -> Vec<Counted<K>> {
    let mut out: Vec<_> = counts(items)
        .into_iter()
        .map(|(value, count)| Counted { value, count })
        .collect();
    // Stable sort keeps the BTreeMap key order within equal counts.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
