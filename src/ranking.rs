//! Ordering and top-k selection over catalogs.
//!
//! Both routines take the ranking key as a function so the record type carries
//! no ordering of its own.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::config::RankOrderSetting;
use crate::library::{Catalog, TrackRecord};

/// Which key the library table is ordered by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending file size.
    #[default]
    Size,
    /// Case-insensitive title.
    Title,
}

impl From<RankOrderSetting> for SortKey {
    fn from(setting: RankOrderSetting) -> Self {
        match setting {
            RankOrderSetting::Size => Self::Size,
            RankOrderSetting::Title => Self::Title,
        }
    }
}

impl SortKey {
    pub fn sort(self, records: &[TrackRecord]) -> Catalog {
        match self {
            Self::Size => sort_by_size(records),
            Self::Title => sort_by_key(records, |t| t.title.to_lowercase()),
        }
    }
}

/// Stable sort of a copy of `items` by `key`; equal keys keep their input order.
pub fn sort_by_key<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut out = items.to_vec();
    out.sort_by_cached_key(key);
    out
}

/// The `min(k, items.len())` items with the largest `key`, largest first.
///
/// Among equal keys at the cut-off the item that appears earlier in `items`
/// is kept.
pub fn top_k_by_key<T, K, F>(items: &[T], k: usize, mut key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    if k == 0 {
        return Vec::new();
    }

    // Min-heap on (key, earlier-is-greater): the root is the weakest kept item.
    let mut heap: BinaryHeap<Reverse<(K, Reverse<usize>)>> = BinaryHeap::with_capacity(k + 1);
    for (idx, item) in items.iter().enumerate() {
        let candidate = (key(item), Reverse(idx));
        if heap.len() < k {
            heap.push(Reverse(candidate));
        } else if let Some(Reverse(weakest)) = heap.peek() {
            if candidate > *weakest {
                heap.pop();
                heap.push(Reverse(candidate));
            }
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse((_, Reverse(idx)))| items[idx].clone())
        .collect()
}

/// Ascending by `size_bytes`, stable.
pub fn sort_by_size(records: &[TrackRecord]) -> Catalog {
    sort_by_key(records, |t| t.size_bytes)
}

/// The `k` largest records by `size_bytes`.
pub fn top_k_by_size(records: &[TrackRecord], k: usize) -> Catalog {
    top_k_by_key(records, k, |t| t.size_bytes)
}
