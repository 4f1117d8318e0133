//! Sorting routines over slices.
//!
//! The comparison sorts work on any `T: Ord` and sort in place, ascending.
//! `tree_sort` goes through an [`AvlTree`] and `counting_sort` is specific to
//! integer keys.

use crate::types::{AvlTree, Key};

/// Repeated adjacent swaps; stops early once a pass makes no swap.
pub fn bubble_sort<T: Ord>(items: &mut [T]) {
    let mut unsorted = items.len();
    while unsorted > 1 {
        let mut last_swap = 0;
        for i in 1..unsorted {
            if items[i - 1] > items[i] {
                items.swap(i - 1, i);
                last_swap = i;
            }
        }
        unsorted = last_swap;
    }
}

pub fn insertion_sort<T: Ord>(items: &mut [T]) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && items[j - 1] > items[j] {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

pub fn selection_sort<T: Ord>(items: &mut [T]) {
    for i in 0..items.len() {
        let smallest = (i..items.len())
            .min_by(|&a, &b| items[a].cmp(&items[b]))
            .unwrap_or(i);
        items.swap(i, smallest);
    }
}

/// Top-down merge sort. Stable.
pub fn merge_sort<T: Ord + Clone>(items: &mut [T]) {
    if items.len() <= 1 {
        return;
    }
    let mid = items.len() / 2;
    merge_sort(&mut items[..mid]);
    merge_sort(&mut items[mid..]);

    let mut merged = Vec::with_capacity(items.len());
    let (mut i, mut j) = (0, mid);
    while i < mid && j < items.len() {
        if items[j] < items[i] {
            merged.push(items[j].clone());
            j += 1;
        } else {
            merged.push(items[i].clone());
            i += 1;
        }
    }
    merged.extend_from_slice(&items[i..mid]);
    merged.extend_from_slice(&items[j..]);
    items.clone_from_slice(&merged);
}

/// Quicksort with a Lomuto partition around the last element. Recurses into
/// the smaller side only, so stack depth stays logarithmic.
pub fn quick_sort<T: Ord>(mut items: &mut [T]) {
    while items.len() > 1 {
        let pivot = partition(items);
        let (low, high) = std::mem::take(&mut items).split_at_mut(pivot);
        let high = &mut high[1..];
        if low.len() < high.len() {
            quick_sort(low);
            items = high;
        } else {
            quick_sort(high);
            items = low;
        }
    }
}

fn partition<T: Ord>(items: &mut [T]) -> usize {
    let last = items.len() - 1;
    let mut store = 0;
    for i in 0..last {
        if items[i] <= items[last] {
            items.swap(i, store);
            store += 1;
        }
    }
    items.swap(store, last);
    store
}

/// In-place heap sort over a max-heap.
pub fn heap_sort<T: Ord>(items: &mut [T]) {
    let len = items.len();
    for start in (0..len / 2).rev() {
        sift_down(items, start, len);
    }
    for end in (1..len).rev() {
        items.swap(0, end);
        sift_down(items, 0, end);
    }
}

fn sift_down<T: Ord>(items: &mut [T], mut root: usize, end: usize) {
    loop {
        let mut largest = root;
        for child in [2 * root + 1, 2 * root + 2] {
            if child < end && items[child] > items[largest] {
                largest = child;
            }
        }
        if largest == root {
            return;
        }
        items.swap(root, largest);
        root = largest;
    }
}

/// Counting sort over the key range actually present in `items`.
pub fn counting_sort(items: &mut [Key]) {
    let (Some(&min), Some(&max)) = (items.iter().min(), items.iter().max()) else {
        return;
    };
    let span = usize::try_from(max.abs_diff(min)).unwrap_or(usize::MAX);
    let mut counts = vec![0usize; span.saturating_add(1)];
    for &key in items.iter() {
        counts[key.abs_diff(min) as usize] += 1;
    }

    let mut out = items.iter_mut();
    for (offset, &count) in counts.iter().enumerate() {
        let key = min + offset as Key;
        for slot in out.by_ref().take(count) {
            *slot = key;
        }
    }
}

/// Sorts by inserting every key into an [`AvlTree`] and reading it back in order.
pub fn tree_sort(items: &[Key]) -> Vec<Key> {
    let mut tree = AvlTree::new();
    for &key in items {
        tree.insert(key);
    }
    tree.in_order()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Vec<Key>> {
        vec![
            vec![],
            vec![1],
            vec![2, 1],
            vec![5, 2, 9, 1, 5, 6],
            vec![3, -1, 0, -7, 3, 3, 12, 8],
            (0..50).rev().collect(),
            (0..50).map(|i| (i * 37) % 11).collect(),
        ]
    }

    fn check(sort: fn(&mut [Key])) {
        for sample in samples() {
            let mut expected = sample.clone();
            expected.sort();
            let mut actual = sample;
            sort(&mut actual);
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_bubble_sort() {
        check(bubble_sort);
    }

    #[test]
    fn test_insertion_sort() {
        check(insertion_sort);
    }

    #[test]
    fn test_selection_sort() {
        check(selection_sort);
    }

    #[test]
    fn test_merge_sort() {
        check(merge_sort);
    }

    #[test]
    fn test_quick_sort() {
        check(quick_sort);
    }

    #[test]
    fn test_heap_sort() {
        check(heap_sort);
    }

    #[test]
    fn test_counting_sort() {
        check(counting_sort);
    }

    #[test]
    fn test_tree_sort() {
        for sample in samples() {
            let mut expected = sample.clone();
            expected.sort();
            assert_eq!(tree_sort(&sample), expected);
        }
    }

    /// Ordered by key only, so the tag shows whether equal keys kept their order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Tagged(Key, char);

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.0.cmp(&other.0)
        }
    }

    #[test]
    fn test_merge_sort_is_stable() {
        let mut items = vec![Tagged(2, 'a'), Tagged(1, 'b'), Tagged(2, 'c'), Tagged(1, 'd')];
        merge_sort(&mut items);
        assert_eq!(
            items,
            vec![Tagged(1, 'b'), Tagged(1, 'd'), Tagged(2, 'a'), Tagged(2, 'c')]
        );
    }

    #[test]
    fn test_generic_strings() {
        let mut words = vec!["pear", "apple", "fig"];
        heap_sort(&mut words);
        assert_eq!(words, vec!["apple", "fig", "pear"]);
    }
}
