//! Randomized operation sequences checked against `std::collections`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use treekit::{AvlTree, BPlusTree, Key, RedBlackTree, SegmentTree};

const SEED: u64 = 42;
const OPERATIONS: usize = 2_000;
const KEY_SPACE: Key = 300;

/// Multiset of keys: key -> occurrence count.
fn model_keys(model: &BTreeMap<Key, usize>) -> Vec<Key> {
    model
        .iter()
        .flat_map(|(&key, &count)| std::iter::repeat(key).take(count))
        .collect()
}

fn model_remove(model: &mut BTreeMap<Key, usize>, key: Key) -> bool {
    match model.get_mut(&key) {
        Some(count) if *count > 1 => {
            *count -= 1;
            true
        }
        Some(_) => {
            model.remove(&key);
            true
        }
        None => false,
    }
}

#[test]
fn test_avl_against_btreemap() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut tree = AvlTree::new();
    let mut model = BTreeMap::new();

    for step in 0..OPERATIONS {
        let key = rng.gen_range(0..KEY_SPACE);
        if rng.gen_bool(0.6) {
            tree.insert(key);
            *model.entry(key).or_insert(0) += 1;
        } else {
            assert_eq!(tree.remove(key), model_remove(&mut model, key), "step {}", step);
        }

        if step % 100 == 0 {
            assert!(tree.check_invariants(), "step {}", step);
        }
    }

    assert_eq!(tree.in_order(), model_keys(&model));
    assert_eq!(tree.len(), model.values().sum::<usize>());
    assert!(tree.check_invariants());
}

#[test]
fn test_red_black_against_btreemap() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    let mut tree = RedBlackTree::new();
    let mut model = BTreeMap::new();

    for step in 0..OPERATIONS {
        let key = rng.gen_range(0..KEY_SPACE);
        if rng.gen_bool(0.6) {
            tree.insert(key);
            *model.entry(key).or_insert(0) += 1;
        } else {
            assert_eq!(tree.remove(key), model_remove(&mut model, key), "step {}", step);
        }

        if step % 100 == 0 {
            assert!(tree.check_invariants(), "step {}", step);
        }
    }

    assert_eq!(tree.in_order(), model_keys(&model));
    for key in 0..KEY_SPACE {
        assert_eq!(tree.contains(key), model.contains_key(&key));
    }
    assert!(tree.check_invariants());
}

#[test]
fn test_bplus_against_btreemap() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    for min_degree in [2, 3, 5] {
        let mut tree = BPlusTree::new(min_degree).unwrap();
        let mut model = BTreeMap::new();

        // Distinct keys only: a B+ tree node keeps its keys unique.
        let mut keys: Vec<Key> = (0..KEY_SPACE * 2).collect();
        for i in (1..keys.len()).rev() {
            keys.swap(i, rng.gen_range(0..=i));
        }
        for &key in keys.iter().take(KEY_SPACE as usize) {
            tree.insert(key);
            model.insert(key, 1);
        }

        assert!(tree.check_invariants(), "t = {}", min_degree);
        assert_eq!(tree.keys(), model_keys(&model));
        for key in 0..KEY_SPACE * 2 {
            assert_eq!(tree.search(key), model.contains_key(&key), "key {}", key);
        }
    }
}

#[test]
fn test_segment_tree_against_vec() {
    let mut rng = StdRng::seed_from_u64(SEED + 3);
    let mut data: Vec<Key> = (0..97).map(|_| rng.gen_range(-1_000..1_000)).collect();
    let mut tree = SegmentTree::new(&data);

    for _ in 0..OPERATIONS {
        if rng.gen_bool(0.3) {
            let pos = rng.gen_range(0..data.len());
            let value = rng.gen_range(-1_000..1_000);
            tree.update(pos, value);
            data[pos] = value;
        } else {
            let left = rng.gen_range(0..data.len());
            let right = rng.gen_range(left..data.len());
            let expected: Key = data[left..=right].iter().sum();
            assert_eq!(tree.query(left, right), expected);
        }
    }
    assert!(tree.check_invariants());
}
