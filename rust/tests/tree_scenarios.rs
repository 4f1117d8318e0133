use treekit::{AvlTree, BPlusTree, RedBlackTree, SegmentTree, NULL_NODE};

#[test]
fn test_avl_insert_then_delete_pre_order() {
    let mut tree = AvlTree::new();
    for key in [10, 20, 30, 40, 50, 25] {
        tree.insert(key);
    }
    assert_eq!(tree.pre_order(tree.root()), "30 20 10 25 40 50");

    let root = tree.delete_node(tree.root(), 40);
    assert_eq!(tree.pre_order(root), "30 20 10 25 50");
    assert_eq!(tree.in_order(), vec![10, 20, 25, 30, 50]);
    assert!(tree.check_invariants());
}

#[test]
fn test_avl_tree_usable_after_root_passing_delete() {
    let mut tree = AvlTree::new();
    tree.insert(1);
    tree.insert(2);

    // The root has a single child, so deleting it frees the root node.
    let old_root = tree.root();
    let root = tree.delete_node(tree.root(), 1);
    assert_ne!(root, old_root);
    assert_eq!(tree.root(), root);
    assert_eq!(tree.in_order(), vec![2]);
    assert!(tree.contains(2));
    assert!(!tree.contains(1));
    assert_eq!(tree.pre_order(tree.root()), "2");
    assert!(tree.check_invariants());

    let root = tree.delete_node(tree.root(), 2);
    assert_eq!(root, NULL_NODE);
    assert!(tree.is_empty());
    assert!(tree.in_order().is_empty());
}

#[test]
fn test_avl_root_passing_matches_owned_root() {
    let keys = [15, 3, 99, 42, 8, 23, 4, 16];

    let mut by_root = AvlTree::new();
    let mut root = by_root.root();
    for key in keys {
        root = by_root.insert_node(root, key);
    }

    let mut owned = AvlTree::new();
    for key in keys {
        owned.insert(key);
    }

    assert_eq!(by_root.pre_order(root), owned.pre_order(owned.root()));
    assert_eq!(by_root.root(), root);
    assert_eq!(by_root.len(), keys.len());
    assert!(by_root.check_invariants());
}

#[test]
fn test_red_black_in_order() {
    let mut tree = RedBlackTree::new();
    for key in [10, 20, 30, 40, 50, 25] {
        tree.insert(key);
    }
    assert_eq!(tree.in_order(), vec![10, 20, 25, 30, 40, 50]);
    assert!(tree.check_invariants());
}

#[test]
fn test_bplus_search() {
    let mut tree = BPlusTree::new(3).unwrap();
    for key in [10, 20, 5, 6, 12, 30, 7, 17] {
        tree.insert(key);
    }
    assert!(tree.search(6));
    assert!(!tree.search(15));
    assert!(tree.check_invariants());
}

#[test]
fn test_segment_tree_query_update() {
    let mut tree = SegmentTree::new(&[1, 3, 5, 7, 9, 11]);
    assert_eq!(tree.query(1, 3), 15);
    tree.update(1, 10);
    assert_eq!(tree.query(1, 1), 10);
}

#[test]
fn test_trees_are_independent_instances() {
    let mut first = BPlusTree::new(2).unwrap();
    let second = BPlusTree::new(2).unwrap();
    for key in 0..20 {
        first.insert(key);
    }
    assert_eq!(first.len(), 20);
    assert!(second.is_empty());
    assert_eq!(second.traverse(), vec!["Level 0: []".to_string()]);
}
