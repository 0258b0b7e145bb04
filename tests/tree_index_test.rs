//! Tree Index Tests
//!
//! Scenario tests that walk the tree through known shapes and check the
//! public surface after each step.

use btree_index::{Error, InsertStatus, NodeId, TreeIndex};

const SCENARIO: [i64; 8] = [10, 20, 5, 6, 12, 30, 7, 17];

fn create_tree(capacity: usize) -> TreeIndex {
    TreeIndex::with_capacity(capacity).unwrap()
}

/// Helper to read the keys of a node through the public API.
fn node_keys(tree: &TreeIndex, id: NodeId) -> Vec<i64> {
    tree.node(id).unwrap().keys().to_vec()
}

// ============================================================================
// Fill, split, grow
// ============================================================================

/// Five inserts fill the root leaf; the sixth splits it and grows a root.
#[test]
fn test_root_leaf_split() {
    let mut tree = create_tree(5);

    for key in [10, 20, 5, 6, 12] {
        tree.insert(key);
    }
    assert_eq!(tree.height(), 1);
    assert_eq!(node_keys(&tree, tree.root()), vec![5, 6, 10, 12, 20]);

    tree.insert(30);

    assert_eq!(tree.height(), 2);
    let root = tree.node(tree.root()).unwrap();
    assert!(!root.is_leaf());
    assert_eq!(root.keys(), &[12]);
    assert_eq!(root.children().len(), 2);
    assert_eq!(node_keys(&tree, root.children()[0]), vec![5, 6, 10]);
    assert_eq!(node_keys(&tree, root.children()[1]), vec![12, 20, 30]);
    tree.check_invariants().unwrap();
}

/// The full eight-key scenario.
#[test]
fn test_scenario_lookups_and_count() {
    let mut tree = create_tree(5);
    for key in SCENARIO {
        assert_eq!(tree.insert(key), InsertStatus::Inserted);
    }

    assert!(tree.lookup(7));
    assert!(tree.lookup(17));
    assert!(!tree.lookup(99));
    assert_eq!(tree.count(), 8);

    let root = tree.node(tree.root()).unwrap();
    assert_eq!(node_keys(&tree, root.children()[0]), vec![5, 6, 7, 10]);
    assert_eq!(node_keys(&tree, root.children()[1]), vec![12, 17, 20, 30]);
    tree.check_invariants().unwrap();
}

/// Re-inserting a separator key changes nothing.
#[test]
fn test_scenario_duplicate_insert() {
    let mut tree = create_tree(5);
    tree.extend(SCENARIO);

    let before_root = tree.dump(tree.root()).unwrap();
    let before_tree = tree.dump_tree();
    let before_nodes = tree.node_count();

    assert_eq!(tree.insert(12), InsertStatus::AlreadyExists);

    assert_eq!(tree.count(), 8);
    assert_eq!(tree.dump(tree.root()).unwrap(), before_root);
    assert_eq!(tree.dump_tree(), before_tree);
    assert_eq!(tree.node_count(), before_nodes);
    assert!(tree.lookup(12));
}

/// Duplicates of leaf-only keys are also no-ops.
#[test]
fn test_duplicate_of_every_key() {
    let mut tree = create_tree(5);
    tree.extend(SCENARIO);
    let before = tree.keys();

    for key in SCENARIO {
        assert_eq!(tree.insert(key), InsertStatus::AlreadyExists);
    }

    assert_eq!(tree.count(), 8);
    assert_eq!(tree.keys(), before);
    assert_eq!(tree.stats().duplicate_inserts, 8);
}

// ============================================================================
// Dump
// ============================================================================

#[test]
fn test_dump_root_after_split() {
    let mut tree = create_tree(5);
    tree.extend(SCENARIO);

    assert_eq!(
        tree.dump(tree.root()).unwrap(),
        "Node 2 (internal)\n  keys: Value0=12\n  children: Child0=0 Child1=1"
    );
    assert_eq!(
        tree.dump(NodeId::new(0)).unwrap(),
        "Node 0 (leaf)\n  keys: Value0=5 Value1=6 Value2=7 Value3=10"
    );
}

#[test]
fn test_dump_unknown_handle() {
    let tree = create_tree(5);
    assert!(matches!(
        tree.dump(NodeId::new(1)),
        Err(Error::NodeNotFound(id)) if id == NodeId::new(1)
    ));
}

// ============================================================================
// Deeper trees
// ============================================================================

/// Ascending inserts only ever split the rightmost path.
#[test]
fn test_sequential_inserts_grow_multiple_levels() {
    let mut tree = create_tree(5);
    for key in 0..1_000 {
        tree.insert(key);
    }

    assert_eq!(tree.count(), 1_000);
    assert!(tree.height() >= 4);
    assert_eq!(tree.keys(), (0..1_000).collect::<Vec<_>>());
    tree.check_invariants().unwrap();

    let stats = tree.stats();
    assert!(stats.internal_splits > 0);
    assert_eq!(stats.root_growths as usize, tree.height() - 1);
}

/// Descending inserts only ever split the leftmost path.
#[test]
fn test_descending_inserts() {
    let mut tree = create_tree(4);
    for key in (0..500).rev() {
        tree.insert(key);
    }

    assert_eq!(tree.count(), 500);
    assert_eq!(tree.keys(), (0..500).collect::<Vec<_>>());
    tree.check_invariants().unwrap();
}

/// Interleaved inserts from both ends meet in the middle.
#[test]
fn test_zigzag_inserts() {
    let mut tree = create_tree(3);
    for i in 0..300 {
        tree.insert(i);
        tree.insert(10_000 - i);
    }

    assert_eq!(tree.count(), 600);
    for i in 0..300 {
        assert!(tree.lookup(i));
        assert!(tree.lookup(10_000 - i));
    }
    assert!(!tree.lookup(5_000));
    tree.check_invariants().unwrap();
}

/// Every supported capacity, odd and even, keeps the tree balanced.
#[test]
fn test_capacities() {
    for capacity in 3..=12 {
        let mut tree = create_tree(capacity);
        for i in 0..400i64 {
            // Deterministic scatter over a range larger than the key count
            tree.insert((i * 7_919) % 1_009);
        }

        assert_eq!(tree.count(), 400, "capacity {}", capacity);
        assert_eq!(tree.node_capacity(), capacity);
        tree.check_invariants()
            .unwrap_or_else(|e| panic!("capacity {}: {}", capacity, e));
    }
}

/// Every node handle ever issued stays valid and reachable.
#[test]
fn test_handles_remain_valid() {
    let mut tree = create_tree(5);
    tree.extend(0..200);

    for id in 0..tree.node_count() {
        assert!(tree.dump(NodeId::new(id)).is_ok());
    }
    assert!(tree.dump(NodeId::new(tree.node_count())).is_err());
    assert!(tree.stats().arena_growths > 0);
}

#[test]
fn test_invalid_capacity() {
    for capacity in 0..3 {
        assert!(matches!(
            TreeIndex::with_capacity(capacity),
            Err(Error::InvalidNodeCapacity { .. })
        ));
    }
}
