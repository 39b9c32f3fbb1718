//! Tests for TreeAssembler and CategoryForest

use rscat::domain::{Category, TreeAssembler};

/// Helper to build a record with only tree-relevant fields set
fn cat(id: u64, parent: u64, sort: i64) -> Category {
    Category {
        id,
        parent,
        sort_order: sort,
        title: format!("cat-{id}"),
        ..Category::default()
    }
}

#[test]
fn given_flat_records_when_assembling_then_builds_nested_forest() {
    // Arrange
    let records = vec![cat(1, 0, 10), cat(2, 1, 20), cat(3, 1, 30), cat(4, 2, 40)];

    // Act
    let forest = TreeAssembler::assemble(records);

    // Assert
    assert_eq!(forest.root_ids(), vec![1]);
    assert_eq!(forest.child_ids(1), vec![2, 3]);
    assert_eq!(forest.child_ids(2), vec![4]);
    assert_eq!(forest.child_ids(3), Vec::<u64>::new());
}

#[test]
fn given_missing_parent_when_assembling_then_promotes_orphan_to_root() {
    // Arrange - 99 is not part of the record set
    let records = vec![cat(1, 0, 10), cat(2, 1, 20), cat(3, 99, 30)];

    // Act
    let forest = TreeAssembler::assemble(records);

    // Assert - orphan 3 appears as a top-level entry, not dropped
    assert_eq!(forest.root_ids(), vec![1, 3]);
    assert_eq!(forest.child_ids(1), vec![2]);
    let orphan = forest.node_by_id(3).expect("node 3 present");
    assert_eq!(orphan.parent_ref, None);
}

#[test]
fn given_input_order_when_assembling_then_discovery_order_is_preserved() {
    // Arrange - roots 5 and 1, child 3 between them
    let records = vec![cat(5, 0, 1), cat(3, 5, 2), cat(1, 0, 3)];

    // Act
    let forest = TreeAssembler::assemble(records);

    // Assert - root order follows the input sequence, not id order
    assert_eq!(forest.root_ids(), vec![5, 1]);
    assert_eq!(forest.child_ids(5), vec![3]);
}

#[test]
fn given_siblings_when_assembling_then_children_keep_relative_input_order() {
    // Arrange - children of 1 arrive as 7, 4, 9
    let records = vec![cat(1, 0, 0), cat(7, 1, 1), cat(4, 1, 2), cat(9, 1, 3)];

    // Act
    let forest = TreeAssembler::assemble(records);

    // Assert
    assert_eq!(forest.child_ids(1), vec![7, 4, 9]);
}

#[test]
fn given_empty_input_when_assembling_then_returns_empty_forest() {
    // Act
    let forest = TreeAssembler::assemble(Vec::new());

    // Assert
    assert!(forest.is_empty());
    assert_eq!(forest.len(), 0);
    assert_eq!(forest.root_ids(), Vec::<u64>::new());
}

#[test]
fn given_any_records_when_assembling_then_no_id_is_lost_or_duplicated() {
    // Arrange - mix of roots, nested nodes, and an orphan
    let records = vec![
        cat(10, 0, 1),
        cat(11, 10, 2),
        cat(12, 11, 3),
        cat(20, 0, 4),
        cat(30, 999, 5),
    ];
    let mut expected: Vec<u64> = records.iter().map(|c| c.id).collect();

    // Act
    let forest = TreeAssembler::assemble(records);

    // Assert - preorder traversal visits every input id exactly once
    let mut seen: Vec<u64> = forest.iter().map(|(_, node)| node.item.id).collect();
    seen.sort_unstable();
    expected.sort_unstable();
    assert_eq!(seen, expected);
    assert_eq!(forest.len(), expected.len());
}

#[test]
fn given_assembled_forest_when_inspecting_then_every_parent_ref_resolves() {
    // Arrange
    let records = vec![cat(1, 0, 1), cat(2, 1, 2), cat(3, 42, 3), cat(4, 3, 4)];

    // Act
    let forest = TreeAssembler::assemble(records);

    // Assert - parent_ref is None or names a node in the same forest
    for (_, node) in forest.iter() {
        match node.parent_ref {
            None => {}
            Some(parent) => assert!(
                forest.node_by_id(parent).is_some(),
                "parent {parent} of node {} must be present",
                node.item.id
            ),
        }
    }
}

#[test]
fn given_deep_chain_when_assembling_then_depth_matches() {
    // Arrange - 1 <- 2 <- 3 <- 4
    let records = vec![cat(1, 0, 1), cat(2, 1, 2), cat(3, 2, 3), cat(4, 3, 4)];

    // Act
    let forest = TreeAssembler::assemble(records);

    // Assert
    assert_eq!(forest.depth(), 4);
}

#[test]
fn given_two_trees_when_assembling_then_preorder_walks_roots_in_order() {
    // Arrange
    let records = vec![cat(1, 0, 1), cat(2, 1, 2), cat(5, 0, 3), cat(6, 5, 4)];

    // Act
    let forest = TreeAssembler::assemble(records);

    // Assert - first tree fully, then the second
    let order: Vec<u64> = forest.iter().map(|(_, node)| node.item.id).collect();
    assert_eq!(order, vec![1, 2, 5, 6]);
}
