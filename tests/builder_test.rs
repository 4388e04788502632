//! Tree builder behaviour over snapshot fixtures and hand-built graphs.

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use kintree::application::services::parse_snapshot;
use kintree::domain::{
    build_tree, DomainError, FamilyGraph, FamilyMember, FamilyTree, Gender, MemberId, PrunedEdge,
    Relationship, TreeBuilder,
};
use kintree::util::testing;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn person(id: &str) -> FamilyMember {
    FamilyMember::new(id, id, "Doe", Gender::Female)
}

fn preorder_ids(tree: &FamilyTree) -> Vec<String> {
    tree.iter()
        .map(|(_, node)| node.member.id.to_string())
        .collect()
}

fn child_ids(tree: &FamilyTree, id: &str) -> Vec<String> {
    let idx = tree.find(id).expect("member in tree");
    tree.children(idx)
        .map(|node| node.member.id.to_string())
        .collect()
}

#[fixture]
fn santos() -> FamilyGraph {
    testing::init_test_setup();
    let records = parse_snapshot(include_str!("resources/santos.json")).expect("fixture parses");
    FamilyGraph::from_records(records)
}

#[rstest]
fn given_snapshot_when_building_from_root_then_root_node_is_requested_member(santos: FamilyGraph) {
    // Act
    let tree = build_tree(&santos, "1").expect("build tree");

    // Assert
    let root = tree.root_node().expect("root node");
    assert_eq!(root.member.id, MemberId::from("1"));
    assert!(root.parent.is_none());
    assert_eq!(root.spouse.as_ref().map(|s| s.id.as_str()), Some("2"));
}

#[rstest]
fn given_snapshot_when_building_then_children_sorted_oldest_first_undated_last(
    santos: FamilyGraph,
) {
    // Act
    let tree = build_tree(&santos, "1").expect("build tree");

    // Assert: edges list 5, 6, 3, 4; Jorge (6) has no birth date
    assert_eq!(child_ids(&tree, "1"), vec!["3", "4", "5", "6"]);
}

#[rstest]
fn given_parent_and_child_edges_when_building_then_both_yield_children(santos: FamilyGraph) {
    // Act
    let tree = build_tree(&santos, "3").expect("build tree");

    // Assert: 8 and 9 via parent edges, 10 via its own child edge
    assert_eq!(child_ids(&tree, "3"), vec!["8", "9", "10"]);
}

#[rstest]
fn given_one_directional_spouse_edge_when_building_then_spouse_shown_on_both_sides(
    santos: FamilyGraph,
) {
    // Act
    let from_maria = build_tree(&santos, "3").expect("build tree");
    let from_carlos = build_tree(&santos, "7").expect("build tree");

    // Assert
    let maria = from_maria.root_node().unwrap();
    assert_eq!(maria.spouse.as_ref().map(|s| s.id.as_str()), Some("7"));
    let carlos = from_carlos.root_node().unwrap();
    assert_eq!(carlos.spouse.as_ref().map(|s| s.id.as_str()), Some("3"));
    assert_eq!(from_carlos.len(), 1, "spouse edges never contribute children");
}

#[rstest]
fn given_snapshot_when_building_then_spouses_are_not_tree_nodes(santos: FamilyGraph) {
    // Act
    let tree = build_tree(&santos, "1").expect("build tree");

    // Assert
    assert_eq!(tree.len(), 8);
    assert_eq!(tree.depth(), 3);
    assert!(tree.find("2").is_none());
    assert!(tree.find("7").is_none());
    assert_eq!(preorder_ids(&tree), vec!["1", "3", "8", "9", "10", "4", "5", "6"]);
}

#[rstest]
fn given_snapshot_when_listing_branches_then_each_leaf_has_a_line(santos: FamilyGraph) {
    // Act
    let tree = build_tree(&santos, "1").expect("build tree");

    // Assert
    let leaves: Vec<String> = tree.leaf_nodes().iter().map(|id| id.to_string()).collect();
    assert_eq!(leaves, vec!["8", "9", "10", "4", "5", "6"]);
    let branches = tree.branches();
    assert_eq!(branches.len(), 6);
    assert_eq!(branches[0], vec!["Antonio Santos", "Maria Santos", "Ana Lima"]);
    assert_eq!(branches[5], vec!["Antonio Santos", "Jorge Santos"]);
}

#[rstest]
fn given_snapshot_when_iterating_postorder_then_root_comes_last(santos: FamilyGraph) {
    let tree = build_tree(&santos, "1").expect("build tree");

    let ids: Vec<String> = tree
        .iter_postorder()
        .map(|(_, node)| node.member.id.to_string())
        .collect();

    assert_eq!(ids, vec!["8", "9", "10", "3", "4", "5", "6", "1"]);
}

#[rstest]
fn given_any_member_when_building_then_tree_is_rooted_there(santos: FamilyGraph) {
    for member in santos.members() {
        let tree = build_tree(&santos, member.id.as_str()).expect("build tree");
        assert_eq!(tree.root_node().unwrap().member.id, member.id);
    }
}

#[rstest]
fn given_same_graph_when_building_twice_then_trees_are_independent(santos: FamilyGraph) {
    let builder = TreeBuilder::new(&santos);

    let first = builder.build("1").expect("first build");
    let second = builder.build("1").expect("second build");

    assert_eq!(preorder_ids(&first), preorder_ids(&second));
    assert_eq!(santos.len(), 10, "builds leave the graph untouched");
}

#[test]
fn given_unknown_root_when_building_then_root_not_found() {
    let graph = FamilyGraph::new(vec![person("a")], vec![]);

    let result = build_tree(&graph, "missing");

    assert_eq!(
        result.unwrap_err(),
        DomainError::RootNotFound(MemberId::from("missing"))
    );
}

#[test]
fn given_parent_cycle_when_building_then_branch_pruned_and_build_terminates() {
    // Arrange: a is parent of b, b is parent of a
    let graph = FamilyGraph::new(
        vec![person("a"), person("b")],
        vec![Relationship::parent("a", "b"), Relationship::parent("b", "a")],
    );

    // Act
    let tree = build_tree(&graph, "a").expect("build tree");

    // Assert
    assert_eq!(preorder_ids(&tree), vec!["a", "b"]);
    assert_eq!(
        tree.pruned(),
        &[PrunedEdge {
            parent: MemberId::from("b"),
            child: MemberId::from("a"),
        }]
    );
}

#[test]
fn given_self_parent_edge_when_building_then_single_node() {
    let graph = FamilyGraph::new(vec![person("a")], vec![Relationship::parent("a", "a")]);

    let tree = build_tree(&graph, "a").expect("build tree");

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.pruned().len(), 1);
}

#[test]
fn given_shared_descendant_when_building_then_repeated_under_each_parent() {
    // Arrange: d descends from both b and c, which is not a cycle
    let graph = FamilyGraph::new(
        vec![person("a"), person("b"), person("c"), person("d")],
        vec![
            Relationship::parent("a", "b"),
            Relationship::parent("a", "c"),
            Relationship::parent("b", "d"),
            Relationship::parent("c", "d"),
        ],
    );

    // Act
    let tree = build_tree(&graph, "a").expect("build tree");

    // Assert
    assert_eq!(tree.len(), 5);
    assert!(tree.pruned().is_empty());
}

#[test]
fn given_dangling_edges_when_building_then_missing_members_skipped() {
    testing::init_test_setup();
    let graph = FamilyGraph::new(
        vec![person("a"), person("b")],
        vec![
            Relationship::spouse("a", "ghost"),
            Relationship::spouse("a", "b"),
            Relationship::parent("a", "phantom"),
        ],
    );

    let tree = build_tree(&graph, "a").expect("build tree");

    let root = tree.root_node().unwrap();
    assert_eq!(root.spouse.as_ref().map(|s| s.id.as_str()), Some("b"));
    assert!(root.children.is_empty());
}

#[test]
fn given_two_spouse_edges_when_building_then_first_edge_wins() {
    let graph = FamilyGraph::new(
        vec![person("a"), person("b"), person("c")],
        vec![Relationship::spouse("a", "c"), Relationship::spouse("a", "b")],
    );

    let tree = build_tree(&graph, "a").expect("build tree");

    let root = tree.root_node().unwrap();
    assert_eq!(root.spouse.as_ref().map(|s| s.id.as_str()), Some("c"));
}

#[test]
fn given_undated_siblings_when_building_then_keep_edge_order_after_dated() {
    let graph = FamilyGraph::new(
        vec![
            person("p"),
            person("u1"),
            person("d1990").born(date(1990, 1, 1)),
            person("u2"),
            person("d1985").born(date(1985, 6, 1)),
        ],
        vec![
            Relationship::parent("p", "u1"),
            Relationship::parent("p", "d1990"),
            Relationship::parent("p", "u2"),
            Relationship::parent("p", "d1985"),
        ],
    );

    let tree = build_tree(&graph, "p").expect("build tree");

    assert_eq!(child_ids(&tree, "p"), vec!["d1985", "d1990", "u1", "u2"]);
}

#[test]
fn given_same_birth_date_siblings_when_building_then_edge_order_kept() {
    let twins = date(1990, 3, 3);
    let graph = FamilyGraph::new(
        vec![person("p"), person("t2").born(twins), person("t1").born(twins)],
        vec![Relationship::parent("p", "t2"), Relationship::parent("p", "t1")],
    );

    let tree = build_tree(&graph, "p").expect("build tree");

    assert_eq!(child_ids(&tree, "p"), vec!["t2", "t1"]);
}
