use chrono::NaiveDate;

use kintree::application::services::parse_snapshot;
use kintree::config::DisplayConfig;
use kintree::domain::{build_tree, FamilyGraph, FamilyTree};
use kintree::tree_traits::{NodeLabeler, TreeNodeConvert};

fn santos_tree(root: &str) -> FamilyTree {
    let records = parse_snapshot(include_str!("resources/santos.json")).expect("fixture parses");
    let graph = FamilyGraph::from_records(records);
    build_tree(&graph, root).expect("build tree")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn given_default_display_when_rendering_then_ages_and_spouses_shown() {
    // Arrange
    let tree = santos_tree("1");
    let labeler = NodeLabeler::at(DisplayConfig::default(), today());

    // Act
    let rendered = labeler.render(&tree).to_string();

    // Assert
    let first_line = rendered.lines().next().expect("root line");
    assert_eq!(
        first_line,
        "Antonio Santos, 79 years (1925\u{2013}2004) \u{26ad} Rosa Santos, 95 years (1928)"
    );
    assert!(rendered.contains("Maria Santos, 74 years (1950) \u{26ad} Carlos Lima, 75 years (1948)"));
    assert!(rendered.contains("Jorge Santos\n"), "undated member has no age: {rendered}");
    assert_eq!(rendered.lines().count(), 8);
}

#[test]
fn given_ages_and_spouses_hidden_when_rendering_then_names_only() {
    let tree = santos_tree("3");
    let display = DisplayConfig {
        show_age: false,
        show_spouse: false,
        show_notes: false,
    };

    let rendered = NodeLabeler::at(display, today()).render(&tree).to_string();

    assert_eq!(rendered.lines().next(), Some("Maria Santos"));
    assert!(!rendered.contains("Carlos"));
}

#[test]
fn given_notes_enabled_when_rendering_then_notes_appended() {
    let tree = santos_tree("1");
    let display = DisplayConfig {
        show_age: false,
        show_spouse: false,
        show_notes: true,
    };

    let rendered = NodeLabeler::at(display, today()).render(&tree).to_string();

    assert_eq!(rendered.lines().next(), Some("Antonio Santos [Emigrated in 1948]"));
}

#[test]
fn given_empty_tree_when_rendering_then_placeholder() {
    let rendered = FamilyTree::new().to_tree_string().to_string();
    assert_eq!(rendered.trim_end(), "Empty tree");
}
