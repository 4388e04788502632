//! Printable rendering of built trees via `termtree`.

use chrono::{Local, NaiveDate};
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::config::DisplayConfig;
use crate::domain::{age_label, FamilyMember, FamilyTree, TreeNode};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// Labels nodes according to the display options, ages relative to `today`.
#[derive(Debug, Clone)]
pub struct NodeLabeler {
    display: DisplayConfig,
    today: NaiveDate,
}

impl Default for NodeLabeler {
    fn default() -> Self {
        Self::new(DisplayConfig::default())
    }
}

impl NodeLabeler {
    pub fn new(display: DisplayConfig) -> Self {
        Self::at(display, Local::now().date_naive())
    }

    pub fn at(display: DisplayConfig, today: NaiveDate) -> Self {
        Self { display, today }
    }

    fn member_label(&self, member: &FamilyMember) -> String {
        let mut label = member.display_name();
        if self.display.show_age {
            if let Some(birth) = member.birth_date {
                label.push_str(&format!(", {}", age_label(birth, member.death_date, self.today)));
            }
        }
        if self.display.show_notes {
            if let Some(notes) = &member.notes {
                label.push_str(&format!(" [{}]", notes));
            }
        }
        label
    }

    pub fn label(&self, node: &TreeNode) -> String {
        let mut label = self.member_label(&node.member);
        if self.display.show_spouse {
            if let Some(spouse) = &node.spouse {
                label.push_str(&format!(" \u{26ad} {}", self.member_label(spouse)));
            }
        }
        label
    }

    #[instrument(level = "debug", skip_all)]
    pub fn render(&self, tree: &FamilyTree) -> Tree<String> {
        fn build(labeler: &NodeLabeler, tree: &FamilyTree, idx: Index, parent: &mut Tree<String>) {
            if let Some(node) = tree.get_node(idx) {
                for &child_idx in &node.children {
                    if let Some(child) = tree.get_node(child_idx) {
                        let mut child_tree = Tree::new(labeler.label(child));
                        build(labeler, tree, child_idx, &mut child_tree);
                        parent.push(child_tree);
                    }
                }
            }
        }

        match tree.root().zip(tree.root_node()) {
            Some((root_idx, root)) => {
                let mut rendered = Tree::new(self.label(root));
                build(self, tree, root_idx, &mut rendered);
                rendered
            }
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

impl TreeNodeConvert for FamilyTree {
    fn to_tree_string(&self) -> Tree<String> {
        NodeLabeler::default().render(self)
    }
}
