//! Tree builder: materializes a rooted, ordered family tree from the graph.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument, warn};

use crate::domain::arena::FamilyTree;
use crate::domain::entities::MemberId;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::graph::FamilyGraph;

enum Step {
    Enter { id: MemberId, parent: Option<Index> },
    Exit(MemberId),
}

/// Constructs family trees rooted at any member of a graph.
///
/// The graph is only read; every build returns a fresh arena.
pub struct TreeBuilder<'g> {
    graph: &'g FamilyGraph,
}

impl<'g> TreeBuilder<'g> {
    pub fn new(graph: &'g FamilyGraph) -> Self {
        Self { graph }
    }

    /// Build the tree below `root_id`.
    ///
    /// Children are ordered oldest first. A child already on the path from
    /// the root to its parent is pruned instead of expanded.
    ///
    /// # Errors
    /// `DomainError::RootNotFound` if `root_id` is not a member of the graph.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, root_id: &str) -> DomainResult<FamilyTree> {
        if !self.graph.contains(root_id) {
            return Err(DomainError::RootNotFound(MemberId::from(root_id)));
        }

        let mut tree = FamilyTree::new();
        let mut on_path: HashSet<MemberId> = HashSet::new();
        let mut stack = vec![Step::Enter {
            id: MemberId::from(root_id),
            parent: None,
        }];

        while let Some(step) = stack.pop() {
            let (current_id, parent_idx) = match step {
                Step::Exit(id) => {
                    on_path.remove(&id);
                    continue;
                }
                Step::Enter { id, parent } => (id, parent),
            };

            let Some(member) = self.graph.member(current_id.as_str()) else {
                continue;
            };
            let spouse = self.graph.spouse_of(current_id.as_str()).cloned();
            let current_idx = tree.insert_node(member.clone(), spouse, parent_idx);

            on_path.insert(current_id.clone());
            stack.push(Step::Exit(current_id.clone()));

            // Reverse so the oldest child is popped first
            for child in self.graph.children_of(current_id.as_str()).into_iter().rev() {
                if on_path.contains(&child.id) {
                    warn!(parent = %current_id, child = %child.id, "Cycle in parent edges, pruning branch");
                    tree.record_pruned(current_id.clone(), child.id.clone());
                    continue;
                }
                stack.push(Step::Enter {
                    id: child.id.clone(),
                    parent: Some(current_idx),
                });
            }
        }

        debug!(nodes = tree.len(), depth = tree.depth(), "Tree built");
        Ok(tree)
    }
}

/// Convenience wrapper around [`TreeBuilder::build`].
pub fn build_tree(graph: &FamilyGraph, root_id: &str) -> DomainResult<FamilyTree> {
    TreeBuilder::new(graph).build(root_id)
}
