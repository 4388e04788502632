use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::entities::{FamilyMember, MemberId};

/// Tree node in the arena-based family tree.
#[derive(Debug)]
pub struct TreeNode {
    /// Member this node stands for
    pub member: FamilyMember,
    /// Spouse shown next to the member, if any
    pub spouse: Option<FamilyMember>,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, oldest first
    pub children: Vec<Index>,
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.spouse {
            Some(spouse) => write!(f, "{} & {}", self.member, spouse),
            None => write!(f, "{}", self.member),
        }
    }
}

/// Child that was not expanded because it already sits on the path above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedEdge {
    pub parent: MemberId,
    pub child: MemberId,
}

/// Arena-based family tree produced by one build.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Nodes are never shared between two trees.
#[derive(Debug)]
pub struct FamilyTree {
    arena: Arena<TreeNode>,
    root: Option<Index>,
    pruned: Vec<PrunedEdge>,
}

impl Default for FamilyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            pruned: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self, member, spouse), fields(id = %member.id))]
    pub fn insert_node(
        &mut self,
        member: FamilyMember,
        spouse: Option<FamilyMember>,
        parent: Option<Index>,
    ) -> Index {
        let node = TreeNode {
            member,
            spouse,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub(crate) fn record_pruned(&mut self, parent: MemberId, child: MemberId) {
        self.pruned.push(PrunedEdge { parent, child });
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_node(&self) -> Option<&TreeNode> {
        self.root.and_then(|idx| self.get_node(idx))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Edges dropped by the cycle guard during the build.
    pub fn pruned(&self) -> &[PrunedEdge] {
        &self.pruned
    }

    /// Child nodes of `idx` in order.
    pub fn children(&self, idx: Index) -> impl Iterator<Item = &TreeNode> + '_ {
        self.get_node(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&child| self.get_node(child))
    }

    /// Locate the node of a member; pre-order, so the shallowest hit wins.
    pub fn find(&self, id: &str) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.member.id.as_str() == id)
            .map(|(idx, _)| idx)
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Members without descendants in this tree, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<MemberId> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.member.id.clone())
            .collect()
    }

    /// Every root-to-leaf line of descent as display names.
    pub fn branches(&self) -> Vec<Vec<String>> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(idx, _)| {
                let mut line = Vec::new();
                let mut current = Some(idx);
                while let Some(node) = current.and_then(|i| self.get_node(i)) {
                    line.push(node.member.display_name());
                    current = node.parent;
                }
                line.reverse();
                line
            })
            .collect()
    }
}

/// Pre-order traversal, children left to right.
pub struct TreeIterator<'a> {
    tree: &'a FamilyTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a FamilyTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.get_node(current_idx)?;
        // Push children in reverse order for left-to-right traversal
        for &child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some((current_idx, node))
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a FamilyTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a FamilyTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
