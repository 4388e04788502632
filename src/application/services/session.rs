//! Interactive tree session
//!
//! Owns one graph snapshot, its navigation state and a small cache of
//! recently built trees. Every navigation transition yields the tree for the
//! new current root; the builder stays the single place that shapes trees.

use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{
    select_default_root, DomainError, FamilyGraph, FamilyTree, MemberId, NavigationController,
    TreeBuilder,
};

/// Least-recently-used trees keyed by root id.
#[derive(Debug)]
struct TreeCache {
    capacity: usize,
    entries: VecDeque<(MemberId, Rc<FamilyTree>)>,
}

impl TreeCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    fn get(&mut self, root: &MemberId) -> Option<Rc<FamilyTree>> {
        let pos = self.entries.iter().position(|(id, _)| id == root)?;
        let entry = self.entries.remove(pos)?;
        let tree = Rc::clone(&entry.1);
        self.entries.push_back(entry);
        Some(tree)
    }

    fn insert(&mut self, root: MemberId, tree: Rc<FamilyTree>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((root, tree));
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// One visualization session over one graph snapshot.
///
/// Sessions never share state; open one per view.
#[derive(Debug)]
pub struct TreeSession {
    graph: FamilyGraph,
    default_root: Option<MemberId>,
    navigation: Option<NavigationController>,
    cache: TreeCache,
}

impl TreeSession {
    /// Open a session rooted at the default root of `graph`.
    ///
    /// An empty graph yields a session without a tree (empty state).
    pub fn new(graph: FamilyGraph, cache_size: usize) -> Self {
        let default_root = select_default_root(graph.members());
        let navigation = default_root.clone().map(NavigationController::new);
        Self {
            graph,
            default_root,
            navigation,
            cache: TreeCache::new(cache_size),
        }
    }

    /// Open a session on an explicitly requested root.
    ///
    /// # Errors
    /// `DomainError::RootNotFound` if `root_id` is not in the graph.
    pub fn with_root(graph: FamilyGraph, root_id: &str, cache_size: usize) -> ApplicationResult<Self> {
        if !graph.contains(root_id) {
            return Err(DomainError::RootNotFound(MemberId::from(root_id)).into());
        }
        let root = MemberId::from(root_id);
        Ok(Self {
            graph,
            default_root: Some(root.clone()),
            navigation: Some(NavigationController::new(root)),
            cache: TreeCache::new(cache_size),
        })
    }

    pub fn graph(&self) -> &FamilyGraph {
        &self.graph
    }

    pub fn default_root(&self) -> Option<&MemberId> {
        self.default_root.as_ref()
    }

    pub fn current_root(&self) -> Option<&MemberId> {
        self.navigation.as_ref().map(NavigationController::current_root)
    }

    pub fn history(&self) -> &[MemberId] {
        self.navigation
            .as_ref()
            .map(NavigationController::history)
            .unwrap_or(&[])
    }

    pub fn can_go_back(&self) -> bool {
        self.navigation
            .as_ref()
            .is_some_and(NavigationController::can_go_back)
    }

    pub fn cached_trees(&self) -> usize {
        self.cache.len()
    }

    /// Tree for the current root, `None` for an empty graph.
    #[instrument(level = "debug", skip(self))]
    pub fn current_tree(&mut self) -> ApplicationResult<Option<Rc<FamilyTree>>> {
        let Some(root) = self.current_root().cloned() else {
            return Ok(None);
        };
        if let Some(tree) = self.cache.get(&root) {
            debug!(root = %root, "Tree cache hit");
            return Ok(Some(tree));
        }
        let tree = Rc::new(TreeBuilder::new(&self.graph).build(root.as_str())?);
        self.cache.insert(root, Rc::clone(&tree));
        Ok(Some(tree))
    }

    /// Re-root on a clicked node.
    ///
    /// Re-clicking the current root is a no-op. An id outside the graph is
    /// a caller bug and fails without touching navigation.
    #[instrument(level = "debug", skip(self))]
    pub fn on_node_selected(&mut self, member_id: &str) -> ApplicationResult<Option<Rc<FamilyTree>>> {
        if !self.graph.contains(member_id) {
            return Err(DomainError::RootNotFound(MemberId::from(member_id)).into());
        }
        if let Some(navigation) = self.navigation.as_mut() {
            navigation.visit(member_id);
        }
        self.current_tree()
    }

    /// Return to the previous root; without history the current tree is returned.
    #[instrument(level = "debug", skip(self))]
    pub fn back(&mut self) -> ApplicationResult<Option<Rc<FamilyTree>>> {
        if let Some(navigation) = self.navigation.as_mut() {
            navigation.back();
        }
        self.current_tree()
    }

    /// Clear history and return to the default root.
    pub fn reset(&mut self) -> ApplicationResult<Option<Rc<FamilyTree>>> {
        if let (Some(navigation), Some(root)) = (self.navigation.as_mut(), self.default_root.clone()) {
            navigation.reset(root);
        }
        self.current_tree()
    }

    /// Swap in a new snapshot: cached trees are dropped and navigation
    /// restarts at the new default root.
    #[instrument(level = "debug", skip_all)]
    pub fn replace_snapshot(&mut self, graph: FamilyGraph) {
        self.cache.clear();
        self.default_root = select_default_root(graph.members());
        self.navigation = self.default_root.clone().map(NavigationController::new);
        self.graph = graph;
    }
}
