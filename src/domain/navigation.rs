//! Current root plus back-stack for re-rootable tree views.
//!
//! Two implicit states: at-root (empty history) and drilled-in. The
//! controller stores ids only; building the tree for the current root is
//! left to the caller.

use tracing::{debug, instrument};

use crate::domain::entities::MemberId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationController {
    current_root: MemberId,
    /// Previously current roots, most recent last
    history: Vec<MemberId>,
}

impl NavigationController {
    pub fn new(root: impl Into<MemberId>) -> Self {
        Self {
            current_root: root.into(),
            history: Vec::new(),
        }
    }

    pub fn current_root(&self) -> &MemberId {
        &self.current_root
    }

    pub fn history(&self) -> &[MemberId] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Number of re-roots that `back` can undo.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Re-root on `id`. Returns `false` (and changes nothing) when `id` is
    /// already the current root.
    #[instrument(level = "debug", skip(self), fields(current = %self.current_root))]
    pub fn visit(&mut self, id: impl Into<MemberId> + std::fmt::Debug) -> bool {
        let id = id.into();
        if id == self.current_root {
            return false;
        }
        let previous = std::mem::replace(&mut self.current_root, id);
        self.history.push(previous);
        debug!(depth = self.history.len(), "Visited new root");
        true
    }

    /// Return to the previous root. No-op returning `None` on empty history.
    #[instrument(level = "debug", skip(self), fields(current = %self.current_root))]
    pub fn back(&mut self) -> Option<&MemberId> {
        let previous = self.history.pop()?;
        self.current_root = previous;
        Some(&self.current_root)
    }

    /// Drop all history and start over at `default_root`.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self, default_root: impl Into<MemberId> + std::fmt::Debug) {
        self.history.clear();
        self.current_root = default_root.into();
    }
}
