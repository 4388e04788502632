//! Domain layer: entities and tree logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod calendar;
pub mod entities;
pub mod error;
pub mod graph;
pub mod navigation;
pub mod root;

pub use arena::{FamilyTree, PrunedEdge, TreeNode};
pub use builder::{build_tree, TreeBuilder};
pub use calendar::{age, age_in_years, age_label, ordinal, ordinal_label, ordinal_suffix};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use graph::FamilyGraph;
pub use navigation::NavigationController;
pub use root::select_default_root;
