//! kintree: genealogy tree engine
//!
//! Turns a flat snapshot of family members and typed relationship edges into
//! rooted, ordered trees that can be re-rooted at runtime with back-navigation.
//!
//! Layers:
//! - [`domain`]: graph index, root selection, tree builder, navigation, age/ordinal labels
//! - [`application`]: sessions and snapshot parsing
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: the `kintree` command line

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
