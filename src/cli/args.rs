//! CLI argument definitions using clap

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueHint};

/// Genealogy tree engine: ordered, re-rootable family trees from relationship snapshots
#[derive(Parser, Debug)]
#[command(name = "kintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .kintree.toml (default: snapshot directory)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the family tree
    Tree {
        /// Snapshot JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        snapshot: PathBuf,
        /// Member id to root the tree on (default: oldest member)
        #[arg(short, long)]
        root: Option<String>,
    },

    /// Print the default root member
    Root {
        /// Snapshot JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        snapshot: PathBuf,
    },

    /// Show age, spouse and birth order of a member
    Info {
        /// Snapshot JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        snapshot: PathBuf,
        /// Member id
        id: String,
    },

    /// Re-root step by step: member ids visit, "back" and "reset" navigate
    Navigate {
        /// Snapshot JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        snapshot: PathBuf,
        /// Steps to apply in order
        #[arg(num_args = 1..)]
        steps: Vec<String>,
    },

    /// Print every line of descent from the root
    Branches {
        /// Snapshot JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        snapshot: PathBuf,
        /// Member id to root the tree on (default: oldest member)
        #[arg(short, long)]
        root: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Snapshot file the command works on, if any.
    pub fn snapshot(&self) -> Option<&Path> {
        match self {
            Commands::Tree { snapshot, .. }
            | Commands::Root { snapshot }
            | Commands::Info { snapshot, .. }
            | Commands::Navigate { snapshot, .. }
            | Commands::Branches { snapshot, .. } => Some(snapshot.as_path()),
            Commands::Config { .. } | Commands::Completion { .. } => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
    /// Print a commented template config
    Template,
}
