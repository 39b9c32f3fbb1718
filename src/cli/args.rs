//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::{CategoryId, LocaleId, ScopeId};

/// Hierarchical category retrieval: locale overlay, descendant expansion,
/// and orphan-promoting tree assembly
#[derive(Parser, Debug)]
#[command(name = "rscat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-d: info, -d -d: debug, -d -d -d: trace)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Category catalog file (TOML); overrides the configured default
    #[arg(short = 'f', long = "data", global = true, value_hint = ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// Active locale id (0 = default locale); overrides config
    #[arg(short, long, global = true)]
    pub locale: Option<LocaleId>,

    /// Storage scope: comma-joined pid list; overrides config
    #[arg(short, long, global = true)]
    pub scope: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble and show the category forest below the given roots
    Tree {
        /// Comma-joined root category ids, e.g. "1,4"
        ids: String,
    },

    /// List direct children of a category (sort-order ascending)
    Children {
        /// Parent category id
        id: CategoryId,
    },

    /// List root categories of a storage scope
    Roots {
        /// Storage scope (pid)
        pid: ScopeId,
    },

    /// Look up a category by external import key
    ImportKey {
        /// Importing system identifier
        source: String,
        /// Record id in the importing system
        id: String,
    },

    /// Pick a category interactively (fzf) and show its subtree
    Select,

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

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config paths
    Path,
}
