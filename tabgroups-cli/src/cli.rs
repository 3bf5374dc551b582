//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Command-line tool for saved terminal tab groups
#[derive(Parser)]
#[command(name = "tabgroups-cli")]
#[command(author, version, about = "Inspect and edit tab groups in saved window arrangements")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a settings file (TOML)
    #[arg(short, long, global = true, env = "TABGROUPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors from logging, and no error message on failure
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show tabs and groups of a saved window
    #[command(about = "Print the tabs of a saved window with their groups")]
    Show {
        /// Window arrangement file (JSON)
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Restore a saved window and write it back with groups made contiguous
    #[command(about = "Repair a saved window so every group is one contiguous block")]
    Normalize {
        /// Window arrangement file (JSON)
        file: PathBuf,

        /// Write the result here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Edit the groups of a saved window
    #[command(subcommand, about = "Create and edit tab groups in a saved window")]
    Group(GroupCommands),

    /// List predefined group colors
    #[command(about = "List the predefined group colors")]
    Palette {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completions")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Group subcommands
///
/// `<group>` accepts a group GUID, its exact name, or its name in any case.
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a group
    #[command(about = "Create a group from tabs given by GUID or index")]
    Create {
        /// Window arrangement file (JSON)
        file: PathBuf,

        /// Group name (a numbered default name is used when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Palette name, `#rrggbb[aa]`, or `none`
        #[arg(long)]
        color: Option<String>,

        /// Tab GUID or zero-based tab index (repeatable)
        #[arg(short, long = "tab", required = true)]
        tabs: Vec<String>,
    },

    /// Ungroup a group, keeping its tabs
    #[command(about = "Remove a group, keeping its tabs open")]
    Remove {
        /// Window arrangement file (JSON)
        file: PathBuf,
        /// Group GUID or name
        group: String,
    },

    /// Close a group and its tabs
    #[command(about = "Close a group together with all of its tabs")]
    Close {
        /// Window arrangement file (JSON)
        file: PathBuf,
        /// Group GUID or name
        group: String,
    },

    /// Collapse a group
    #[command(about = "Collapse a group down to its first tab")]
    Collapse {
        /// Window arrangement file (JSON)
        file: PathBuf,
        /// Group GUID or name
        group: String,
    },

    /// Expand a group
    #[command(about = "Expand a collapsed group")]
    Expand {
        /// Window arrangement file (JSON)
        file: PathBuf,
        /// Group GUID or name
        group: String,
    },

    /// Toggle a group's collapsed state
    #[command(about = "Collapse an expanded group or expand a collapsed one")]
    Toggle {
        /// Window arrangement file (JSON)
        file: PathBuf,
        /// Group GUID or name
        group: String,
    },

    /// Rename a group
    #[command(about = "Rename a group")]
    Rename {
        /// Window arrangement file (JSON)
        file: PathBuf,
        /// Group GUID or name
        group: String,
        /// New name
        name: String,
    },

    /// Change a group's color
    #[command(about = "Change a group's color")]
    Color {
        /// Window arrangement file (JSON)
        file: PathBuf,
        /// Group GUID or name
        group: String,
        /// Palette name, `#rrggbb[aa]`, or `none`
        color: String,
    },
}

/// Output format for listing commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON
    Json,
}
