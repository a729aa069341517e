//! Command-line surface for the CODEOWNERS file tool.
//!
//! Argument parsing via Clap with environment variable support. Each
//! subcommand maps onto one core entry point; this layer holds no logic of
//! its own.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query and edit CODEOWNERS files.
///
/// Resolves path ownership, prints derived views (owners, patterns,
/// projects, aliases), edits owners in place, and writes the file back
/// without losing comments or ordering.
#[derive(Parser, Debug)]
#[command(name = "codeowners-file")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the CODEOWNERS file. Defaults to the standard locations
    /// under the repository root.
    #[arg(long, env = "CODEOWNERS_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Path to the repository root used to locate the file.
    #[arg(long, env = "REPOSITORY_PATH", default_value = ".", global = true)]
    pub repository_path: PathBuf,

    /// Parse `@name owner...` lines as owner aliases.
    #[arg(long, global = true)]
    pub aliases: bool,

    /// Output as JSON instead of human-readable text.
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands, each wired to one core operation.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the owning rule for a path.
    Match {
        /// The path to resolve, relative to the repository root.
        path: String,
        /// Expand alias owners into their member lists (implies --aliases).
        #[arg(long)]
        expand: bool,
    },
    /// List owners, optionally restricted to one pattern.
    Owners {
        /// Only list owners of rules with this exact pattern.
        #[arg(long)]
        pattern: Option<String>,
    },
    /// List patterns, optionally restricted to one owner.
    Patterns {
        /// Only list patterns of rules listing this owner.
        #[arg(long)]
        owner: Option<String>,
    },
    /// List project names.
    Projects,
    /// List owner aliases (implies --aliases).
    Aliases,
    /// Replace the owners of every rule with the given pattern.
    UpdateOwners {
        /// The exact pattern to update.
        pattern: String,
        /// The replacement owner list.
        #[arg(required = true)]
        owners: Vec<String>,
    },
    /// Replace the owners of every rule in the given project.
    UpdateProjectOwners {
        /// The project whose rules to update.
        project: String,
        /// The replacement owner list.
        #[arg(required = true)]
        owners: Vec<String>,
    },
    /// Replace every occurrence of an owner with a new one.
    RenameOwner {
        /// The owner to replace.
        old: String,
        /// The replacement owner.
        new: String,
    },
    /// Rename a project, rewriting its declaring comments.
    RenameProject {
        /// The project to rename.
        old: String,
        /// The new project name.
        new: String,
    },
    /// List the known-unowned paths.
    Unowned,
    /// Record paths as known-unowned.
    AddUnowned {
        /// The paths to record.
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Remove paths from the known-unowned set.
    RemoveUnowned {
        /// The paths to remove.
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

impl Command {
    /// True if this command edits the document and must write it back.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::UpdateOwners { .. }
                | Self::UpdateProjectOwners { .. }
                | Self::RenameOwner { .. }
                | Self::RenameProject { .. }
                | Self::AddUnowned { .. }
                | Self::RemoveUnowned { .. }
        )
    }
}
