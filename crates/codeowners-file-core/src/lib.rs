//! CODEOWNERS File Core
//!
//! A library for parsing, querying, editing, and serializing CODEOWNERS
//! files without losing their original shape (comments, blank lines,
//! ordering).
//!
//! # Features
//!
//! - **Parser**: Parse from a path, reader, line sequence, or string into
//!   an ordered document model
//! - **Matching**: Resolve a path to its owning rule with gitignore-style
//!   glob semantics and last-match-wins precedence
//! - **Mutation**: Update, rename, append, and prepend entries in place
//! - **Serialization**: Regenerate canonical text, including the trailing
//!   known-unowned section, and write it back atomically
//!
//! # Quick Start
//!
//! ```rust
//! use codeowners_file_core::parse::parse_str;
//!
//! let input = "# Project: Core\n/src/**  @alice\n/src/gen/**  @bob\n";
//! let mut doc = parse_str(input).unwrap();
//!
//! // Both rules match; the one declared last wins.
//! let hit = doc.match_path("src/gen/x.go", false).unwrap();
//! assert_eq!(hit.pattern, "/src/gen/**");
//! assert_eq!(hit.owners, ["@bob"]);
//! assert_eq!(hit.project.as_deref(), Some("Core"));
//!
//! doc.update_owners("/src/**", ["@carol"]).unwrap();
//! assert_eq!(doc.to_lines()[1], "/src/**  @carol");
//! ```
//!
//! # Modules
//!
//! - [`parse`]: Parser entry points and configuration
//! - [`document`]: The document model, derived views, and matching
//! - [`line`]: The typed line model
//! - [`matching`]: Single-pattern glob matching
//! - [`error`]: Error types

use std::path::{Path, PathBuf};

pub mod document;
pub mod error;
pub mod line;
pub mod matching;
pub mod parse;

mod mutate;
mod serialize;

// Re-export commonly used types at the crate root
pub use document::{Document, MatchResult};
pub use error::{Error, Result};
pub use line::Line;
pub use parse::ParserConfig;

/// Marker line introducing the trailing known-unowned section.
pub const UNOWNED_MARKER: &str = "### UNOWNED (File::Codeowners)";

/// Finds the CODEOWNERS file in a repository.
///
/// Searches in the following locations (in order):
/// 1. `.github/CODEOWNERS`
/// 2. `CODEOWNERS`
/// 3. `docs/CODEOWNERS`
///
/// Returns `Some(path)` if found, `None` otherwise.
pub fn find_codeowners_file(repo_path: &Path) -> Option<PathBuf> {
    let locations = [
        repo_path.join(".github/CODEOWNERS"),
        repo_path.join("CODEOWNERS"),
        repo_path.join("docs/CODEOWNERS"),
    ];
    locations.into_iter().find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_codeowners_file_prefers_dot_github() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".github")).unwrap();
        std::fs::write(dir.path().join(".github/CODEOWNERS"), "* @a\n").unwrap();
        std::fs::write(dir.path().join("CODEOWNERS"), "* @b\n").unwrap();

        let found = find_codeowners_file(dir.path()).unwrap();
        assert!(found.ends_with(".github/CODEOWNERS"));
    }

    #[test]
    fn find_codeowners_file_falls_back_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("CODEOWNERS"), "* @b\n").unwrap();

        let found = find_codeowners_file(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("CODEOWNERS"));
    }

    #[test]
    fn find_codeowners_file_none_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_codeowners_file(dir.path()).is_none());
    }
}
