//! Gitignore-style pattern matching for ownership rules.
//!
//! Patterns follow these rules:
//!
//! - `*` matches any sequence of non-slash characters
//! - `**` matches any sequence including slashes (any path)
//! - `/` at the start anchors to the repository root
//! - `/` at the end matches only directories (i.e. everything inside them)
//! - Patterns without any `/` match the basename at any depth
//! - `\` escapes the following character, so `foo\ bar` contains a literal
//!   space and a trailing `\x` matches `x` literally

use globset::{GlobBuilder, GlobMatcher};

/// A compiled ownership pattern that can match file paths.
///
/// Compilation is more expensive than evaluation; compile once and reuse
/// across many candidate paths.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// The original pattern string.
    original: String,
    /// The compiled glob matcher.
    matcher: GlobMatcher,
    /// Whether this pattern is anchored to the root.
    anchored: bool,
    /// Whether this pattern matches only directories.
    directory_only: bool,
}

impl Pattern {
    /// Compiles a pattern for matching.
    ///
    /// Returns `None` if the pattern is not a valid glob.
    pub fn new(pattern: &str) -> Option<Self> {
        let original = pattern.to_string();
        let (glob_pattern, anchored, directory_only) = normalize_pattern(pattern);

        // * must not cross directory boundaries; backslash escapes are part
        // of the grammar on every platform.
        let glob = GlobBuilder::new(&glob_pattern)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .ok()?;
        let matcher = glob.compile_matcher();

        Some(Self {
            original,
            matcher,
            anchored,
            directory_only,
        })
    }

    /// Returns the original pattern string.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Returns true if this pattern is anchored to the repository root.
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Returns true if this pattern matches only directories.
    pub fn is_directory_only(&self) -> bool {
        self.directory_only
    }

    /// Checks if this pattern matches the given path.
    ///
    /// The path should be relative to the repository root and use forward
    /// slashes; a leading slash is tolerated and ignored.
    pub fn matches(&self, path: &str) -> bool {
        let path = path.strip_prefix('/').unwrap_or(path);
        self.matcher.is_match(path)
    }
}

/// Normalizes an ownership pattern to a glob pattern.
///
/// Returns (glob_pattern, is_anchored, is_directory_only).
fn normalize_pattern(pattern: &str) -> (String, bool, bool) {
    let mut pattern = pattern.to_string();
    let mut anchored = false;
    let mut directory_only = false;

    // Directory-only suffix
    if pattern.ends_with('/') {
        directory_only = true;
        pattern = pattern.trim_end_matches('/').to_string();
    }

    // Anchored patterns are already relative to root
    if pattern.starts_with('/') {
        anchored = true;
        pattern = pattern[1..].to_string();
    } else if !pattern.contains('/') {
        // No slash anywhere: match the basename at any depth
        pattern = format!("**/{}", pattern);
    }
    // Patterns with an interior / are relative to root already

    // A directory pattern matches everything inside the directory,
    // e.g. /docs/ becomes docs/** so it matches docs/anything
    if directory_only {
        pattern = format!("{}/**", pattern);
    }

    (pattern, anchored, directory_only)
}
