//! The in-memory CODEOWNERS document: ordered lines, the known-unowned
//! path set, and memoized derived views.

use std::cell::{OnceCell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::line::Line;
use crate::matching::Pattern;

/// The single most-specific ownership rule resolved for a path.
///
/// A detached value object: mutating the document after a match does not
/// change a previously returned result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// The pattern of the winning rule.
    pub pattern: String,
    /// The winning rule's owners, alias-expanded if requested.
    pub owners: Vec<String>,
    /// The project the winning rule belongs to, if any.
    pub project: Option<String>,
}

/// Memoized derived views over the line sequence.
///
/// Every mutation entry point replaces the whole cache before returning;
/// reads lazily rebuild from the current lines.
#[derive(Debug, Clone, Default)]
struct ViewCache {
    owners: OnceCell<Vec<String>>,
    patterns: OnceCell<Vec<String>>,
    projects: OnceCell<Vec<String>>,
    aliases: OnceCell<BTreeMap<String, Vec<String>>>,
    /// Rule line indices, most recently declared first.
    match_order: OnceCell<Vec<usize>>,
    /// Compiled matchers keyed by pattern text. Patterns that fail to
    /// compile are cached as `None` and never match.
    matchers: RefCell<HashMap<String, Option<Pattern>>>,
}

/// A CODEOWNERS document: an ordered sequence of [`Line`]s plus the
/// known-unowned path set.
///
/// Created empty via [`Document::new`] or populated by the parser. Mutation
/// methods modify it in place; serialization reads it without mutating it.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) lines: Vec<Line>,
    pub(crate) unowned: BTreeSet<String>,
    views: ViewCache,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.lines == other.lines && self.unowned == other.unowned
    }
}

impl Eq for Document {}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(lines: Vec<Line>, unowned: BTreeSet<String>) -> Self {
        Self {
            lines,
            unowned,
            views: ViewCache::default(),
        }
    }

    /// The ordered line sequence.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns an iterator over the rule lines in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|line| line.is_rule())
    }

    /// True if the document has no lines and no unowned paths.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.unowned.is_empty()
    }

    /// Drops every memoized view. Called by every mutation entry point
    /// before it returns.
    pub(crate) fn invalidate_views(&mut self) {
        self.views = ViewCache::default();
    }

    /// All owners in the document, sorted and duplicate-free. Covers every
    /// line carrying an owner list: rules and aliases.
    pub fn owners(&self) -> &[String] {
        self.views.owners.get_or_init(|| {
            let mut owners: Vec<String> = self
                .lines
                .iter()
                .filter_map(Line::owners)
                .flatten()
                .cloned()
                .collect();
            owners.sort();
            owners.dedup();
            owners
        })
    }

    /// Owners of rules whose pattern equals `pattern`, sorted and
    /// duplicate-free.
    pub fn owners_of(&self, pattern: &str) -> Vec<String> {
        let mut owners: Vec<String> = self
            .lines
            .iter()
            .filter(|line| line.pattern() == Some(pattern))
            .filter_map(Line::owners)
            .flatten()
            .cloned()
            .collect();
        owners.sort();
        owners.dedup();
        owners
    }

    /// All rule patterns, sorted and duplicate-free.
    pub fn patterns(&self) -> &[String] {
        self.views.patterns.get_or_init(|| {
            let mut patterns: Vec<String> = self
                .lines
                .iter()
                .filter_map(Line::pattern)
                .map(str::to_string)
                .collect();
            patterns.sort();
            patterns.dedup();
            patterns
        })
    }

    /// Patterns of rules listing `owner`, sorted and duplicate-free.
    pub fn patterns_of(&self, owner: &str) -> Vec<String> {
        let mut patterns: Vec<String> = self
            .lines
            .iter()
            .filter(|line| {
                line.owners()
                    .is_some_and(|owners| owners.iter().any(|o| o == owner))
            })
            .filter_map(Line::pattern)
            .map(str::to_string)
            .collect();
        patterns.sort();
        patterns.dedup();
        patterns
    }

    /// All project names, sorted and duplicate-free.
    pub fn projects(&self) -> &[String] {
        self.views.projects.get_or_init(|| {
            let mut projects: Vec<String> = self
                .lines
                .iter()
                .filter_map(Line::project)
                .map(str::to_string)
                .collect();
            projects.sort();
            projects.dedup();
            projects
        })
    }

    /// Alias name to owner list, reflecting the current alias lines.
    /// When the same name is declared twice the later declaration wins.
    pub fn aliases(&self) -> &BTreeMap<String, Vec<String>> {
        self.views.aliases.get_or_init(|| {
            self.lines
                .iter()
                .filter_map(|line| match line {
                    Line::Alias { name, owners } => Some((name.clone(), owners.clone())),
                    _ => None,
                })
                .collect()
        })
    }

    /// Resolves `path` to its owning rule, if any.
    ///
    /// Rules are consulted in reverse declaration order, so of several
    /// matching patterns the one declared last wins. With `expand`, owner
    /// tokens naming an alias are substituted by the alias's owner list.
    /// Expansion is single-level by design: an alias whose owners name
    /// another alias is returned as-is.
    pub fn match_path(&self, path: &str, expand: bool) -> Option<MatchResult> {
        let order = self.views.match_order.get_or_init(|| {
            let mut indices: Vec<usize> = self
                .lines
                .iter()
                .enumerate()
                .filter(|(_, line)| line.is_rule())
                .map(|(idx, _)| idx)
                .collect();
            indices.reverse();
            indices
        });

        for &idx in order {
            let Line::Rule {
                pattern,
                owners,
                project,
            } = &self.lines[idx]
            else {
                continue;
            };
            if self.pattern_matches(pattern, path) {
                let owners = if expand {
                    self.expand_owners(owners)
                } else {
                    owners.clone()
                };
                return Some(MatchResult {
                    pattern: pattern.clone(),
                    owners,
                    project: project.clone(),
                });
            }
        }
        None
    }

    /// Evaluates `pattern` against `path`, compiling and memoizing the
    /// matcher on first use.
    fn pattern_matches(&self, pattern: &str, path: &str) -> bool {
        let mut matchers = self.views.matchers.borrow_mut();
        let compiled = matchers
            .entry(pattern.to_string())
            .or_insert_with(|| Pattern::new(pattern));
        compiled.as_ref().is_some_and(|p| p.matches(path))
    }

    fn expand_owners(&self, owners: &[String]) -> Vec<String> {
        let aliases = self.aliases();
        let mut expanded = Vec::with_capacity(owners.len());
        for owner in owners {
            match owner.strip_prefix('@').and_then(|name| aliases.get(name)) {
                Some(alias_owners) => expanded.extend(alias_owners.iter().cloned()),
                None => expanded.push(owner.clone()),
            }
        }
        expanded
    }

    /// Records paths as known-unowned. Idempotent. No matching validation
    /// is performed; callers confirm via [`Document::match_path`] first.
    pub fn add_unowned<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            self.unowned.insert(path.into());
        }
    }

    /// Removes paths from the known-unowned set, silently ignoring absent
    /// entries.
    pub fn remove_unowned<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.unowned.remove(path.as_ref());
        }
    }

    /// True if `path` is recorded as known-unowned.
    pub fn is_unowned(&self, path: &str) -> bool {
        self.unowned.contains(path)
    }

    /// Empties the known-unowned set.
    pub fn clear_unowned(&mut self) {
        self.unowned.clear();
    }

    /// The known-unowned paths in sorted order.
    pub fn unowned(&self) -> impl Iterator<Item = &str> {
        self.unowned.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{ParserConfig, parse_str, parse_str_with_config};

    #[test]
    fn empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert!(doc.owners().is_empty());
        assert!(doc.patterns().is_empty());
        assert!(doc.match_path("anything", false).is_none());
    }

    #[test]
    fn owners_are_sorted_and_deduplicated() {
        let doc = parse_str("/b @zoe @abe\n/a @abe\n").unwrap();
        assert_eq!(doc.owners(), ["@abe", "@zoe"]);
    }

    #[test]
    fn owners_include_alias_lines() {
        let config = ParserConfig::new().with_aliases(true);
        let doc = parse_str_with_config("@infra zoe abe\n/src @infra\n", &config).unwrap();
        assert_eq!(doc.owners(), ["@infra", "abe", "zoe"]);
    }

    #[test]
    fn owners_of_pattern() {
        let doc = parse_str("/a @x\n/b @y\n/a @z\n").unwrap();
        assert_eq!(doc.owners_of("/a"), ["@x", "@z"]);
        assert!(doc.owners_of("/missing").is_empty());
    }

    #[test]
    fn patterns_are_sorted_and_deduplicated() {
        let doc = parse_str("/b @x\n/a @y\n/b @z\n").unwrap();
        assert_eq!(doc.patterns(), ["/a", "/b"]);
    }

    #[test]
    fn patterns_of_owner() {
        let doc = parse_str("/a @x @y\n/b @y\n/c @z\n").unwrap();
        assert_eq!(doc.patterns_of("@y"), ["/a", "/b"]);
        assert!(doc.patterns_of("@nobody").is_empty());
    }

    #[test]
    fn projects_are_sorted_and_deduplicated() {
        let input = "# Project: Zeta\n/a @x\n# Project: Alpha\n/b @y\n/c @z\n";
        let doc = parse_str(input).unwrap();
        assert_eq!(doc.projects(), ["Alpha", "Zeta"]);
    }

    #[test]
    fn aliases_reflect_lines() {
        let config = ParserConfig::new().with_aliases(true);
        let doc = parse_str_with_config("@infra alice bob\n@docs carol\n", &config).unwrap();
        let aliases = doc.aliases();
        assert_eq!(aliases["infra"], vec!["alice", "bob"]);
        assert_eq!(aliases["docs"], vec!["carol"]);
    }

    #[test]
    fn later_alias_declaration_wins() {
        let config = ParserConfig::new().with_aliases(true);
        let doc = parse_str_with_config("@infra alice\n@infra bob\n", &config).unwrap();
        assert_eq!(doc.aliases()["infra"], vec!["bob"]);
    }

    #[test]
    fn last_declared_matching_rule_wins() {
        let input = "# Project: Core\n/src/** @alice\n/src/gen/** @bob\n";
        let doc = parse_str(input).unwrap();

        let hit = doc.match_path("/src/gen/x.go", false).unwrap();
        assert_eq!(hit.pattern, "/src/gen/**");
        assert_eq!(hit.owners, ["@bob"]);
        assert_eq!(hit.project.as_deref(), Some("Core"));

        // A path only the earlier rule covers still resolves.
        let hit = doc.match_path("src/lib.rs", false).unwrap();
        assert_eq!(hit.pattern, "/src/**");
        assert_eq!(hit.owners, ["@alice"]);
    }

    #[test]
    fn match_returns_none_when_nothing_matches() {
        let doc = parse_str("/src/** @alice\n").unwrap();
        assert!(doc.match_path("docs/guide.md", false).is_none());
    }

    #[test]
    fn match_result_is_detached_from_the_document() {
        let mut doc = parse_str("*.md @docs\n").unwrap();
        let hit = doc.match_path("README.md", false).unwrap();
        doc.update_owners("*.md", ["@newdocs"]).unwrap();
        assert_eq!(hit.owners, ["@docs"]);
    }

    #[test]
    fn alias_expansion_is_opt_in() {
        let config = ParserConfig::new().with_aliases(true);
        let doc =
            parse_str_with_config("@infra alice bob\nsrc/ @infra @carol\n", &config).unwrap();

        let plain = doc.match_path("src/main.rs", false).unwrap();
        assert_eq!(plain.owners, ["@infra", "@carol"]);

        let expanded = doc.match_path("src/main.rs", true).unwrap();
        assert_eq!(expanded.owners, ["alice", "bob", "@carol"]);
    }

    #[test]
    fn alias_expansion_is_not_recursive() {
        let config = ParserConfig::new().with_aliases(true);
        let input = "@inner alice\n@outer @inner bob\nsrc/ @outer\n";
        let doc = parse_str_with_config(input, &config).unwrap();

        let expanded = doc.match_path("src/main.rs", true).unwrap();
        // One level only: the nested alias token is left as-is.
        assert_eq!(expanded.owners, ["@inner", "bob"]);
    }

    #[test]
    fn invalid_pattern_never_matches_but_later_rules_still_apply() {
        let doc = parse_str("src/[ @broken\n*.rs @dev\n").unwrap();
        let hit = doc.match_path("src/lib.rs", false).unwrap();
        assert_eq!(hit.owners, ["@dev"]);
        // Only the uncompilable rule covers .txt files, so nothing matches.
        assert!(doc.match_path("src/notes.txt", false).is_none());
    }

    #[test]
    fn unowned_set_laws() {
        let mut doc = Document::new();

        doc.add_unowned(["b", "a"]);
        assert!(doc.is_unowned("a"));
        assert!(doc.is_unowned("b"));

        // Idempotent insert keeps one entry, iteration is sorted.
        doc.add_unowned(["a"]);
        assert_eq!(doc.unowned().collect::<Vec<_>>(), ["a", "b"]);

        doc.remove_unowned(["a", "never-added"]);
        assert!(!doc.is_unowned("a"));

        doc.clear_unowned();
        assert_eq!(doc.unowned().count(), 0);
    }

    #[test]
    fn views_rebuild_after_mutation() {
        let mut doc = parse_str("/a @old\n").unwrap();
        assert_eq!(doc.owners(), ["@old"]);
        assert_eq!(doc.match_path("a", false).unwrap().owners, ["@old"]);

        doc.update_owners("/a", ["@new"]).unwrap();
        assert_eq!(doc.owners(), ["@new"]);
        assert_eq!(doc.match_path("a", false).unwrap().owners, ["@new"]);
    }

    #[test]
    fn documents_compare_by_content_not_cache_state() {
        let warm = parse_str("/a @x\n").unwrap();
        let _ = warm.owners();
        let _ = warm.match_path("a", false);

        let cold = parse_str("/a @x\n").unwrap();
        assert_eq!(warm, cold);
    }
}
