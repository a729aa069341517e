//! Canonical text rendering and file output.
//!
//! Serialization regenerates canonical text from the in-memory model:
//! document lines in order, then the unowned extension block. It never
//! mutates the document.

use std::fmt::{self, Display};
use std::io::Write;
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::UNOWNED_MARKER;
use crate::document::Document;
use crate::error::{Error, Result};

impl Document {
    /// Renders the document to its canonical lines (without trailing
    /// newlines), including the unowned section when the set is non-empty.
    ///
    /// The unowned block is separated from the document body by exactly one
    /// blank line; one is inserted only if the last rendered line is
    /// non-blank. Unowned paths are emitted in sorted order.
    pub fn to_lines(&self) -> Vec<String> {
        let mut rendered: Vec<String> = self.lines.iter().map(ToString::to_string).collect();

        if !self.unowned.is_empty() {
            if rendered.last().is_some_and(|last| !last.is_empty()) {
                rendered.push(String::new());
            }
            rendered.push(UNOWNED_MARKER.to_string());
            for path in &self.unowned {
                rendered.push(format!("# {path}"));
            }
        }

        rendered
    }

    /// Writes the rendered document to `writer`, one newline-terminated
    /// line at a time.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for line in self.to_lines() {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }

    /// Writes the document to `path` atomically.
    ///
    /// The full output is rendered and flushed to a temporary file in the
    /// destination directory, fsynced, and only then renamed into place, so
    /// a crash mid-write never leaves a truncated file.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        self.write_to(&mut tmp)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| Error::from(e.error))?;

        debug!("wrote {}", path.display());
        Ok(())
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Line;
    use crate::parse::{ParserConfig, parse_path, parse_str, parse_str_with_config};

    #[test]
    fn renders_lines_in_order() {
        let input = "# header\n\n/src/**  @alice\ndocs/  @bob @carol\n";
        let doc = parse_str(input).unwrap();
        assert_eq!(
            doc.to_lines(),
            ["# header", "", "/src/**  @alice", "docs/  @bob @carol"]
        );
    }

    #[test]
    fn empty_document_renders_nothing() {
        let doc = Document::new();
        assert!(doc.to_lines().is_empty());
        assert_eq!(doc.to_string(), "");
    }

    #[test]
    fn unowned_block_is_appended_after_content() {
        let mut doc = parse_str("*.md  @docs\n").unwrap();
        doc.add_unowned(["README.md"]);
        assert_eq!(
            doc.to_lines(),
            [
                "*.md  @docs",
                "",
                "### UNOWNED (File::Codeowners)",
                "# README.md"
            ]
        );
    }

    #[test]
    fn unowned_block_separator_is_not_doubled() {
        let mut doc = parse_str("*.md  @docs\n\n").unwrap();
        doc.add_unowned(["README.md"]);
        assert_eq!(
            doc.to_lines(),
            [
                "*.md  @docs",
                "",
                "### UNOWNED (File::Codeowners)",
                "# README.md"
            ]
        );
    }

    #[test]
    fn unowned_paths_are_sorted() {
        let mut doc = Document::new();
        doc.add_unowned(["zeta.c", "alpha.c", "midway.c"]);
        assert_eq!(
            doc.to_lines(),
            [
                "### UNOWNED (File::Codeowners)",
                "# alpha.c",
                "# midway.c",
                "# zeta.c"
            ]
        );
    }

    #[test]
    fn alias_lines_render_canonically() {
        let config = ParserConfig::new().with_aliases(true);
        let doc = parse_str_with_config("@infra alice bob\n", &config).unwrap();
        assert_eq!(doc.to_lines(), ["@infra  alice bob"]);
    }

    #[test]
    fn display_terminates_every_line() {
        let doc = parse_str("# a\n/b  @c\n").unwrap();
        assert_eq!(doc.to_string(), "# a\n/b  @c\n");
    }

    #[test]
    fn write_to_matches_display() {
        let doc = parse_str("# a\n/b  @c\n").unwrap();
        let mut buf = Vec::new();
        doc.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), doc.to_string());
    }

    #[test]
    fn round_trip_is_idempotent() {
        let input = "# Project: Core\n\n/src/**  @alice @bob\ndocs/  @\"Docs Team\"\n";
        let mut doc = parse_str(input).unwrap();
        doc.add_unowned(["orphan.c"]);

        let first = doc.to_string();
        let second = parse_str(&first).unwrap().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn round_trip_preserves_unowned_set() {
        let mut doc = parse_str("*.md  @docs\n").unwrap();
        doc.add_unowned(["b.c", "a.c"]);

        let reparsed = parse_str(&doc.to_string()).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn save_to_path_writes_the_rendered_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CODEOWNERS");

        let doc = parse_str("/src/**  @alice\n").unwrap();
        doc.save_to_path(&path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "/src/**  @alice\n"
        );
    }

    #[test]
    fn save_to_path_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CODEOWNERS");
        std::fs::write(&path, "stale content\n").unwrap();

        let doc = parse_str("/src/**  @alice\n").unwrap();
        doc.save_to_path(&path).unwrap();

        let reparsed = parse_path(&path).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn save_to_path_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CODEOWNERS");

        let mut doc = Document::new();
        doc.append(Line::rule("*.rs", ["@dev"], None)).unwrap();
        doc.save_to_path(&path).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["CODEOWNERS"]);
    }
}
