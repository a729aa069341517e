//! Line-by-line grammar pass over CODEOWNERS text.
//!
//! All source shapes (path, reader, line sequence, string) funnel into a
//! single pass. The first unrecognized line aborts the whole parse; no
//! partial document is ever returned.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use log::{debug, trace};

use super::lexer;
use crate::UNOWNED_MARKER;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::line::Line;

/// Configuration options for the parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserConfig {
    /// If true, lines of the form `@name owner...` are parsed as owner
    /// aliases instead of rules.
    pub aliases: bool,
}

impl ParserConfig {
    /// Creates a parser config with default settings (aliases off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether alias lines are recognized.
    pub fn with_aliases(mut self, value: bool) -> Self {
        self.aliases = value;
        self
    }
}

/// Parses a document from a string using the default configuration.
pub fn parse_str(input: &str) -> Result<Document> {
    parse_str_with_config(input, &ParserConfig::default())
}

/// Parses a document from a string.
pub fn parse_str_with_config(input: &str, config: &ParserConfig) -> Result<Document> {
    debug!(
        "parsing {} bytes (aliases={})",
        input.len(),
        config.aliases
    );
    parse_decoded_lines(input.lines(), config)
}

/// Parses a document from a sequence of already-split text lines using the
/// default configuration.
pub fn parse_lines<I, S>(lines: I) -> Result<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines_with_config(lines, &ParserConfig::default())
}

/// Parses a document from a sequence of already-split text lines.
pub fn parse_lines_with_config<I, S>(lines: I, config: &ParserConfig) -> Result<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_decoded_lines(lines, config)
}

/// Parses a document from a reader using the default configuration.
///
/// The reader is consumed to completion before parsing begins.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    parse_reader_with_config(reader, &ParserConfig::default())
}

/// Parses a document from a reader.
pub fn parse_reader_with_config<R: Read>(mut reader: R, config: &ParserConfig) -> Result<Document> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_str_with_config(&input, config)
}

/// Parses a document from a file path using the default configuration.
pub fn parse_path(path: impl AsRef<Path>) -> Result<Document> {
    parse_path_with_config(path, &ParserConfig::default())
}

/// Parses a document from a file path.
pub fn parse_path_with_config(path: impl AsRef<Path>, config: &ParserConfig) -> Result<Document> {
    let path = path.as_ref();
    debug!("parsing {}", path.display());
    let input = std::fs::read_to_string(path)?;
    parse_str_with_config(&input, config)
}

/// The single grammar pass shared by every entry point.
fn parse_decoded_lines<I, S>(lines: I, config: &ParserConfig) -> Result<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut doc_lines = Vec::new();
    let mut unowned = BTreeSet::new();
    let mut current_project: Option<String> = None;
    let mut in_unowned = false;

    for (idx, raw) in lines.into_iter().enumerate() {
        let line_num = idx + 1;
        let text = raw.as_ref();

        // The marker ends normal parsing; everything after it belongs to
        // the unowned section.
        if text == UNOWNED_MARKER {
            trace!("line {line_num}: unowned section marker");
            in_unowned = true;
            continue;
        }

        if in_unowned {
            if let Some(path) = text.strip_prefix("# ")
                && !path.is_empty()
            {
                unowned.insert(path.to_string());
            }
            continue;
        }

        if let Ok((_, body)) = lexer::comment_line(text) {
            let project = match lexer::project_declaration(body) {
                Some(name) if name.is_empty() => {
                    trace!("line {line_num}: project scope cleared");
                    current_project = None;
                    None
                }
                Some(name) => {
                    trace!("line {line_num}: project scope {name:?}");
                    current_project = Some(name.to_string());
                    current_project.clone()
                }
                None => None,
            };
            doc_lines.push(Line::Comment {
                text: body.to_string(),
                project,
            });
            continue;
        }

        if lexer::is_blank_line(text) {
            doc_lines.push(Line::Blank);
            continue;
        }

        if config.aliases
            && let Ok((_, (name, owners))) = lexer::alias_line(text)
        {
            doc_lines.push(Line::Alias {
                name: name.to_string(),
                owners: owners.iter().map(|s| s.to_string()).collect(),
            });
            continue;
        }

        match lexer::rule_line(text) {
            Ok((_, (pattern, owners))) => {
                doc_lines.push(Line::Rule {
                    pattern: pattern.to_string(),
                    owners: owners.iter().map(|s| s.to_string()).collect(),
                    project: current_project.clone(),
                });
            }
            Err(_) => {
                debug!("line {line_num}: unrecognized: {text:?}");
                return Err(Error::parse(line_num, text));
            }
        }
    }

    debug!(
        "parsed {} line(s), {} unowned path(s)",
        doc_lines.len(),
        unowned.len()
    );
    Ok(Document::from_parts(doc_lines, unowned))
}
