//! Output formatting for the CLI.
//!
//! Human-readable and JSON renderings of match results, derived views, and
//! mutation counts.

use codeowners_file_core::MatchResult;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Writer-backed output formatter.
pub struct Output<W: Write> {
    writer: W,
    json: bool,
    use_colors: bool,
}

#[derive(Debug, Serialize)]
struct CountOutput<'a> {
    action: &'a str,
    count: usize,
}

impl<W: Write> Output<W> {
    /// Creates a new output formatter.
    pub fn new(writer: W, json: bool, use_colors: bool) -> Self {
        Self {
            writer,
            json,
            use_colors,
        }
    }

    /// Writes a match result, or a "not owned" marker when there is none.
    pub fn match_result(&mut self, result: Option<&MatchResult>) -> std::io::Result<()> {
        if self.json {
            return self.write_json(&result);
        }

        match result {
            Some(hit) => {
                if self.use_colors {
                    write!(self.writer, "{}", hit.pattern.cyan().bold())?;
                } else {
                    write!(self.writer, "{}", hit.pattern)?;
                }
                write!(self.writer, "  {}", hit.owners.join(" "))?;
                if let Some(project) = &hit.project {
                    if self.use_colors {
                        write!(self.writer, "  {}", format!("({project})").dimmed())?;
                    } else {
                        write!(self.writer, "  ({project})")?;
                    }
                }
                writeln!(self.writer)
            }
            None => writeln!(self.writer, "not owned"),
        }
    }

    /// Writes a list view, one item per line (or a JSON array).
    pub fn list(&mut self, items: &[String]) -> std::io::Result<()> {
        if self.json {
            return self.write_json(&items);
        }
        for item in items {
            writeln!(self.writer, "{item}")?;
        }
        Ok(())
    }

    /// Writes the alias map as `name: owner owner` lines (or a JSON object).
    pub fn aliases(&mut self, aliases: &BTreeMap<String, Vec<String>>) -> std::io::Result<()> {
        if self.json {
            return self.write_json(aliases);
        }
        for (name, owners) in aliases {
            if self.use_colors {
                writeln!(self.writer, "{}: {}", name.cyan(), owners.join(" "))?;
            } else {
                writeln!(self.writer, "{name}: {}", owners.join(" "))?;
            }
        }
        Ok(())
    }

    /// Reports how many entries a mutation touched.
    pub fn count(&mut self, action: &str, count: usize) -> std::io::Result<()> {
        if self.json {
            return self.write_json(&CountOutput { action, count });
        }
        writeln!(self.writer, "{action}: {count}")
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{json}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(json: bool, f: F) -> String
    where
        F: FnOnce(&mut Output<&mut Vec<u8>>) -> std::io::Result<()>,
    {
        let mut buf = Vec::new();
        let mut out = Output::new(&mut buf, json, false);
        f(&mut out).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample() -> MatchResult {
        MatchResult {
            pattern: "/src/**".to_string(),
            owners: vec!["@alice".to_string(), "@bob".to_string()],
            project: Some("Core".to_string()),
        }
    }

    #[test]
    fn human_match_result() {
        let text = render(false, |out| out.match_result(Some(&sample())));
        assert_eq!(text, "/src/**  @alice @bob  (Core)\n");
    }

    #[test]
    fn human_no_match() {
        let text = render(false, |out| out.match_result(None));
        assert_eq!(text, "not owned\n");
    }

    #[test]
    fn json_match_result() {
        let text = render(true, |out| out.match_result(Some(&sample())));
        assert!(text.contains("\"pattern\": \"/src/**\""));
        assert!(text.contains("\"project\": \"Core\""));
    }

    #[test]
    fn json_no_match_is_null() {
        let text = render(true, |out| out.match_result(None));
        assert_eq!(text.trim(), "null");
    }

    #[test]
    fn list_one_item_per_line() {
        let items = vec!["@alice".to_string(), "@bob".to_string()];
        let text = render(false, |out| out.list(&items));
        assert_eq!(text, "@alice\n@bob\n");
    }

    #[test]
    fn aliases_render_name_and_owners() {
        let mut aliases = BTreeMap::new();
        aliases.insert(
            "infra".to_string(),
            vec!["alice".to_string(), "bob".to_string()],
        );
        let text = render(false, |out| out.aliases(&aliases));
        assert_eq!(text, "infra: alice bob\n");
    }

    #[test]
    fn count_reports_action() {
        let text = render(false, |out| out.count("updated", 2));
        assert_eq!(text, "updated: 2\n");
    }
}
