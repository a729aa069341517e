//! In-place mutation operations on a document.
//!
//! Every operation validates its arguments up front (usage errors fire
//! before any change is made), mutates the line sequence in place, and
//! drops the memoized views before returning. Operations that find nothing
//! to change return `Ok(0)`; a missing pattern, project, or owner is not an
//! error.

use log::debug;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::line::Line;

impl Document {
    /// Replaces the owner list of every rule whose pattern equals
    /// `pattern`. Returns the number of rules updated.
    pub fn update_owners<I, S>(&mut self, pattern: &str, new_owners: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if pattern.is_empty() {
            return Err(Error::usage("update_owners: pattern must not be empty"));
        }
        let new_owners = collect_owners("update_owners", new_owners)?;

        let mut updated = 0;
        for line in &mut self.lines {
            if let Line::Rule {
                pattern: p, owners, ..
            } = line
                && p == pattern
            {
                *owners = new_owners.clone();
                updated += 1;
            }
        }
        self.invalidate_views();
        debug!("update_owners: {updated} rule(s) for pattern {pattern:?}");
        Ok(updated)
    }

    /// Replaces the owner list of every rule associated with `project`.
    /// Returns the number of rules updated.
    pub fn update_owners_by_project<I, S>(&mut self, project: &str, new_owners: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if project.is_empty() {
            return Err(Error::usage(
                "update_owners_by_project: project must not be empty",
            ));
        }
        let new_owners = collect_owners("update_owners_by_project", new_owners)?;

        let mut updated = 0;
        for line in &mut self.lines {
            if let Line::Rule {
                project: Some(p),
                owners,
                ..
            } = line
                && p == project
            {
                *owners = new_owners.clone();
                updated += 1;
            }
        }
        self.invalidate_views();
        debug!("update_owners_by_project: {updated} rule(s) for project {project:?}");
        Ok(updated)
    }

    /// Replaces every occurrence of owner `old` with `new` across all
    /// lines carrying an owner list (rules and aliases). Returns the total
    /// number of replacements.
    pub fn rename_owner(&mut self, old: &str, new: &str) -> Result<usize> {
        if old.is_empty() || new.is_empty() {
            return Err(Error::usage(
                "rename_owner: both owner names must be non-empty",
            ));
        }

        let mut replaced = 0;
        for line in &mut self.lines {
            if let Some(owners) = line.owners_mut() {
                for owner in owners.iter_mut() {
                    if owner == old {
                        *owner = new.to_string();
                        replaced += 1;
                    }
                }
            }
        }
        self.invalidate_views();
        debug!("rename_owner: {replaced} occurrence(s) of {old:?}");
        Ok(replaced)
    }

    /// Points every line associated with project `old` at `new`. Project
    /// comments are rewritten to declare the new name, so serialized output
    /// re-parses with the renamed scope. Returns the number of lines
    /// changed.
    pub fn rename_project(&mut self, old: &str, new: &str) -> Result<usize> {
        if old.is_empty() || new.is_empty() {
            return Err(Error::usage(
                "rename_project: both project names must be non-empty",
            ));
        }

        let mut renamed = 0;
        for line in &mut self.lines {
            match line {
                Line::Comment {
                    text,
                    project: Some(p),
                } if p == old => {
                    *p = new.to_string();
                    *text = format!(" Project: {new}");
                    renamed += 1;
                }
                Line::Rule {
                    project: Some(p), ..
                } if p == old => {
                    *p = new.to_string();
                    renamed += 1;
                }
                _ => {}
            }
        }
        self.invalidate_views();
        debug!("rename_project: {renamed} line(s) from {old:?} to {new:?}");
        Ok(renamed)
    }

    /// Appends a line to the document. Rule and alias lines must carry a
    /// non-empty pattern/name and at least one owner.
    pub fn append(&mut self, line: Line) -> Result<()> {
        validate_line(&line)?;
        self.lines.push(line);
        self.invalidate_views();
        Ok(())
    }

    /// Prepends a line to the document.
    pub fn prepend(&mut self, line: Line) -> Result<()> {
        validate_line(&line)?;
        self.lines.insert(0, line);
        self.invalidate_views();
        Ok(())
    }
}

fn collect_owners<I, S>(operation: &str, owners: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let owners: Vec<String> = owners.into_iter().map(Into::into).collect();
    if owners.is_empty() || owners.iter().any(String::is_empty) {
        return Err(Error::usage(format!(
            "{operation}: at least one non-empty owner is required"
        )));
    }
    Ok(owners)
}

fn validate_line(line: &Line) -> Result<()> {
    match line {
        Line::Rule {
            pattern, owners, ..
        } => {
            if pattern.is_empty() {
                Err(Error::usage("append: rule pattern must not be empty"))
            } else if owners.is_empty() {
                Err(Error::usage("append: rule must have at least one owner"))
            } else {
                Ok(())
            }
        }
        Line::Alias { name, owners } => {
            if name.is_empty() {
                Err(Error::usage("append: alias name must not be empty"))
            } else if owners.is_empty() {
                Err(Error::usage("append: alias must have at least one owner"))
            } else {
                Ok(())
            }
        }
        Line::Blank | Line::Comment { .. } => Ok(()),
    }
}
