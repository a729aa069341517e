//! The typed representation of a single CODEOWNERS line.

use std::fmt::{self, Display};

/// One logical entry in document order.
///
/// Line order is the sole source of truth for the file's shape; nothing
/// reorders entries except the derived views built for querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// An empty (or whitespace-only) line, preserved for round-tripping.
    Blank,
    /// A comment line. `text` is everything after the leading `#`.
    /// `project` is set when the comment declares a `Project:` scope.
    Comment {
        text: String,
        project: Option<String>,
    },
    /// A pattern rule. `project` is the scope declared by the nearest
    /// preceding project comment, resolved once at parse time.
    Rule {
        pattern: String,
        owners: Vec<String>,
        project: Option<String>,
    },
    /// A named, reusable owner list. Only produced when alias parsing is
    /// enabled.
    Alias { name: String, owners: Vec<String> },
}

impl Line {
    /// Creates a comment line with no project association.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment {
            text: text.into(),
            project: None,
        }
    }

    /// Creates a rule line.
    pub fn rule<S: Into<String>>(
        pattern: impl Into<String>,
        owners: impl IntoIterator<Item = S>,
        project: Option<String>,
    ) -> Self {
        Self::Rule {
            pattern: pattern.into(),
            owners: owners.into_iter().map(Into::into).collect(),
            project,
        }
    }

    /// Creates an alias line. `name` is stored without the leading `@`.
    pub fn alias<S: Into<String>>(
        name: impl Into<String>,
        owners: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::Alias {
            name: name.into(),
            owners: owners.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if this is a blank line.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Returns true if this is a comment line.
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment { .. })
    }

    /// Returns true if this is a rule line.
    pub fn is_rule(&self) -> bool {
        matches!(self, Self::Rule { .. })
    }

    /// Returns true if this is an alias line.
    pub fn is_alias(&self) -> bool {
        matches!(self, Self::Alias { .. })
    }

    /// The rule pattern, if this is a rule line.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Rule { pattern, .. } => Some(pattern),
            _ => None,
        }
    }

    /// The owner list, for lines that carry one (rules and aliases).
    pub fn owners(&self) -> Option<&[String]> {
        match self {
            Self::Rule { owners, .. } | Self::Alias { owners, .. } => Some(owners),
            _ => None,
        }
    }

    pub(crate) fn owners_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Self::Rule { owners, .. } | Self::Alias { owners, .. } => Some(owners),
            _ => None,
        }
    }

    /// The associated project name, for comments that declare one and
    /// rules that inherit one.
    pub fn project(&self) -> Option<&str> {
        match self {
            Self::Comment { project, .. } | Self::Rule { project, .. } => project.as_deref(),
            _ => None,
        }
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Comment { text, .. } => write!(f, "#{text}"),
            Self::Rule {
                pattern, owners, ..
            } => write!(f, "{pattern}  {}", owners.join(" ")),
            Self::Alias { name, owners } => write!(f, "@{name}  {}", owners.join(" ")),
        }
    }
}
