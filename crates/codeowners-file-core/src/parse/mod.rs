//! Parser for CODEOWNERS documents.
//!
//! Accepts a source in four shapes — a filesystem path, a reader, a
//! sequence of text lines, or a string — and runs a single line-by-line
//! grammar pass over the decoded text.
//!
//! # Example
//!
//! ```rust
//! use codeowners_file_core::parse::parse_str;
//!
//! let doc = parse_str("# Project: Core\n/src/**  @alice\n").unwrap();
//! assert_eq!(doc.patterns(), ["/src/**"]);
//! ```

mod lexer;
mod parser;

pub use parser::{
    ParserConfig, parse_lines, parse_lines_with_config, parse_path, parse_path_with_config,
    parse_reader, parse_reader_with_config, parse_str, parse_str_with_config,
};
