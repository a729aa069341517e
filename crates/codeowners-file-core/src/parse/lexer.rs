//! Token parsers for CODEOWNERS lines.
//!
//! nom-based parsers for the individual tokens of the line grammar:
//! comments, project declarations, owner tokens, patterns, and alias lines.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while, take_while1},
    character::complete::{char, space0, space1},
    combinator::{recognize, rest},
    multi::separated_list1,
};

/// Parses a complete comment line (optional whitespace + `#` + content).
pub fn comment_line(input: &str) -> IResult<&str, &str> {
    (space0, char('#'), rest)
        .map(|(_, _, content)| content)
        .parse(input)
}

/// Checks if a line is blank (empty or only whitespace).
pub fn is_blank_line(input: &str) -> bool {
    input.trim().is_empty()
}

/// Recognizes a `Project:` declaration in a comment body.
///
/// The label is case-insensitive and may be surrounded by whitespace.
/// Returns the declared name with surrounding whitespace trimmed; an empty
/// name means "clear the current project scope". Returns `None` for
/// ordinary comments.
pub fn project_declaration(body: &str) -> Option<&str> {
    let result: IResult<&str, &str> = (space0, tag_no_case("project:"), rest)
        .map(|(_, _, name)| name)
        .parse(body);
    match result {
        Ok((_, name)) => Some(name.trim()),
        Err(_) => None,
    }
}

/// Parses one owner token: the quoted form `@"..."` or a bare run of
/// non-whitespace characters.
///
/// The raw source text is returned unchanged (quotes included) so that
/// serialization reproduces the token exactly.
pub fn owner_token(input: &str) -> IResult<&str, &str> {
    alt((
        recognize((tag("@\""), take_while(|c: char| c != '"'), char('"'))),
        take_while1(|c: char| !c.is_whitespace()),
    ))
    .parse(input)
}

/// Parses a whitespace-separated owner list, greedily left to right.
/// At least one token is required.
pub fn owner_list(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(space1, owner_token).parse(input)
}

/// Parses a pattern token: the shortest non-empty run of characters up to
/// an unescaped whitespace boundary.
///
/// A backslash escapes the following character, so `foo\ bar` is a single
/// token; the escape itself is preserved in the returned text. A trailing
/// lone backslash is kept literally.
pub fn pattern_token(input: &str) -> IResult<&str, &str> {
    let mut chars = input.char_indices();
    let mut end = 0;
    while let Some((idx, ch)) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some((next_idx, next_ch)) => end = next_idx + next_ch.len_utf8(),
                None => {
                    end = idx + 1;
                    break;
                }
            }
        } else if ch.is_whitespace() {
            break;
        } else {
            end = idx + ch.len_utf8();
        }
    }
    if end == 0 {
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TakeWhile1,
        )))
    } else {
        Ok((&input[end..], &input[..end]))
    }
}

/// Splits a rule line into its pattern and owner list.
pub fn rule_line(input: &str) -> IResult<&str, (&str, Vec<&str>)> {
    (space0, pattern_token, space1, owner_list)
        .map(|(_, pattern, _, owners)| (pattern, owners))
        .parse(input)
}

/// Splits an alias line into its name (without the leading `@`) and owner
/// list.
pub fn alias_line(input: &str) -> IResult<&str, (&str, Vec<&str>)> {
    (
        space0,
        char('@'),
        take_while1(|c: char| !c.is_whitespace()),
        space1,
        owner_list,
    )
        .map(|(_, _, name, _, owners)| (name, owners))
        .parse(input)
}
