//! Field decoder for multi-valued list cells
//!
//! Source cells carry lists as Python-style literals: `['Valve', 'Hidden Path']`.
//! Strings may be single- or double-quoted (the latter when the name holds an
//! apostrophe, e.g. `["Assassin's Guild"]`). A cell that is already a JSON
//! array of strings is accepted as-is.
//!
//! Null, absent or blank cells decode to an empty list. Anything that does not
//! decode is reported as a [`DecodeError`]; callers treat that as an empty
//! list and keep the record.

use serde_json::Value;
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// Why a list cell could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected '[' at start of list")]
    MissingOpenBracket,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unexpected character '{0}' in list")]
    UnexpectedChar(char),

    #[error("unexpected end of list")]
    UnexpectedEnd,

    #[error("trailing content after list")]
    TrailingContent,

    #[error("list element is not a string")]
    NonStringElement,

    #[error("cell is not a list")]
    NotAList,
}

/// Decode a list cell, reporting malformed input.
pub fn try_decode_list(cell: &Value) -> Result<Vec<String>, DecodeError> {
    match cell {
        Value::Null => Ok(Vec::new()),
        Value::String(text) => parse_list_literal(text),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(DecodeError::NonStringElement),
            })
            .collect(),
        _ => Err(DecodeError::NotAList),
    }
}

/// Parse `[ 'a', "b", ... ]` into its string elements, in order.
fn parse_list_literal(text: &str) -> Result<Vec<String>, DecodeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut chars = trimmed.chars().peekable();
    if chars.next() != Some('[') {
        return Err(DecodeError::MissingOpenBracket);
    }

    let mut items = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.next() {
            Some(']') => break,
            Some(quote @ ('\'' | '"')) => {
                items.push(parse_string(&mut chars, quote)?);
                skip_whitespace(&mut chars);
                match chars.next() {
                    Some(',') => continue,
                    Some(']') => break,
                    Some(c) => return Err(DecodeError::UnexpectedChar(c)),
                    None => return Err(DecodeError::UnexpectedEnd),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '-' => return Err(DecodeError::NonStringElement),
            Some(c) => return Err(DecodeError::UnexpectedChar(c)),
            None => return Err(DecodeError::UnexpectedEnd),
        }
    }

    if chars.next().is_some() {
        return Err(DecodeError::TrailingContent);
    }
    Ok(items)
}

/// Read a string body up to the closing `quote`. The opening quote is consumed.
fn parse_string(chars: &mut Peekable<Chars<'_>>, quote: char) -> Result<String, DecodeError> {
    let mut out = String::new();
    loop {
        match chars.next() {
            Some(c) if c == quote => return Ok(out),
            Some('\\') => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(c @ ('\\' | '\'' | '"')) => out.push(c),
                Some(c) => {
                    out.push('\\');
                    out.push(c);
                }
                None => return Err(DecodeError::UnterminatedString),
            },
            Some(c) => out.push(c),
            None => return Err(DecodeError::UnterminatedString),
        }
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}
