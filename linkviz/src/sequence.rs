//! Parsing of user-supplied value sequences (the "custom list" input).
//!
//! Accepted forms:
//! - a JSON array of integers, e.g. `[4, 8, 15]` (requires `feature = "json"` for full JSON;
//!   without it, a bracketed comma list is accepted)
//! - plain text separated by commas and/or whitespace, e.g. `4, 8 15`

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::SequenceError;

pub fn parse_sequence(input: &str) -> Result<Vec<i64>, SequenceError> {
    let trimmed = input.trim();
    let values = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        parse_json(trimmed)?
    } else {
        parse_plain(trimmed)?
    };
    if values.is_empty() {
        return Err(SequenceError::Empty);
    }
    Ok(values)
}

fn parse_plain(input: &str) -> Result<Vec<i64>, SequenceError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .enumerate()
        .map(|(index, token)| {
            token.parse::<i64>().map_err(|_| SequenceError::InvalidNumber {
                index,
                token: token.to_string(),
            })
        })
        .collect()
}

#[cfg(feature = "json")]
fn parse_json(input: &str) -> Result<Vec<i64>, SequenceError> {
    let value: serde_json::Value =
        serde_json::from_str(input).map_err(|e| SequenceError::Json(e.to_string()))?;
    let serde_json::Value::Array(items) = value else {
        return Err(SequenceError::NotAnArray);
    };
    items
        .iter()
        .enumerate()
        .map(|(index, v)| {
            v.as_i64().ok_or_else(|| SequenceError::InvalidNumber {
                index,
                token: v.to_string(),
            })
        })
        .collect()
}

#[cfg(not(feature = "json"))]
fn parse_json(input: &str) -> Result<Vec<i64>, SequenceError> {
    let Some(inner) = input
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return Err(SequenceError::Json("unbalanced brackets".to_string()));
    };
    parse_plain(inner)
}
