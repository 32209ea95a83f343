//! Strict `application/x-www-form-urlencoded` pair parsing.
//!
//! Query strings and form bodies share this parser. Unlike lossy decoders it
//! refuses broken percent escapes and escapes that decode to invalid UTF-8,
//! so a client never has a value it did not send validated on its behalf.

use std::borrow::Cow;
use thiserror::Error;

/// A query string or form payload that cannot be decoded faithfully.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum PairsError {
    /// `%` not followed by two hex digits.
    #[error("invalid percent escape at byte {offset}")]
    InvalidEscape { offset: usize },

    /// Percent escapes decode to bytes that are not UTF-8.
    #[error("percent escapes do not decode to UTF-8")]
    InvalidUtf8,
}

/// Splits `raw` into decoded `(key, value)` pairs in order.
///
/// Empty segments are skipped; a segment without `=` has an empty value.
pub(crate) fn parse_pairs(raw: &str) -> Result<Vec<(String, String)>, PairsError> {
    let mut pairs = Vec::new();
    let mut offset = 0;
    for segment in raw.split('&') {
        if !segment.is_empty() {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            let value_offset = offset + key.len() + 1;
            pairs.push((decode(key, offset)?, decode(value, value_offset)?));
        }
        offset += segment.len() + 1;
    }
    Ok(pairs)
}

fn decode(component: &str, offset: usize) -> Result<String, PairsError> {
    check_escapes(component, offset)?;
    let spaced: Cow<'_, str> = if component.contains('+') {
        Cow::Owned(component.replace('+', " "))
    } else {
        Cow::Borrowed(component)
    };
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .map_err(|_| PairsError::InvalidUtf8)
}

fn check_escapes(component: &str, offset: usize) -> Result<(), PairsError> {
    let bytes = component.as_bytes();
    for (i, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(PairsError::InvalidEscape { offset: offset + i });
        }
    }
    Ok(())
}
