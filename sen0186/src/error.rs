//! Problems found while decoding a sentence

use serde::Serialize;
use thiserror::Error;

use crate::layout::{ExtractError, Field};

/// A structural or field-level defect in a sentence.
///
/// The parser never returns these directly from [`parse`](crate::parse);
/// they are collected in [`Reading::issues`](crate::Reading::issues).
/// [`parse_strict`](crate::parse_strict) surfaces the first one as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SentenceError {
    /// Line is too short to hold every field up to the `*` delimiter.
    #[error("sentence too short: {len} bytes, need at least {min}")]
    TooShort { len: usize, min: usize },

    /// A tag character is not where the layout puts it.
    #[error("expected tag '{tag}' at offset {offset}, found {seen}", seen = describe_found(.found))]
    MissingTag {
        tag: char,
        offset: usize,
        found: Option<char>,
    },

    /// The digits behind a tag could not be decoded.
    #[error("failed to decode {field}: {source}")]
    FieldDecode { field: Field, source: ExtractError },
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("'{}'", c.escape_default()),
        None => "end of line".to_string(),
    }
}

impl SentenceError {
    /// True for defects in the sentence shape rather than in one field's digits
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::TooShort { .. } | Self::MissingTag { .. })
    }
}
