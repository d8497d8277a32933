use std::collections::HashMap;
use thiserror::Error;

/// Decoding failure scoped to a single message. The session continues past
/// it; pairs decoded before the failure are kept for the output row.
#[derive(Error, Debug)]
#[error("no ':' separator in segment {segment:?}")]
pub struct ParseError {
    segment: String,
    partial: HashMap<String, String>,
}

impl ParseError {
    pub fn missing_separator(segment: &str, partial: HashMap<String, String>) -> Self {
        Self {
            segment: segment.to_string(),
            partial,
        }
    }

    /// Key-value pairs decoded before the malformed segment was hit.
    pub fn into_partial(self) -> HashMap<String, String> {
        self.partial
    }
}
