use crate::error::ParseError;
use std::collections::HashMap;

/// Tolerant tokenizer for the device's pseudo-JSON report format, e.g.
/// `{"voltage":230.1,"current":1.2,"pf":0.95}`.
///
/// One leading `{` and one trailing `}` are stripped if present, the body is
/// split on `,`, and each segment is split on its first `:`. Surrounding
/// double quotes are stripped from keys and values. The split is naive; a
/// key or value containing a literal comma corrupts parsing.
///
/// A segment without a `:` stops tokenizing and yields a `ParseError`
/// carrying the pairs decoded so far, so the caller can still produce a
/// best-effort row.
pub fn parse(raw: &str) -> Result<HashMap<String, String>, ParseError> {
    let body = raw.strip_prefix('{').unwrap_or(raw);
    let body = body.strip_suffix('}').unwrap_or(body);

    let mut fields = HashMap::new();
    for segment in body.split(',') {
        match segment.split_once(':') {
            Some((key, value)) => {
                fields.insert(
                    key.trim_matches('"').to_string(),
                    value.trim_matches('"').to_string(),
                );
            }
            None => return Err(ParseError::missing_separator(segment, fields)),
        }
    }

    Ok(fields)
}
