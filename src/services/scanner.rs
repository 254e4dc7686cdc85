//! Lenient substring scanning of small JSON documents.
//!
//! These helpers locate values by anchoring on quoted key names instead of
//! parsing. They have no notion of nesting or string literals: a key that
//! appears earlier in an unrelated object or inside a string value will be
//! matched first, and braces inside string values confuse the record
//! splitter. [`crate::services::catalog`] prefers a real JSON decode and only
//! falls back to these when the document does not parse.
//!
//! Nothing here fails: missing anchors yield `None` or an empty vector.

/// Return the first quoted string value following `"key"` and its colon.
///
/// The content is returned verbatim; escape sequences are not decoded.
///
/// ```ignore
/// let json = r#"{"name":"cybertruck","version":"1.0"}"#;
/// assert_eq!(extract_field(json, "version"), Some("1.0"));
/// ```
pub fn extract_field<'a>(json: &'a str, key: &str) -> Option<&'a str> {
    let after_colon = value_start(json, key)?;
    let rest = &json[after_colon..];

    let open = rest.find('"')?;
    let value = &rest[open + 1..];
    let close = value.find('"')?;
    Some(&value[..close])
}

/// Like [`extract_field`], but also accepts a bare numeric token.
///
/// `"fileSize": 12.5` and `"fileSize": "12.5"` both yield `"12.5"`.
pub fn extract_number<'a>(json: &'a str, key: &str) -> Option<&'a str> {
    let after_colon = value_start(json, key)?;
    let rest = json[after_colon..].trim_start();

    if rest.starts_with('"') {
        return extract_field(json, key);
    }

    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .unwrap_or(rest.len());
    let token = &rest[..end];
    (!token.is_empty()).then_some(token)
}

/// Byte offset just past the colon that follows the first `"key"`.
fn value_start(json: &str, key: &str) -> Option<usize> {
    let needle = format!("\"{}\"", key);
    let key_index = json.find(&needle)?;
    let colon = json[key_index..].find(':')?;
    Some(key_index + colon + 1)
}

/// Split the array under `"array_key"` into top-level object record texts.
///
/// The array is taken to run from the first `[` after the key to the last `]`
/// in the whole document. Within that span, each `{ ... }` at brace depth zero
/// becomes one record, nested objects included.
///
/// ```ignore
/// let json = r#"{"models":[{"a":1},{"b":{"c":2}}]}"#;
/// assert_eq!(extract_records(json, "models"), vec![r#"{"a":1}"#, r#"{"b":{"c":2}}"#]);
/// ```
pub fn extract_records<'a>(json: &'a str, array_key: &str) -> Vec<&'a str> {
    let mut records = Vec::new();

    let needle = format!("\"{}\"", array_key);
    let Some(key_index) = json.find(&needle) else {
        return records;
    };
    let Some(open) = json[key_index..].find('[').map(|i| key_index + i) else {
        return records;
    };
    let Some(close) = json.rfind(']') else {
        return records;
    };
    if close <= open {
        return records;
    }

    let body = &json[open + 1..close];
    let mut depth: usize = 0;
    let mut start: Option<usize> = None;

    for (i, byte) in body.bytes().enumerate() {
        match byte {
            b'{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            b'}' => {
                // stray closing brace outside any record
                if depth == 0 {
                    continue;
                }
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start.take() {
                        records.push(&body[s..=i]);
                    }
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        tracing::debug!("Unterminated record at end of '{}' array", array_key);
    }

    records
}
