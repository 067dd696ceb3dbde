//! Tag and classification name normalization.
//!
//! One primitive, `normalize_name`, serves both tags and classifications.
//! Tag lists additionally accept delimited strings (ASCII or full-width comma).

use serde_json::Value;

/// Full-width comma used by CJK input methods.
const FULLWIDTH_COMMA: char = '\u{FF0C}';

/// Normalizes a tag or classification name.
///
/// - Trims surrounding whitespace
/// - Strips any leading run of `#` markers and the whitespace between them
///   (`"## 设计"` → `"设计"`)
///
/// An empty result means "discard this value".
pub fn normalize_name(value: &str) -> String {
    value
        .trim()
        .trim_start_matches(|c: char| c == '#' || c.is_whitespace())
        .trim_end()
        .to_string()
}

/// Tags follow the same rule as classification names.
pub fn normalize_tag(value: &str) -> String {
    normalize_name(value)
}

/// Display form of a tag (`#设计`).
pub fn format_tag(tag: &str) -> String {
    format!("#{tag}")
}

/// Normalizes, drops empties, and removes duplicates keeping first occurrence.
pub fn unique_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = normalize_tag(tag.as_ref());
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Same as [`unique_tags`]; kept separate so call sites read by meaning.
pub fn unique_classifications<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    unique_tags(items)
}

/// Parses a delimited tag string. Runs of `,` / `，` count as one separator.
pub fn parse_tag_str(raw: &str) -> Vec<String> {
    unique_tags(raw.split([',', FULLWIDTH_COMMA]))
}

/// Parses an ordered sequence of tag names.
pub fn parse_tag_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    unique_tags(names)
}

/// Parses tags from an untyped value (a stored row or decoded metadata).
///
/// Arrays yield their elements (numbers and booleans by their text form;
/// nulls and nested structures are dropped), strings are split as a
/// delimited list, and any other value yields no tags.
pub fn parse_tags(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => parse_tag_str(s),
        Value::Array(items) => unique_tags(items.iter().filter_map(scalar_text)),
        _ => Vec::new(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
