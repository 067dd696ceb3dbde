//! Metadata envelope stored in the single `category` text column.
//!
//! Structured rows hold `LINK_META_PREFIX` followed by a JSON object
//! `{"classification": "...", "tags": [...]}`. Anything else is legacy text.

use serde_json::{json, Value};

use super::normalize::{normalize_name, parse_tags, unique_tags};
use super::{DEFAULT_CLASSIFICATION, DEFAULT_TAG};

/// Marker that distinguishes an encoded envelope from legacy text.
pub const LINK_META_PREFIX: &str = "__WINKS_META__";

/// Structured metadata after a successful decode.
///
/// Fields are kept untyped: a corrupted or hand-edited row may carry the
/// wrong JSON type, and hydration degrades those to defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedMeta {
    pub classification: Option<Value>,
    pub tags: Option<Value>,
}

impl DecodedMeta {
    /// Normalized classification, or `None` when missing, mistyped, or empty.
    pub fn classification(&self) -> Option<String> {
        match &self.classification {
            Some(Value::String(s)) => Some(normalize_name(s)).filter(|c| !c.is_empty()),
            _ => None,
        }
    }

    /// Normalized unique tags; empty when missing or mistyped.
    pub fn tags(&self) -> Vec<String> {
        self.tags.as_ref().map(parse_tags).unwrap_or_default()
    }
}

/// Returns true if the stored value carries an encoded envelope.
pub fn is_encoded(raw: &str) -> bool {
    raw.starts_with(LINK_META_PREFIX)
}

/// Encodes a classification and tag list into the stored envelope.
///
/// Never fails. Empty input after normalization is replaced by the default
/// classification / default tag.
pub fn encode_link_meta<I, S>(classification: &str, tags: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let classification = Some(normalize_name(classification))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CLASSIFICATION.to_string());
    let mut tags = unique_tags(tags);
    if tags.is_empty() {
        tags.push(DEFAULT_TAG.to_string());
    }

    let body = json!({
        "classification": classification,
        "tags": tags,
    });
    format!("{LINK_META_PREFIX}{body}")
}

/// Decodes the stored envelope.
///
/// Returns `None` for legacy text (no prefix), a missing value, or a body that
/// is not valid JSON. A valid body that is not an object decodes to an empty
/// [`DecodedMeta`].
pub fn decode_link_meta(raw: Option<&str>) -> Option<DecodedMeta> {
    let body = raw?.strip_prefix(LINK_META_PREFIX)?;
    match serde_json::from_str::<Value>(body).ok()? {
        Value::Object(map) => Some(DecodedMeta {
            classification: map.get("classification").cloned(),
            tags: map.get("tags").cloned(),
        }),
        _ => Some(DecodedMeta::default()),
    }
}
