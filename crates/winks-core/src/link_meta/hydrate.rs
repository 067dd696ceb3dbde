//! Stored row → in-memory link.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::codec::{decode_link_meta, is_encoded};
use super::normalize::parse_tags;
use super::{DEFAULT_CLASSIFICATION, DEFAULT_TAG};

/// Link identifier (row id in every backend).
pub type LinkId = i64;

/// Row as persisted: the `category` column holds either an encoded
/// envelope or legacy text; `tags` only exists on legacy rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: LinkId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
}

/// Hydrated link: always at least one tag and a non-empty classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub id: LinkId,
    pub title: String,
    pub url: String,
    pub classification: String,
    pub tags: Vec<String>,
}

impl Link {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Builds the in-memory link from a stored row. Total: legacy, missing, and
/// malformed metadata all degrade to defaults.
///
/// Tag precedence: decoded envelope tags, then the legacy source (the `tags`
/// column if present, else the `category` text when it is not an envelope),
/// then the default tag.
pub fn hydrate_link(record: &LinkRecord) -> Link {
    let raw = record.category.as_deref();
    let metadata = decode_link_meta(raw);

    let legacy_tags = match (&record.tags, raw) {
        (Some(tags), _) => parse_tags(tags),
        (None, Some(text)) if !is_encoded(text) => parse_tags(&Value::String(text.to_string())),
        _ => Vec::new(),
    };

    let mut tags = metadata.as_ref().map(|m| m.tags()).unwrap_or_default();
    if tags.is_empty() {
        tags = legacy_tags;
    }
    if tags.is_empty() {
        tags.push(DEFAULT_TAG.to_string());
    }

    let classification = metadata
        .as_ref()
        .and_then(|m| m.classification())
        .unwrap_or_else(|| DEFAULT_CLASSIFICATION.to_string());

    Link {
        id: record.id,
        title: record.title.clone(),
        url: record.url.clone(),
        classification,
        tags,
    }
}
