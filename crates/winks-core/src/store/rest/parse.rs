//! Parse PostgREST response bodies.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::link_meta::LinkRecord;

/// Parse a JSON array of rows. Extra columns (e.g. `created_at`) are ignored.
pub(crate) fn parse_rows(body: &str) -> Result<Vec<LinkRecord>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).context("unexpected response from hosted store")
}

/// Human-readable error for a non-2xx response: the service's `message`
/// (plus `details` when present), else the raw body, else the status.
pub(crate) fn error_message(code: u32, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    match (field("message"), field("details")) {
        (Some(message), Some(details)) => format!("HTTP {code}: {message} ({details})"),
        (Some(message), None) => format!("HTTP {code}: {message}"),
        _ if !body.trim().is_empty() && parsed.is_none() => format!("HTTP {code}: {}", body.trim()),
        _ => format!("HTTP {code}"),
    }
}
