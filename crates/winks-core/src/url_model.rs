//! Link URL handling.
//!
//! Fills in a missing scheme on user input and derives the favicon location
//! shown next to a link.

/// Favicon service used by the link cards.
const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// Prefixes `https://` unless the input already has an `http://` or
/// `https://` scheme (case-insensitive).
///
/// # Examples
///
/// - `normalize_link_url("stripe.com")` → `"https://stripe.com"`
/// - `normalize_link_url("HTTP://example.com")` → unchanged
pub fn normalize_link_url(input: &str) -> String {
    let trimmed = input.trim();
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn has_http_scheme(s: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        s.len() >= scheme.len()
            && s.is_char_boundary(scheme.len())
            && s[..scheme.len()].eq_ignore_ascii_case(scheme)
    })
}

/// Favicon URL for a link, or `None` when the URL does not parse or has no host.
pub fn favicon_url(link_url: &str) -> Option<String> {
    let parsed = url::Url::parse(link_url).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{FAVICON_SERVICE}?domain={host}&sz=64"))
}
