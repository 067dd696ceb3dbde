//! Link metadata codec and normalizer.
//!
//! Translates between the stored row shape (one opaque `category` text
//! column) and the hydrated [`Link`] the rest of the crate works with.
//! Everything here is pure: no I/O, no logging, no errors.

mod codec;
mod hydrate;
mod normalize;

pub use codec::{decode_link_meta, encode_link_meta, is_encoded, DecodedMeta, LINK_META_PREFIX};
pub use hydrate::{hydrate_link, Link, LinkId, LinkRecord};
pub use normalize::{
    format_tag, normalize_name, normalize_tag, parse_tag_names, parse_tag_str, parse_tags,
    unique_classifications, unique_tags,
};

/// Built-in tag vocabulary, used when no link carries any tag.
pub const DEFAULT_TAGS: [&str; 5] = ["设计", "开发", "工具", "阅读", "灵感"];

/// Built-in classifications. The first one is always selectable.
pub const DEFAULT_CLASSIFICATIONS: [&str; 1] = ["未分类"];

/// Substituted when a link ends up with no tags.
pub const DEFAULT_TAG: &str = DEFAULT_TAGS[0];

/// Substituted when a link has no usable classification.
pub const DEFAULT_CLASSIFICATION: &str = DEFAULT_CLASSIFICATIONS[0];
