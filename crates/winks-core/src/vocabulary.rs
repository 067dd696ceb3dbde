//! Tag and classification vocabularies.
//!
//! Never persisted: both lists are recomputed from the link collection (plus
//! names added during the session) whenever the collection changes.

use crate::link_meta::{
    unique_classifications, unique_tags, Link, DEFAULT_CLASSIFICATION, DEFAULT_TAG, DEFAULT_TAGS,
};

/// Union of all link tags in first-occurrence order, or the built-in tags
/// when no link carries any.
pub fn collect_tags(links: &[Link]) -> Vec<String> {
    let tags = unique_tags(links.iter().flat_map(|l| l.tags.iter()));
    if tags.is_empty() {
        DEFAULT_TAGS.iter().map(|t| t.to_string()).collect()
    } else {
        tags
    }
}

/// Default classification first, then every classification in use.
pub fn collect_classifications(links: &[Link]) -> Vec<String> {
    unique_classifications(
        std::iter::once(DEFAULT_CLASSIFICATION).chain(links.iter().map(|l| l.classification.as_str())),
    )
}

/// Derived view handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    pub tags: Vec<String>,
    pub classifications: Vec<String>,
}

impl Vocabulary {
    /// Collected vocabularies with session-local names appended.
    pub fn derive(links: &[Link], extra_tags: &[String], extra_classifications: &[String]) -> Self {
        let tags = unique_tags(collect_tags(links).iter().chain(extra_tags));
        let classifications =
            unique_classifications(collect_classifications(links).iter().chain(extra_classifications));
        Self {
            tags,
            classifications,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn has_classification(&self, classification: &str) -> bool {
        self.classifications.iter().any(|c| c == classification)
    }

    /// Tag given to links left without tags after `deleted` is removed:
    /// the smallest remaining tag, so the choice does not depend on order.
    pub fn fallback_tag(&self, deleted: &str) -> String {
        self.tags
            .iter()
            .filter(|t| t.as_str() != deleted)
            .min()
            .cloned()
            .unwrap_or_else(|| DEFAULT_TAG.to_string())
    }

    /// Classification for links whose classification is deleted: the
    /// default one unless it is the one going away, else the smallest remaining.
    pub fn fallback_classification(&self, deleted: &str) -> String {
        if deleted != DEFAULT_CLASSIFICATION {
            return DEFAULT_CLASSIFICATION.to_string();
        }
        self.classifications
            .iter()
            .filter(|c| c.as_str() != deleted)
            .min()
            .cloned()
            .unwrap_or_else(|| DEFAULT_CLASSIFICATION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: i64, classification: &str, tags: &[&str]) -> Link {
        Link {
            id,
            title: format!("link {id}"),
            url: format!("https://example.com/{id}"),
            classification: classification.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn empty_collection_uses_defaults() {
        assert_eq!(collect_tags(&[]), DEFAULT_TAGS.to_vec());
        assert_eq!(collect_classifications(&[]), vec![DEFAULT_CLASSIFICATION]);
    }

    #[test]
    fn tags_are_union_in_first_occurrence_order() {
        let links = [link(1, "开发", &["开发", "工具"]), link(2, "设计", &["设计", "开发"])];
        assert_eq!(collect_tags(&links), vec!["开发", "工具", "设计"]);
    }

    #[test]
    fn default_classification_always_first() {
        let links = [link(1, "开发", &["a"]), link(2, DEFAULT_CLASSIFICATION, &["a"]), link(3, "设计", &["a"])];
        assert_eq!(
            collect_classifications(&links),
            vec![DEFAULT_CLASSIFICATION, "开发", "设计"]
        );
    }

    #[test]
    fn derive_appends_session_names() {
        let links = [link(1, "开发", &["工具"])];
        let vocab = Vocabulary::derive(&links, &["新".to_string(), "工具".to_string()], &["收藏".to_string()]);
        assert_eq!(vocab.tags, vec!["工具", "新"]);
        assert_eq!(vocab.classifications, vec![DEFAULT_CLASSIFICATION, "开发", "收藏"]);
    }

    #[test]
    fn fallback_tag_is_smallest_remaining() {
        let vocab = Vocabulary {
            tags: vec!["b".into(), "c".into(), "a".into()],
            classifications: vec![],
        };
        assert_eq!(vocab.fallback_tag("a"), "b");
        assert_eq!(vocab.fallback_tag("c"), "a");
        let single = Vocabulary {
            tags: vec!["a".into()],
            classifications: vec![],
        };
        assert_eq!(single.fallback_tag("a"), DEFAULT_TAG);
    }

    #[test]
    fn fallback_classification_prefers_default() {
        let vocab = Vocabulary {
            tags: vec![],
            classifications: vec![DEFAULT_CLASSIFICATION.into(), "设计".into(), "开发".into()],
        };
        assert_eq!(vocab.fallback_classification("设计"), DEFAULT_CLASSIFICATION);
        assert_eq!(vocab.fallback_classification(DEFAULT_CLASSIFICATION), "开发");
    }
}
