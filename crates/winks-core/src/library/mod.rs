//! The link collection as the application sees it.
//!
//! Holds hydrated links, keeps the derived vocabulary in sync after every
//! mutation, and runs the tag/classification cascades against the store.
//! Local state only changes after the store accepted every write.

mod error;

pub use error::LibraryError;

use crate::link_meta::{
    encode_link_meta, hydrate_link, normalize_name, normalize_tag, parse_tag_names, Link, LinkId,
    LinkRecord, DEFAULT_CLASSIFICATION, DEFAULT_TAG,
};
use crate::store::{LinkRow, LinkStore};
use crate::url_model::normalize_link_url;
use crate::vocabulary::Vocabulary;

/// Filter value meaning "no constraint".
pub const ALL_FILTER: &str = "全部";

/// User input for creating or editing a link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
    pub classification: String,
    pub tags: Vec<String>,
}

impl LinkDraft {
    /// Draft pre-filled from an existing link (edit form).
    pub fn from_link(link: &Link) -> Self {
        Self {
            title: link.title.clone(),
            url: link.url.clone(),
            classification: link.classification.clone(),
            tags: link.tags.clone(),
        }
    }
}

/// Result of deleting a tag or classification from the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularyDeletion {
    /// The name was not in the vocabulary; nothing changed.
    NotPresent,
    Deleted {
        name: String,
        /// Substituted where the deleted name left a link without a value.
        fallback: String,
        /// Links whose metadata was rewritten.
        rewritten: Vec<LinkId>,
    },
}

/// Classification and tag constraints for listing links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    pub classification: Option<String>,
    pub tag: Option<String>,
}

impl LinkFilter {
    pub fn new(classification: Option<&str>, tag: Option<&str>) -> Self {
        let constraint = |v: Option<&str>| {
            v.map(normalize_name)
                .filter(|s| !s.is_empty() && s != ALL_FILTER)
        };
        Self {
            classification: constraint(classification),
            tag: constraint(tag),
        }
    }

    pub fn matches(&self, link: &Link) -> bool {
        let classification_ok = self
            .classification
            .as_deref()
            .map_or(true, |c| link.classification == c);
        let tag_ok = self.tag.as_deref().map_or(true, |t| link.has_tag(t));
        classification_ok && tag_ok
    }
}

/// Link collection backed by a [`LinkStore`].
pub struct Library<S> {
    store: S,
    links: Vec<Link>,
    extra_tags: Vec<String>,
    extra_classifications: Vec<String>,
    vocabulary: Vocabulary,
}

impl<S: LinkStore> Library<S> {
    /// Fetch every row, hydrate, and derive the vocabulary.
    pub async fn load(store: S) -> Result<Self, LibraryError> {
        let mut library = Self {
            store,
            links: Vec::new(),
            extra_tags: Vec::new(),
            extra_classifications: Vec::new(),
            vocabulary: Vocabulary::default(),
        };
        library.reload().await?;
        Ok(library)
    }

    /// Re-fetch all rows from the store. Session-added names are kept.
    pub async fn reload(&mut self) -> Result<(), LibraryError> {
        let records = self
            .store
            .fetch_all()
            .await
            .map_err(|e| LibraryError::store("load links", e))?;
        self.links = records.iter().map(hydrate_link).collect();
        self.refresh_vocabulary();
        tracing::debug!(
            links = self.links.len(),
            tags = self.vocabulary.tags.len(),
            classifications = self.vocabulary.classifications.len(),
            "loaded links"
        );
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Links in display order (newest first).
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn get(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn tags(&self) -> &[String] {
        &self.vocabulary.tags
    }

    pub fn classifications(&self) -> &[String] {
        &self.vocabulary.classifications
    }

    pub fn filter(&self, filter: &LinkFilter) -> Vec<&Link> {
        self.links.iter().filter(|l| filter.matches(l)).collect()
    }

    /// Makes a tag selectable before any link uses it. Returns the
    /// normalized name, or `None` if it normalizes to nothing.
    pub fn add_tag(&mut self, name: &str) -> Option<String> {
        let tag = Some(normalize_tag(name)).filter(|t| !t.is_empty())?;
        if !self.vocabulary.has_tag(&tag) {
            self.extra_tags.push(tag.clone());
            self.refresh_vocabulary();
        }
        Some(tag)
    }

    /// Classification counterpart of [`Library::add_tag`].
    pub fn add_classification(&mut self, name: &str) -> Option<String> {
        let classification = Some(normalize_name(name)).filter(|c| !c.is_empty())?;
        if !self.vocabulary.has_classification(&classification) {
            self.extra_classifications.push(classification.clone());
            self.refresh_vocabulary();
        }
        Some(classification)
    }

    pub async fn create_link(&mut self, draft: LinkDraft) -> Result<Link, LibraryError> {
        let row = self.prepare_row(&draft)?;
        let record = self
            .store
            .insert(&row)
            .await
            .map_err(|e| LibraryError::store("create link", e))?;
        tracing::info!(id = record.id, url = %record.url, "created link");
        Ok(self.apply_record(&record))
    }

    pub async fn update_link(&mut self, id: LinkId, draft: LinkDraft) -> Result<Link, LibraryError> {
        if self.get(id).is_none() {
            return Err(LibraryError::UnknownLink(id));
        }
        let row = self.prepare_row(&draft)?;
        let record = self
            .store
            .update(id, &row)
            .await
            .map_err(|e| LibraryError::store("update link", e))?
            .ok_or(LibraryError::UnknownLink(id))?;
        tracing::info!(id, "updated link");
        Ok(self.apply_record(&record))
    }

    pub async fn delete_link(&mut self, id: LinkId) -> Result<Link, LibraryError> {
        let Some(pos) = self.links.iter().position(|l| l.id == id) else {
            return Err(LibraryError::UnknownLink(id));
        };
        self.store
            .delete(id)
            .await
            .map_err(|e| LibraryError::store("delete link", e))?;
        let removed = self.links.remove(pos);
        tracing::info!(id, "deleted link");
        self.refresh_vocabulary();
        Ok(removed)
    }

    /// Removes a tag from every link that carries it. A link left without
    /// tags gets the vocabulary's fallback tag.
    ///
    /// Refused with [`LibraryError::BuiltIn`] when the tag would still be
    /// listed afterwards (a built-in tag while no link carries any tag).
    pub async fn delete_tag(&mut self, name: &str) -> Result<VocabularyDeletion, LibraryError> {
        let tag = normalize_tag(name);
        if tag.is_empty() || !self.vocabulary.has_tag(&tag) {
            return Ok(VocabularyDeletion::NotPresent);
        }
        if self.vocabulary.tags.len() <= 1 {
            return Err(LibraryError::LastTag);
        }
        let fallback = self.vocabulary.fallback_tag(&tag);

        let mut links = self.links.clone();
        let mut rewritten = Vec::new();
        for link in links.iter_mut().filter(|l| l.has_tag(&tag)) {
            link.tags.retain(|t| *t != tag);
            if link.tags.is_empty() {
                link.tags.push(fallback.clone());
            }
            rewritten.push(link.id);
        }
        let extra_tags: Vec<String> = self.extra_tags.iter().filter(|t| **t != tag).cloned().collect();
        if Vocabulary::derive(&links, &extra_tags, &self.extra_classifications).has_tag(&tag) {
            return Err(LibraryError::BuiltIn(tag));
        }

        for link in links.iter().filter(|l| rewritten.contains(&l.id)) {
            let category = encode_link_meta(&link.classification, &link.tags);
            self.store
                .update_meta(link.id, &category)
                .await
                .map_err(|e| LibraryError::store("delete tag", e))?;
        }

        self.links = links;
        self.extra_tags = extra_tags;
        self.refresh_vocabulary();

        tracing::info!(%tag, %fallback, links = rewritten.len(), "deleted tag");
        Ok(VocabularyDeletion::Deleted {
            name: tag,
            fallback,
            rewritten,
        })
    }

    /// Moves every link in a classification to the fallback classification.
    ///
    /// The default classification is always listed, so deleting it is
    /// refused with [`LibraryError::BuiltIn`].
    pub async fn delete_classification(
        &mut self,
        name: &str,
    ) -> Result<VocabularyDeletion, LibraryError> {
        let classification = normalize_name(name);
        if classification.is_empty() || !self.vocabulary.has_classification(&classification) {
            return Ok(VocabularyDeletion::NotPresent);
        }
        if self.vocabulary.classifications.len() <= 1 {
            return Err(LibraryError::LastClassification);
        }
        let fallback = self.vocabulary.fallback_classification(&classification);

        let mut links = self.links.clone();
        let mut rewritten = Vec::new();
        for link in links.iter_mut().filter(|l| l.classification == classification) {
            link.classification = fallback.clone();
            rewritten.push(link.id);
        }
        let extra_classifications: Vec<String> = self
            .extra_classifications
            .iter()
            .filter(|c| **c != classification)
            .cloned()
            .collect();
        if Vocabulary::derive(&links, &self.extra_tags, &extra_classifications)
            .has_classification(&classification)
        {
            return Err(LibraryError::BuiltIn(classification));
        }

        for link in links.iter().filter(|l| rewritten.contains(&l.id)) {
            let category = encode_link_meta(&link.classification, &link.tags);
            self.store
                .update_meta(link.id, &category)
                .await
                .map_err(|e| LibraryError::store("delete classification", e))?;
        }

        self.links = links;
        self.extra_classifications = extra_classifications;
        self.refresh_vocabulary();

        tracing::info!(%classification, %fallback, links = rewritten.len(), "deleted classification");
        Ok(VocabularyDeletion::Deleted {
            name: classification,
            fallback,
            rewritten,
        })
    }

    /// Normalizes a draft into the row written to the store.
    fn prepare_row(&self, draft: &LinkDraft) -> Result<LinkRow, LibraryError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(LibraryError::EmptyField("title"));
        }
        if draft.url.trim().is_empty() {
            return Err(LibraryError::EmptyField("url"));
        }

        let mut tags = parse_tag_names(&draft.tags);
        if tags.is_empty() {
            let first = self.vocabulary.tags.first().map(String::as_str);
            tags.push(first.unwrap_or(DEFAULT_TAG).to_string());
        }
        let classification = Some(normalize_name(&draft.classification))
            .filter(|c| !c.is_empty())
            .or_else(|| self.vocabulary.classifications.first().cloned())
            .unwrap_or_else(|| DEFAULT_CLASSIFICATION.to_string());

        Ok(LinkRow {
            title: title.to_string(),
            url: normalize_link_url(&draft.url),
            category: encode_link_meta(&classification, &tags),
        })
    }

    /// Replaces (or prepends) the hydrated form of a stored row.
    fn apply_record(&mut self, record: &LinkRecord) -> Link {
        let link = hydrate_link(record);
        match self.links.iter_mut().find(|l| l.id == link.id) {
            Some(existing) => *existing = link.clone(),
            None => self.links.insert(0, link.clone()),
        }
        self.refresh_vocabulary();
        link
    }

    fn refresh_vocabulary(&mut self) {
        self.vocabulary =
            Vocabulary::derive(&self.links, &self.extra_tags, &self.extra_classifications);
    }
}
