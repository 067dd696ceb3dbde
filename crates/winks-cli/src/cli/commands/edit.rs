//! `winks edit <id>` – change a link's fields.

use anyhow::{anyhow, Result};
use winks_core::library::{Library, LinkDraft};
use winks_core::link_meta::LinkId;
use winks_core::store::LinkStore;

use super::split_tag_args;

/// Fields to replace; `None` / empty keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub url: Option<String>,
    pub classification: Option<String>,
    pub tags: Vec<String>,
}

impl EditArgs {
    /// Applies the given fields on top of the link's current values.
    pub fn apply(self, mut draft: LinkDraft) -> LinkDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(url) = self.url {
            draft.url = url;
        }
        if let Some(classification) = self.classification {
            draft.classification = classification;
        }
        if !self.tags.is_empty() {
            draft.tags = split_tag_args(&self.tags);
        }
        draft
    }
}

pub async fn run_edit<S: LinkStore>(
    library: &mut Library<S>,
    id: LinkId,
    args: EditArgs,
) -> Result<()> {
    let current = library
        .get(id)
        .map(LinkDraft::from_link)
        .ok_or_else(|| anyhow!("no link with id {id}"))?;
    let link = library.update_link(id, args.apply(current)).await?;
    println!("Updated link {}: {}", link.id, link.title);
    Ok(())
}
