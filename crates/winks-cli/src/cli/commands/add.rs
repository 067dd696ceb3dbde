//! `winks add <title> <url>` – add a link.

use anyhow::Result;
use winks_core::library::{Library, LinkDraft};
use winks_core::link_meta::format_tag;
use winks_core::store::LinkStore;

use super::split_tag_args;

#[derive(Debug, Clone)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub classification: Option<String>,
    pub tags: Vec<String>,
}

pub async fn run_add<S: LinkStore>(library: &mut Library<S>, new: NewLink) -> Result<()> {
    let draft = LinkDraft {
        title: new.title,
        url: new.url,
        classification: new.classification.unwrap_or_default(),
        tags: split_tag_args(&new.tags),
    };
    let link = library.create_link(draft).await?;
    let tags: Vec<String> = link.tags.iter().map(|t| format_tag(t)).collect();
    println!(
        "Added link {} [{}] {}: {}",
        link.id,
        link.classification,
        tags.join(" "),
        link.url
    );
    Ok(())
}
