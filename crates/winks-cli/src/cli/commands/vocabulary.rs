//! `winks tag …` / `winks classification …` – vocabulary listing and deletion.

use anyhow::Result;
use winks_core::library::{Library, VocabularyDeletion};
use winks_core::link_meta::format_tag;
use winks_core::store::LinkStore;

pub fn run_tag_list<S: LinkStore>(library: &Library<S>) {
    for tag in library.tags() {
        println!("{}", format_tag(tag));
    }
}

pub fn run_classification_list<S: LinkStore>(library: &Library<S>) {
    for classification in library.classifications() {
        println!("{classification}");
    }
}

pub async fn run_tag_delete<S: LinkStore>(library: &mut Library<S>, name: &str) -> Result<()> {
    let outcome = library.delete_tag(name).await?;
    report("tag", name, &outcome);
    Ok(())
}

pub async fn run_classification_delete<S: LinkStore>(
    library: &mut Library<S>,
    name: &str,
) -> Result<()> {
    let outcome = library.delete_classification(name).await?;
    report("classification", name, &outcome);
    Ok(())
}

fn report(kind: &str, requested: &str, outcome: &VocabularyDeletion) {
    match outcome {
        VocabularyDeletion::NotPresent => println!("No {kind} named {requested:?}; nothing changed."),
        VocabularyDeletion::Deleted {
            name,
            fallback,
            rewritten,
        } => {
            println!("Deleted {kind} {name}");
            if !rewritten.is_empty() {
                println!("  {} link(s) updated (fallback: {fallback})", rewritten.len());
            }
        }
    }
}
