//! `winks list` – show links, optionally filtered.

use anyhow::Result;
use serde_json::Value;
use winks_core::library::{Library, LinkFilter};
use winks_core::link_meta::{format_tag, Link};
use winks_core::store::LinkStore;
use winks_core::url_model::favicon_url;

#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub classification: Option<String>,
    pub tag: Option<String>,
    pub json: bool,
}

pub fn run_list<S: LinkStore>(library: &Library<S>, args: &ListArgs) -> Result<()> {
    let filter = LinkFilter::new(args.classification.as_deref(), args.tag.as_deref());
    let links = library.filter(&filter);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&links_json(&links)?)?);
        return Ok(());
    }

    if links.is_empty() {
        println!("No links.");
        return Ok(());
    }
    println!("{:<6} {:<10} {}", "ID", "CLASS", "TITLE");
    for link in links {
        println!("{:<6} {:<10} {}", link.id, link.classification, link.title);
        println!("{:<6} {:<10} {}", "", "", link.url);
        println!("{:<6} {:<10} {}", "", "", tag_line(link));
    }
    Ok(())
}

fn tag_line(link: &Link) -> String {
    link.tags
        .iter()
        .map(|t| format_tag(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Links as JSON objects with the derived favicon URL added.
fn links_json(links: &[&Link]) -> Result<Value> {
    let items = links
        .iter()
        .map(|link| -> Result<Value> {
            let mut value = serde_json::to_value(link)?;
            value["favicon"] = favicon_url(&link.url).map_or(Value::Null, Value::String);
            Ok(value)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(items))
}
