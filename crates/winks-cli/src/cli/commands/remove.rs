//! `winks remove <id>` – delete a link.

use anyhow::Result;
use winks_core::library::Library;
use winks_core::link_meta::LinkId;
use winks_core::store::LinkStore;

pub async fn run_remove<S: LinkStore>(library: &mut Library<S>, id: LinkId) -> Result<()> {
    let link = library.delete_link(id).await?;
    println!("Removed link {id} ({})", link.title);
    Ok(())
}
