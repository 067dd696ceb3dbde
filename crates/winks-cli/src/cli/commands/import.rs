//! `winks import <path>` and `winks migrate` – SQLite maintenance.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use winks_core::store::{AnyStore, ImportRow, SqliteStore};

fn sqlite_only<'a>(store: &'a AnyStore, command: &str) -> Result<&'a SqliteStore> {
    store.as_sqlite().ok_or_else(|| {
        anyhow!(
            "{command} needs the sqlite backend (current: {:?})",
            store.backend()
        )
    })
}

pub async fn run_import(store: &AnyStore, path: &Path) -> Result<()> {
    let db = sqlite_only(store, "import")?;
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    let rows: Vec<ImportRow> =
        serde_json::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    let count = db.import_rows(&rows).await?;
    println!("Imported {count} link(s) from {}", path.display());
    Ok(())
}

pub async fn run_migrate(store: &AnyStore) -> Result<()> {
    let db = sqlite_only(store, "migrate")?;
    match db.migrate_legacy_rows().await? {
        0 => println!("All links already use the metadata envelope."),
        n => println!("Migrated {n} legacy link(s)."),
    }
    Ok(())
}
