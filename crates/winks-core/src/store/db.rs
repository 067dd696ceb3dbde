//! SQLite-backed link table.
//!
//! Handles connection, migrations, and timestamp helpers. Row reads live in
//! `read`, writes in `write`.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::{LinkRow, LinkStore};
use crate::link_meta::{LinkId, LinkRecord};

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the SQLite link table.
///
/// The database file is stored under the XDG state directory:
/// `~/.local/state/winks/links.db` unless `database_path` is configured.
#[derive(Clone)]
pub struct SqliteStore {
    pub(crate) pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (or create) the default link database and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("winks")?;
        let state_dir = xdg_dirs.get_state_home().join("winks");
        Self::open_at(state_dir.join("links.db")).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await?;
        let db = SqliteStore { pool };
        db.migrate().await?;
        tracing::debug!(path = %path.display(), "opened link database");
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        // - `category` holds the metadata envelope (or legacy text on old rows).
        // - `tags` is only populated by imported legacy rows.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS links (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                url TEXT NOT NULL,
                category TEXT,
                tags TEXT,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS links_created_at ON links (created_at)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl LinkStore for SqliteStore {
    async fn fetch_all(&self) -> Result<Vec<LinkRecord>> {
        self.list_rows().await
    }

    async fn insert(&self, row: &LinkRow) -> Result<LinkRecord> {
        let id = self.insert_row(row).await?;
        self.get_row(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("link {id} vanished after insert"))
    }

    async fn update(&self, id: LinkId, row: &LinkRow) -> Result<Option<LinkRecord>> {
        if !self.update_row(id, row).await? {
            return Ok(None);
        }
        self.get_row(id).await
    }

    async fn update_meta(&self, id: LinkId, category: &str) -> Result<()> {
        self.update_category(id, category).await
    }

    async fn delete(&self, id: LinkId) -> Result<()> {
        self.delete_row(id).await
    }
}

/// Current time as Unix seconds (for row timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory database for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<SqliteStore> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = SqliteStore { pool };
    db.migrate().await?;
    Ok(db)
}
