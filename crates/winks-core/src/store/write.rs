//! Link write operations: insert, update, delete, import, legacy migration.

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

use super::db::{unix_timestamp, SqliteStore};
use super::LinkRow;
use crate::link_meta::{
    decode_link_meta, encode_link_meta, hydrate_link, parse_tags, LinkId, LinkRecord,
};

/// Row from an exported links table (e.g. a hosted-table JSON dump).
///
/// `category` and `tags` are stored untouched; legacy values are hydrated on
/// read and can be rewritten with [`SqliteStore::migrate_legacy_rows`].
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRow {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Value>,
}

/// Text form of a legacy `tags` value for the TEXT column.
fn tags_column(tags: &Value) -> Option<String> {
    match tags {
        Value::String(s) => Some(s.clone()),
        Value::Array(_) => Some(parse_tags(tags).join(",")),
        _ => None,
    }
}

impl SqliteStore {
    /// Insert a new link row and return its id.
    pub async fn insert_row(&self, row: &LinkRow) -> Result<LinkId> {
        let now = unix_timestamp();
        let row_id = sqlx::query(
            r#"
            INSERT INTO links (title, url, category, tags, created_at)
            VALUES (?1, ?2, ?3, NULL, ?4)
            "#,
        )
        .bind(&row.title)
        .bind(&row.url)
        .bind(&row.category)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        tracing::debug!(id = row_id, url = %row.url, "inserted link");
        Ok(row_id)
    }

    /// Overwrite title, url and category. Returns false if no row matched.
    pub async fn update_row(&self, id: LinkId, row: &LinkRow) -> Result<bool> {
        let r = sqlx::query(
            r#"
            UPDATE links
            SET title = ?1,
                url = ?2,
                category = ?3,
                tags = NULL
            WHERE id = ?4
            "#,
        )
        .bind(&row.title)
        .bind(&row.url)
        .bind(&row.category)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(r.rows_affected() > 0)
    }

    /// Overwrite only the metadata envelope.
    pub async fn update_category(&self, id: LinkId, category: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE links
            SET category = ?1,
                tags = NULL
            WHERE id = ?2
            "#,
        )
        .bind(category)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Permanently remove a link row.
    pub async fn delete_row(&self, id: LinkId) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM links
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert exported rows as-is. `rows` is expected newest first, as the
    /// hosted table lists them; listing order is preserved.
    pub async fn import_rows(&self, rows: &[ImportRow]) -> Result<usize> {
        let now = unix_timestamp();
        let mut tx = self.pool.begin().await?;
        for row in rows.iter().rev() {
            sqlx::query(
                r#"
                INSERT INTO links (title, url, category, tags, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&row.title)
            .bind(&row.url)
            .bind(&row.category)
            .bind(row.tags.as_ref().and_then(tags_column))
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        tracing::info!(count = rows.len(), "imported link rows");
        Ok(rows.len())
    }

    /// One-time migration: rewrite every row without a valid envelope (legacy
    /// text, missing, or corrupted `category`, or a populated `tags` column)
    /// into the envelope form. Returns the number of rows rewritten.
    pub async fn migrate_legacy_rows(&self) -> Result<usize> {
        let records = self.list_rows().await?;
        let legacy: Vec<&LinkRecord> = records
            .iter()
            .filter(|r| r.tags.is_some() || decode_link_meta(r.category.as_deref()).is_none())
            .collect();

        let mut tx = self.pool.begin().await?;
        for record in &legacy {
            let link = hydrate_link(record);
            let category = encode_link_meta(&link.classification, &link.tags);
            sqlx::query(
                r#"
                UPDATE links
                SET category = ?1,
                    tags = NULL
                WHERE id = ?2
                "#,
            )
            .bind(category)
            .bind(record.id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        if !legacy.is_empty() {
            tracing::info!(count = legacy.len(), "migrated legacy link rows");
        }
        Ok(legacy.len())
    }
}
