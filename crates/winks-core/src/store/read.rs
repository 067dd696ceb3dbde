//! Link read operations: list and get.

use anyhow::Result;
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::SqliteStore;
use crate::link_meta::{LinkId, LinkRecord};

fn record_from_row(row: &SqliteRow) -> LinkRecord {
    let tags: Option<String> = row.get("tags");
    LinkRecord {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        category: row.get("category"),
        tags: tags.map(Value::String),
    }
}

impl SqliteStore {
    /// List all links, newest first.
    pub async fn list_rows(&self) -> Result<Vec<LinkRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, url, category, tags
            FROM links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    /// Fetch a single link row.
    pub async fn get_row(&self, id: LinkId) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, url, category, tags
            FROM links
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(record_from_row))
    }
}
