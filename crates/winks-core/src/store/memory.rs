//! In-memory store for demo mode. Nothing outlives the process.

use anyhow::{anyhow, Result};
use std::sync::{Mutex, MutexGuard};

use super::{LinkRow, LinkStore};
use crate::link_meta::{encode_link_meta, LinkId, LinkRecord};

#[derive(Debug, Default)]
struct MemoryTable {
    /// Newest first.
    rows: Vec<LinkRecord>,
    next_id: LinkId,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<MemoryTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the demo collection.
    pub fn demo() -> Self {
        let seed: [(&str, &str, &str, &[&str]); 5] = [
            ("Supabase", "https://supabase.com", "开发", &["开发", "工具"]),
            ("Tailwind CSS", "https://tailwindcss.com", "开发", &["开发", "设计"]),
            ("Dribbble", "https://dribbble.com", "设计", &["设计", "灵感"]),
            ("Framer", "https://framer.com", "设计", &["设计", "工具"]),
            ("Linear", "https://linear.app", "工具", &["工具"]),
        ];
        let rows: Vec<LinkRecord> = seed
            .iter()
            .zip(1..)
            .map(|((title, url, classification, tags), id)| LinkRecord {
                id,
                title: title.to_string(),
                url: url.to_string(),
                category: Some(encode_link_meta(classification, tags.iter())),
                tags: None,
            })
            .collect();
        let next_id = rows.len() as LinkId + 1;
        Self {
            table: Mutex::new(MemoryTable { rows, next_id }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryTable>> {
        self.table
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

impl LinkStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<LinkRecord>> {
        Ok(self.lock()?.rows.clone())
    }

    async fn insert(&self, row: &LinkRow) -> Result<LinkRecord> {
        let mut table = self.lock()?;
        table.next_id = table.next_id.max(1);
        let record = LinkRecord {
            id: table.next_id,
            title: row.title.clone(),
            url: row.url.clone(),
            category: Some(row.category.clone()),
            tags: None,
        };
        table.next_id += 1;
        table.rows.insert(0, record.clone());
        Ok(record)
    }

    async fn update(&self, id: LinkId, row: &LinkRow) -> Result<Option<LinkRecord>> {
        let mut table = self.lock()?;
        let Some(record) = table.rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        record.title = row.title.clone();
        record.url = row.url.clone();
        record.category = Some(row.category.clone());
        record.tags = None;
        Ok(Some(record.clone()))
    }

    async fn update_meta(&self, id: LinkId, category: &str) -> Result<()> {
        let mut table = self.lock()?;
        if let Some(record) = table.rows.iter_mut().find(|r| r.id == id) {
            record.category = Some(category.to_string());
            record.tags = None;
        }
        Ok(())
    }

    async fn delete(&self, id: LinkId) -> Result<()> {
        self.lock()?.rows.retain(|r| r.id != id);
        Ok(())
    }
}
