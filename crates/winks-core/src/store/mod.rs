//! Link persistence.
//!
//! Every backend stores the same row shape: `title`, `url`, and the opaque
//! `category` column produced by [`encode_link_meta`](crate::link_meta::encode_link_meta).
//! Backends never interpret `category`; hydration happens in the library.

mod db;
mod memory;
mod read;
mod rest;
mod write;

pub use db::SqliteStore;
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use write::ImportRow;

use anyhow::Result;
use serde::Serialize;

use crate::config::{StoreBackend, WinksConfig};
use crate::link_meta::{LinkId, LinkRecord};

/// Payload written on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRow {
    pub title: String,
    pub url: String,
    pub category: String,
}

/// Operations the library needs from a backend.
#[allow(async_fn_in_trait)]
pub trait LinkStore {
    /// All rows, newest first.
    async fn fetch_all(&self) -> Result<Vec<LinkRecord>>;

    /// Insert a row and return it as stored (with its new id).
    async fn insert(&self, row: &LinkRow) -> Result<LinkRecord>;

    /// Overwrite title, url and category. `None` if no row has this id.
    async fn update(&self, id: LinkId, row: &LinkRow) -> Result<Option<LinkRecord>>;

    /// Overwrite only the `category` column (vocabulary cascades).
    async fn update_meta(&self, id: LinkId, category: &str) -> Result<()>;

    async fn delete(&self, id: LinkId) -> Result<()>;
}

/// Backend selected at runtime from config.
pub enum AnyStore {
    Sqlite(SqliteStore),
    Memory(MemoryStore),
    Rest(RestStore),
}

impl AnyStore {
    /// Open the configured backend; `demo` forces the seeded in-memory store.
    pub async fn open(cfg: &WinksConfig, demo: bool) -> Result<Self> {
        let backend = if demo { StoreBackend::Memory } else { cfg.backend };
        tracing::debug!(?backend, "opening link store");
        Ok(match backend {
            StoreBackend::Sqlite => match &cfg.database_path {
                Some(path) => AnyStore::Sqlite(SqliteStore::open_at(path).await?),
                None => AnyStore::Sqlite(SqliteStore::open_default().await?),
            },
            StoreBackend::Memory => AnyStore::Memory(MemoryStore::demo()),
            StoreBackend::Rest => AnyStore::Rest(RestStore::new(cfg.rest_endpoint()?)),
        })
    }

    pub fn backend(&self) -> StoreBackend {
        match self {
            AnyStore::Sqlite(_) => StoreBackend::Sqlite,
            AnyStore::Memory(_) => StoreBackend::Memory,
            AnyStore::Rest(_) => StoreBackend::Rest,
        }
    }

    pub fn as_sqlite(&self) -> Option<&SqliteStore> {
        match self {
            AnyStore::Sqlite(db) => Some(db),
            _ => None,
        }
    }
}

impl LinkStore for AnyStore {
    async fn fetch_all(&self) -> Result<Vec<LinkRecord>> {
        match self {
            AnyStore::Sqlite(s) => s.fetch_all().await,
            AnyStore::Memory(s) => s.fetch_all().await,
            AnyStore::Rest(s) => s.fetch_all().await,
        }
    }

    async fn insert(&self, row: &LinkRow) -> Result<LinkRecord> {
        match self {
            AnyStore::Sqlite(s) => s.insert(row).await,
            AnyStore::Memory(s) => s.insert(row).await,
            AnyStore::Rest(s) => s.insert(row).await,
        }
    }

    async fn update(&self, id: LinkId, row: &LinkRow) -> Result<Option<LinkRecord>> {
        match self {
            AnyStore::Sqlite(s) => s.update(id, row).await,
            AnyStore::Memory(s) => s.update(id, row).await,
            AnyStore::Rest(s) => s.update(id, row).await,
        }
    }

    async fn update_meta(&self, id: LinkId, category: &str) -> Result<()> {
        match self {
            AnyStore::Sqlite(s) => s.update_meta(id, category).await,
            AnyStore::Memory(s) => s.update_meta(id, category).await,
            AnyStore::Rest(s) => s.update_meta(id, category).await,
        }
    }

    async fn delete(&self, id: LinkId) -> Result<()> {
        match self {
            AnyStore::Sqlite(s) => s.delete(id).await,
            AnyStore::Memory(s) => s.delete(id).await,
            AnyStore::Rest(s) => s.delete(id).await,
        }
    }
}

#[cfg(test)]
mod tests;
