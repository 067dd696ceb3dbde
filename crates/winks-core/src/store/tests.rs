//! Tests for the SQLite and memory stores (use in-memory DB helper from db).

use serde_json::json;

use super::db::open_memory;
use super::{ImportRow, LinkRow, LinkStore, MemoryStore};
use crate::link_meta::{decode_link_meta, encode_link_meta, hydrate_link};

fn row(title: &str, url: &str, classification: &str, tags: &[&str]) -> LinkRow {
    LinkRow {
        title: title.to_string(),
        url: url.to_string(),
        category: encode_link_meta(classification, tags.iter()),
    }
}

#[tokio::test]
async fn insert_list_delete_links() {
    let db = open_memory().await.unwrap();
    assert!(db.fetch_all().await.unwrap().is_empty());

    let a = db
        .insert(&row("A", "https://a.com", "开发", &["开发"]))
        .await
        .unwrap();
    let b = db
        .insert(&row("B", "https://b.com", "设计", &["设计"]))
        .await
        .unwrap();
    assert_eq!(a.title, "A");
    assert!(a.category.as_deref().is_some_and(|c| decode_link_meta(Some(c)).is_some()));

    let rows = db.fetch_all().await.unwrap();
    assert_eq!(rows.len(), 2);
    // Newest first
    assert_eq!(rows[0].id, b.id);
    assert_eq!(rows[1].id, a.id);

    db.delete(a.id).await.unwrap();
    let rows = db.fetch_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, b.id);
}

#[tokio::test]
async fn update_returns_stored_row() {
    let db = open_memory().await.unwrap();
    let a = db
        .insert(&row("A", "https://a.com", "开发", &["开发"]))
        .await
        .unwrap();

    let updated = db
        .update(a.id, &row("A2", "https://a2.com", "设计", &["灵感"]))
        .await
        .unwrap()
        .expect("row exists");
    assert_eq!(updated.id, a.id);
    assert_eq!(updated.title, "A2");
    let link = hydrate_link(&updated);
    assert_eq!(link.classification, "设计");
    assert_eq!(link.tags, vec!["灵感"]);

    assert!(db
        .update(9999, &row("x", "https://x", "a", &["b"]))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn update_meta_rewrites_only_category() {
    let db = open_memory().await.unwrap();
    let a = db
        .insert(&row("A", "https://a.com", "开发", &["开发", "工具"]))
        .await
        .unwrap();
    db.update_meta(a.id, &encode_link_meta("开发", ["开发"]))
        .await
        .unwrap();
    let stored = db.get_row(a.id).await.unwrap().expect("row exists");
    assert_eq!(stored.title, "A");
    assert_eq!(hydrate_link(&stored).tags, vec!["开发"]);
}

#[tokio::test]
async fn import_keeps_legacy_values_and_order() {
    let db = open_memory().await.unwrap();
    let rows: Vec<ImportRow> = serde_json::from_value(json!([
        {"title": "Newest", "url": "https://n.com", "category": "开发,工具"},
        {"title": "Middle", "url": "https://m.com", "category": null, "tags": ["阅读", "#灵感"]},
        {"title": "Oldest", "url": "https://o.com", "category": encode_link_meta("设计", ["设计"])}
    ]))
    .unwrap();
    assert_eq!(db.import_rows(&rows).await.unwrap(), 3);

    let stored = db.fetch_all().await.unwrap();
    let titles: Vec<&str> = stored.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    assert_eq!(stored[0].category.as_deref(), Some("开发,工具"));
    assert_eq!(hydrate_link(&stored[0]).tags, vec!["开发", "工具"]);
    assert_eq!(hydrate_link(&stored[1]).tags, vec!["阅读", "灵感"]);
}

#[tokio::test]
async fn migrate_legacy_rows_rewrites_to_envelope() {
    let db = open_memory().await.unwrap();
    let rows: Vec<ImportRow> = serde_json::from_value(json!([
        {"title": "Legacy", "url": "https://l.com", "category": "开发，工具"},
        {"title": "Broken", "url": "https://b.com", "category": "__WINKS_META__{oops"},
        {"title": "Current", "url": "https://c.com", "category": encode_link_meta("设计", ["设计"])}
    ]))
    .unwrap();
    db.import_rows(&rows).await.unwrap();
    let before: Vec<_> = db
        .fetch_all()
        .await
        .unwrap()
        .iter()
        .map(hydrate_link)
        .collect();

    assert_eq!(db.migrate_legacy_rows().await.unwrap(), 2);
    // Second run has nothing left to do.
    assert_eq!(db.migrate_legacy_rows().await.unwrap(), 0);

    let after = db.fetch_all().await.unwrap();
    for record in &after {
        assert!(decode_link_meta(record.category.as_deref()).is_some());
        assert!(record.tags.is_none());
    }
    let after: Vec<_> = after.iter().map(hydrate_link).collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn memory_store_demo_seed() {
    let store = MemoryStore::demo();
    let rows = store.fetch_all().await.unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].title, "Supabase");
    let linear = hydrate_link(&rows[4]);
    assert_eq!(linear.classification, "工具");
    assert_eq!(linear.tags, vec!["工具"]);
}

#[tokio::test]
async fn memory_store_crud() {
    let store = MemoryStore::new();
    let a = store
        .insert(&row("A", "https://a.com", "开发", &["开发"]))
        .await
        .unwrap();
    let b = store
        .insert(&row("B", "https://b.com", "开发", &["开发"]))
        .await
        .unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(store.fetch_all().await.unwrap()[0].id, b.id);

    store
        .update_meta(a.id, &encode_link_meta("设计", ["设计"]))
        .await
        .unwrap();
    let rows = store.fetch_all().await.unwrap();
    assert_eq!(hydrate_link(&rows[1]).classification, "设计");

    assert!(store
        .update(42, &row("x", "https://x", "a", &["b"]))
        .await
        .unwrap()
        .is_none());

    store.delete(b.id).await.unwrap();
    assert_eq!(store.fetch_all().await.unwrap().len(), 1);
}
