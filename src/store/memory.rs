//! In-memory [`SourceStore`] implementation for tests.
//!
//! Records live in a `Vec` behind `std::sync::RwLock`, kept in insertion
//! order so listings are deterministic.

use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{SourceItem, SourceRecord};

use super::{merge_into, SourceStore};

/// In-memory store.
pub struct InMemoryStore {
    records: RwLock<Vec<SourceRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Insert a fully formed record, replacing any record with the same id.
    pub fn insert(&self, record: SourceRecord) {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.retain(|r| r.id != record.id);
        records.push(record);
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceStore for InMemoryStore {
    async fn fetch_source(&self, id: &str) -> Result<Option<SourceRecord>> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn merge_metadata(&self, id: &str, patch: Map<String, Value>) -> Result<()> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| anyhow!("source not found: {}", id))?;
        merge_into(&mut record.metadata, patch);
        record.updated_at = chrono::Utc::now().timestamp();
        Ok(())
    }

    async fn upsert_source(&self, item: &SourceItem) -> Result<String> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        let ts = item.updated_at.timestamp();

        if let Some(existing) = records
            .iter_mut()
            .find(|r| r.file_path.as_deref() == Some(item.file_path.as_str()))
        {
            existing.title = item.title.clone();
            existing.content = Some(item.content.clone());
            existing.summary = item.summary.clone();
            existing.updated_at = ts;
            return Ok(existing.id.clone());
        }

        let id = Uuid::new_v4().to_string();
        records.push(SourceRecord {
            id: id.clone(),
            title: item.title.clone(),
            content: Some(item.content.clone()),
            summary: item.summary.clone(),
            file_path: Some(item.file_path.clone()),
            metadata: Value::Object(Map::new()),
            created_at: ts,
            updated_at: ts,
        });
        Ok(id)
    }

    async fn list_metadata(&self) -> Result<Vec<Value>> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.iter().map(|r| r.metadata.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn item(path: &str, content: &str) -> SourceItem {
        SourceItem {
            title: Some(path.to_string()),
            content: content.to_string(),
            summary: None,
            file_path: path.to_string(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_is_keyed_by_path() {
        let store = InMemoryStore::new();
        let a = store.upsert_source(&item("a.md", "one")).await.unwrap();
        let b = store.upsert_source(&item("a.md", "two")).await.unwrap();
        assert_eq!(a, b);

        let record = store.fetch_source(&a).await.unwrap().unwrap();
        assert_eq!(record.content.as_deref(), Some("two"));
        assert_eq!(store.list_metadata().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_merge_unknown_id_fails() {
        let store = InMemoryStore::new();
        let err = store
            .merge_metadata("missing", Map::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_merge_metadata() {
        let store = InMemoryStore::new();
        let id = store.upsert_source(&item("b.md", "text")).await.unwrap();
        let mut patch = Map::new();
        patch.insert("auto_classified".to_string(), json!(true));
        store.merge_metadata(&id, patch).await.unwrap();

        let metadata = store.list_metadata().await.unwrap();
        assert_eq!(metadata, vec![json!({ "auto_classified": true })]);
    }
}
