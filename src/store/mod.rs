//! Storage abstraction for source documents.
//!
//! The [`SourceStore`] trait covers what the auto-classify callback, the
//! ingestion command and the statistics view need from the document store.
//! [`SqliteStore`](crate::sqlite_store::SqliteStore) backs the CLI and
//! server; [`memory::InMemoryStore`] backs tests.
//!
//! Implementations must be `Send + Sync` to be shared across request handlers.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::models::{SourceItem, SourceRecord};

#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Fetch a source by id. `Ok(None)` when it does not exist.
    async fn fetch_source(&self, id: &str) -> Result<Option<SourceRecord>>;

    /// Shallow-merge `patch` into the stored metadata object.
    ///
    /// Fails with `source not found: <id>` for unknown ids.
    async fn merge_metadata(&self, id: &str, patch: Map<String, Value>) -> Result<()>;

    /// Insert or update a source keyed by its file path; returns its id.
    async fn upsert_source(&self, item: &SourceItem) -> Result<String>;

    /// Metadata objects of every stored source.
    async fn list_metadata(&self) -> Result<Vec<Value>>;
}

/// Merge `patch` into `target`, replacing `target` with an empty object first
/// if it is not one.
pub fn merge_into(target: &mut Value, patch: Map<String, Value>) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        map.extend(patch);
    }
}
