//! Core data models for stored sources.
//!
//! A *source* is a document the knowledge base owns: a title, its extracted
//! text, an optional summary, and a free-form JSON metadata object that the
//! classifier writes into.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Raw item produced by a connector before it is stored.
#[derive(Debug, Clone)]
pub struct SourceItem {
    pub title: Option<String>,
    pub content: String,
    pub summary: Option<String>,
    /// Path relative to the connector root; the upsert key.
    pub file_path: String,
    pub updated_at: DateTime<Utc>,
}

/// Source record as held by a [`SourceStore`](crate::store::SourceStore).
#[derive(Debug, Clone, Serialize)]
pub struct SourceRecord {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub file_path: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: i64,
    pub updated_at: i64,
}

impl SourceRecord {
    /// Stored text to classify: content, falling back to the summary.
    pub fn text(&self) -> Option<&str> {
        [self.content.as_deref(), self.summary.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}
