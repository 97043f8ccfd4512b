//! SQLite-backed [`SourceStore`] implementation.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::{SourceItem, SourceRecord};
use crate::store::{merge_into, SourceStore};

/// [`SourceStore`] over the `sources` table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Stored metadata that fails to parse is treated as an empty object.
fn parse_metadata(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::Object(Map::new()))
}

fn row_to_record(row: &SqliteRow) -> SourceRecord {
    let metadata_json: String = row.get("metadata_json");
    SourceRecord {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        summary: row.get("summary"),
        file_path: row.get("file_path"),
        metadata: parse_metadata(&metadata_json),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl SourceStore for SqliteStore {
    async fn fetch_source(&self, id: &str) -> Result<Option<SourceRecord>> {
        let row = sqlx::query(
            "SELECT id, title, content, summary, file_path, metadata_json, created_at, updated_at FROM sources WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_record))
    }

    async fn merge_metadata(&self, id: &str, patch: Map<String, Value>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let current: Option<String> =
            sqlx::query_scalar("SELECT metadata_json FROM sources WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let current = current.ok_or_else(|| anyhow!("source not found: {}", id))?;

        let mut metadata = parse_metadata(&current);
        merge_into(&mut metadata, patch);

        sqlx::query("UPDATE sources SET metadata_json = ?, updated_at = ? WHERE id = ?")
            .bind(serde_json::to_string(&metadata)?)
            .bind(chrono::Utc::now().timestamp())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn upsert_source(&self, item: &SourceItem) -> Result<String> {
        let existing_id: Option<String> =
            sqlx::query_scalar("SELECT id FROM sources WHERE file_path = ?")
                .bind(&item.file_path)
                .fetch_optional(&self.pool)
                .await?;

        let id = existing_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let ts = item.updated_at.timestamp();

        sqlx::query(
            r#"
            INSERT INTO sources (id, title, content, summary, file_path, content_hash, metadata_json, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, '{}', ?, ?)
            ON CONFLICT(file_path) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                summary = excluded.summary,
                content_hash = excluded.content_hash,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&id)
        .bind(&item.title)
        .bind(&item.content)
        .bind(&item.summary)
        .bind(&item.file_path)
        .bind(content_hash(&item.content))
        .bind(ts)
        .bind(ts)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_metadata(&self) -> Result<Vec<Value>> {
        let rows: Vec<String> =
            sqlx::query_scalar("SELECT metadata_json FROM sources ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(|raw| parse_metadata(raw)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::migrate;
    use chrono::Utc;
    use serde_json::json;

    async fn store() -> SqliteStore {
        let pool = db::connect_in_memory().await.unwrap();
        migrate::apply(&pool).await.unwrap();
        SqliteStore::new(pool)
    }

    fn item(path: &str, content: &str) -> SourceItem {
        SourceItem {
            title: Some("Guide".to_string()),
            content: content.to_string(),
            summary: None,
            file_path: path.to_string(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_then_fetch() {
        let store = store().await;
        let id = store.upsert_source(&item("guides/maize.md", "mahindi")).await.unwrap();

        let record = store.fetch_source(&id).await.unwrap().unwrap();
        assert_eq!(record.title.as_deref(), Some("Guide"));
        assert_eq!(record.content.as_deref(), Some("mahindi"));
        assert_eq!(record.file_path.as_deref(), Some("guides/maize.md"));
        assert_eq!(record.metadata, json!({}));
    }

    #[tokio::test]
    async fn test_upsert_same_path_keeps_id_and_metadata() {
        let store = store().await;
        let id = store.upsert_source(&item("a.md", "one")).await.unwrap();

        let mut patch = Map::new();
        patch.insert("auto_classified".to_string(), json!(true));
        store.merge_metadata(&id, patch).await.unwrap();

        let again = store.upsert_source(&item("a.md", "two")).await.unwrap();
        assert_eq!(id, again);

        let record = store.fetch_source(&id).await.unwrap().unwrap();
        assert_eq!(record.content.as_deref(), Some("two"));
        assert_eq!(record.metadata, json!({ "auto_classified": true }));
    }

    #[tokio::test]
    async fn test_fetch_missing_is_none() {
        let store = store().await;
        assert!(store.fetch_source("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_merge_missing_fails() {
        let store = store().await;
        let err = store.merge_metadata("nope", Map::new()).await.unwrap_err();
        assert!(err.to_string().contains("source not found"));
    }

    #[tokio::test]
    async fn test_list_metadata_tolerates_bad_json() {
        let store = store().await;
        let id = store.upsert_source(&item("x.md", "text")).await.unwrap();
        sqlx::query("UPDATE sources SET metadata_json = 'not json' WHERE id = ?")
            .bind(&id)
            .execute(store.pool())
            .await
            .unwrap();

        assert_eq!(store.list_metadata().await.unwrap(), vec![json!({})]);
    }
}
