//! Source retrieval by id for `shamba get`.

use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::db;
use crate::models::SourceRecord;
use crate::sqlite_store::SqliteStore;
use crate::store::SourceStore;

/// Fetch a source or fail with `source not found: <id>`.
pub async fn get_source(config: &Config, id: &str) -> Result<SourceRecord> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let record = store.fetch_source(id).await;
    pool.close().await;

    record?.ok_or_else(|| anyhow!("source not found: {}", id))
}

/// CLI entry point: print the source, its metadata and its text.
pub async fn run_get(config: &Config, id: &str) -> Result<()> {
    let source = get_source(config, id).await?;

    println!("--- Source ---");
    println!("id:           {}", source.id);
    println!(
        "title:        {}",
        source.title.as_deref().unwrap_or("(untitled)")
    );
    if let Some(ref path) = source.file_path {
        println!("file_path:    {}", path);
    }
    println!("created_at:   {}", format_ts_iso(source.created_at));
    println!("updated_at:   {}", format_ts_iso(source.updated_at));
    println!("metadata:     {}", serde_json::to_string_pretty(&source.metadata)?);
    println!();

    if let Some(ref summary) = source.summary {
        println!("--- Summary ---");
        println!("{}", summary);
        println!();
    }

    println!("--- Content ---");
    println!("{}", source.content.as_deref().unwrap_or(""));

    Ok(())
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ts.to_string())
}
