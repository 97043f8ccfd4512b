//! Ingestion pipeline: connector → store → classify.
//!
//! Each scanned item is upserted as a source and classified immediately,
//! with the result merged into its metadata exactly as the auto-classify
//! callback would. A failed classification write is logged and counted but
//! does not abort the sync.

use anyhow::{bail, Result};

use crate::auto_classify::classification_metadata;
use crate::classifier::{classify_document, Clock};
use crate::config::Config;
use crate::connector_fs;
use crate::db;
use crate::migrate;
use crate::models::SourceItem;
use crate::sqlite_store::SqliteStore;
use crate::store::SourceStore;

/// Counters reported at the end of a sync.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub fetched: usize,
    pub upserted: usize,
    pub classified: usize,
    pub failed: usize,
}

pub async fn run_sync(
    config: &Config,
    connector: &str,
    dry_run: bool,
    limit: Option<usize>,
) -> Result<()> {
    let mut items = match connector {
        "filesystem" => connector_fs::scan_filesystem(config)?,
        _ => bail!("Unknown connector: '{}'. Available: filesystem", connector),
    };

    if let Some(lim) = limit {
        items.truncate(lim);
    }

    if dry_run {
        println!("sync {} (dry-run)", connector);
        println!("  items found: {}", items.len());
        return Ok(());
    }

    let pool = db::connect(config).await?;
    migrate::apply(&pool).await?;
    let store = SqliteStore::new(pool.clone());
    let clock = config.classifier.clock();

    let report = ingest_items(&store, &clock, &items).await?;

    println!("sync {}", connector);
    println!("  fetched: {} items", report.fetched);
    println!("  upserted sources: {}", report.upserted);
    println!("  classified: {}", report.classified);
    if report.failed > 0 {
        println!("  failed: {}", report.failed);
    }
    println!("ok");

    pool.close().await;
    Ok(())
}

/// Upsert and classify `items` against `store`.
///
/// Upsert errors abort; classification write errors are counted in
/// [`SyncReport::failed`].
pub async fn ingest_items(
    store: &dyn SourceStore,
    clock: &dyn Clock,
    items: &[SourceItem],
) -> Result<SyncReport> {
    let mut report = SyncReport {
        fetched: items.len(),
        ..SyncReport::default()
    };

    for item in items {
        let id = store.upsert_source(item).await?;
        report.upserted += 1;

        let title = item.title.as_deref().unwrap_or_default();
        let classification = classify_document(title, &item.content, clock);

        match store
            .merge_metadata(&id, classification_metadata(&classification))
            .await
        {
            Ok(()) => {
                tracing::debug!(
                    source_id = %id,
                    file_path = %item.file_path,
                    category = %classification.category,
                    "classified source"
                );
                report.classified += 1;
            }
            Err(e) => {
                tracing::warn!(source_id = %id, error = %e, "failed to store classification");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
