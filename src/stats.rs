//! Classification statistics.
//!
//! Read-only aggregation over the classification metadata already stored on
//! sources: how many are classified, how they split across categories and
//! languages, which crops come up most, and the mean confidence. Used by
//! `shamba stats` and `GET /stats`.

use std::collections::HashMap;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::classifier::ClassificationResult;
use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;
use crate::store::SourceStore;

/// Crops listed in [`ClassificationStats::top_crops`].
const TOP_CROPS: usize = 10;

/// A label with the number of classified sources carrying it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationStats {
    pub total_sources: u64,
    pub classified_sources: u64,
    pub by_category: Vec<Count>,
    pub by_language: Vec<Count>,
    pub top_crops: Vec<Count>,
    pub average_confidence: f64,
}

/// Most frequent first, then by name.
fn sorted_counts(counts: HashMap<String, u64>) -> Vec<Count> {
    let mut out: Vec<Count> = counts
        .into_iter()
        .map(|(name, count)| Count { name, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    out
}

/// Aggregate a list of metadata objects.
///
/// A source counts as classified when its `classification` key parses as a
/// [`ClassificationResult`].
pub fn aggregate(metadata: &[Value]) -> ClassificationStats {
    let mut by_category: HashMap<String, u64> = HashMap::new();
    let mut by_language: HashMap<String, u64> = HashMap::new();
    let mut crops: HashMap<String, u64> = HashMap::new();
    let mut classified = 0u64;
    let mut confidence_sum = 0.0;

    for meta in metadata {
        let Some(raw) = meta.get("classification") else {
            continue;
        };
        let Ok(result) = serde_json::from_value::<ClassificationResult>(raw.clone()) else {
            continue;
        };

        classified += 1;
        confidence_sum += result.confidence;
        *by_category.entry(result.category).or_default() += 1;
        *by_language
            .entry(result.language.as_str().to_string())
            .or_default() += 1;
        for crop in result.crops {
            *crops.entry(crop).or_default() += 1;
        }
    }

    let mut top_crops = sorted_counts(crops);
    top_crops.truncate(TOP_CROPS);

    ClassificationStats {
        total_sources: metadata.len() as u64,
        classified_sources: classified,
        by_category: sorted_counts(by_category),
        by_language: sorted_counts(by_language),
        top_crops,
        average_confidence: if classified > 0 {
            confidence_sum / classified as f64
        } else {
            0.0
        },
    }
}

/// Load every source's metadata from `store` and aggregate it.
pub async fn compute_stats(store: &dyn SourceStore) -> Result<ClassificationStats> {
    let metadata = store.list_metadata().await?;
    Ok(aggregate(&metadata))
}

/// Run the stats command: query the database and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let stats = compute_stats(&store).await?;

    println!("Shamba Classification Stats");
    println!("===========================");
    println!();
    println!("  Database:    {}", config.db.path.display());
    println!("  Sources:     {}", stats.total_sources);
    println!(
        "  Classified:  {} / {} ({}%)",
        stats.classified_sources,
        stats.total_sources,
        if stats.total_sources > 0 {
            (stats.classified_sources * 100) / stats.total_sources
        } else {
            0
        }
    );
    println!("  Avg conf.:   {:.2}", stats.average_confidence);

    print_counts("By category", &stats.by_category);
    print_counts("By language", &stats.by_language);
    print_counts("Top crops", &stats.top_crops);

    println!();
    pool.close().await;
    Ok(())
}

fn print_counts(heading: &str, counts: &[Count]) {
    if counts.is_empty() {
        return;
    }
    println!();
    println!("  {}:", heading);
    for c in counts {
        println!("    {:<36} {:>6}", c.name, c.count);
    }
}
