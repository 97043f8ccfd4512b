//! Auto-classify callback.
//!
//! Invoked by the ingestion trigger once a source's text is available.
//! Resolves the text to classify (request body, then the stored record, then
//! the title alone), runs the classifier and merges the result into the
//! source's metadata under `classification`, together with `classified_at`
//! and `auto_classified: true`.
//!
//! Lookup failures are logged and tolerated; only a missing `sourceId` and a
//! failed metadata write are errors. Nothing is retried here.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::classifier::{classify_document, ClassificationResult, Clock};
use crate::store::SourceStore;

/// Request body, as sent by the ingestion trigger.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Successful callback response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub success: bool,
    pub classification: ClassificationResult,
    pub source_id: String,
}

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("sourceId is required")]
    MissingSourceId,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("failed to store classification: {0:#}")]
    Persistence(anyhow::Error),
}

/// Metadata patch written alongside a classification.
pub fn classification_metadata(result: &ClassificationResult) -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert("classification".to_string(), json!(result));
    patch.insert(
        "classified_at".to_string(),
        json!(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    patch.insert("auto_classified".to_string(), json!(true));
    patch
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Handle one callback request against `store`.
pub async fn handle_classify(
    store: &dyn SourceStore,
    clock: &dyn Clock,
    request: ClassifyRequest,
) -> Result<ClassifyResponse, CallbackError> {
    let source_id = non_empty(request.source_id).ok_or(CallbackError::MissingSourceId)?;

    let mut title = non_empty(request.title);
    let mut content = non_empty(request.content);

    if content.is_none() {
        match store.fetch_source(&source_id).await {
            Ok(Some(record)) => {
                content = record.text().map(str::to_string);
                if title.is_none() {
                    title = non_empty(record.title);
                }
            }
            Ok(None) => {
                tracing::warn!(source_id = %source_id, "source not found, classifying request text only");
            }
            Err(e) => {
                tracing::warn!(source_id = %source_id, error = %e, "source lookup failed, classifying request text only");
            }
        }
    }

    let title = title.unwrap_or_default();
    let content = content.unwrap_or_else(|| title.clone());

    let classification = classify_document(&title, &content, clock);

    tracing::info!(
        source_id = %source_id,
        file_path = request.file_path.as_deref().unwrap_or(""),
        category = %classification.category,
        confidence = classification.confidence,
        language = %classification.language,
        "classified source"
    );

    store
        .merge_metadata(&source_id, classification_metadata(&classification))
        .await
        .map_err(CallbackError::Persistence)?;

    Ok(ClassifyResponse {
        success: true,
        classification,
        source_id,
    })
}
