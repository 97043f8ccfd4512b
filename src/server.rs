//! HTTP server for the auto-classify callback.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/classify` | Classify a source and store the result in its metadata |
//! | `GET`  | `/stats` | Aggregated classification statistics |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! Callback errors use the shape the ingestion trigger expects:
//!
//! ```json
//! { "error": "sourceId is required", "success": false }
//! ```
//!
//! Missing `sourceId` and malformed bodies are `400`; a failed metadata
//! write is `500`.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted; `OPTIONS` preflights are
//! answered with an empty `200`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auto_classify::{handle_classify, CallbackError, ClassifyRequest, ClassifyResponse};
use crate::classifier::Clock;
use crate::config::Config;
use crate::db;
use crate::migrate;
use crate::sqlite_store::SqliteStore;
use crate::stats::{compute_stats, ClassificationStats};
use crate::store::SourceStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SourceStore>,
    pub clock: Arc<dyn Clock>,
}

/// Build the router. Split out from [`run_server`] so tests can drive it
/// without binding a socket.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/classify", post(handle_classify_request))
        .route("/stats", get(handle_stats))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server on `[server].bind` and run until the process exits.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    migrate::apply(&pool).await?;

    let state = AppState {
        store: Arc::new(SqliteStore::new(pool)),
        clock: Arc::new(config.classifier.clock()),
    };

    let bind_addr = &config.server.bind;
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(bind = %bind_addr, "shamba server listening");
    println!("Shamba server listening on http://{}", bind_addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    success: bool,
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        let status = match &self {
            CallbackError::MissingSourceId | CallbackError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            CallbackError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "classification callback failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}

/// Internal error for non-callback endpoints.
struct InternalError(anyhow::Error);

impl IntoResponse for InternalError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");
        let body = ErrorBody {
            error: self.0.to_string(),
            success: false,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /classify ============

async fn handle_classify_request(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, CallbackError> {
    let Json(request) = payload.map_err(|e| CallbackError::InvalidBody(e.body_text()))?;
    let response = handle_classify(state.store.as_ref(), state.clock.as_ref(), request).await?;
    Ok(Json(response))
}

// ============ GET /stats ============

async fn handle_stats(
    State(state): State<AppState>,
) -> Result<Json<ClassificationStats>, InternalError> {
    let stats = compute_stats(state.store.as_ref())
        .await
        .map_err(InternalError)?;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FixedClock;
    use crate::models::SourceRecord;
    use crate::store::memory::InMemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn state_with(store: InMemoryStore) -> (AppState, Arc<InMemoryStore>) {
        let store = Arc::new(store);
        let state = AppState {
            store: store.clone(),
            clock: Arc::new(FixedClock(4)),
        };
        (state, store)
    }

    fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert(SourceRecord {
            id: "doc-1".to_string(),
            title: Some("Rice irrigation".to_string()),
            content: Some("Umwagiliaji wa mpunga in Mbeya".to_string()),
            summary: None,
            file_path: None,
            metadata: json!({}),
            created_at: 0,
            updated_at: 0,
        });
        store
    }

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/classify")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_classify_success() {
        let (state, store) = state_with(seeded());
        let (status, body) = call(router(state), post_json(r#"{"sourceId":"doc-1"}"#)).await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["sourceId"], "doc-1");
        assert_eq!(json["classification"]["crops"], json!(["rice"]));
        assert_eq!(
            json["classification"]["category"],
            "Soil and Water Management"
        );

        let metadata = store.list_metadata().await.unwrap();
        assert_eq!(metadata[0]["auto_classified"], true);
    }

    #[tokio::test]
    async fn test_missing_source_id_is_400() {
        let (state, _) = state_with(seeded());
        let (status, body) = call(router(state), post_json(r#"{"title":"x"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            json!({ "error": "sourceId is required", "success": false })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let (state, _) = state_with(seeded());
        let (status, body) = call(router(state), post_json("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_persistence_failure_is_500() {
        let (state, _) = state_with(seeded());
        let (status, body) = call(
            router(state),
            post_json(r#"{"sourceId":"missing","content":"maize"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("source not found"));
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let (state, _) = state_with(seeded());
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/classify")
            .header(header::ORIGIN, "https://app.example.org")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let res = router(state).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let (state, _) = state_with(seeded());
        let app = router(state);
        call(app.clone(), post_json(r#"{"sourceId":"doc-1"}"#)).await;

        let req = Request::builder()
            .uri("/stats")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(app, req).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["total_sources"], 1);
        assert_eq!(json["classified_sources"], 1);
        assert_eq!(json["top_crops"][0]["name"], "rice");
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = state_with(InMemoryStore::new());
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(router(state), req).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }
}
