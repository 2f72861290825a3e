//! GET /health — liveness plus a store probe.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::store::RecordStore;

pub async fn health(
    Extension(store): Extension<Arc<dyn RecordStore>>,
) -> (StatusCode, Json<Value>) {
    match store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::warn!("Health probe failed: {e:#}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
