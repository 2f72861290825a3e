//! Router construction for the webhook server.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::store::RecordStore;

/// Build the axum router with the store attached as shared state.
pub fn build_router(store: Arc<dyn RecordStore>) -> Router {
    Router::new()
        .route("/webhook", post(handlers::webhook::webhook))
        .route("/health", get(handlers::health::health))
        .layer(Extension(store))
        .layer(TraceLayer::new_for_http())
}
