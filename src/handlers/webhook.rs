//! POST /webhook — fulfillment endpoint for the conversational platform.
//!
//! - known intent, record found: 200 + `fulfillmentText`
//! - known intent, no record:    404 + fixed `detail`
//! - any other intent:           400 `Unknown intent`
//! - body not decodable:         422

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use tracing::Instrument;

use crate::error::WebhookError;
use crate::fulfillment::FulfillmentResponse;
use crate::intent::{self, WebhookRequest};
use crate::store::RecordStore;

pub async fn webhook(
    Extension(store): Extension<Arc<dyn RecordStore>>,
    payload: Result<Json<WebhookRequest>, JsonRejection>,
) -> Result<Json<FulfillmentResponse>, WebhookError> {
    let Json(request) = payload.map_err(|e| WebhookError::MalformedRequest(e.body_text()))?;

    let span = tracing::info_span!(
        "webhook",
        request_id = %uuid::Uuid::new_v4(),
        intent = %request.intent_name(),
    );

    async move {
        let intent = request.into_intent();
        let resp = intent::dispatch(store.as_ref(), intent).await?;
        tracing::debug!(text = %resp.fulfillment_text, "Fulfilled");
        Ok::<_, WebhookError>(Json(resp))
    }
    .instrument(span)
    .await
}
