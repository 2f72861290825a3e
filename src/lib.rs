//! campus-webhook — fulfillment webhook for a conversational agent.
//!
//! The upstream platform classifies an utterance into an intent and POSTs
//! the result here. We decode the intent, run one lookup against the
//! record store and answer with a short fulfillment text.
//!
//! ```text
//! POST /webhook ─▶ intent::WebhookRequest ─▶ intent::dispatch ─▶ RecordStore
//!                                                  │
//!                                                  ▼
//!                                   fulfillment::FulfillmentResponse
//! ```

pub mod config;
pub mod error;
pub mod fulfillment;
pub mod handlers;
pub mod intent;
pub mod models;
pub mod router;
pub mod store;

pub use error::{LookupKind, WebhookError};
pub use fulfillment::FulfillmentResponse;
pub use intent::{dispatch, Intent, WebhookRequest};
pub use store::{MemoryStore, PgRecordStore, RecordStore};
