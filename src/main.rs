//! campus_webhook — fulfillment webhook server.
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost:5432/campus cargo run
//!
//! curl -X POST http://localhost:8000/webhook \
//!   -H "Content-Type: application/json" \
//!   -d '{"queryResult":{"intent":{"displayName":"Check CGPA"},"parameters":{"roll_no":"21CS001"}}}'
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use campus_webhook::config::ServerConfig;
use campus_webhook::router::build_router;
use campus_webhook::store::{PgRecordStore, RecordStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,campus_webhook=debug,tower_http=debug".into()),
        )
        .init();

    let store = PgRecordStore::connect(&config.store_config()).await?;

    if config.skip_schema {
        tracing::info!("Schema creation skipped");
    } else {
        store.ensure_schema().await?;
    }

    let app = build_router(Arc::new(store.clone()) as Arc<dyn RecordStore>);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("campus_webhook listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    tracing::info!("campus_webhook stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
