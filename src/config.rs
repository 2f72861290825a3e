//! Server configuration.
//!
//! Every option can be given as a flag or an environment variable; a `.env`
//! file in the working directory is loaded first when present.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::store::StoreConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "campus_webhook")]
#[command(version)]
#[command(about = "Fulfillment webhook answering CGPA and syllabus intents")]
pub struct ServerConfig {
    /// Postgres connection string
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgresql://localhost:5432/campus"
    )]
    pub database_url: String,

    /// Listen address
    #[arg(long, env = "WEBHOOK_BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: SocketAddr,

    /// Upper bound on pooled store connections
    #[arg(long, env = "WEBHOOK_DB_POOL_SIZE", default_value_t = 10)]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection before failing the request
    #[arg(long, env = "WEBHOOK_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 30)]
    pub acquire_timeout_secs: u64,

    /// Do not create the lookup tables at startup
    #[arg(long, env = "WEBHOOK_SKIP_SCHEMA")]
    pub skip_schema: bool,
}

impl ServerConfig {
    /// Load `.env` (if any), then parse flags and environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}
