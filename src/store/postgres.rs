//! Postgres-backed RecordStore.
//!
//! One pool is built at startup and shared by every request. Each lookup
//! acquires a single connection for the duration of its query; the
//! connection goes back to the pool when the lookup returns.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use tracing::{debug, info, warn};

use super::RecordStore;
use crate::models::{CgpaRecord, SyllabusRecord};

const CREATE_CGPA_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS cgpa (
        id SERIAL PRIMARY KEY,
        roll_no VARCHAR UNIQUE,
        cgpa NUMERIC
    )
"#;

const CREATE_SYLLABUS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS syllabus (
        id SERIAL PRIMARY KEY,
        branch VARCHAR,
        semester VARCHAR,
        syllabus_file VARCHAR
    )
"#;

/// Connection settings for the store pool.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Build the pool. SQL statements are echoed at debug level.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        info!(
            "Connecting to database: {}",
            mask_database_url(&config.database_url)
        );

        let options = PgConnectOptions::from_str(&config.database_url)
            .context("Invalid database URL")?
            .log_statements(log::LevelFilter::Debug);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                e
            })
            .context("Failed to connect to database")?;

        info!("Database connection pool created successfully");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the lookup tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_CGPA_TABLE)
            .execute(&self.pool)
            .await
            .context("Failed to create cgpa table")?;
        sqlx::query(CREATE_SYLLABUS_TABLE)
            .execute(&self.pool)
            .await
            .context("Failed to create syllabus table")?;

        info!("Store schema verified (cgpa, syllabus)");
        Ok(())
    }

    pub async fn close(self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_cgpa(&self, roll_no: &str) -> Result<Option<Decimal>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire store connection")?;

        // The column may be FLOAT8 or NUMERIC depending on who created the table.
        let record = sqlx::query_as::<_, CgpaRecord>(
            r#"
            SELECT id, roll_no, cgpa::numeric AS cgpa
            FROM cgpa
            WHERE roll_no = $1
            LIMIT 1
            "#,
        )
        .bind(roll_no)
        .fetch_optional(&mut *conn)
        .await
        .context("Failed to fetch cgpa by roll_no")?;

        debug!(roll_no, found = record.is_some(), "cgpa lookup");
        Ok(record.and_then(|r| r.cgpa))
    }

    async fn find_syllabus(&self, branch: &str, semester: &str) -> Result<Option<String>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire store connection")?;

        let record = sqlx::query_as::<_, SyllabusRecord>(
            r#"
            SELECT id, branch, semester, syllabus_file
            FROM syllabus
            WHERE branch = $1 AND semester = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(branch)
        .bind(semester)
        .fetch_optional(&mut *conn)
        .await
        .context("Failed to fetch syllabus by branch and semester")?;

        debug!(branch, semester, found = record.is_some(), "syllabus lookup");
        Ok(record.and_then(|r| r.usable_file().map(str::to_string)))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .context("Store ping failed")
    }
}

/// Mask the password in a database URL for logging.
pub fn mask_database_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut masked = parsed.clone();
        if parsed.password().is_some() {
            let _ = masked.set_password(Some("***"));
        }
        masked.to_string()
    } else {
        "***".to_string()
    }
}
