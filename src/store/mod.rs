//! Read-only record store behind the webhook.
//!
//! The dispatcher works exclusively through [`RecordStore`], so the
//! Postgres backend and the in-memory backend used by tests are
//! interchangeable.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{mask_database_url, PgRecordStore, StoreConfig};

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// CGPA of the record whose `roll_no` equals the input.
    ///
    /// `None` when no record matches or the matched record has no value.
    async fn find_cgpa(&self, roll_no: &str) -> Result<Option<Decimal>>;

    /// Syllabus file of the first record matching both `branch` and
    /// `semester`. Duplicates resolve to the lowest id.
    ///
    /// `None` when nothing matches or the file name is empty.
    async fn find_syllabus(&self, branch: &str, semester: &str) -> Result<Option<String>>;

    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}
